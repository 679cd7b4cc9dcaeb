use famgraph::{Error, Family, OutputFormat, parse_edge_list, parse_indented, write_families};

const REFERENCE_EDGES: &str = "\
a\tb
a\tc
a\td
a\te\t0.91
e\tf
e\tg
f\tg
g\tz\t0.5
d\th
h\ti
k\tl
l\tm\tlinked
l\tn
";

const REFERENCE_FAMILIES: &str = "\
a 4
\tb
\tc
\td
\te\t0.91
l 3
\tk
\tm\tlinked
\tn
g 2
\tf
\tz\t0.5
i 1
\th
";

fn families(edges: &str) -> Vec<Family> {
    parse_edge_list(edges).unwrap().build().collect()
}

fn render(families: &[Family], format: OutputFormat) -> String {
    let mut buf = Vec::new();
    write_families(&mut buf, families, format, false).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn reference_scenario_renders_exactly() {
    let out = render(&families(REFERENCE_EDGES), OutputFormat::Indented);
    assert_eq!(out, REFERENCE_FAMILIES);
}

#[test]
fn reference_listing_round_trips() {
    let parsed = parse_indented(REFERENCE_FAMILIES).unwrap();
    assert_eq!(parsed, families(REFERENCE_EDGES));
    assert_eq!(render(&parsed, OutputFormat::Indented), REFERENCE_FAMILIES);

    let summary: Vec<(&str, usize)> = parsed.iter().map(|f| (f.head(), f.degree())).collect();
    assert_eq!(summary, vec![("a", 4), ("l", 3), ("g", 2), ("i", 1)]);
    assert_eq!(parsed[1].members()[1].label.as_deref(), Some("linked"));
    assert_eq!(parsed[1].members()[0].label, None);
}

#[test]
fn unlabeled_and_empty_labeled_edges_print_no_label_token() {
    let out = render(&families("a\tb\na\tc\t\n"), OutputFormat::Indented);
    assert_eq!(out, "a 2\n\tb\n\tc\n");
}

#[test]
fn names_and_line_formats_cover_the_same_families() {
    let fams = families(REFERENCE_EDGES);
    assert_eq!(
        render(&fams, OutputFormat::Names),
        "a 4\n\tb\n\tc\n\td\n\te\nl 3\n\tk\n\tm\n\tn\ng 2\n\tf\n\tz\ni 1\n\th\n"
    );
    assert_eq!(
        render(&fams, OutputFormat::Line),
        "a\tb\tc\td\te\nl\tk\tm\tn\ng\tf\tz\ni\th\n"
    );
}

#[test]
fn malformed_line_reports_its_number_and_text() {
    let err = parse_edge_list("a\tb\nlonely\nc\td\n").unwrap_err();
    match err {
        Error::MalformedLine { line_no, line, .. } => {
            assert_eq!(line_no, 2);
            assert_eq!(line, "lonely");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blank_lines_are_malformed() {
    let err = parse_edge_list("a\tb\n\nc\td\n").unwrap_err();
    assert!(matches!(err, Error::MalformedLine { line_no: 2, .. }));
}

#[test]
fn self_referencing_lines_are_rejected() {
    let err = parse_edge_list("a\tb\nq\tq\tself\n").unwrap_err();
    assert!(matches!(err, Error::MalformedLine { line_no: 2, .. }));
    assert!(err.to_string().contains("self-referencing"));
}

#[test]
fn crlf_input_is_accepted() {
    let fams = families("a\tb\r\na\tc\tx\r\n");
    assert_eq!(render(&fams, OutputFormat::Indented), "a 2\n\tb\n\tc\tx\n");
}
