use famgraph::{Error, Family, FamilyGraph, GraphBuilder, Status};
use std::collections::BTreeMap;

fn reference_builder() -> GraphBuilder {
    let mut b = FamilyGraph::builder();
    for (v, w) in [
        ("a", "b"),
        ("a", "c"),
        ("a", "d"),
        ("a", "e"),
        ("e", "f"),
        ("e", "g"),
        ("f", "g"),
        ("g", "z"),
        ("d", "h"),
        ("h", "i"),
        ("k", "l"),
        ("l", "m"),
        ("l", "n"),
    ] {
        b.add_edge(v, w).unwrap();
    }
    b
}

//   -------
//  /       \
// f -- e -- g -- z      f -------- g -- z      f -------- g -- z
//      |
// c -- a -- b
//      |
//      d            ->                     ->                      ->
//      |
// i -- h                 i -- h                 i -- h             i -- h
//
// k -- l -- m            k -- l -- m
//      |                      |
//      n                      n
#[test]
fn most_connected_vertex_is_extracted_with_its_neighbors() {
    let mut g = reference_builder().build();
    assert_eq!(g.vertex_count(), 14);
    assert_eq!(g.edge_count(), 13);

    // `a` is the only vertex of degree 4.
    assert_eq!(g.extract_next().unwrap().to_string(), "a->[b,c,d,e]");

    // `g` started at degree 3 but lost `e`, so `l` goes first.
    assert_eq!(g.degree("g"), Some(2));
    assert_eq!(g.vertex("g").unwrap().built_degree(), 3);
    assert_eq!(g.extract_next().unwrap().to_string(), "l->[k,m,n]");

    assert_eq!(g.extract_next().unwrap().to_string(), "g->[f,z]");
    assert_eq!(g.extract_next().unwrap().to_string(), "i->[h]");

    assert!(!g.has_next());
    assert!(matches!(g.extract_next(), Err(Error::Exhausted)));
    assert_eq!(g.next(), None);
}

#[test]
fn invariant_holds_after_every_step() {
    let mut g = reference_builder().build();
    g.check_invariants().unwrap();
    while g.has_next() {
        g.extract_next().unwrap();
        g.check_invariants().unwrap();
    }
    assert_eq!(g.remaining(), 0);
    assert_eq!(g.families_extracted(), 4);
}

#[test]
fn extracted_degree_never_exceeds_the_current_maximum() {
    let mut g = reference_builder().build();
    while let Some(max) = g.max_degree() {
        let f = g.extract_next().unwrap();
        assert_eq!(f.degree(), max);
    }
}

fn assert_partition(families: &[Family], vertex_count: usize) {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for f in families {
        for name in f.vertex_names() {
            *seen.entry(name).or_default() += 1;
        }
    }
    assert_eq!(seen.len(), vertex_count);
    for (name, count) in seen {
        assert_eq!(count, 1, "`{name}` reported {count} times");
    }
}

#[test]
fn every_vertex_is_reported_exactly_once() {
    let g = reference_builder().build();
    let n = g.vertex_count();
    let families: Vec<Family> = g.collect();
    assert_partition(&families, n);
}

#[test]
fn pseudo_random_graphs_partition_and_keep_invariants() {
    let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut rand = move |bound: u64| {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed % bound
    };

    for round in 0..20 {
        let n = 5 + rand(60);
        let m = rand(n * 3);
        let mut b = FamilyGraph::builder();
        for _ in 0..m {
            let v = rand(n);
            let w = rand(n);
            if v == w {
                continue;
            }
            b.add_edge(&format!("v{v}"), &format!("v{w}")).unwrap();
        }

        let mut g = b.build();
        let vertex_count = g.vertex_count();
        let mut families = Vec::new();
        while let Some(max) = g.max_degree() {
            let f = g.extract_next().unwrap();
            assert_eq!(f.degree(), max, "round {round}");
            g.check_invariants().unwrap();
            families.push(f);
        }
        assert_partition(&families, vertex_count);
    }
}

#[test]
fn neighbors_of_neighbors_lose_one_degree_per_removed_vertex() {
    // `x` is adjacent to two members of `a`'s family.
    let mut b = FamilyGraph::builder();
    for (v, w) in [("a", "b"), ("a", "c"), ("a", "d"), ("b", "x"), ("c", "x"), ("x", "y")] {
        b.add_edge(v, w).unwrap();
    }
    let mut g = b.build();
    assert_eq!(g.degree("x"), Some(3));

    assert_eq!(g.extract_next().unwrap().to_string(), "a->[b,c,d]");
    assert_eq!(g.degree("x"), Some(1));
    assert_eq!(g.degree("y"), Some(1));
    g.check_invariants().unwrap();
}

#[test]
fn adjacent_siblings_are_all_removed() {
    let mut b = FamilyGraph::builder();
    for (v, w) in [("a", "b"), ("b", "c"), ("a", "c"), ("c", "d")] {
        b.add_edge(v, w).unwrap();
    }
    let mut g = b.build();

    assert_eq!(g.extract_next().unwrap().to_string(), "c->[b,a,d]");
    assert!(!g.has_next());
    for name in ["a", "b", "d"] {
        assert_eq!(g.vertex(name).unwrap().status(), Status::Member);
    }
}

#[test]
fn ties_go_to_the_vertex_bucketed_first() {
    let heads = |edges: &[(&str, &str)]| -> Vec<String> {
        let mut b = FamilyGraph::builder();
        for (v, w) in edges {
            b.add_edge(v, w).unwrap();
        }
        b.build().map(|f| f.head().to_string()).collect()
    };

    assert_eq!(
        heads(&[("x", "1"), ("x", "2"), ("y", "3"), ("y", "4")]),
        vec!["x", "y"]
    );
    assert_eq!(
        heads(&[("y", "3"), ("y", "4"), ("x", "1"), ("x", "2")]),
        vec!["y", "x"]
    );
}

#[test]
fn labels_survive_extraction_and_empty_means_none() {
    let mut b = FamilyGraph::builder();
    b.add_labeled_edge("a", "b", Some("0.97")).unwrap();
    b.add_labeled_edge("a", "c", Some("")).unwrap();
    b.add_edge("a", "d").unwrap();
    let mut g = b.build();

    let f = g.extract_next().unwrap();
    let labels: Vec<Option<&str>> = f.members().iter().map(|m| m.label.as_deref()).collect();
    assert_eq!(labels, vec![Some("0.97"), None, None]);
    assert_eq!(f.to_string(), "a->[b:0.97,c,d]");
}

#[test]
fn repeated_edges_keep_the_last_label() {
    let mut b = FamilyGraph::builder();
    b.add_labeled_edge("a", "b", Some("old")).unwrap();
    b.add_edge("a", "c").unwrap();
    b.add_labeled_edge("b", "a", Some("new")).unwrap();
    let mut g = b.build();

    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.extract_next().unwrap().to_string(), "a->[b:new,c]");
}

#[test]
fn empty_graph_is_exhausted_immediately() {
    let mut g = GraphBuilder::new().build();
    assert!(!g.has_next());
    assert!(matches!(g.extract_next(), Err(Error::Exhausted)));
    assert!(g.bucket_sizes().is_empty());
}

#[test]
fn unknown_names_have_no_degree() {
    let g = reference_builder().build();
    assert_eq!(g.degree("nope"), None);
    assert!(!g.is_extracted("nope"));
    assert!(g.vertex("nope").is_none());
}

#[test]
fn neighbors_show_only_pending_vertices() {
    let mut g = reference_builder().build();
    assert_eq!(
        g.neighbors("g").unwrap(),
        vec![("e", None), ("f", None), ("z", None)]
    );

    g.extract_next().unwrap();
    let live = g.neighbors("g").unwrap();
    assert_eq!(live, vec![("f", None), ("z", None)]);
    assert_eq!(Some(live.len()), g.degree("g"));

    // Extracted vertices have no live view, but keep everything they were built with.
    assert_eq!(g.neighbors("a"), None);
    assert_eq!(
        g.built_neighbors("a").unwrap(),
        vec![("b", None), ("c", None), ("d", None), ("e", None)]
    );
    assert_eq!(g.built_neighbors("g").unwrap().len(), 3);
    assert_eq!(g.neighbors("nope"), None);
    assert_eq!(g.built_neighbors("nope"), None);
}

#[test]
fn neighbors_carry_edge_labels() {
    let mut b = FamilyGraph::builder();
    b.add_labeled_edge("a", "b", Some("0.5")).unwrap();
    b.add_edge("a", "c").unwrap();
    let g = b.build();
    assert_eq!(
        g.neighbors("a").unwrap(),
        vec![("b", Some("0.5")), ("c", None)]
    );
    assert_eq!(g.neighbors("b").unwrap(), vec![("a", Some("0.5"))]);
}
