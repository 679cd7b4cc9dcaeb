//! Tab-separated edge-list input.
//!
//! One edge per line: `<vertexA>\t<vertexB>[\t<label>]`. Everything after the second tab,
//! further tabs included, is the label.

use crate::builder::GraphBuilder;
use crate::error::{Error, Result};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub label: Option<&'a str>,
}

/// Splits one input line. Returns `None` when the line has fewer than two fields.
pub fn parse_edge_line(line: &str) -> Option<EdgeRecord<'_>> {
    let mut fields = line.splitn(3, '\t');
    let source = fields.next()?;
    let target = fields.next()?;
    let label = fields.next().filter(|l| !l.is_empty());
    Some(EdgeRecord {
        source,
        target,
        label,
    })
}

/// Reads a whole edge list into a builder.
///
/// Any malformed line aborts the read: skipping it would silently produce an incomplete
/// family decomposition.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<GraphBuilder> {
    let mut b = GraphBuilder::new();
    let mut lines = 0;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        add_line(&mut b, i + 1, &line)?;
        lines += 1;
    }
    tracing::debug!(
        lines,
        vertices = b.vertex_count(),
        edges = b.edge_count(),
        "read edge list"
    );
    Ok(b)
}

pub fn parse_edge_list(text: &str) -> Result<GraphBuilder> {
    read_edge_list(text.as_bytes())
}

fn add_line(b: &mut GraphBuilder, line_no: usize, line: &str) -> Result<()> {
    let malformed = |reason| Error::MalformedLine {
        line_no,
        line: line.to_string(),
        reason,
    };

    let Some(edge) = parse_edge_line(line) else {
        return Err(malformed("expected tab-separated vertex names"));
    };
    match b.add_labeled_edge(edge.source, edge.target, edge.label) {
        Ok(_) => Ok(()),
        Err(Error::SelfLoop { .. }) => Err(malformed("self-referencing edge")),
        Err(err) => Err(err),
    }
}
