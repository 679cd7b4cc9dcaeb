#![forbid(unsafe_code)]

//! Family decomposition of undirected edge lists.
//!
//! Vertices are created implicitly by adding edges to a [`GraphBuilder`]. Once built, the
//! [`FamilyGraph`] is a single-pass, destructive iterator: every step picks the vertex with
//! the highest current degree, reports it together with its neighbors as a [`Family`], and
//! removes the whole family from further consideration.
//!
//! ```
//! use famgraph::FamilyGraph;
//!
//! let mut b = FamilyGraph::builder();
//! b.add_edge("a", "b")?;
//! b.add_edge("a", "c")?;
//! b.add_edge("c", "d")?;
//!
//! let heads: Vec<String> = b.build().map(|f| f.head().to_string()).collect();
//! assert_eq!(heads, vec!["a", "d"]);
//! # Ok::<(), famgraph::Error>(())
//! ```
//!
//! Vertices are kept in degree buckets (an ordered map of degree to an insertion-ordered
//! set), so re-ranking after a removal is a bucket move rather than a re-sort. Exhausting the
//! graph costs O((m + n) log D), where D is the number of distinct degrees.

pub mod builder;
pub mod edges;
pub mod error;
pub mod family;
pub mod graph;
pub mod output;
pub mod vertex;

pub use builder::GraphBuilder;
pub use edges::{EdgeRecord, parse_edge_line, parse_edge_list, read_edge_list};
pub use error::{Error, Result};
pub use family::{Family, Member};
pub use graph::FamilyGraph;
pub use output::{OutputFormat, parse_indented, write_families};
pub use vertex::{Label, Status, Vertex};
