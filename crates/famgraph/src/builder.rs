//! Edge accumulation ahead of bucketing.
//!
//! Bucketing is deferred to [`GraphBuilder::build`]: edge insertion order does not affect the
//! final degrees, so one linear pass after the last edge is enough.

use crate::error::{Error, Result};
use crate::graph::FamilyGraph;
use crate::vertex::{Vertex, VertexId};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    index: HashMap<String, VertexId>,
    edge_count: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<&mut Self> {
        self.add_labeled_edge(a, b, None)
    }

    /// Adds an undirected edge, creating either endpoint on first use.
    ///
    /// An empty label is the same as no label. Adding a pair again overwrites its label.
    /// Self-referencing edges are rejected with [`Error::SelfLoop`].
    pub fn add_labeled_edge(
        &mut self,
        a: &str,
        b: &str,
        label: Option<&str>,
    ) -> Result<&mut Self> {
        if a == b {
            return Err(Error::SelfLoop {
                name: a.to_string(),
            });
        }

        let label = label.filter(|l| !l.is_empty()).map(str::to_string);
        let va = self.intern(a);
        let vb = self.intern(b);

        let added = self.vertices[va.index()].connect(vb, label.clone());
        self.vertices[vb.index()].connect(va, label);
        if added {
            self.edge_count += 1;
        }
        Ok(self)
    }

    fn intern(&mut self, name: &str) -> VertexId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(name));
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains_vertex(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn degree(&self, name: &str) -> Option<usize> {
        let &id = self.index.get(name)?;
        Some(self.vertices[id.index()].degree())
    }

    /// Freezes the edge set and buckets every vertex by its final degree.
    pub fn build(self) -> FamilyGraph {
        FamilyGraph::from_parts(self.vertices, self.index, self.edge_count)
    }
}
