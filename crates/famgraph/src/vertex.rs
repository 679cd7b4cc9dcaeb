//! Vertex storage.
//!
//! Vertices live in a single arena owned by the graph and refer to each other by
//! `VertexId`, so a removal that touches a neighbor never aliases a borrowed vertex.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxBuildHasher;

/// Edge label. `None` is the "no label" sentinel and is never printed.
pub type Label = Option<String>;

pub(crate) type Adjacency = IndexMap<VertexId, Label, FxBuildHasher>;

/// Stable arena index of a vertex within one builder / graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct VertexId(pub(crate) usize);

impl VertexId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Where a vertex stands in the extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Still tracked by the degree buckets.
    #[default]
    Pending,
    /// Returned as the head of a family.
    Head,
    /// Removed as a neighbor of some head.
    Member,
}

#[derive(Debug, Clone)]
pub struct Vertex {
    name: String,
    // Full adjacency as built, in first-insertion order. Extraction never prunes it; the live
    // view is this map filtered down to `Status::Pending` neighbors.
    edges: Adjacency,
    degree: usize,
    status: Status,
}

impl Vertex {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edges: Adjacency::default(),
            degree: 0,
            status: Status::Pending,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of neighbors still pending extraction.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of distinct neighbors recorded while building.
    pub fn built_degree(&self) -> usize {
        self.edges.len()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    /// Every neighbor recorded while building, with its edge label.
    pub(crate) fn edges(&self) -> impl Iterator<Item = (VertexId, Option<&str>)> + '_ {
        self.edges.iter().map(|(&id, label)| (id, label.as_deref()))
    }

    pub(crate) fn label_to(&self, other: VertexId) -> Option<&str> {
        self.edges.get(&other).and_then(|l| l.as_deref())
    }

    /// Records `other` as a neighbor. Returns `true` for a new neighbor; a repeated pair
    /// overwrites the label and keeps its original position.
    pub(crate) fn connect(&mut self, other: VertexId, label: Label) -> bool {
        match self.edges.entry(other) {
            Entry::Occupied(mut e) => {
                e.insert(label);
                false
            }
            Entry::Vacant(e) => {
                e.insert(label);
                self.degree += 1;
                true
            }
        }
    }

    pub(crate) fn neighbor_at(&self, i: usize) -> Option<VertexId> {
        self.edges.get_index(i).map(|(&id, _)| id)
    }

    pub(crate) fn decrement_degree(&mut self) -> usize {
        debug_assert!(self.degree > 0, "degree underflow on `{}`", self.name);
        self.degree -= 1;
        self.degree
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Vertex {}

impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
