//! Most-connected-first extraction over an undirected graph.
//!
//! Once built, [`FamilyGraph`] is a single-pass, destructive iterator. Each step:
//!
//! ```text
//! v = oldest vertex in the highest-degree bucket
//! for v and each pending neighbor o of v:
//!     mark o as extracted and drop it from its bucket
//!     for each pending neighbor p of o:
//!         move p from bucket deg(p) to bucket deg(p) - 1
//! ```
//!
//! Ties between vertices of equal degree go to whichever entered that bucket first. That is
//! deterministic for a fixed edge order but carries no meaning (it is not lexicographic):
//! a vertex that started at degree `k` sits ahead of one that dropped to `k` later.

mod buckets;

use crate::builder::GraphBuilder;
use crate::error::{Error, Result};
use crate::family::{Family, Member};
use crate::vertex::{Status, Vertex, VertexId};
use buckets::DegreeBuckets;
use rustc_hash::FxBuildHasher;
use std::iter::FusedIterator;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct FamilyGraph {
    vertices: Vec<Vertex>,
    // Frozen at build time.
    index: HashMap<String, VertexId>,
    buckets: DegreeBuckets,
    edge_count: usize,
    families: usize,
}

impl FamilyGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub(crate) fn from_parts(
        vertices: Vec<Vertex>,
        index: HashMap<String, VertexId>,
        edge_count: usize,
    ) -> Self {
        let mut buckets = DegreeBuckets::new(vertices.len());
        for (i, v) in vertices.iter().enumerate() {
            buckets.insert(VertexId(i), v.degree());
        }

        let g = Self {
            vertices,
            index,
            buckets,
            edge_count,
            families: 0,
        };
        tracing::debug!(
            vertices = g.vertices.len(),
            edges = g.edge_count,
            max_degree = g.max_degree().unwrap_or(0),
            "bucketed graph"
        );
        g
    }

    pub fn has_next(&self) -> bool {
        !self.buckets.is_empty()
    }

    /// Extracts the most connected pending vertex together with all of its pending
    /// neighbors.
    ///
    /// Every vertex adjacent to a removed one has its degree lowered and is re-bucketed
    /// before this returns. Fails with [`Error::Exhausted`] once [`has_next`](Self::has_next)
    /// is `false`.
    ///
    /// # Panics
    ///
    /// Panics if a pending vertex is missing from the bucket for its degree. That means the
    /// degree index is corrupt and any further output would be wrong.
    pub fn extract_next(&mut self) -> Result<Family> {
        let Some((degree, head)) = self.buckets.first_of_highest() else {
            return Err(Error::Exhausted);
        };

        let siblings: Vec<VertexId> = self.pending_neighbors(head).collect();
        debug_assert_eq!(siblings.len(), degree);
        let family = self.family_of(head, &siblings);

        self.pop(head, Status::Head);
        for &sibling in &siblings {
            self.pop(sibling, Status::Member);
        }

        self.families += 1;
        tracing::trace!(
            head = family.head(),
            degree,
            remaining = self.buckets.members(),
            "extracted family"
        );
        Ok(family)
    }

    fn pending_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices[v.index()]
            .edges()
            .map(|(id, _)| id)
            .filter(|id| self.vertices[id.index()].is_pending())
    }

    fn family_of(&self, head: VertexId, siblings: &[VertexId]) -> Family {
        let h = &self.vertices[head.index()];
        let members = siblings
            .iter()
            .map(|&s| Member {
                name: self.vertices[s.index()].name().to_string(),
                label: h.label_to(s).map(str::to_string),
            })
            .collect();
        Family::new(h.name(), members)
    }

    /// Drops `v` from the buckets and moves each pending neighbor one bucket down.
    fn pop(&mut self, v: VertexId, status: Status) {
        let degree = self.vertices[v.index()].degree();
        self.unbucket(v, degree);
        self.vertices[v.index()].set_status(status);

        // `v` itself is no longer pending, so its adjacency is only read here.
        let mut i = 0;
        while let Some(other) = self.vertices[v.index()].neighbor_at(i) {
            i += 1;
            if !self.vertices[other.index()].is_pending() {
                continue;
            }
            let old = self.vertices[other.index()].degree();
            self.unbucket(other, old);
            let new = self.vertices[other.index()].decrement_degree();
            self.buckets.insert(other, new);
        }
    }

    fn unbucket(&mut self, v: VertexId, degree: usize) {
        if !self.buckets.remove(v, degree) {
            panic!(
                "bucket {degree} has no entry for vertex `{}`",
                self.vertices[v.index()].name()
            );
        }
    }

    /// Number of vertices in the graph, extracted or not.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Vertices still waiting to be extracted.
    pub fn remaining(&self) -> usize {
        self.buckets.members()
    }

    /// Families returned so far.
    pub fn families_extracted(&self) -> usize {
        self.families
    }

    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        let &id = self.index.get(name)?;
        Some(&self.vertices[id.index()])
    }

    /// Current degree of a vertex that has not been extracted yet.
    pub fn degree(&self, name: &str) -> Option<usize> {
        self.vertex(name)
            .filter(|v| v.is_pending())
            .map(Vertex::degree)
    }

    /// Pending neighbors of a pending vertex with their edge labels, in edge insertion order.
    /// Always as many as [`degree`](Self::degree) reports.
    pub fn neighbors(&self, name: &str) -> Option<Vec<(&str, Option<&str>)>> {
        let &id = self.index.get(name)?;
        let v = &self.vertices[id.index()];
        if !v.is_pending() {
            return None;
        }
        Some(
            v.edges()
                .filter(|(o, _)| self.vertices[o.index()].is_pending())
                .map(|(o, label)| (self.vertices[o.index()].name(), label))
                .collect(),
        )
    }

    /// Every neighbor recorded while building, extracted or not.
    pub fn built_neighbors(&self, name: &str) -> Option<Vec<(&str, Option<&str>)>> {
        let &id = self.index.get(name)?;
        Some(
            self.vertices[id.index()]
                .edges()
                .map(|(o, label)| (self.vertices[o.index()].name(), label))
                .collect(),
        )
    }

    pub fn is_extracted(&self, name: &str) -> bool {
        self.vertex(name).is_some_and(|v| !v.is_pending())
    }

    pub fn max_degree(&self) -> Option<usize> {
        self.buckets.first_of_highest().map(|(degree, _)| degree)
    }

    /// `(degree, vertex count)` per non-empty bucket, highest degree first.
    pub fn bucket_sizes(&self) -> Vec<(usize, usize)> {
        self.buckets.sizes().collect()
    }

    /// Names in one bucket, in tie-break order.
    pub fn bucket(&self, degree: usize) -> Vec<&str> {
        self.buckets
            .bucket(degree)
            .map(|id| self.vertices[id.index()].name())
            .collect()
    }

    /// Verifies that every pending vertex sits in exactly the bucket for its live degree and
    /// that its stored degree matches its pending neighbor count.
    pub fn check_invariants(&self) -> Result<()> {
        let broken = |message: String| Err(Error::BrokenInvariant { message });

        let mut pending = 0;
        for (i, v) in self.vertices.iter().enumerate() {
            let id = VertexId(i);
            let bucketed = self.buckets.degree_of(id);
            if !v.is_pending() {
                if let Some(d) = bucketed {
                    return broken(format!("extracted vertex `{}` in bucket {d}", v.name()));
                }
                continue;
            }
            pending += 1;

            let live = self.pending_neighbors(id).count();
            if live != v.degree() {
                return broken(format!(
                    "vertex `{}` has degree {} but {live} pending neighbors",
                    v.name(),
                    v.degree()
                ));
            }
            if bucketed != Some(live) {
                return broken(format!(
                    "vertex `{}` with degree {live} is in bucket {bucketed:?}",
                    v.name()
                ));
            }
        }

        let bucketed: usize = self.buckets.sizes().map(|(_, len)| len).sum();
        if bucketed != pending || self.buckets.members() != pending {
            return broken(format!(
                "{pending} pending vertices but {bucketed} bucket entries"
            ));
        }
        for (degree, len) in self.buckets.sizes() {
            if self.buckets.bucket(degree).count() != len {
                return broken(format!("bucket {degree} links disagree with its length"));
            }
        }
        Ok(())
    }
}

impl Iterator for FamilyGraph {
    type Item = Family;

    fn next(&mut self) -> Option<Family> {
        self.extract_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buckets.members();
        ((remaining > 0) as usize, Some(remaining))
    }
}

impl FusedIterator for FamilyGraph {}
