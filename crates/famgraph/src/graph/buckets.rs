//! Degree buckets used by [`FamilyGraph`](super::FamilyGraph).
//!
//! An ordered map from degree to an insertion-ordered set of vertices. Each set is a doubly
//! linked list threaded through per-vertex link slots, so moving a vertex between buckets is
//! O(1) plus one O(log D) map lookup, and the front of a bucket is its oldest member.

use crate::vertex::VertexId;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Debug, Clone, Copy, Default)]
struct Links {
    prev: Option<VertexId>,
    next: Option<VertexId>,
    degree: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    head: VertexId,
    tail: VertexId,
    len: usize,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct DegreeBuckets {
    buckets: BTreeMap<usize, Bucket>,
    links: Vec<Links>,
    members: usize,
}

impl DegreeBuckets {
    pub(in crate::graph) fn new(vertex_count: usize) -> Self {
        Self {
            buckets: BTreeMap::new(),
            links: vec![Links::default(); vertex_count],
            members: 0,
        }
    }

    pub(in crate::graph) fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of vertices across all buckets.
    pub(in crate::graph) fn members(&self) -> usize {
        self.members
    }

    /// Appends `v` to the bucket for `degree`, creating the bucket if absent.
    pub(in crate::graph) fn insert(&mut self, v: VertexId, degree: usize) {
        debug_assert!(
            self.links[v.index()].degree.is_none(),
            "vertex already bucketed"
        );
        match self.buckets.entry(degree) {
            Entry::Vacant(slot) => {
                slot.insert(Bucket {
                    head: v,
                    tail: v,
                    len: 1,
                });
                self.links[v.index()] = Links {
                    prev: None,
                    next: None,
                    degree: Some(degree),
                };
            }
            Entry::Occupied(mut slot) => {
                let bucket = slot.get_mut();
                let tail = bucket.tail;
                self.links[tail.index()].next = Some(v);
                self.links[v.index()] = Links {
                    prev: Some(tail),
                    next: None,
                    degree: Some(degree),
                };
                bucket.tail = v;
                bucket.len += 1;
            }
        }
        self.members += 1;
    }

    /// Unlinks `v` from the bucket for `degree`, dropping the bucket once empty.
    ///
    /// Returns `false` (and changes nothing) when `v` is not a member of that bucket.
    pub(in crate::graph) fn remove(&mut self, v: VertexId, degree: usize) -> bool {
        if self.links[v.index()].degree != Some(degree) {
            return false;
        }
        let Entry::Occupied(mut slot) = self.buckets.entry(degree) else {
            return false;
        };

        let Links { prev, next, .. } = std::mem::take(&mut self.links[v.index()]);
        let bucket = slot.get_mut();
        match prev {
            Some(p) => self.links[p.index()].next = next,
            None => {
                if let Some(n) = next {
                    bucket.head = n;
                }
            }
        }
        match next {
            Some(n) => self.links[n.index()].prev = prev,
            None => {
                if let Some(p) = prev {
                    bucket.tail = p;
                }
            }
        }
        bucket.len -= 1;
        if bucket.len == 0 {
            slot.remove();
        }
        self.members -= 1;
        true
    }

    /// Oldest member of the highest-degree bucket.
    pub(in crate::graph) fn first_of_highest(&self) -> Option<(usize, VertexId)> {
        self.buckets
            .last_key_value()
            .map(|(&degree, bucket)| (degree, bucket.head))
    }

    pub(in crate::graph) fn degree_of(&self, v: VertexId) -> Option<usize> {
        self.links.get(v.index()).and_then(|l| l.degree)
    }

    /// `(degree, len)` per bucket, highest degree first.
    pub(in crate::graph) fn sizes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.buckets
            .iter()
            .rev()
            .map(|(&degree, bucket)| (degree, bucket.len))
    }

    /// Members of one bucket, oldest first.
    pub(in crate::graph) fn bucket(&self, degree: usize) -> impl Iterator<Item = VertexId> + '_ {
        let mut cursor = self.buckets.get(&degree).map(|b| b.head);
        std::iter::from_fn(move || {
            let v = cursor?;
            cursor = self.links[v.index()].next;
            Some(v)
        })
    }
}
