//! Extraction results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One neighbor of a family head, with the label of the connecting edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub label: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, label: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            label: label.map(Into::into),
        }
    }

    pub fn unlabeled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }
}

/// A head vertex plus the neighbors it still had when it was extracted.
///
/// Members are listed in the order their edges were first added to the head. Neighbors that
/// an earlier family already claimed are not part of this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    head: String,
    members: Vec<Member>,
}

impl Family {
    pub fn new(head: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            head: head.into(),
            members,
        }
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Degree of the head at the moment of extraction.
    pub fn degree(&self) -> usize {
        self.members.len()
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Head first, then every member.
    pub fn vertex_names(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.head.as_str()).chain(self.member_names())
    }
}

/// Compact debug form: `head->[m1,m2:label]`.
impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->[", self.head)?;
        for (i, m) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&m.name)?;
            if let Some(label) = &m.label {
                write!(f, ":{label}")?;
            }
        }
        f.write_str("]")
    }
}
