use crate::shape::ShapeKind;
use std::collections::btree_set;
use std::collections::BTreeSet;

/// Ids of every shape that is out of bounds or overlaps another shape.
///
/// Backed by a sorted set so iteration order does not depend on input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ViolationSet {
    ids: BTreeSet<String>,
}

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the id was not already flagged
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn union(mut self, other: ViolationSet) -> ViolationSet {
        self.ids.extend(other.ids);
        self
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for ViolationSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.ids.extend(iter.into_iter().map(Into::into))
    }
}

impl<S: Into<String>> FromIterator<S> for ViolationSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ViolationSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ViolationSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

/// A single failed check.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Violation {
    /// The shape is not fully inside the boundary
    OutOfBounds { id: String, kind: ShapeKind },
    /// `first` comes before `second` in the plan (rectangles first, then circles)
    Overlap { first: String, second: String },
}

impl Violation {
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        let (a, b) = match self {
            Violation::OutOfBounds { id, .. } => (id.as_str(), None),
            Violation::Overlap { first, second } => (first.as_str(), Some(second.as_str())),
        };
        std::iter::once(a).chain(b)
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::OutOfBounds { id, kind } => write!(f, "{} {} is out of bounds", kind, id),
            Violation::Overlap { first, second } => write!(f, "{} overlaps {}", first, second),
        }
    }
}

/// Every individual failed check of a validation run, sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    violations: Vec<Violation>,
}

impl Report {
    pub fn from_violations(mut violations: Vec<Violation>) -> Self {
        violations.sort();
        violations.dedup();
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether the plan passed every check
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn out_of_bounds(&self) -> impl Iterator<Item = &str> + '_ {
        self.violations.iter().filter_map(|v| match v {
            Violation::OutOfBounds { id, .. } => Some(id.as_str()),
            Violation::Overlap { .. } => None,
        })
    }

    pub fn overlaps(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.violations.iter().filter_map(|v| match v {
            Violation::Overlap { first, second } => Some((first.as_str(), second.as_str())),
            Violation::OutOfBounds { .. } => None,
        })
    }

    pub fn violation_set(&self) -> ViolationSet {
        self.violations.iter().flat_map(Violation::ids).collect()
    }
}
