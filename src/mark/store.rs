use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Mark;
use crate::rater::{Rater, RaterRef};

/// The marks owned by one rateable, at most one per `(rater_id, rater_kind)`.
///
/// Marks are kept in insertion order with a rater index alongside, so
/// lookups by rater do not scan. Serialized as a plain list; the index is
/// rebuilt on load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Mark>", into = "Vec<Mark>")]
pub struct MarkStore {
    marks: Vec<Mark>,
    index: HashMap<RaterRef, usize>,
}

impl MarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mark cast by `rater`, if any.
    pub fn find<R: Rater + ?Sized>(&self, rater: &R) -> Option<&Mark> {
        self.index
            .get(&rater.to_rater_ref())
            .and_then(|&position| self.marks.get(position))
    }

    /// Record a mark, replacing and returning any earlier mark by the same
    /// rater. The replacement keeps the earlier mark's position.
    pub fn insert(&mut self, value: i64, rater: RaterRef, weight: i64) -> Option<Mark> {
        let mark = Mark::new(value, rater.clone(), weight);
        let existing = self.index.get(&rater).copied();
        match existing {
            Some(position) => Some(std::mem::replace(&mut self.marks[position], mark)),
            None => {
                self.index.insert(rater, self.marks.len());
                self.marks.push(mark);
                None
            }
        }
    }

    /// Remove and return the mark cast by `rater`.
    pub fn delete<R: Rater + ?Sized>(&mut self, rater: &R) -> Option<Mark> {
        let position = self.index.remove(&rater.to_rater_ref())?;
        let removed = self.marks.swap_remove(position);
        if let Some(moved) = self.marks.get(position) {
            self.index.insert(moved.rater(), position);
        }
        Some(removed)
    }

    pub fn all(&self) -> &[Mark] {
        &self.marks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mark> {
        self.marks.iter()
    }

    pub fn count(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

impl PartialEq for MarkStore {
    fn eq(&self, other: &Self) -> bool {
        self.marks == other.marks
    }
}

impl From<Vec<Mark>> for MarkStore {
    fn from(marks: Vec<Mark>) -> Self {
        let mut store = MarkStore::new();
        for mark in marks {
            // A duplicated rater in stored data keeps its last mark.
            store.insert(mark.value(), mark.rater(), mark.weight());
        }
        store
    }
}

impl From<MarkStore> for Vec<Mark> {
    fn from(store: MarkStore) -> Self {
        store.marks
    }
}

impl<'a> IntoIterator for &'a MarkStore {
    type Item = &'a Mark;
    type IntoIter = std::slice::Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.marks.iter()
    }
}
