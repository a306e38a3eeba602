//! Rater identity.
//!
//! Any type can cast marks by implementing [`Rater`] (or deriving it with
//! `#[derive(Rater)]`). Raters are compared by the `(id, kind)` pair, so a
//! `User` and an `Admin` sharing the same id are distinct raters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability implemented by anything that can rate.
pub trait Rater {
    /// Identifier of this rater, unique within its kind.
    fn rater_id(&self) -> &str;

    /// Discriminator separating rater types that share an id space.
    fn rater_kind(&self) -> &str;

    fn to_rater_ref(&self) -> RaterRef {
        RaterRef::new(self.rater_id(), self.rater_kind())
    }
}

/// Owned rater identity, as stored on marks and used for lookups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RaterRef {
    pub id: String,
    pub kind: String,
}

impl RaterRef {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

impl Rater for RaterRef {
    fn rater_id(&self) -> &str {
        &self.id
    }

    fn rater_kind(&self) -> &str {
        &self.kind
    }

    fn to_rater_ref(&self) -> RaterRef {
        self.clone()
    }
}

impl fmt::Display for RaterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Marker argument asking the rateable to resolve its configured default rater.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRater;

/// Trait for types that can be passed as the rater argument of `rate`/`unrate`.
///
/// Sequences fan out: every rater in the sequence receives the same mark.
/// `None` means "no rater given" and triggers default-rater resolution.
pub trait Raters {
    fn to_raters(&self) -> Option<Vec<RaterRef>>;
}

// Single rater
impl<R: Rater> Raters for &R {
    fn to_raters(&self) -> Option<Vec<RaterRef>> {
        Some(vec![self.to_rater_ref()])
    }
}

// Optional rater
impl<R: Rater> Raters for Option<&R> {
    fn to_raters(&self) -> Option<Vec<RaterRef>> {
        self.map(|rater| vec![rater.to_rater_ref()])
    }
}

// Slice of raters
impl<R: Rater> Raters for &[R] {
    fn to_raters(&self) -> Option<Vec<RaterRef>> {
        Some(self.iter().map(Rater::to_rater_ref).collect())
    }
}

// Fixed-size arrays by reference
impl<R: Rater, const N: usize> Raters for &[R; N] {
    fn to_raters(&self) -> Option<Vec<RaterRef>> {
        Some(self.iter().map(Rater::to_rater_ref).collect())
    }
}

// Vec of raters by reference
impl<R: Rater> Raters for &Vec<R> {
    fn to_raters(&self) -> Option<Vec<RaterRef>> {
        Some(self.iter().map(Rater::to_rater_ref).collect())
    }
}

impl Raters for DefaultRater {
    fn to_raters(&self) -> Option<Vec<RaterRef>> {
        None
    }
}
