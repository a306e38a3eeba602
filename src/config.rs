//! Per-type rating configuration.
//!
//! Configuration is static per rateable type: it lives in the
//! `Rateable::RATING_CONFIG` associated constant and is built with
//! `const fn` builders.
//!
//! ```ignore
//! impl Rateable for Comment {
//!     const RATING_CONFIG: RatingConfig<Self> = RatingConfig::new()
//!         .range(-5, 7)
//!         .rated_by(&["User"])
//!         .default_rater(Comment::author);
//!     // ...
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RatingError;
use crate::rater::RaterRef;

/// Closed integer interval of accepted mark values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: i64,
    pub max: i64,
}

impl RatingRange {
    /// Default range used when a type is configured without one.
    pub const DEFAULT: RatingRange = RatingRange::new(1, 5);

    /// Range `min..=max`. A range with `min > max` accepts nothing.
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Range spanning the smallest and largest of a set of allowed values.
    /// Returns `None` for an empty set.
    pub const fn from_values(values: &[i64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut min = values[0];
        let mut max = values[0];
        let mut i = 1;
        while i < values.len() {
            if values[i] < min {
                min = values[i];
            }
            if values[i] > max {
                max = values[i];
            }
            i += 1;
        }

        Some(Self { min, max })
    }

    pub const fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for RatingRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for RatingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Resolves the rater to use when `rate` is called without one.
pub type DefaultRaterFn<T> = fn(&T) -> Option<RaterRef>;

/// Immutable rating configuration for one rateable type.
pub struct RatingConfig<T> {
    range: Option<RatingRange>,
    rater_kinds: &'static [&'static str],
    default_rater: Option<DefaultRaterFn<T>>,
}

impl<T> RatingConfig<T> {
    /// Range `1..=5`, any rater kind, no default rater.
    pub const fn new() -> Self {
        Self {
            range: Some(RatingRange::DEFAULT),
            rater_kinds: &[],
            default_rater: None,
        }
    }

    /// Accept marks in `min..=max`.
    pub const fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some(RatingRange::new(min, max));
        self
    }

    /// Accept marks between the smallest and largest allowed value.
    /// An empty set leaves the current range in place.
    pub const fn values(mut self, values: &[i64]) -> Self {
        if let Some(range) = RatingRange::from_values(values) {
            self.range = Some(range);
        }
        self
    }

    /// Accept any mark value.
    pub const fn unbounded(mut self) -> Self {
        self.range = None;
        self
    }

    /// Restrict raters to these kinds. An empty list accepts every kind.
    pub const fn rated_by(mut self, kinds: &'static [&'static str]) -> Self {
        self.rater_kinds = kinds;
        self
    }

    pub const fn default_rater(mut self, resolver: DefaultRaterFn<T>) -> Self {
        self.default_rater = Some(resolver);
        self
    }

    pub fn rating_range(&self) -> Option<RatingRange> {
        self.range
    }

    pub fn rater_kinds(&self) -> &'static [&'static str] {
        self.rater_kinds
    }

    pub fn valid_rater_kind(&self, kind: &str) -> bool {
        self.rater_kinds.is_empty() || self.rater_kinds.contains(&kind)
    }

    pub fn in_rating_range(&self, value: i64) -> bool {
        self.range.map_or(true, |range| range.contains(value))
    }

    pub fn resolve_default_rater(&self, rateable: &T) -> Option<RaterRef> {
        self.default_rater.and_then(|resolve| resolve(rateable))
    }

    pub fn validate_rater(&self, rater: &RaterRef) -> Result<(), RatingError> {
        if self.valid_rater_kind(&rater.kind) {
            return Ok(());
        }

        Err(RatingError::InvalidRater {
            kind: rater.kind.clone(),
            allowed: self.rater_kinds.iter().map(|k| k.to_string()).collect(),
        })
    }

    pub fn validate_value(&self, value: i64) -> Result<(), RatingError> {
        match self.range {
            Some(range) if !range.contains(value) => Err(RatingError::OutOfRange { value, range }),
            _ => Ok(()),
        }
    }
}

impl<T> Default for RatingConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RatingConfig<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RatingConfig<T> {}

impl<T> fmt::Debug for RatingConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingConfig")
            .field("range", &self.range)
            .field("rater_kinds", &self.rater_kinds)
            .field("default_rater", &self.default_rater.is_some())
            .finish()
    }
}
