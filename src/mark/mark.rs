use serde::{Deserialize, Serialize};

use crate::rater::{Rater, RaterRef};

fn default_weight() -> i64 {
    1
}

/// One rater's recorded value and weight against a rateable.
///
/// Marks are never edited in place: a second rating from the same rater
/// deletes the old mark and records a new one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(alias = "mark")]
    value: i64,
    // Marks written before weighting existed carry no weight.
    #[serde(default = "default_weight")]
    weight: i64,
    rater_id: String,
    #[serde(alias = "rater_class")]
    rater_kind: String,
}

impl Mark {
    pub fn new(value: i64, rater: RaterRef, weight: i64) -> Self {
        Self {
            value,
            weight,
            rater_id: rater.id,
            rater_kind: rater.kind,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// `value * weight`, this mark's share of the running `rates` sum.
    /// `None` when the product does not fit in `i64`.
    pub fn contribution(&self) -> Option<i64> {
        self.value.checked_mul(self.weight)
    }

    pub fn rater(&self) -> RaterRef {
        RaterRef::new(self.rater_id.as_str(), self.rater_kind.as_str())
    }

    pub fn is_by<R: Rater + ?Sized>(&self, rater: &R) -> bool {
        self.rater_id == rater.rater_id() && self.rater_kind == rater.rater_kind()
    }
}

impl Rater for Mark {
    fn rater_id(&self) -> &str {
        &self.rater_id
    }

    fn rater_kind(&self) -> &str {
        &self.rater_kind
    }
}
