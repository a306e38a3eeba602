use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RatingError;
use crate::mark::{Mark, MarkStore};
use crate::rater::{Rater, RaterRef};

/// Running rating aggregates plus the marks they summarise.
///
/// Embed one in any rateable type. `rates` and `weighted_rate_count` are
/// kept equal to the weighted sums over the live marks after every
/// mutation; `rating`, `rating_previous` and `rating_delta` are written on
/// each mutation rather than recomputed on read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ratings {
    rates: i64,
    weighted_rate_count: i64,
    rating: Option<f64>,
    rating_previous: Option<f64>,
    rating_delta: f64,
    #[serde(alias = "rating_marks")]
    marks: MarkStore,
}

impl Ratings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Running sum of `value * weight` over all marks.
    pub fn rates(&self) -> i64 {
        self.rates
    }

    /// Stored sum of weights, without the legacy repair applied.
    pub fn weighted_rate_count(&self) -> i64 {
        self.weighted_rate_count
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn previous_rating(&self) -> Option<f64> {
        self.rating_previous
    }

    pub fn rating_delta(&self) -> f64 {
        self.rating_delta
    }

    pub fn marks(&self) -> &MarkStore {
        &self.marks
    }

    pub fn rate_count(&self) -> usize {
        self.marks.count()
    }

    /// Whether anyone has rated.
    pub fn is_rated(&self) -> bool {
        self.rate_count() != 0
    }

    pub fn is_rated_by<R: Rater + ?Sized>(&self, rater: &R) -> bool {
        self.marks.find(rater).is_some()
    }

    /// Plain mean of mark values, ignoring weights.
    pub fn unweighted_rating(&self) -> Option<f64> {
        if self.marks.is_empty() {
            return None;
        }

        let total: i64 = self.marks.iter().map(Mark::value).sum();
        Some(total as f64 / self.marks.count() as f64)
    }

    /// Weighted rate count with the legacy repair applied.
    pub fn rate_weight(&self) -> i64 {
        if self.needs_weight_migration() {
            self.rate_count() as i64
        } else {
            self.weighted_rate_count
        }
    }

    pub fn user_mark<R: Rater + ?Sized>(&self, rater: &R) -> Option<i64> {
        self.marks.find(rater).map(Mark::value)
    }

    /// Mark values keyed by rater id for raters of a single kind.
    /// Raters without a mark are left out.
    pub fn user_marks<R: Rater>(&self, raters: &[R]) -> Result<HashMap<String, i64>, RatingError> {
        let kinds: BTreeSet<&str> = raters.iter().map(Rater::rater_kind).collect();
        if kinds.len() > 1 {
            return Err(RatingError::MixedRaterKinds {
                kinds: kinds.into_iter().map(str::to_string).collect(),
            });
        }

        Ok(raters
            .iter()
            .filter_map(|rater| {
                self.user_mark(rater)
                    .map(|value| (rater.rater_id().to_string(), value))
            })
            .collect())
    }

    /// Record `value` from `rater`, replacing any earlier mark of theirs.
    ///
    /// Performs no range or rater validation; callers check those first.
    /// Fails with [`RatingError::Overflow`] when the running sums would
    /// leave `i64`, in which case nothing changes.
    pub fn add_mark(
        &mut self,
        value: i64,
        rater: RaterRef,
        weight: i64,
    ) -> Result<(), RatingError> {
        let mut sums = (self.rates, self.rate_weight());
        if let Some(previous) = self.marks.find(&rater) {
            sums = without_mark(sums, previous.value(), previous.weight())?;
        }
        let (rates, weighted_rate_count) = with_mark(sums, value, weight)?;

        self.migrate_weighted_rate_count();
        self.rates = rates;
        self.weighted_rate_count = weighted_rate_count;
        debug!(
            rater = %rater,
            value,
            weight,
            rates,
            weighted_rate_count,
            "mark added"
        );
        self.marks.insert(value, rater, weight);

        self.update_rating();
        Ok(())
    }

    /// [`add_mark`](Self::add_mark) for each rater, all or nothing.
    pub fn add_marks(
        &mut self,
        value: i64,
        raters: &[RaterRef],
        weight: i64,
    ) -> Result<(), RatingError> {
        if raters.len() > 1 {
            self.check_batch(raters, Some((value, weight)))?;
        }
        for rater in raters {
            self.add_mark(value, rater.clone(), weight)?;
        }
        Ok(())
    }

    /// Remove the mark cast by `rater`. Returns the removed mark.
    ///
    /// Removing a mark that does not exist leaves every field untouched.
    pub fn remove_mark<R: Rater + ?Sized>(
        &mut self,
        rater: &R,
    ) -> Result<Option<Mark>, RatingError> {
        let sums = match self.marks.find(rater) {
            Some(mark) => Some(without_mark(
                (self.rates, self.rate_weight()),
                mark.value(),
                mark.weight(),
            )?),
            None => None,
        };

        let migrated = self.migrate_weighted_rate_count();
        let Some((rates, weighted_rate_count)) = sums else {
            if migrated {
                self.update_rating();
            }
            return Ok(None);
        };

        let removed = self.marks.delete(rater);
        self.rates = rates;
        self.weighted_rate_count = weighted_rate_count;
        if let Some(mark) = &removed {
            debug!(
                rater = %mark.rater(),
                value = mark.value(),
                weight = mark.weight(),
                rates,
                weighted_rate_count,
                "mark removed"
            );
        }

        self.update_rating();
        Ok(removed)
    }

    /// [`remove_mark`](Self::remove_mark) for each rater, all or nothing.
    pub fn remove_marks(&mut self, raters: &[RaterRef]) -> Result<(), RatingError> {
        if raters.len() > 1 {
            self.check_batch(raters, None)?;
        }
        for rater in raters {
            self.remove_mark(rater)?;
        }
        Ok(())
    }

    /// One-time repair for data written before weighted counting existed:
    /// a zero weighted count alongside live marks is reset to the mark
    /// count, treating every legacy mark as weight 1.
    ///
    /// This cannot tell legacy data apart from marks whose weights
    /// genuinely sum to zero; both get repaired.
    pub fn migrate_weighted_rate_count(&mut self) -> bool {
        if !self.needs_weight_migration() {
            return false;
        }

        warn!(
            marks = self.rate_count(),
            "weighted rate count missing, resetting to mark count"
        );
        self.weighted_rate_count = self.rate_count() as i64;
        true
    }

    fn needs_weight_migration(&self) -> bool {
        self.weighted_rate_count == 0 && self.rate_count() != 0
    }

    /// Replays a batch against the running sums without touching anything.
    /// `mark` is the value and weight each rater ends with, `None` for removal.
    /// A rater listed twice sees the mark the batch gave it the first time.
    fn check_batch(
        &self,
        raters: &[RaterRef],
        mark: Option<(i64, i64)>,
    ) -> Result<(), RatingError> {
        let mut sums = (self.rates, self.rate_weight());
        let mut seen = HashSet::new();
        for rater in raters {
            let current = if seen.insert(rater) {
                self.marks
                    .find(rater)
                    .map(|previous| (previous.value(), previous.weight()))
            } else {
                mark
            };
            if let Some((value, weight)) = current {
                sums = without_mark(sums, value, weight)?;
            }
            if let Some((value, weight)) = mark {
                sums = with_mark(sums, value, weight)?;
            }
        }
        Ok(())
    }

    fn update_rating(&mut self) {
        self.migrate_weighted_rate_count();
        self.rating_previous = self.rating;

        // The migration above guarantees a non-zero denominator when marks exist.
        self.rating = if self.marks.is_empty() {
            None
        } else {
            Some(self.rates as f64 / self.weighted_rate_count as f64)
        };

        self.rating_delta = match (self.rating, self.rating_previous) {
            (Some(rating), Some(previous)) => rating - previous,
            _ => 0.0,
        };
    }
}

type Sums = (i64, i64);

/// `(rates, weighted_rate_count)` with one mark added.
fn with_mark((rates, count): Sums, value: i64, weight: i64) -> Result<Sums, RatingError> {
    let overflow = || RatingError::Overflow { value, weight };
    let contribution = value.checked_mul(weight).ok_or_else(overflow)?;
    Ok((
        rates.checked_add(contribution).ok_or_else(overflow)?,
        count.checked_add(weight).ok_or_else(overflow)?,
    ))
}

/// `(rates, weighted_rate_count)` with one mark taken away.
fn without_mark((rates, count): Sums, value: i64, weight: i64) -> Result<Sums, RatingError> {
    let overflow = || RatingError::Overflow { value, weight };
    let contribution = value.checked_mul(weight).ok_or_else(overflow)?;
    Ok((
        rates.checked_sub(contribution).ok_or_else(overflow)?,
        count.checked_sub(weight).ok_or_else(overflow)?,
    ))
}
