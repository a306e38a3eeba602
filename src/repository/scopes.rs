//! Collection-level queries over rateable documents.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use crate::mark::Mark;
use crate::model::{Collection, Model, ModelError, ModelStore, Versioned};
use crate::rateable::Rateable;
use crate::rater::Rater;

pub const DEFAULT_HIGHEST_RATED_LIMIT: usize = 10;

/// Rating queries available on a typed model repository.
///
/// ```ignore
/// let top = store.collection::<Post>().highest_rated(DEFAULT_HIGHEST_RATED_LIMIT)?;
/// let mine = store.collection::<Post>().rated_by(&user)?;
/// ```
pub trait RatingScopes<M> {
    /// Documents nobody has rated.
    fn unrated(&self) -> Result<Vec<Versioned<M>>, ModelError>;

    /// Documents with a rating.
    fn rated(&self) -> Result<Vec<Versioned<M>>, ModelError>;

    /// Documents carrying a mark from this exact rater.
    fn rated_by<R: Rater + ?Sized>(&self, rater: &R) -> Result<Vec<Versioned<M>>, ModelError>;

    /// Documents whose rating lies in `range`.
    fn with_rating(&self, range: RangeInclusive<f64>) -> Result<Vec<Versioned<M>>, ModelError>;

    /// Up to `limit` documents by rating, highest first; unrated documents sort last.
    fn highest_rated(&self, limit: usize) -> Result<Vec<Versioned<M>>, ModelError>;

    /// Every mark this rater has cast in the collection, with the id of the
    /// document it belongs to.
    fn marks_cast_by<R: Rater + ?Sized>(
        &self,
        rater: &R,
    ) -> Result<Vec<(String, Mark)>, ModelError>;
}

impl<S, M> RatingScopes<M> for Collection<'_, S, M>
where
    S: ModelStore,
    M: Model + Rateable,
{
    fn unrated(&self) -> Result<Vec<Versioned<M>>, ModelError> {
        self.find(&|model: &M| model.rating().is_none())
    }

    fn rated(&self) -> Result<Vec<Versioned<M>>, ModelError> {
        self.find(&|model: &M| model.rating().is_some())
    }

    fn rated_by<R: Rater + ?Sized>(&self, rater: &R) -> Result<Vec<Versioned<M>>, ModelError> {
        let rater = rater.to_rater_ref();
        self.find(&|model: &M| model.is_rated_by(&rater))
    }

    fn with_rating(&self, range: RangeInclusive<f64>) -> Result<Vec<Versioned<M>>, ModelError> {
        self.find(&|model: &M| model.rating().is_some_and(|rating| range.contains(&rating)))
    }

    fn highest_rated(&self, limit: usize) -> Result<Vec<Versioned<M>>, ModelError> {
        let mut found = self.all()?;
        found.sort_by(|a, b| {
            by_rating_desc(a.data.rating(), b.data.rating())
                .then_with(|| a.data.id().cmp(b.data.id()))
        });
        found.truncate(limit);
        Ok(found)
    }

    fn marks_cast_by<R: Rater + ?Sized>(
        &self,
        rater: &R,
    ) -> Result<Vec<(String, Mark)>, ModelError> {
        let rater = rater.to_rater_ref();
        let mut marks: Vec<(String, Mark)> = self
            .rated_by(&rater)?
            .into_iter()
            .filter_map(|found| {
                found
                    .data
                    .ratings()
                    .marks()
                    .find(&rater)
                    .cloned()
                    .map(|mark| (found.data.id().to_string(), mark))
            })
            .collect();
        marks.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(marks)
    }
}

fn by_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_sorts_before_unrated() {
        assert_eq!(by_rating_desc(Some(1.0), None), Ordering::Less);
        assert_eq!(by_rating_desc(None, Some(-3.0)), Ordering::Greater);
        assert_eq!(by_rating_desc(Some(4.5), Some(2.0)), Ordering::Less);
        assert_eq!(by_rating_desc(None, None), Ordering::Equal);
    }
}
