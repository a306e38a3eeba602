use std::collections::HashMap;

use tracing::debug;

use crate::config::RatingConfig;
use crate::error::RatingError;
use crate::model::{Model, ModelStore, Versioned};
use crate::rater::{Rater, RaterRef, Raters};
use crate::ratings::Ratings;

/// Trait for entities that accumulate marks from raters.
///
/// Implementors embed a [`Ratings`] value and expose it; every rating
/// operation is provided on top of that. Per-type configuration lives in
/// [`Rateable::RATING_CONFIG`].
pub trait Rateable: Sized {
    const RATING_CONFIG: RatingConfig<Self> = RatingConfig::new();

    fn ratings(&self) -> &Ratings;
    fn ratings_mut(&mut self) -> &mut Ratings;

    /// Record `value` from each rater with weight 1.
    fn rate<R: Raters>(&mut self, value: i64, raters: R) -> Result<(), RatingError> {
        self.rate_weighted(value, raters, 1)
    }

    /// Record `value` from each rater, replacing their previous marks.
    ///
    /// Every rater and the value are validated before anything changes,
    /// so an error leaves the rateable untouched.
    fn rate_weighted<R: Raters>(
        &mut self,
        value: i64,
        raters: R,
        weight: i64,
    ) -> Result<(), RatingError> {
        let config = Self::RATING_CONFIG;
        let raters = resolve_raters(self, &raters)?;
        if raters.is_empty() {
            return Ok(());
        }

        for rater in &raters {
            config.validate_rater(rater)?;
        }
        config.validate_value(value)?;

        self.ratings_mut().add_marks(value, &raters, weight)
    }

    /// Remove each rater's mark. Raters without a mark are ignored.
    fn unrate<R: Raters>(&mut self, raters: R) -> Result<(), RatingError> {
        let raters = resolve_raters(self, &raters)?;
        self.ratings_mut().remove_marks(&raters)
    }

    /// `rate` followed by saving the document.
    fn rate_and_save<S, R>(
        &mut self,
        store: &S,
        value: i64,
        raters: R,
    ) -> Result<Versioned<Self>, RatingError>
    where
        Self: Model,
        S: ModelStore,
        R: Raters,
    {
        self.rate_weighted_and_save(store, value, raters, 1)
    }

    fn rate_weighted_and_save<S, R>(
        &mut self,
        store: &S,
        value: i64,
        raters: R,
        weight: i64,
    ) -> Result<Versioned<Self>, RatingError>
    where
        Self: Model,
        S: ModelStore,
        R: Raters,
    {
        self.rate_weighted(value, raters, weight)?;
        save(store, self)
    }

    fn unrate_and_save<S, R>(
        &mut self,
        store: &S,
        raters: R,
    ) -> Result<Versioned<Self>, RatingError>
    where
        Self: Model,
        S: ModelStore,
        R: Raters,
    {
        self.unrate(raters)?;
        save(store, self)
    }

    /// Whether anyone has rated.
    fn is_rated(&self) -> bool {
        self.ratings().is_rated()
    }

    fn is_rated_by<R: Rater + ?Sized>(&self, rater: &R) -> bool {
        self.ratings().is_rated_by(rater)
    }

    fn rating(&self) -> Option<f64> {
        self.ratings().rating()
    }

    fn previous_rating(&self) -> Option<f64> {
        self.ratings().previous_rating()
    }

    fn rating_delta(&self) -> f64 {
        self.ratings().rating_delta()
    }

    fn unweighted_rating(&self) -> Option<f64> {
        self.ratings().unweighted_rating()
    }

    fn rates(&self) -> i64 {
        self.ratings().rates()
    }

    fn rate_count(&self) -> usize {
        self.ratings().rate_count()
    }

    fn rate_weight(&self) -> i64 {
        self.ratings().rate_weight()
    }

    fn user_mark<R: Rater + ?Sized>(&self, rater: &R) -> Option<i64> {
        self.ratings().user_mark(rater)
    }

    fn user_marks<R: Rater>(&self, raters: &[R]) -> Result<HashMap<String, i64>, RatingError> {
        self.ratings().user_marks(raters)
    }
}

fn resolve_raters<T: Rateable, R: Raters>(
    rateable: &T,
    raters: &R,
) -> Result<Vec<RaterRef>, RatingError> {
    match raters.to_raters() {
        Some(raters) => Ok(raters),
        None => T::RATING_CONFIG
            .resolve_default_rater(rateable)
            .map(|rater| vec![rater])
            .ok_or(RatingError::NoRaterSpecified),
    }
}

fn save<S: ModelStore, M: Model>(store: &S, model: &M) -> Result<Versioned<M>, RatingError> {
    let saved = store.save(model)?;
    debug!(
        collection = M::COLLECTION,
        id = model.id(),
        version = saved.version,
        "rateable saved"
    );
    Ok(saved)
}

/// Implement [`Rateable`] for a type by naming its [`Ratings`] field,
/// optionally with a configuration expression.
///
/// ```ignore
/// impl_rateable!(Post, ratings);
/// impl_rateable!(Comment, ratings, RatingConfig::new().range(-5, 7));
/// ```
#[macro_export]
macro_rules! impl_rateable {
    ($ty:ty, $field:ident) => {
        $crate::impl_rateable!($ty, $field, $crate::RatingConfig::new());
    };
    ($ty:ty, $field:ident, $config:expr) => {
        impl $crate::Rateable for $ty {
            const RATING_CONFIG: $crate::RatingConfig<Self> = $config;

            fn ratings(&self) -> &$crate::Ratings {
                &self.$field
            }

            fn ratings_mut(&mut self) -> &mut $crate::Ratings {
                &mut self.$field
            }
        }
    };
}
