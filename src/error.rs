use crate::config::RatingRange;
use crate::lock::LockError;
use crate::model::ModelError;

/// Errors raised by rating operations.
///
/// Validation and overflow variants are raised before any mark or
/// aggregate field is touched, so a failed `rate` leaves the rateable
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    /// No rater argument was given and the type has no default rater.
    #[error("no rater argument and no default rater specified")]
    NoRaterSpecified,

    /// The rater's kind is not in the type's allow-list.
    #[error("not a valid rater: {kind}, must be one of {allowed:?}")]
    InvalidRater { kind: String, allowed: Vec<String> },

    /// The mark value lies outside the configured rating range.
    #[error("rating not in range {range}, rating provided was {value}")]
    OutOfRange { value: i64, range: RatingRange },

    /// A bulk mark lookup was given raters of more than one kind.
    #[error("raters must all be of the same kind, got {kinds:?}")]
    MixedRaterKinds { kinds: Vec<String> },

    /// The mark would push `rates` or the weighted count outside `i64`.
    #[error("rating sums overflow adding value {value} with weight {weight}")]
    Overflow { value: i64, weight: i64 },

    /// The rateable document does not exist in the store.
    #[error("rateable not found: {collection}:{id}")]
    NotFound { collection: String, id: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Lock(#[from] LockError),
}
