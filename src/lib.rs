//! Incremental rating aggregation.
//!
//! Any type that embeds a [`Ratings`] value and implements [`Rateable`]
//! can collect weighted marks from raters. Running sums, the weighted
//! average, the previous average and the last delta are updated in
//! constant time on every `rate`/`unrate`, never by rescanning the marks.
//!
//! ```ignore
//! use rateable::{impl_rateable, Rateable, Ratings, Rater};
//!
//! #[derive(Default)]
//! struct Post {
//!     ratings: Ratings,
//! }
//!
//! impl_rateable!(Post, ratings);
//!
//! #[derive(Rater)]
//! struct User {
//!     id: String,
//! }
//!
//! let bob = User { id: "bob".into() };
//! let mut post = Post::default();
//! post.rate(4, &bob)?;
//! assert_eq!(post.rating(), Some(4.0));
//! ```

mod config;
mod error;
mod lock;
mod mark;
mod model;
mod rateable;
mod rater;
mod ratings;
mod repository;

pub use config::{DefaultRaterFn, RatingConfig, RatingRange};
pub use error::RatingError;
pub use lock::{InMemoryLock, InMemoryLockManager, Lock, LockError, LockGuard, LockManager};
pub use mark::{Mark, MarkStore};
pub use model::{
    document_key, Collection, CollectionExt, InMemoryModelStore, Model, ModelError, ModelStore,
    Versioned,
};
pub use rateable::Rateable;
pub use rater::{DefaultRater, Rater, RaterRef, Raters};
pub use ratings::Ratings;
pub use repository::{RatingRepository, RatingScopes, DEFAULT_HIGHEST_RATED_LIMIT};

// Derive macros share names with the traits they implement.
pub use rateable_macros::{Model, Rater};
