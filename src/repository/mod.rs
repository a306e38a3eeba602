mod rating_repository;
mod scopes;

pub use rating_repository::RatingRepository;
pub use scopes::{RatingScopes, DEFAULT_HIGHEST_RATED_LIMIT};
