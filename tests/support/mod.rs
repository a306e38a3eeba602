//! Host models shared by the integration suites.

#![allow(dead_code)]

use rateable::{impl_rateable, Model, Rater, RaterRef, RatingConfig, Ratings};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Rater)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Debug, Rater)]
#[rater(kind = "Admin")]
pub struct Admin {
    #[rater(id)]
    pub login: String,
}

/// Rateable with no configured range: any value is accepted.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Model)]
#[model(collection = "posts")]
pub struct Post {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ratings: Ratings,
}

impl Post {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ratings: Ratings::new(),
        }
    }
}

impl_rateable!(Post, ratings, RatingConfig::new().unbounded());

/// Rateable restricted to users, marks in `-5..=7`, rated by its author by default.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Model)]
pub struct Comment {
    pub id: String,
    pub author_id: Option<String>,
    pub content: String,
    pub ratings: Ratings,
}

impl Comment {
    pub fn new(id: &str, author_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            author_id: author_id.map(str::to_string),
            ..Self::default()
        }
    }

    fn author(&self) -> Option<RaterRef> {
        self.author_id
            .as_deref()
            .map(|id| RaterRef::new(id, "User"))
    }
}

impl_rateable!(
    Comment,
    ratings,
    RatingConfig::new()
        .range(-5, 7)
        .rated_by(&["User"])
        .default_rater(Comment::author)
);

/// Rateable using the default `1..=5` range.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Model)]
#[model(collection = "articles")]
pub struct Article {
    #[model(id)]
    pub slug: String,
    pub ratings: Ratings,
}

impl Article {
    pub fn new(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            ratings: Ratings::new(),
        }
    }
}

impl_rateable!(Article, ratings);
