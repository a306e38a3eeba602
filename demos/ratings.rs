//! Walkthrough: rate a few recipes, reload them and query the collection.
//!
//! Run with `RUST_LOG=rateable=debug` to see every mark and lock.

use rateable::{
    impl_rateable, InMemoryModelStore, Model, CollectionExt, Rateable, Rater, RatingConfig,
    RatingError, RatingRepository, RatingScopes, Ratings, DEFAULT_HIGHEST_RATED_LIMIT,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Debug, Rater)]
struct Cook {
    id: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Model)]
struct Recipe {
    id: String,
    title: String,
    #[serde(default)]
    ratings: Ratings,
}

impl_rateable!(Recipe, ratings, RatingConfig::new().range(1, 5).rated_by(&["Cook"]));

fn recipe(id: &str, title: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        ratings: Ratings::new(),
    }
}

fn main() -> Result<(), RatingError> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let ana = Cook { id: "ana".into() };
    let ben = Cook { id: "ben".into() };
    let cy = Cook { id: "cy".into() };

    let store = InMemoryModelStore::new();

    // Rate in memory, then persist.
    let mut soup = recipe("soup", "Tomato soup");
    soup.rate(4, &ana)?;
    soup.rate_weighted(2, &ben, 3)?;
    soup.rate_and_save(&store, 5, &cy)?;
    println!(
        "{}: rating {:?} from {} marks (unweighted {:?})",
        soup.title,
        soup.rating(),
        soup.rate_count(),
        soup.unweighted_rating()
    );

    // Rating again replaces the earlier mark.
    soup.rate_and_save(&store, 5, &ben)?;
    println!(
        "{}: rating {:?}, moved by {:+.2}",
        soup.title,
        soup.rating(),
        soup.rating_delta()
    );

    match soup.rate(9, &ana) {
        Err(err) => println!("rejected: {err}"),
        Ok(()) => println!("unexpectedly accepted"),
    }

    store.collection().save(&recipe("bread", "Sourdough"))?;
    store.collection().save(&recipe("salad", "Green salad"))?;

    // Rate stored documents by id under a per-document lock.
    let recipes = RatingRepository::<Recipe, _>::new(store);
    recipes.rate("bread", 3, &[ana.clone(), cy.clone()])?;
    recipes.rate("salad", 2, &ben)?;
    recipes.unrate("soup", &ana)?;

    let models = recipes.collection();
    for found in models.highest_rated(DEFAULT_HIGHEST_RATED_LIMIT)? {
        println!(
            "{:>12} v{}: {:?}",
            found.data.title,
            found.version,
            found.data.rating()
        );
    }

    let unrated = models.unrated()?;
    println!("unrated recipes: {}", unrated.len());

    for (id, mark) in models.marks_cast_by(&cy)? {
        println!("{} gave {} a {}", cy.rater_id(), id, mark.value());
    }

    Ok(())
}
