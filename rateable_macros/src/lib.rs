mod attrs;
mod model;
mod rater;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Model)]
// ============================================================================

/// Derive macro that implements `rateable::Model` for a struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Model)]
/// #[model(collection = "posts")]
/// struct Post {
///     #[model(id)]
///     slug: String,
///     ratings: Ratings,
/// }
/// ```
///
/// - `collection`: storage collection name. Defaults to the snake_case
///   struct name with an `s` appended (`BlogPost` -> `blog_posts`).
/// - `#[model(id)]`: marks the identifier field. Defaults to a field named `id`.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input)
}

// ============================================================================
// #[derive(Rater)]
// ============================================================================

/// Derive macro that implements `rateable::Rater` for a struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Rater)]
/// #[rater(kind = "User")]
/// struct User {
///     #[rater(id)]
///     user_id: String,
///     name: String,
/// }
/// ```
///
/// - `kind`: the rater-kind discriminator stored on every mark. Defaults
///   to the struct name, so two rater types never collide on id alone.
/// - `#[rater(id)]`: marks the identifier field. Defaults to a field named `id`.
#[proc_macro_derive(Rater, attributes(rater))]
pub fn derive_rater(input: TokenStream) -> TokenStream {
    rater::derive_rater(input)
}
