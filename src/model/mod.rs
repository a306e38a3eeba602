//! Document storage for rateable entities.
//!
//! A rateable is persisted as one document: the aggregate fields and the
//! marks travel together, so a save can never split them. Stores only need
//! whole-document load/save plus a version number per document; the
//! rating layer never issues partial updates.
//!
//! ```ignore
//! use rateable::{CollectionExt, InMemoryModelStore, Model, Ratings};
//!
//! #[derive(Serialize, Deserialize, Clone, Model)]
//! #[model(collection = "posts")]
//! struct Post {
//!     id: String,
//!     ratings: Ratings,
//! }
//!
//! let store = InMemoryModelStore::new();
//! store.collection::<Post>().save(&post)?;
//! let loaded = store.collection::<Post>().get("post-1")?;
//! ```

mod collection;
mod error;
mod in_memory;
mod store;

use serde::{de::DeserializeOwned, Serialize};

pub use collection::{Collection, CollectionExt};
pub use error::ModelError;
pub use in_memory::InMemoryModelStore;
pub use store::ModelStore;

/// A document type with a collection name and a string id.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Collection the documents live in, e.g. `"posts"`.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Key this document is stored and locked under.
    fn key(&self) -> String {
        document_key(Self::COLLECTION, self.id())
    }
}

/// `"collection:id"`.
pub fn document_key(collection: &str, id: &str) -> String {
    format!("{collection}:{id}")
}

/// A loaded or saved document with the version it was stored at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}
