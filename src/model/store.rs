use super::{Model, ModelError, Versioned};

/// Whole-document storage keyed by collection and id.
///
/// Every write returns the new version. `update` is the only write the
/// rating repository uses: it refuses to overwrite a document that changed
/// after it was loaded.
pub trait ModelStore: Send + Sync {
    fn load<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError>;

    /// Write unconditionally, creating the document if needed.
    fn save<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError>;

    /// Create a document that must not exist yet.
    fn insert<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError>;

    /// Overwrite a document still stored at `expected_version`.
    fn update<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError>;

    /// Returns whether the document existed.
    fn delete<M: Model>(&self, id: &str) -> Result<bool, ModelError>;

    /// All documents of `M`'s collection accepted by `predicate`.
    fn find<M: Model>(
        &self, predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError>;
}
