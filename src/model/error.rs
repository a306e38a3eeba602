/// Failures reported by a [`ModelStore`](super::ModelStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The stored document moved on since it was loaded.
    #[error("version conflict on {collection}:{id} (loaded {expected}, stored {actual})")]
    VersionConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    #[error("document {collection}:{id} already exists")]
    AlreadyExists { collection: String, id: String },
    #[error("document {collection}:{id} not found")]
    NotFound { collection: String, id: String },
    #[error("document encoding failed: {0}")]
    Serde(String),
    #[error("document storage failed: {0}")]
    Storage(String),
}
