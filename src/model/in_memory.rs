use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{document_key, Model, ModelError, ModelStore, Versioned};

/// A stored JSON document and its version.
struct Document {
    json: Vec<u8>,
    version: u64,
}

impl Document {
    fn encode<M: Model>(model: &M, version: u64) -> Result<Self, ModelError> {
        let json = serde_json::to_vec(model).map_err(|e| ModelError::Serde(e.to_string()))?;
        Ok(Self { json, version })
    }

    fn decode<M: Model>(&self) -> Result<Versioned<M>, ModelError> {
        let data =
            serde_json::from_slice(&self.json).map_err(|e| ModelError::Serde(e.to_string()))?;
        Ok(Versioned {
            data,
            version: self.version,
        })
    }
}

type Documents = HashMap<String, Document>;

/// Process-local document store. Documents are kept as JSON so loading
/// exercises the same serde path a real database would, including legacy
/// field aliases. Clones share the same documents.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    documents: Arc<RwLock<Documents>>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> Result<usize, ModelError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ModelError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Documents>, ModelError> {
        self.documents
            .read()
            .map_err(|_| ModelError::Storage("document map poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Documents>, ModelError> {
        self.documents
            .write()
            .map_err(|_| ModelError::Storage("document map poisoned".into()))
    }
}

fn stored<M: Model>(model: &M, version: u64) -> Versioned<M> {
    Versioned {
        data: model.clone(),
        version,
    }
}

impl ModelStore for InMemoryModelStore {
    fn load<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let documents = self.read()?;
        documents
            .get(&document_key(M::COLLECTION, id))
            .map(Document::decode::<M>)
            .transpose()
    }

    fn save<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = model.key();
        let mut documents = self.write()?;

        let version = documents.get(&key).map_or(0, |d| d.version) + 1;
        documents.insert(key, Document::encode(model, version)?);
        Ok(stored(model, version))
    }

    fn insert<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = model.key();
        let mut documents = self.write()?;

        if documents.contains_key(&key) {
            return Err(ModelError::AlreadyExists {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            });
        }
        documents.insert(key, Document::encode(model, 1)?);
        Ok(stored(model, 1))
    }

    fn update<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError> {
        let key = model.key();
        let mut documents = self.write()?;

        let Some(current) = documents.get(&key).map(|d| d.version) else {
            return Err(ModelError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            });
        };
        if current != expected_version {
            return Err(ModelError::VersionConflict {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
                expected: expected_version,
                actual: current,
            });
        }

        let version = current + 1;
        documents.insert(key, Document::encode(model, version)?);
        Ok(stored(model, version))
    }

    fn delete<M: Model>(&self, id: &str) -> Result<bool, ModelError> {
        let mut documents = self.write()?;
        Ok(documents.remove(&document_key(M::COLLECTION, id)).is_some())
    }

    fn find<M: Model>(
        &self, predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        let documents = self.read()?;
        let prefix = document_key(M::COLLECTION, "");

        let mut found = Vec::new();
        for document in documents
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, document)| document)
        {
            let loaded = document.decode::<M>()?;
            if predicate(&loaded.data) {
                found.push(loaded);
            }
        }
        Ok(found)
    }
}
