use std::marker::PhantomData;

use tracing::debug;

use crate::error::RatingError;
use crate::lock::{InMemoryLockManager, LockManager};
use crate::model::{document_key, Collection, CollectionExt, Model, ModelStore, Versioned};
use crate::rateable::Rateable;
use crate::rater::Raters;

/// Rates stored documents by id, one writer per document at a time.
///
/// Each mutation takes the document's lock, loads it, applies the rating
/// change and writes it back with a version check before releasing the
/// lock. The lock is released on every error path too.
pub struct RatingRepository<M, S, L = InMemoryLockManager> {
    store: S,
    locks: L,
    _marker: PhantomData<fn() -> M>,
}

impl<M, S> RatingRepository<M, S>
where
    M: Rateable + Model,
    S: ModelStore,
{
    pub fn new(store: S) -> Self {
        Self::with_lock_manager(store, InMemoryLockManager::new())
    }
}

impl<M, S, L> RatingRepository<M, S, L>
where
    M: Rateable + Model,
    S: ModelStore,
    L: LockManager,
{
    pub fn with_lock_manager(store: S, locks: L) -> Self {
        Self {
            store,
            locks,
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Typed access to the documents, including the rating scopes.
    pub fn collection(&self) -> Collection<'_, S, M> {
        self.store.collection::<M>()
    }

    pub fn get(&self, id: &str) -> Result<Option<Versioned<M>>, RatingError> {
        Ok(self.store.load(id)?)
    }

    pub fn rate<R: Raters>(
        &self,
        id: &str,
        value: i64,
        raters: R,
    ) -> Result<Versioned<M>, RatingError> {
        self.rate_weighted(id, value, raters, 1)
    }

    pub fn rate_weighted<R: Raters>(
        &self,
        id: &str,
        value: i64,
        raters: R,
        weight: i64,
    ) -> Result<Versioned<M>, RatingError> {
        self.mutate(id, |model| model.rate_weighted(value, raters, weight))
    }

    pub fn unrate<R: Raters>(&self, id: &str, raters: R) -> Result<Versioned<M>, RatingError> {
        self.mutate(id, |model| model.unrate(raters))
    }

    fn mutate<F>(&self, id: &str, apply: F) -> Result<Versioned<M>, RatingError>
    where
        F: FnOnce(&mut M) -> Result<(), RatingError>,
    {
        let key = document_key(M::COLLECTION, id);
        let guard = self.locks.acquire(&key)?;

        let Some(Versioned { mut data, version }) = self.store.load::<M>(id)? else {
            return Err(RatingError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: id.to_string(),
            });
        };

        apply(&mut data)?;
        let saved = self.store.update(&data, version)?;
        debug!(
            collection = M::COLLECTION,
            id,
            version = saved.version,
            rating = ?saved.data.rating(),
            "rating persisted"
        );

        guard.release()?;
        Ok(saved)
    }
}
