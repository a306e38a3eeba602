use std::marker::PhantomData;

use super::{Model, ModelError, ModelStore, Versioned};

/// One collection of a store, typed by its document.
///
/// The rating scopes are implemented on this type, so
/// `store.collection::<Post>().highest_rated(5)` reads naturally.
pub struct Collection<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<fn() -> M>,
}

impl<'a, S: ModelStore, M: Model> Collection<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    pub fn name(&self) -> &'static str {
        M::COLLECTION
    }

    pub fn get(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        self.store.load(id)
    }

    pub fn save(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        self.store.save(model)
    }

    pub fn insert(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        self.store.insert(model)
    }

    pub fn update(&self, model: &M, expected_version: u64) -> Result<Versioned<M>, ModelError> {
        self.store.update(model, expected_version)
    }

    pub fn delete(&self, id: &str) -> Result<bool, ModelError> {
        self.store.delete::<M>(id)
    }

    pub fn find(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<Versioned<M>>, ModelError> {
        self.store.find(predicate)
    }

    /// Every document in the collection, in no particular order.
    pub fn all(&self) -> Result<Vec<Versioned<M>>, ModelError> {
        self.find(&|_: &M| true)
    }
}

/// `store.collection::<M>()` on any [`ModelStore`].
pub trait CollectionExt: ModelStore + Sized {
    fn collection<M: Model>(&self) -> Collection<'_, Self, M> {
        Collection::new(self)
    }
}

impl<S: ModelStore> CollectionExt for S {}
