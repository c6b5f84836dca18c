//! In-memory record store
//!
//! This module provides an in-memory implementation of [`NodeStore`],
//! suitable for testing, development, or scenarios where data persistence
//! is handled by saving and loading the whole state as a JSON file.

mod persistence;
mod storage;

use std::any::Any;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::Result;
use crate::backend::errors::BackendError;
use crate::backend::{NodeStore, NodeTransaction};
use crate::coord::Coord;
use crate::item::{ItemId, ItemRecord};

/// Records keyed by id.
pub(crate) type ItemMap = BTreeMap<ItemId, ItemRecord>;

/// A simple in-memory store keyed by [`ItemId`].
///
/// Transactions take the write lock for their whole lifetime, so they are
/// serialized against each other and against inserts. Writes go to a
/// working copy that replaces the live map only on commit.
#[derive(Debug, Clone, Default)]
pub struct InMemory {
    pub(crate) items: Arc<RwLock<ItemMap>>,
}

impl InMemory {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_items(items: ItemMap) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Saves the entire store to a file as JSON.
    ///
    /// # Arguments
    /// * `path` - The path to the file where the state should be saved.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path).await
    }

    /// Loads a store from a JSON file written by [`InMemory::save_to_file`].
    ///
    /// If the file does not exist, a new, empty store is returned.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path).await
    }
}

#[async_trait]
impl NodeStore for InMemory {
    async fn begin(&self) -> Result<Box<dyn NodeTransaction>> {
        let guard = Arc::clone(&self.items).write_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(InMemoryTransaction {
            guard: Some(guard),
            working,
        }))
    }

    async fn get(&self, id: ItemId) -> Result<ItemRecord> {
        storage::get(&*self.items.read().await, id)
    }

    async fn get_by_coords(&self, coords: &Coord) -> Result<Option<ItemRecord>> {
        Ok(storage::find_by_coords(&*self.items.read().await, coords).cloned())
    }

    async fn insert(&self, record: ItemRecord) -> Result<()> {
        storage::insert(&mut *self.items.write().await, record)
    }

    async fn all_items(&self) -> Result<Vec<ItemRecord>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An open transaction on an [`InMemory`] store.
///
/// Holds the store's write lock until it is committed, rolled back, or
/// dropped.
pub struct InMemoryTransaction {
    guard: Option<OwnedRwLockWriteGuard<ItemMap>>,
    working: ItemMap,
}

impl InMemoryTransaction {
    fn ensure_open(&self) -> Result<()> {
        if self.guard.is_none() {
            return Err(BackendError::TransactionClosed.into());
        }
        Ok(())
    }
}

#[async_trait]
impl NodeTransaction for InMemoryTransaction {
    async fn containers_deepest_first(&mut self) -> Result<Vec<ItemRecord>> {
        self.ensure_open()?;
        Ok(storage::containers_deepest_first(&self.working))
    }

    async fn children_of(&mut self, id: ItemId) -> Result<Vec<ItemRecord>> {
        self.ensure_open()?;
        Ok(storage::children_of(&self.working, id))
    }

    async fn descendants_of(&mut self, coords: &Coord) -> Result<Vec<ItemRecord>> {
        self.ensure_open()?;
        Ok(storage::descendants_of(&self.working, coords))
    }

    async fn update_address(
        &mut self,
        id: ItemId,
        coords: &Coord,
        parent_id: Option<ItemId>,
    ) -> Result<()> {
        self.ensure_open()?;
        storage::update_address(&mut self.working, id, coords, parent_id)
    }

    async fn delete(&mut self, id: ItemId) -> Result<()> {
        self.ensure_open()?;
        storage::delete(&mut self.working, id)
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        let mut guard = self.guard.take().ok_or(BackendError::TransactionClosed)?;
        *guard = std::mem::take(&mut self.working);
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.guard.take().ok_or(BackendError::TransactionClosed)?;
        Ok(())
    }
}
