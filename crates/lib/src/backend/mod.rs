//! Record store implementations for Hexframe map items.
//!
//! The core never owns persistence. It consumes a record store through two
//! traits:
//!
//! - [`NodeStore`]: the store handle, with point reads and inserts.
//! - [`NodeTransaction`]: an atomic unit of work, opened with
//!   [`NodeStore::begin`], exposing exactly the queries and writes the
//!   container-collapse migration needs.
//!
//! A transaction that is dropped without [`NodeTransaction::commit`] leaves
//! the store untouched.
//!
//! Two implementations live under [`database`]: [`database::InMemory`] and,
//! with the `sqlite`/`postgres` features, `database::SqlxBackend`.

use std::any::Any;

use async_trait::async_trait;

use crate::Result;
use crate::coord::Coord;
use crate::item::{ItemId, ItemRecord};

pub mod database;
pub mod errors;

pub use errors::BackendError;

/// Handle to a store of map item records.
///
/// All implementations must be `Send` and `Sync` to allow sharing across
/// threads, and implement `Any` to allow for downcasting if needed.
#[async_trait]
pub trait NodeStore: Send + Sync + Any {
    /// Opens an atomic unit of work.
    ///
    /// Transactions are serializable with respect to each other.
    async fn begin(&self) -> Result<Box<dyn NodeTransaction>>;

    /// Retrieves a record by id.
    ///
    /// # Returns
    /// The record, or `BackendError::ItemNotFound`.
    async fn get(&self, id: ItemId) -> Result<ItemRecord>;

    /// Retrieves the record at an address, if any.
    async fn get_by_coords(&self, coords: &Coord) -> Result<Option<ItemRecord>>;

    /// Stores a new record under its own id.
    ///
    /// Fails if the id or the address is already taken.
    async fn insert(&self, record: ItemRecord) -> Result<()>;

    /// All records, ordered by id.
    async fn all_items(&self) -> Result<Vec<ItemRecord>>;

    /// Returns a reference to the store as a dynamic `Any` type.
    fn as_any(&self) -> &dyn Any;
}

/// An open unit of work against a [`NodeStore`].
///
/// Reads observe the transaction's own writes.
#[async_trait]
pub trait NodeTransaction: Send {
    /// Records whose address ends in the composition slot (`0`), deepest
    /// first. The root is never included.
    async fn containers_deepest_first(&mut self) -> Result<Vec<ItemRecord>>;

    /// Records whose `parent_id` is `id`, in address order.
    async fn children_of(&mut self, id: ItemId) -> Result<Vec<ItemRecord>>;

    /// Records strictly below `coords`: those whose id starts with the
    /// descendant prefix of `coords`. In address order.
    async fn descendants_of(&mut self, coords: &Coord) -> Result<Vec<ItemRecord>>;

    /// Rewrites the address and parent link of one record.
    ///
    /// No other field is touched. Fails with `BackendError::ItemNotFound` if
    /// the record does not exist.
    async fn update_address(
        &mut self,
        id: ItemId,
        coords: &Coord,
        parent_id: Option<ItemId>,
    ) -> Result<()>;

    /// Removes one record. Fails with `BackendError::ItemNotFound` if absent.
    async fn delete(&mut self, id: ItemId) -> Result<()>;

    /// Makes every write of this transaction visible at once.
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Discards every write of this transaction.
    async fn rollback(self: Box<Self>) -> Result<()>;
}
