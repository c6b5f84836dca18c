//! Core storage operations for the InMemory store
//!
//! These work on a plain [`ItemMap`] so the store handle and open
//! transactions share one implementation.

use std::cmp::Reverse;

use super::ItemMap;
use crate::{
    Result,
    backend::errors::BackendError,
    coord::Coord,
    item::{ItemId, ItemRecord},
};

fn sorted_by_coords<'a>(records: impl Iterator<Item = &'a ItemRecord>) -> Vec<ItemRecord> {
    let mut records: Vec<ItemRecord> = records.cloned().collect();
    records.sort_by(|a, b| a.coords.cmp(&b.coords));
    records
}

pub(crate) fn get(items: &ItemMap, id: ItemId) -> Result<ItemRecord> {
    items
        .get(&id)
        .cloned()
        .ok_or_else(|| BackendError::ItemNotFound { id }.into())
}

pub(crate) fn find_by_coords<'a>(items: &'a ItemMap, coords: &Coord) -> Option<&'a ItemRecord> {
    items.values().find(|record| &record.coords == coords)
}

/// Inserts a new record, rejecting duplicate ids and occupied addresses.
pub(crate) fn insert(items: &mut ItemMap, record: ItemRecord) -> Result<()> {
    if items.contains_key(&record.id) {
        return Err(BackendError::DuplicateId { id: record.id }.into());
    }
    if let Some(existing) = find_by_coords(items, &record.coords) {
        return Err(BackendError::DuplicateAddress {
            coords: record.coords.to_string(),
            existing: existing.id,
        }
        .into());
    }
    items.insert(record.id, record);
    Ok(())
}

pub(crate) fn containers_deepest_first(items: &ItemMap) -> Vec<ItemRecord> {
    let mut containers = sorted_by_coords(
        items
            .values()
            .filter(|record| !record.coords.is_root() && record.coords.direction().is_center()),
    );
    containers.sort_by_key(|record| Reverse(record.coords.depth()));
    containers
}

pub(crate) fn children_of(items: &ItemMap, id: ItemId) -> Vec<ItemRecord> {
    sorted_by_coords(
        items
            .values()
            .filter(|record| record.parent_id == Some(id)),
    )
}

pub(crate) fn descendants_of(items: &ItemMap, coords: &Coord) -> Vec<ItemRecord> {
    sorted_by_coords(
        items
            .values()
            .filter(|record| record.coords.is_descendant_of(coords)),
    )
}

pub(crate) fn update_address(
    items: &mut ItemMap,
    id: ItemId,
    coords: &Coord,
    parent_id: Option<ItemId>,
) -> Result<()> {
    if let Some(existing) = find_by_coords(items, coords)
        && existing.id != id
    {
        return Err(BackendError::DuplicateAddress {
            coords: coords.to_string(),
            existing: existing.id,
        }
        .into());
    }

    let record = items
        .get_mut(&id)
        .ok_or(BackendError::ItemNotFound { id })?;
    record.coords = coords.clone();
    record.parent_id = parent_id;
    Ok(())
}

pub(crate) fn delete(items: &mut ItemMap, id: ItemId) -> Result<()> {
    items
        .remove(&id)
        .map(|_| ())
        .ok_or_else(|| BackendError::ItemNotFound { id }.into())
}
