//! Map item storage operations for SQL backends.
//!
//! Every helper runs on a plain connection so the same code serves pool
//! reads on [`SqlxBackend`](super::SqlxBackend) and statements inside an
//! open [`SqlxTransaction`](super::SqlxTransaction).

use chrono::{DateTime, Utc};
use sqlx::AnyConnection;

use crate::Result;
use crate::backend::errors::BackendError;
use crate::coord::Coord;
use crate::item::{ItemContent, ItemId, ItemRecord, ItemType};

use super::SqlxResultExt;

const SELECT_COLUMNS: &str = "SELECT id, owner_id, group_id, path, parent_id, item_type, \
     title, content, preview, link, created_at, updated_at FROM map_items";

/// Column tuple matching [`SELECT_COLUMNS`].
type ItemRow = (
    i64,
    String,
    i64,
    String,
    Option<i64>,
    String,
    String,
    String,
    String,
    String,
    i64,
    i64,
);

fn timestamp(id: ItemId, millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        BackendError::CorruptAddress {
            id,
            reason: format!("timestamp {millis} out of range"),
        }
        .into()
    })
}

fn row_to_record(row: ItemRow) -> Result<ItemRecord> {
    let (
        id,
        owner_id,
        group_id,
        path,
        parent_id,
        item_type,
        title,
        content,
        preview,
        link,
        created_at,
        updated_at,
    ) = row;
    let id = ItemId::new(id);

    let coords: Coord = format!("{owner_id},{group_id}:{path}")
        .parse()
        .map_err(|e: crate::coord::CoordError| BackendError::CorruptAddress {
            id,
            reason: e.to_string(),
        })?;

    Ok(ItemRecord {
        id,
        coords,
        parent_id: parent_id.map(ItemId::new),
        item_type: ItemType::from_stored(&item_type),
        content: ItemContent {
            title,
            content,
            preview,
            link,
        },
        created_at: timestamp(id, created_at)?,
        updated_at: timestamp(id, updated_at)?,
    })
}

fn rows_to_records(rows: Vec<ItemRow>) -> Result<Vec<ItemRecord>> {
    rows.into_iter().map(row_to_record).collect()
}

fn depth(coords: &Coord) -> i64 {
    coords.depth() as i64
}

pub(crate) async fn get(conn: &mut AnyConnection, id: ItemId) -> Result<ItemRecord> {
    let row: Option<ItemRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await
        .sql_context("Failed to get item")?;

    match row {
        Some(row) => row_to_record(row),
        None => Err(BackendError::ItemNotFound { id }.into()),
    }
}

pub(crate) async fn get_by_coords(
    conn: &mut AnyConnection,
    coords: &Coord,
) -> Result<Option<ItemRecord>> {
    let row: Option<ItemRow> = sqlx::query_as(&format!(
        "{SELECT_COLUMNS} WHERE owner_id = $1 AND group_id = $2 AND path = $3"
    ))
    .bind(coords.owner_id())
    .bind(coords.group_id())
    .bind(coords.path_string())
    .fetch_optional(&mut *conn)
    .await
    .sql_context("Failed to look up address")?;

    row.map(row_to_record).transpose()
}

pub(crate) async fn all_items(conn: &mut AnyConnection) -> Result<Vec<ItemRecord>> {
    let rows: Vec<ItemRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY id"))
        .fetch_all(&mut *conn)
        .await
        .sql_context("Failed to list items")?;
    rows_to_records(rows)
}

/// Inserts a record after checking that neither its id nor its address is
/// taken. Callers run this inside a transaction.
pub(crate) async fn insert(conn: &mut AnyConnection, record: &ItemRecord) -> Result<()> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM map_items WHERE id = $1")
        .bind(record.id.get())
        .fetch_optional(&mut *conn)
        .await
        .sql_context("Failed to check item id")?;
    if existing.is_some() {
        return Err(BackendError::DuplicateId { id: record.id }.into());
    }
    ensure_address_free(conn, &record.coords, record.id).await?;

    sqlx::query(
        "INSERT INTO map_items (id, owner_id, group_id, path, depth, parent_id, item_type,
             title, content, preview, link, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind(record.id.get())
    .bind(record.coords.owner_id())
    .bind(record.coords.group_id())
    .bind(record.coords.path_string())
    .bind(depth(&record.coords))
    .bind(record.parent_id.map(ItemId::get))
    .bind(record.item_type.as_str())
    .bind(record.content.title.as_str())
    .bind(record.content.content.as_str())
    .bind(record.content.preview.as_str())
    .bind(record.content.link.as_str())
    .bind(record.created_at.timestamp_millis())
    .bind(record.updated_at.timestamp_millis())
    .execute(&mut *conn)
    .await
    .sql_context("Failed to insert item")?;

    Ok(())
}

async fn ensure_address_free(conn: &mut AnyConnection, coords: &Coord, id: ItemId) -> Result<()> {
    let occupant: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM map_items WHERE owner_id = $1 AND group_id = $2 AND path = $3",
    )
    .bind(coords.owner_id())
    .bind(coords.group_id())
    .bind(coords.path_string())
    .fetch_optional(&mut *conn)
    .await
    .sql_context("Failed to check address")?;

    match occupant {
        Some((existing,)) if existing != id.get() => Err(BackendError::DuplicateAddress {
            coords: coords.to_string(),
            existing: ItemId::new(existing),
        }
        .into()),
        _ => Ok(()),
    }
}

/// Rows whose last step is the composition slot. Paths hold only digits,
/// `-` and `,`, so the pattern needs no escaping.
pub(crate) async fn containers_deepest_first(conn: &mut AnyConnection) -> Result<Vec<ItemRecord>> {
    let rows: Vec<ItemRow> = sqlx::query_as(&format!(
        "{SELECT_COLUMNS} WHERE path = '0' OR path LIKE '%,0' \
         ORDER BY depth DESC, owner_id, group_id, path"
    ))
    .fetch_all(&mut *conn)
    .await
    .sql_context("Failed to list containers")?;

    let mut records = rows_to_records(rows)?;
    // SQL orders paths as text; keep the same order as the other backends.
    records.sort_by(|a, b| {
        b.coords
            .depth()
            .cmp(&a.coords.depth())
            .then_with(|| a.coords.cmp(&b.coords))
    });
    Ok(records)
}

pub(crate) async fn children_of(conn: &mut AnyConnection, id: ItemId) -> Result<Vec<ItemRecord>> {
    let rows: Vec<ItemRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE parent_id = $1"))
        .bind(id.get())
        .fetch_all(&mut *conn)
        .await
        .sql_context("Failed to list children")?;

    let mut records = rows_to_records(rows)?;
    records.sort_by(|a, b| a.coords.cmp(&b.coords));
    Ok(records)
}

pub(crate) async fn descendants_of(
    conn: &mut AnyConnection,
    coords: &Coord,
) -> Result<Vec<ItemRecord>> {
    let rows: std::result::Result<Vec<ItemRow>, sqlx::Error> = if coords.is_root() {
        sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE owner_id = $1 AND group_id = $2 AND depth > 0"
        ))
        .bind(coords.owner_id())
        .bind(coords.group_id())
        .fetch_all(&mut *conn)
        .await
    } else {
        sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE owner_id = $1 AND group_id = $2 AND path LIKE $3"
        ))
        .bind(coords.owner_id())
        .bind(coords.group_id())
        .bind(format!("{},%", coords.path_string()))
        .fetch_all(&mut *conn)
        .await
    };

    let mut records = rows_to_records(rows.sql_context("Failed to list descendants")?)?;
    records.sort_by(|a, b| a.coords.cmp(&b.coords));
    Ok(records)
}

pub(crate) async fn update_address(
    conn: &mut AnyConnection,
    id: ItemId,
    coords: &Coord,
    parent_id: Option<ItemId>,
) -> Result<()> {
    ensure_address_free(conn, coords, id).await?;

    let result = sqlx::query(
        "UPDATE map_items SET owner_id = $1, group_id = $2, path = $3, depth = $4, parent_id = $5
         WHERE id = $6",
    )
    .bind(coords.owner_id())
    .bind(coords.group_id())
    .bind(coords.path_string())
    .bind(depth(coords))
    .bind(parent_id.map(ItemId::get))
    .bind(id.get())
    .execute(&mut *conn)
    .await
    .sql_context("Failed to update address")?;

    if result.rows_affected() == 0 {
        return Err(BackendError::ItemNotFound { id }.into());
    }
    Ok(())
}

pub(crate) async fn delete(conn: &mut AnyConnection, id: ItemId) -> Result<()> {
    let result = sqlx::query("DELETE FROM map_items WHERE id = $1")
        .bind(id.get())
        .execute(&mut *conn)
        .await
        .sql_context("Failed to delete item")?;

    if result.rows_affected() == 0 {
        return Err(BackendError::ItemNotFound { id }.into());
    }
    Ok(())
}
