use hexframe::{
    Coord, ItemContent, ItemId, ItemRecord,
    backend::{NodeStore, database::InMemory},
};

// ==========================
// STORE FACTORIES
// ==========================

/// Creates a test store based on the TEST_BACKEND env var.
///
/// Supported values:
/// - "inmemory" or unset: InMemory store (default)
/// - "sqlite": SQLite in-memory store (requires `sqlite` feature)
/// - "postgres": PostgreSQL store (requires `postgres` feature and TEST_POSTGRES_URL)
///
/// # Example
/// ```bash
/// TEST_BACKEND=sqlite cargo test --features sqlite
/// TEST_BACKEND=postgres TEST_POSTGRES_URL="postgres://localhost/hexframe_test" \
///   cargo test --features postgres
/// ```
pub async fn test_store() -> Box<dyn NodeStore> {
    match std::env::var("TEST_BACKEND").as_deref() {
        Ok("sqlite") => sqlite_store().await,
        Ok("postgres") => {
            #[cfg(feature = "postgres")]
            {
                use hexframe::backend::database::Postgres;
                let url = std::env::var("TEST_POSTGRES_URL")
                    .unwrap_or_else(|_| "postgres://localhost/hexframe_test".to_string());
                Box::new(
                    Postgres::connect_postgres_isolated(&url)
                        .await
                        .expect("Failed to connect to PostgreSQL"),
                )
            }
            #[cfg(not(feature = "postgres"))]
            {
                panic!("TEST_BACKEND=postgres requires the 'postgres' feature to be enabled")
            }
        }
        Ok("inmemory") | Ok("") | Err(_) => Box::new(InMemory::new()),
        Ok(other) => {
            panic!("Unknown TEST_BACKEND value: {other}. Supported: inmemory, sqlite, postgres")
        }
    }
}

async fn sqlite_store() -> Box<dyn NodeStore> {
    #[cfg(feature = "sqlite")]
    {
        use hexframe::backend::database::Sqlite;
        Box::new(
            Sqlite::sqlite_in_memory()
                .await
                .expect("Failed to create SQLite backend"),
        )
    }
    #[cfg(not(feature = "sqlite"))]
    {
        panic!("TEST_BACKEND=sqlite requires the 'sqlite' feature to be enabled")
    }
}

/// Every store that needs no external service: the TEST_BACKEND store,
/// plus SQLite when the feature is on and TEST_BACKEND did not pick it.
pub async fn local_stores() -> Vec<(&'static str, Box<dyn NodeStore>)> {
    let mut stores = vec![("default", test_store().await)];
    #[cfg(feature = "sqlite")]
    if std::env::var("TEST_BACKEND").as_deref() != Ok("sqlite") {
        stores.push(("sqlite", sqlite_store().await));
    }
    stores
}

// ==========================
// RECORD BUILDERS
// ==========================

pub fn coord(id: &str) -> Coord {
    id.parse().expect("Failed to parse test address")
}

/// A `Base` record titled after its id.
pub fn item(id: i64, coords: &str, parent: Option<i64>) -> ItemRecord {
    ItemRecord::new(ItemId::new(id), coord(coords), parent.map(ItemId::new))
        .with_content(ItemContent::titled(format!("item {id}")))
}

/// The `User` root of space `owner,0`.
pub fn user_root(id: i64, owner: &str) -> ItemRecord {
    ItemRecord::user_root(ItemId::new(id), Coord::root(owner, 0))
}

pub async fn insert_all(store: &dyn NodeStore, records: Vec<ItemRecord>) {
    for record in records {
        store.insert(record).await.expect("Failed to insert record");
    }
}

/// Fetches a record by id, panicking if it is missing.
pub async fn fetch(store: &dyn NodeStore, id: i64) -> ItemRecord {
    store
        .get(ItemId::new(id))
        .await
        .expect("Failed to fetch record")
}

pub async fn assert_missing(store: &dyn NodeStore, id: i64) {
    let err = store
        .get(ItemId::new(id))
        .await
        .expect_err("Record should be gone");
    assert!(err.is_not_found(), "unexpected error: {err}");
}
