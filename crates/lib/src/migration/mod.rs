//! Data migrations over a record store.
//!
//! The only migration is the container collapse. Older maps stored composed
//! children below a container tile at the composition slot (`…,0`). The
//! current layout addresses them directly from the parent with a negative
//! step (`…,-d`), so containers are removed and their subtrees re-addressed.
//!
//! A run has two phases:
//!
//! 1. Inside one store transaction, read the containers, their children and
//!    the children's subtrees, and compute a [`MigrationPlan`] with the pure
//!    [`plan_container_collapse`].
//! 2. Apply the plan's writes in that same transaction and commit.
//!
//! Any error rolls the transaction back. A second run finds
//! no containers and does nothing.

mod errors;
mod plan;

use std::collections::BTreeMap;

pub use errors::MigrationError;
pub use plan::{AddressUpdate, MigrationPlan, MigrationReport, plan_container_collapse};

use crate::Result;
use crate::backend::{NodeStore, NodeTransaction};
use crate::item::{ItemId, ItemRecord};

/// Runs the container collapse against a [`NodeStore`].
///
/// ```rust
/// # tokio_test_block(async {
/// use hexframe::backend::NodeStore;
/// use hexframe::backend::database::InMemory;
/// use hexframe::migration::ContainerCollapse;
/// use hexframe::{Coord, ItemId, ItemRecord};
///
/// let store = InMemory::new();
/// store.insert(ItemRecord::user_root(ItemId::new(1), Coord::root("1", 0))).await?;
/// store.insert(ItemRecord::new(ItemId::new(2), "1,0:0".parse()?, Some(ItemId::new(1)))).await?;
/// store.insert(ItemRecord::new(ItemId::new(3), "1,0:0,2".parse()?, Some(ItemId::new(2)))).await?;
///
/// let report = ContainerCollapse::new().run(&store).await?;
/// assert_eq!(report.containers_removed, 1);
/// assert_eq!(store.get(ItemId::new(3)).await?.coords.to_string(), "1,0:-2");
/// # Ok::<(), hexframe::Error>(())
/// # }).unwrap();
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerCollapse {
    _private: (),
}

impl ContainerCollapse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses every container and commits the result.
    ///
    /// On error the transaction is rolled back and the store is unchanged.
    pub async fn run(&self, store: &dyn NodeStore) -> Result<MigrationReport> {
        let mut txn = store.begin().await?;

        let outcome = async {
            let plan = plan_from_transaction(txn.as_mut()).await?;
            apply(txn.as_mut(), &plan).await?;
            Ok::<_, crate::Error>(plan)
        }
        .await;

        let plan = match outcome {
            Ok(plan) => plan,
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback after failed migration failed");
                }
                tracing::error!(error = %e, "Container collapse aborted");
                return Err(e);
            }
        };

        if plan.is_empty() {
            txn.rollback().await?;
            tracing::info!("No composition containers found, nothing to migrate");
            return Ok(plan.report);
        }

        txn.commit().await?;
        tracing::info!(
            containers_removed = plan.report.containers_removed,
            children_reattached = plan.report.children_reattached,
            descendants_readdressed = plan.report.descendants_readdressed,
            "Container collapse committed"
        );
        Ok(plan.report)
    }

    /// Computes the plan a [`run`](Self::run) would apply, without writing.
    pub async fn dry_run(&self, store: &dyn NodeStore) -> Result<MigrationPlan> {
        let mut txn = store.begin().await?;
        let plan = plan_from_transaction(txn.as_mut()).await;
        txn.rollback().await?;

        let plan = plan?;
        tracing::info!(
            containers = plan.report.containers_removed,
            updates = plan.updates.len(),
            "Container collapse planned (dry run)"
        );
        Ok(plan)
    }
}

/// Reads everything the planner needs and plans the collapse.
///
/// The snapshot is the containers, their direct children and every
/// descendant of those children.
pub async fn plan_from_transaction(txn: &mut dyn NodeTransaction) -> Result<MigrationPlan> {
    let mut snapshot: BTreeMap<ItemId, ItemRecord> = BTreeMap::new();

    let containers = txn.containers_deepest_first().await?;
    tracing::debug!(count = containers.len(), "Found composition containers");

    for container in &containers {
        for child in txn.children_of(container.id).await? {
            for descendant in txn.descendants_of(&child.coords).await? {
                snapshot.entry(descendant.id).or_insert(descendant);
            }
            snapshot.entry(child.id).or_insert(child);
        }
    }
    for container in containers {
        snapshot.insert(container.id, container);
    }

    plan_container_collapse(snapshot.into_values())
}

/// Applies a plan inside an open transaction.
///
/// Containers are deleted first so their addresses are free before any
/// record moves.
pub async fn apply(txn: &mut dyn NodeTransaction, plan: &MigrationPlan) -> Result<()> {
    for id in &plan.deletions {
        txn.delete(*id).await?;
    }
    for update in &plan.updates {
        tracing::debug!(id = %update.id, from = %update.from, to = %update.to, "Re-addressing item");
        txn.update_address(update.id, &update.to, update.parent_id)
            .await?;
    }
    Ok(())
}
