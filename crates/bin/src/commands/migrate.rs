//! Migrate command - collapses composition containers in a store.

use hexframe::backend::database::InMemory;
use hexframe::migration::ContainerCollapse;

use crate::backend::{backend_label, create_store, snapshot_path};
use crate::cli::{Backend, MigrateArgs};
use crate::output::{OutputFormat, write_plan, write_report};

/// Run the migrate command
pub async fn run(args: &MigrateArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let config = &args.backend_config;
    let store = create_store(config).await?;
    let label = backend_label(config);
    let migration = ContainerCollapse::new();

    if args.dry_run {
        let plan = migration.dry_run(store.as_ref()).await?;
        write_plan(&mut std::io::stdout().lock(), &label, &plan, format)?;
        return Ok(());
    }

    let report = migration.run(store.as_ref()).await?;

    // The in-memory store only persists through its snapshot file.
    if config.backend == Backend::Inmemory
        && !report.is_noop()
        && let Some(in_memory) = store.as_any().downcast_ref::<InMemory>()
    {
        let path = snapshot_path(config);
        in_memory.save_to_file(&path).await?;
        tracing::info!("Saved migrated store to {}", path.display());
    }

    write_report(&mut std::io::stdout().lock(), &label, &report, false, format)
}
