//! One-off data-seeding tool.
//!
//! Upserts the seed packages into the configured data file, keyed by title,
//! so repeated runs update in place instead of duplicating.

use anyhow::Context;
use wayfarer_core::Config;
use wayfarer_db::{seed, DocumentStore, PackageRepository};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    wayfarer_api::telemetry::init_tracing();

    let config = Config::from_env()?;
    let data_file = config
        .data_file
        .context("DATA_FILE must be set so the seeded packages persist")?;

    tracing::info!(data_file = %data_file.display(), "Seeding packages");

    let store = DocumentStore::open(data_file).await?;
    let repository = PackageRepository::new(store);

    seed::upsert_seed_packages(&repository).await?;

    tracing::info!("Migration completed successfully");
    Ok(())
}
