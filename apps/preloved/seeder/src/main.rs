//! Catalog Seeder
//!
//! Scans an images directory, matches each `.jpg` against the known
//! catalog, and upserts one product per image with a freshly computed
//! embedding. Re-running refreshes embeddings without duplicating rows
//! or clobbering catalog edits.

use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{env_or_default, Environment, FromEnv};
use database::postgres::{connect_from_config_with_retry, run_migrations, PostgresConfig};
use domain_products::{PgProductRepository, ProductService};
use eyre::Result;
use tracing::{error, info, warn};

mod catalog;

use catalog::resolve_frame;

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let config = PostgresConfig::from_env()?;
    let images_dir = env_or_default("IMAGES_DIR", "public/images");

    info!("Connecting to database...");
    let db = connect_from_config_with_retry(config, None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    run_migrations::<migration::Migrator>(&db, "preloved-seeder").await?;

    let service = ProductService::new(PgProductRepository::new(db.clone()));

    info!(images_dir, "Scanning images directory");

    let entries = std::fs::read_dir(&images_dir)
        .map_err(|e| eyre::eyre!("Failed to read images directory {}: {}", images_dir, e))?;

    let mut processed = 0usize;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                error!("Failed to read directory entry: {}", e);
                continue;
            }
        };

        let filename = entry.file_name().to_string_lossy().into_owned();

        if !filename.ends_with(".jpg") {
            continue;
        }

        let Some(seed) = resolve_frame(&filename) else {
            warn!(filename, "No catalog entry for image, skipping");
            continue;
        };

        let vector = embedding::to_pgvector(&embedding::generate_embedding(&seed.embedding_text()));

        match service.upsert_product_by_image(seed.to_create(&filename), vector).await {
            Ok(product) => {
                info!(product_id = product.id, filename, name = seed.name, "Seeded product");
                processed += 1;
            }
            Err(e) => {
                // One bad image must not abort the run
                error!(filename, "Failed to seed product: {}", e);
            }
        }
    }

    info!(processed, "Catalog seeding complete");

    db.close().await?;
    Ok(())
}
