//! Basic usage example demonstrating the catalog lifecycle.
//!
//! Run with: `cargo run --example basic_usage`

use std::sync::Arc;

use basin_core::prelude::*;
use basin_registry::{CatalogRegistry, CreateCatalogRequest};

#[tokio::main]
async fn main() -> Result<()> {
    basin_core::init_logging(basin_core::LogFormat::Pretty);

    let store = Arc::new(MemoryCatalogStore::new());
    let directory = Arc::new(StaticMetalakeDirectory::with_metalakes(["prod-lake"]));
    let registry = CatalogRegistry::new(store, directory);
    let principal = Principal::new("user:demo")?;

    // Create a catalog under the metalake
    let mut request = CreateCatalogRequest::simple(
        CatalogIdent::of("prod-lake", "warehouse")?,
        CatalogType::Relational,
    );
    request.comment = Some("orders warehouse".to_string());
    let catalog = registry.create_catalog(request, &principal).await?;
    println!("Created: {} (revision {})", catalog.ident, catalog.revision);

    // Apply an ordered change set atomically
    let altered = registry
        .alter_catalog(
            &catalog.ident,
            &[
                CatalogChange::set_property("uri", "jdbc:postgresql://db/orders"),
                CatalogChange::set_comment("orders warehouse (eu-west-1)"),
            ],
            &principal,
        )
        .await?;
    println!("Altered: {} (revision {})", altered.ident, altered.revision);

    // Enumerate and drop
    let listed = registry.list_catalogs(catalog.ident.namespace()).await?;
    println!("Catalogs under prod-lake: {}", listed.len());

    let dropped = registry.drop_catalog(&catalog.ident, &principal).await?;
    println!("Dropped: {dropped}");

    Ok(())
}
