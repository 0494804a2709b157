//! Storage setup and initialization

use std::sync::Arc;

use anyhow::Result;
use tienda_core::Config;
use tienda_storage::{create_storage, AssetStorage};

/// Setup the asset storage backend
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn AssetStorage>> {
    let storage = create_storage(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;

    tracing::info!(backend = ?storage.backend_type(), "Storage initialized");
    Ok(storage)
}
