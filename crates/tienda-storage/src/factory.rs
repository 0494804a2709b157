use crate::{AssetStorage, LocalAssetStorage, StorageError, StorageResult};
use std::sync::Arc;
use tienda_core::{Config, StorageBackend};

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn AssetStorage>> {
    match config.storage_backend {
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalAssetStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available in this build".to_string(),
        )),
    }
}
