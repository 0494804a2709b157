//! Application state shared across request handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tienda_core::Config;
use tienda_db::{OrderRepository, ProductRepository};
use tienda_storage::AssetStorage;

/// Database handles: the pool plus the repositories built over it.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub product_repository: ProductRepository,
    pub order_repository: OrderRepository,
}

/// Upload limits and the storage backend behind `/upload`.
#[derive(Clone)]
pub struct AssetConfig {
    pub storage: Arc<dyn AssetStorage>,
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub assets: AssetConfig,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: PgPool, storage: Arc<dyn AssetStorage>, config: Config) -> Self {
        Self {
            db: DbState {
                product_repository: ProductRepository::new(pool.clone()),
                order_repository: OrderRepository::new(pool.clone()),
                pool,
            },
            assets: AssetConfig {
                storage,
                max_file_size_bytes: config.upload_max_file_size_bytes,
                allowed_extensions: config.upload_allowed_extensions.clone(),
                allowed_content_types: config.upload_allowed_content_types.clone(),
            },
            config: Arc::new(config),
        }
    }
}

// AppState is shared across tokio tasks, so it must stay Send + Sync.
fn _assert_app_state_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppState>();
}
