//! Collaborator traits for the product editing session.
//!
//! The editor service talks to persistence and storage only through these
//! traits, so tests can count calls and inject failures without a database
//! or a filesystem behind them.

use std::sync::Arc;

use async_trait::async_trait;
use tienda_core::models::{Product, ProductSummary};
use tienda_core::{AppError, ProductDraft};
use tienda_db::ProductRepository;
use tienda_storage::AssetStorage;
use uuid::Uuid;

/// Persistence seam for products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, AppError>;

    async fn list(&self) -> Result<Vec<ProductSummary>, AppError>;

    async fn create(&self, draft: &ProductDraft) -> Result<Product, AppError>;

    async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, AppError>;
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, AppError> {
        ProductRepository::get_by_slug(self, slug).await
    }

    async fn list(&self) -> Result<Vec<ProductSummary>, AppError> {
        ProductRepository::list(self).await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, AppError> {
        ProductRepository::create(self, draft).await
    }

    async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, AppError> {
        ProductRepository::update(self, id, draft).await
    }
}

/// Upload seam for image assets. Returns the public URL of the stored asset.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, AppError>;
}

/// [`AssetUploader`] backed by a storage backend.
#[derive(Clone)]
pub struct StorageUploader {
    storage: Arc<dyn AssetStorage>,
}

impl StorageUploader {
    pub fn new(storage: Arc<dyn AssetStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AssetUploader for StorageUploader {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, AppError> {
        let (_key, url) = self
            .storage
            .upload(filename, content_type, data)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(url)
    }
}
