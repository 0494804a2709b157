//! Tienda Storage Library
//!
//! Asset storage abstraction for the Tienda admin backend: the
//! `AssetStorage` trait and the local filesystem backend that persists
//! uploaded product images and returns a reusable reference (URL).
//!
//! # Storage key format
//!
//! All backends use the same key layout: `products/{filename}`. Keys must
//! not contain `..` or a leading `/`.

pub mod factory;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalAssetStorage;
pub use tienda_core::StorageBackend;
pub use traits::{AssetStorage, StorageError, StorageResult};
