//! Tienda Core Library
//!
//! This crate provides the shared domain layer of the Tienda admin backend:
//! product and order models, the editable product draft and its controller,
//! slug derivation, error types, and configuration.

pub mod config;
pub mod draft;
pub mod error;
pub mod models;
pub mod slug;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use draft::{DraftCommand, DraftEditor, DraftRejection, FieldError, ProductDraft};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use slug::slugify;
pub use storage_types::StorageBackend;
