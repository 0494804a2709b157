//! Product editing session service.
//!
//! Wraps a [`tienda_core::DraftEditor`] with the two collaborators a real
//! editing session needs: a product store for persistence and an asset
//! uploader for image files. The service owns the submit state machine, so a
//! second submit while one is in flight is ignored rather than duplicated.

mod service;
mod traits;

pub use service::{ProductEditorService, SubmitOutcome, SubmitPhase, UploadOutcome};
pub use traits::{AssetUploader, ProductStore, StorageUploader};
