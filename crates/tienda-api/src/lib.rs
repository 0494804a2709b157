//! Tienda API Library
//!
//! This crate provides the HTTP API handlers, services, and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError, ValidatedJson};
pub use state::AppState;
