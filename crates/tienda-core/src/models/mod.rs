//! Data models for the application
//!
//! This module contains the data structures used throughout the application,
//! organized by domain.

mod order;
mod product;

// Re-export all models for convenient imports
pub use order::*;
pub use product::*;
