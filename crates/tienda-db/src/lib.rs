//! Database repositories for the data access layer
//!
//! This crate contains the repository implementations for database
//! operations. Each repository is responsible for a specific domain entity
//! and provides the queries the admin surface needs: products (behind the
//! edit form) and orders (read-only dashboard listing).

pub mod order;
pub mod product;

pub use order::OrderRepository;
pub use product::ProductRepository;
