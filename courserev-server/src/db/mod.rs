//! Database layer - connection pool, migrations, document store
//!
//! # Design Principles
//!
//! - Connection pool with a small, explicit limit
//! - Read-only at request time; only migrations write DDL
//! - sqlx errors become `StoreError` at this boundary

pub mod migrations;
pub mod pool;
pub mod store;

pub use pool::{create_pool, create_pool_with_options};
pub use store::PgDocumentStore;
