//! `PostgreSQL` stores for the ticket-inventory engine.
//!
//! This crate provides the production implementations of the two stores the
//! engine owns: [`PostgresBlockStore`] for inventory blocks and
//! [`PostgresLogStore`] for the append-only audit log. The read-only source
//! stores (events, layouts, orders, holds) are backed by the surrounding
//! application's own data access and are not implemented here.
//!
//! # Example
//!
//! ```no_run
//! use ticket_inventory_postgres::{ensure_schema, PostgresBlockStore, PostgresConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = PostgresConfig::from_env().connect().await?;
//!     ensure_schema(&pool).await?;
//!     let blocks = PostgresBlockStore::new(pool);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod block_store;
pub mod codec;
pub mod config;
pub mod log_store;
pub mod schema;

pub use block_store::PostgresBlockStore;
pub use config::PostgresConfig;
pub use log_store::PostgresLogStore;
pub use schema::ensure_schema;
