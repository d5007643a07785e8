//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between row types and domain
//! values. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> Result<(), petapedia::outbound::persistence::PoolError> {
//! use petapedia::outbound::persistence::{DbPool, PoolConfig, PostgisSpatialStore};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/petapedia")).await?;
//! let store = PostgisSpatialStore::new(pool);
//! # Ok(())
//! # }
//! ```

pub(crate) mod diesel_helpers;
mod diesel_product_repository;
mod diesel_spatial_ingestion_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod postgis_spatial_store;
mod schema;

pub use diesel_product_repository::DieselProductRepository;
pub use diesel_spatial_ingestion_repository::DieselSpatialIngestionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use postgis_spatial_store::PostgisSpatialStore;
