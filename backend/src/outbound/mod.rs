//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL and PostGIS repositories using Diesel ORM
//! - **security**: password hashing and access token signing
//! - **memory**: process-local stand-ins used when no database is configured
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
