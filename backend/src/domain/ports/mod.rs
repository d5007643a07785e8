//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`GeoLookup`], [`AccountCommand`], [`BearerAuthenticator`],
//! [`ProductCatalogue`]) are called by inbound adapters. Driven ports are
//! implemented by outbound adapters and in-memory stand-ins.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_service;
mod account_command;
mod geo_lookup;
mod password_hasher;
mod product_catalogue;
mod product_repository;
mod spatial_ingestion_repository;
mod spatial_store;
mod user_repository;

#[cfg(test)]
pub use access_token_service::MockAccessTokenService;
pub use access_token_service::{AccessTokenError, AccessTokenService};
#[cfg(test)]
pub use account_command::{MockAccountCommand, MockBearerAuthenticator};
pub use account_command::{AccountCommand, BearerAuthenticator};
#[cfg(test)]
pub use geo_lookup::MockGeoLookup;
pub use geo_lookup::GeoLookup;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use product_catalogue::MockProductCatalogue;
pub use product_catalogue::ProductCatalogue;
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{
    InMemoryProductRepository, ProductPersistenceError, ProductRepository,
};
#[cfg(test)]
pub use spatial_ingestion_repository::MockSpatialIngestionRepository;
pub use spatial_ingestion_repository::{
    RegionRecord, SpatialIngestionError, SpatialIngestionRepository,
};
#[cfg(test)]
pub use spatial_store::MockSpatialStore;
pub use spatial_store::{SpatialStore, SpatialStoreError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{InMemoryUserRepository, UserPersistenceError, UserRepository};
