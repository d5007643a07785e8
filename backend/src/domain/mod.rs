//! Domain primitives, services, and ports.
//!
//! Purpose: hold the transport-agnostic core. Inbound adapters translate
//! requests into the values defined here; outbound adapters implement the
//! traits in [`ports`].
//!
//! Public surface:
//! - [`geo`]: coordinates, queries, stored features, and the GeoJSON
//!   assembler.
//! - [`GeoLookupService`]: nearest-road and containing-region lookups.
//! - [`AccountService`] and [`ProductService`]: the shop use-cases.
//! - [`Error`] / [`ErrorCode`]: the error payload shared by every endpoint.

pub mod access_token;
pub mod account_service;
pub mod auth;
pub mod error;
pub mod geo;
pub mod geo_lookup_service;
pub mod geojson_ingestion;
pub mod ports;
pub mod product;
pub mod product_service;
pub mod trace_id;
pub mod user;

pub use self::access_token::{AccessClaims, AccessToken};
pub use self::account_service::{AccountService, AccountServiceDeps, DEFAULT_TOKEN_TTL};
pub use self::auth::{CredentialsValidationError, LoginCredentials, Registration};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::geo_lookup_service::{DEFAULT_STORE_DEADLINE, GeoLookupService};
pub use self::geojson_ingestion::{
    FeatureKind, GeoJsonIngestionOutcome, GeoJsonIngestionService, SkippedFeature,
};
pub use self::product::{Product, ProductDraft, ProductId, ProductValidationError};
pub use self::product_service::ProductService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, PasswordDigest, Role, USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError,
    Username,
};
