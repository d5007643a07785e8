//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! ports, so tests can swap in doubles without any I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, BearerAuthenticator, GeoLookup, ProductCatalogue};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub geo: Arc<dyn GeoLookup>,
    pub accounts: Arc<dyn AccountCommand>,
    pub authenticator: Arc<dyn BearerAuthenticator>,
    pub products: Arc<dyn ProductCatalogue>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub geo: Arc<dyn GeoLookup>,
    pub accounts: Arc<dyn AccountCommand>,
    pub authenticator: Arc<dyn BearerAuthenticator>,
    pub products: Arc<dyn ProductCatalogue>,
}

impl HttpState {
    /// Unpack the port bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            geo,
            accounts,
            authenticator,
            products,
        } = ports;
        Self {
            geo,
            accounts,
            authenticator,
            products,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
