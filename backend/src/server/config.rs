//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use petapedia::domain::{DEFAULT_STORE_DEADLINE, DEFAULT_TOKEN_TTL};
use petapedia::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) store_deadline: Duration,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
    pub(crate) jwt_ttl: chrono::Duration,
}

impl ServerConfig {
    /// Configuration without a database; the server runs on in-memory
    /// adapters until [`ServerConfig::with_db_pool`] is called.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            store_deadline: DEFAULT_STORE_DEADLINE,
            jwt_secret,
            jwt_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Deadline applied to every spatial store call.
    #[must_use]
    pub fn with_store_deadline(mut self, deadline: Duration) -> Self {
        self.store_deadline = deadline;
        self
    }

    /// Lifetime of issued access tokens.
    #[must_use]
    pub fn with_jwt_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.jwt_ttl = ttl;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
