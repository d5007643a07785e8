//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PETAPEDIA_*` environment variables, and
//! configuration files, in that order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_STORE_DEADLINE_MS: u64 = 5_000;
const DEFAULT_JWT_TTL_HOURS: i64 = 24;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PETAPEDIA")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it the server runs on in-memory fixtures.
    pub database_url: Option<String>,
    pub pool_max_size: Option<u32>,
    /// Deadline for each spatial store call, in milliseconds.
    pub store_deadline_ms: Option<u64>,
    /// File holding the HS256 signing secret.
    pub jwt_secret_file: Option<PathBuf>,
    pub jwt_ttl_hours: Option<i64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl ServerSettings {
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Non-blank database URL, if configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    #[must_use]
    pub fn store_deadline(&self) -> Duration {
        Duration::from_millis(self.store_deadline_ms.unwrap_or(DEFAULT_STORE_DEADLINE_MS))
    }

    #[must_use]
    pub fn jwt_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.jwt_ttl_hours.unwrap_or(DEFAULT_JWT_TTL_HOURS))
    }
}
