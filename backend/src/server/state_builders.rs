//! Builders for HTTP state ports.
//!
//! With a database pool the ports are backed by Diesel and PostGIS adapters;
//! without one they fall back to in-memory stores so the server can run
//! standalone.

use std::sync::Arc;

use mockable::Clock;

use petapedia::domain::ports::{
    InMemoryProductRepository, InMemoryUserRepository, ProductRepository, SpatialStore,
    UserRepository,
};
use petapedia::domain::{AccountService, AccountServiceDeps, GeoLookupService, ProductService};
use petapedia::inbound::http::state::{HttpState, HttpStatePorts};
use petapedia::outbound::memory::InMemorySpatialStore;
use petapedia::outbound::persistence::{
    DbPool, DieselProductRepository, DieselUserRepository, PostgisSpatialStore,
};
use petapedia::outbound::security::{Argon2PasswordHasher, JwtAccessTokenService};

use super::ServerConfig;

struct Stores {
    spatial: Arc<dyn SpatialStore>,
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
}

fn build_stores(pool: Option<&DbPool>) -> Stores {
    match pool {
        Some(pool) => Stores {
            spatial: Arc::new(PostgisSpatialStore::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            products: Arc::new(DieselProductRepository::new(pool.clone())),
        },
        None => Stores {
            spatial: Arc::new(InMemorySpatialStore::new()),
            users: Arc::new(InMemoryUserRepository::default()),
            products: Arc::new(InMemoryProductRepository::default()),
        },
    }
}

/// Assemble the handler state from configuration.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the token signing secret is rejected.
pub(crate) fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> std::io::Result<HttpState> {
    let Stores {
        spatial,
        users,
        products,
    } = build_stores(config.db_pool.as_ref());

    let tokens = JwtAccessTokenService::new(&config.jwt_secret, clock.clone())
        .map_err(std::io::Error::other)?;
    let accounts = Arc::new(AccountService::new(
        AccountServiceDeps {
            users,
            hasher: Arc::new(Argon2PasswordHasher::new()),
            tokens: Arc::new(tokens),
            clock,
        },
        config.jwt_ttl,
    ));

    Ok(HttpState::new(HttpStatePorts {
        geo: Arc::new(GeoLookupService::new(spatial, config.store_deadline)),
        accounts: accounts.clone(),
        authenticator: accounts,
        products: Arc::new(ProductService::new(products)),
    }))
}
