//! Application assembly for HTTP integration suites.
//!
//! Mirrors the server's fixture-mode wiring from public parts only: the
//! spatial store is supplied by the caller, accounts and products live in
//! memory.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use petapedia::Trace;
use petapedia::domain::ports::{InMemoryProductRepository, InMemoryUserRepository, SpatialStore};
use petapedia::domain::{
    AccountService, AccountServiceDeps, DEFAULT_TOKEN_TTL, GeoLookupService, ProductService,
};
use petapedia::inbound::http::accounts::{login, register};
use petapedia::inbound::http::geo::{get_region, get_road};
use petapedia::inbound::http::json::json_config;
use petapedia::inbound::http::products::{create_product, list_products};
use petapedia::inbound::http::state::{HttpState, HttpStatePorts};
use petapedia::outbound::security::{Argon2PasswordHasher, JwtAccessTokenService};
use zeroize::Zeroizing;

const TEST_SECRET: &[u8] = b"integration-suite-signing-secret-0123456789";

/// Handler state over `spatial` with the given store deadline.
pub(crate) fn http_state(spatial: Arc<dyn SpatialStore>, deadline: Duration) -> HttpState {
    let clock = Arc::new(DefaultClock);
    let tokens = JwtAccessTokenService::new(&Zeroizing::new(TEST_SECRET.to_vec()), clock.clone())
        .expect("test secret is long enough");
    let accounts = Arc::new(AccountService::new(
        AccountServiceDeps {
            users: Arc::new(InMemoryUserRepository::default()),
            hasher: Arc::new(Argon2PasswordHasher::new()),
            tokens: Arc::new(tokens),
            clock,
        },
        DEFAULT_TOKEN_TTL,
    ));
    HttpState::new(HttpStatePorts {
        geo: Arc::new(GeoLookupService::new(spatial, deadline)),
        accounts: accounts.clone(),
        authenticator: accounts,
        products: Arc::new(ProductService::new(Arc::new(
            InMemoryProductRepository::default(),
        ))),
    })
}

/// Full route table over `state`.
pub(crate) fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/api").service(get_road).service(get_region))
        .service(register)
        .service(login)
        .service(create_product)
        .service(list_products)
}
