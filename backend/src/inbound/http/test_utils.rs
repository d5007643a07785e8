//! Test helpers for inbound HTTP components.
//!
//! Each builder takes the one double a test configures and fills the other
//! ports with bare mocks, so any unexpected call fails the test.

use std::sync::Arc;

use crate::domain::ports::{
    MockAccountCommand, MockBearerAuthenticator, MockGeoLookup, MockProductCatalogue,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

struct Doubles {
    geo: MockGeoLookup,
    accounts: MockAccountCommand,
    authenticator: MockBearerAuthenticator,
    products: MockProductCatalogue,
}

impl Default for Doubles {
    fn default() -> Self {
        Self {
            geo: MockGeoLookup::new(),
            accounts: MockAccountCommand::new(),
            authenticator: MockBearerAuthenticator::new(),
            products: MockProductCatalogue::new(),
        }
    }
}

impl From<Doubles> for HttpState {
    fn from(doubles: Doubles) -> Self {
        Self::new(HttpStatePorts {
            geo: Arc::new(doubles.geo),
            accounts: Arc::new(doubles.accounts),
            authenticator: Arc::new(doubles.authenticator),
            products: Arc::new(doubles.products),
        })
    }
}

pub fn state_with_geo(geo: MockGeoLookup) -> HttpState {
    Doubles {
        geo,
        ..Doubles::default()
    }
    .into()
}

pub fn state_with_accounts(accounts: MockAccountCommand) -> HttpState {
    Doubles {
        accounts,
        ..Doubles::default()
    }
    .into()
}

pub fn state_with_authenticator(authenticator: MockBearerAuthenticator) -> HttpState {
    Doubles {
        authenticator,
        ..Doubles::default()
    }
    .into()
}

/// State for protected product handlers.
pub fn state_with_products(
    products: MockProductCatalogue,
    authenticator: MockBearerAuthenticator,
) -> HttpState {
    Doubles {
        authenticator,
        products,
        ..Doubles::default()
    }
    .into()
}
