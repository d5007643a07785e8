//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod bearer;
pub mod error;
pub mod geo;
pub mod health;
pub mod json;
pub mod products;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
