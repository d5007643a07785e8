//! JSON body extraction settings.
//!
//! Actix answers malformed bodies with a plain-text 400 by default. The
//! handler installed here turns them into the shared error envelope, with
//! the parser message under `details.parseError`.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

fn payload_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let parse_error = err.to_string();
    debug!(path = %req.path(), %parse_error, "rejected request body");
    Error::invalid_request("request body is not valid JSON for this endpoint")
        .with_details(json!({ "parseError": parse_error }))
        .into()
}

/// Extractor configuration registered as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use petapedia::inbound::http::json::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(payload_error)
}
