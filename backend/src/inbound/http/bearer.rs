//! Bearer token extractor for protected handlers.
//!
//! Handlers take [`Authenticated`] as an argument; the request is rejected
//! with `401` before the handler runs when the token is missing or invalid.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::{AccessClaims, Error};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Verified claims of the caller.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AccessClaims);

impl Authenticated {
    #[must_use]
    pub fn claims(&self) -> &AccessClaims {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing Authorization header"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Authorization header must be ASCII"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("Authorization header must use the Bearer scheme"))
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, Error> {
    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    state.authenticator.authenticate(token).map(Authenticated)
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockBearerAuthenticator;
    use crate::domain::{Role, UserId};
    use crate::inbound::http::test_utils::state_with_authenticator;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    fn claims() -> AccessClaims {
        AccessClaims {
            sub: UserId::random(),
            role: Role::Customer,
            iat: 0,
            exp: i64::MAX,
        }
    }

    async fn call(authenticator: MockBearerAuthenticator, header: Option<&str>) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_authenticator(authenticator)))
                .route(
                    "/",
                    web::get().to(|who: Authenticated| async move {
                        HttpResponse::Ok().body(who.claims().role.as_str())
                    }),
                ),
        )
        .await;
        let mut request = actix_test::TestRequest::get().uri("/");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let bytes = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[rstest]
    #[case(None, "missing Authorization header")]
    #[case(Some("Basic dXNlcjpwYXNz"), "Authorization header must use the Bearer scheme")]
    #[case(Some("Bearer    "), "Authorization header must use the Bearer scheme")]
    #[actix_web::test]
    async fn malformed_headers_are_unauthorised(
        #[case] header: Option<&str>,
        #[case] message: &str,
    ) {
        let (status, body) = call(MockBearerAuthenticator::new(), header).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], message);
    }

    #[rstest]
    #[actix_web::test]
    async fn token_is_handed_to_authenticator() {
        let mut authenticator = MockBearerAuthenticator::new();
        authenticator
            .expect_authenticate()
            .withf(|token| token == "abc.def.ghi")
            .times(1)
            .return_once(|_| Ok(claims()));

        let (status, _) = call(authenticator, Some("Bearer abc.def.ghi")).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_tokens_are_unauthorised() {
        let mut authenticator = MockBearerAuthenticator::new();
        authenticator
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized("access token has expired")));

        let (status, body) = call(authenticator, Some("Bearer stale")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "access token has expired");
    }
}
