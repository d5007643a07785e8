//! Registration and login handlers.
//!
//! ```text
//! POST /register {"username":"budi","email":"budi@example.com","password":"..."}
//! POST /login    {"email":"budi@example.com","password":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{CredentialsValidationError, Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "budi")]
    pub username: String,
    #[schema(example = "budi@example.com")]
    pub email: String,
    pub password: String,
    /// `customer` (default) or `admin`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "budi@example.com")]
    pub email: String,
    pub password: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Body returned by a successful login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
    /// HS256 access token for the `Authorization: Bearer` header.
    pub token: String,
}

pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Create a shop account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid request or email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        username,
        email,
        password,
        role,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&username, &email, &password, role.as_deref())
        .map_err(map_credentials_error)?;
    state.accounts.register(&registration).await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        message: "User registered successfully".to_owned(),
    }))
}

/// Exchange email and password for an access token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid email or password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_credentials_error)?;
    let token = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        status: "success".to_owned(),
        message: "Login successful".to_owned(),
        token: token.into_inner(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAccountCommand;
    use crate::domain::{AccessToken, UserId};
    use crate::inbound::http::json::json_config;
    use crate::inbound::http::test_utils::state_with_accounts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    async fn post(accounts: MockAccountCommand, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(web::Data::new(state_with_accounts(accounts)))
                .service(register)
                .service(login),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let bytes = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[rstest]
    #[actix_web::test]
    async fn register_returns_created() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_register()
            .withf(|reg| reg.email().as_ref() == "budi@example.com")
            .times(1)
            .return_once(|_| Ok(UserId::random()));

        let (status, body) = post(
            accounts,
            "/register",
            json!({ "username": "budi", "email": "Budi@Example.com", "password": "rahasia" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
    }

    #[rstest]
    #[case(json!({ "username": "bu", "email": "b@e.com", "password": "x" }), "username")]
    #[case(json!({ "username": "budi", "email": "nope", "password": "x" }), "email")]
    #[case(json!({ "username": "budi", "email": "b@e.com", "password": "" }), "password")]
    #[case(json!({ "username": "budi", "email": "b@e.com", "password": "x", "role": "root" }), "role")]
    #[actix_web::test]
    async fn register_validates_fields(#[case] body: Value, #[case] field: &str) {
        let (status, payload) = post(MockAccountCommand::new(), "/register", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn login_returns_token() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_login()
            .return_once(|_| Ok(AccessToken::new("signed.token.value")));

        let (status, body) = post(
            accounts,
            "/login",
            json!({ "email": "budi@example.com", "password": "rahasia" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "status": "success", "message": "Login successful", "token": "signed.token.value" })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn login_failures_are_unauthorised() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_login()
            .return_once(|_| Err(Error::unauthorized("invalid email or password")));

        let (status, body) = post(
            accounts,
            "/login",
            json!({ "email": "budi@example.com", "password": "salah" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthorized");
    }
}
