//! Registration and login endpoints.

pub mod storage;
pub mod types;

use crate::api::handlers::auth::{password, token};
use crate::api::response::{error_response, success_response};
use crate::cli::globals::GlobalArgs;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::{error, instrument};
use types::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};

/// Single failure message for unknown identifier and wrong password alike,
/// so the two cases cannot be told apart.
const INVALID_CREDENTIALS: &str = "invalid credentials";

#[utoipa::path(
    post,
    path = "/api/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "An account with that email already exists"),
        (status = 500, description = "Registration failed"),
    ),
    tag = "user"
)]
#[instrument(skip_all)]
pub async fn register(
    pool: Extension<PgPool>,
    payload: Option<Json<RegisterRequest>>,
) -> Response {
    let request: RegisterRequest = match payload {
        Some(Json(payload)) => payload,
        None => return validation_failed(json!(["invalid request body"])),
    };

    let errors = request.validate();
    if !errors.is_empty() {
        return validation_failed(json!(errors));
    }

    let email = request.email.trim();

    // Fast path only; the unique index is the authority below.
    match storage::email_exists(&pool, email).await {
        Ok(true) => return email_conflict(),
        Ok(false) => (),
        Err(err) => {
            error!("Error checking if user exists: {err}");

            return internal_error("Failed to register user");
        }
    }

    let digest = match password::hash(&request.password) {
        Ok(digest) => digest,
        Err(err) => {
            error!("Error hashing password: {err}");

            return internal_error("Failed to register user");
        }
    };

    match storage::insert_account(&pool, request.name.trim(), email, &digest).await {
        Ok(id) => {
            let user = UserResponse {
                id,
                name: request.name.trim().to_string(),
                email: email.to_string(),
            };

            (
                StatusCode::CREATED,
                Json(success_response(Some(user), "User registered successfully")),
            )
                .into_response()
        }
        Err(err) if storage::is_unique_violation(&err) => email_conflict(),
        Err(err) => {
            error!("Error inserting user: {err}");

            internal_error("Failed to register user")
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "user"
)]
#[instrument(skip_all)]
pub async fn login(
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return validation_failed(json!(["invalid request body"])),
    };

    let Some(identifier) = request.identifier() else {
        return validation_failed(json!(["email or username is required"]));
    };

    if request.password.is_empty() {
        return validation_failed(json!(["password is required"]));
    }

    let account = match storage::find_by_identifier(&pool, identifier).await {
        Ok(Some(account)) => account,
        Ok(None) => return invalid_credentials(),
        Err(err) => {
            error!("Error looking up account: {err}");

            return internal_error("Login failed");
        }
    };

    match password::verify(&request.password, &account.password) {
        Ok(true) => (),
        Ok(false) => return invalid_credentials(),
        Err(err) => {
            error!("Stored password digest is malformed: {err}");

            return internal_error("Login failed");
        }
    }

    let token = match token::issue(&globals.jwt_secret, account.id, &account.email) {
        Ok(token) => token,
        Err(err) => {
            error!("Error issuing token: {err}");

            return internal_error("Login failed");
        }
    };

    let response = LoginResponse {
        token,
        user: UserResponse {
            id: account.id,
            name: account.name,
            email: account.email,
        },
    };

    (
        StatusCode::OK,
        Json(success_response(Some(response), "Login successful")),
    )
        .into_response()
}

fn validation_failed(errors: serde_json::Value) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(error_response("Validation failed", Some(errors))),
    )
        .into_response()
}

/// Byte-identical payload for every authentication failure.
fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(error_response("Login failed", Some(json!(INVALID_CREDENTIALS)))),
    )
        .into_response()
}

fn email_conflict() -> Response {
    (
        StatusCode::CONFLICT,
        Json(error_response(
            "Failed to register user",
            Some(json!("email already exists")),
        )),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_response(message, None)),
    )
        .into_response()
}
