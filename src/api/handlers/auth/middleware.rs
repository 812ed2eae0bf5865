//! Bearer token gate for protected routes.

use crate::api::handlers::auth::{principal::Principal, token};
use crate::api::response::error_response;
use crate::cli::globals::GlobalArgs;
use axum::{
    extract::{Extension, Request},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

/// Validate the `Authorization` header and inject the authenticated
/// [`Principal`] into the request extensions.
///
/// Every failure is terminal for the request; the client must
/// re-authenticate. No state is shared across requests.
pub async fn require_auth(
    Extension(globals): Extension<GlobalArgs>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if header.is_empty() {
        return unauthorized("Missing authorization header");
    }

    // Exactly `Bearer <token>`: two segments, literal scheme
    let parts: Vec<&str> = header.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return unauthorized("Invalid authorization header format");
    }

    let claims = match token::verify(&globals.jwt_secret, parts[1]) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Token verification failed: {err}");

            return unauthorized("Invalid or expired token");
        }
    };

    let Some(principal) = Principal::from_claims(&claims) else {
        return unauthorized("Invalid token claims");
    };

    request.extensions_mut().insert(principal);

    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(error_response(message, None)),
    )
        .into_response()
}
