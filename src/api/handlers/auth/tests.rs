use crate::api::handlers::auth::{middleware::require_auth, principal::Principal, token};
use crate::cli::globals::GlobalArgs;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use http_body_util::BodyExt;
use secrecy::SecretString;
use tower::ServiceExt;

const TEST_SECRET: &str = "test-secret";

fn globals() -> GlobalArgs {
    GlobalArgs::new(SecretString::from(TEST_SECRET.to_string()))
}

async fn whoami(Extension(principal): Extension<Principal>) -> String {
    format!("{}:{}", principal.account_id, principal.email)
}

fn test_router() -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .route_layer(middleware::from_fn(require_auth))
        .layer(Extension(globals()))
}

async fn send(authorization: Option<&str>) -> (StatusCode, String) {
    let mut request = Request::builder().uri("/whoami");
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }

    let response = test_router()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn message_of(body: &str) -> String {
    let value: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(value["success"], false);
    value["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn missing_header_rejected() {
    let (status, body) = send(None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message_of(&body), "Missing authorization header");
}

#[tokio::test]
async fn empty_header_rejected() {
    let (status, body) = send(Some("")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message_of(&body), "Missing authorization header");
}

#[tokio::test]
async fn malformed_header_rejected() {
    for value in ["Bearer", "Token abc", "Bearer a b", "bearer abc"] {
        let (status, body) = send(Some(value)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {value}");
        assert_eq!(message_of(&body), "Invalid authorization header format");
    }
}

#[tokio::test]
async fn garbled_token_rejected() {
    let (status, body) = send(Some("Bearer garbage")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message_of(&body), "Invalid or expired token");
}

#[tokio::test]
async fn expired_token_rejected_like_garbled() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = token::Claims {
        sub: "1".to_string(),
        email: "a@x.com".to_string(),
        iat: now - 2 * token::VALIDITY_SECONDS,
        exp: now - token::VALIDITY_SECONDS,
    };
    let expired = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let (status, body) = send(Some(&format!("Bearer {expired}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // Same message class as any other unverifiable token
    assert_eq!(message_of(&body), "Invalid or expired token");
}

#[tokio::test]
async fn foreign_algorithm_rejected() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = token::Claims {
        sub: "1".to_string(),
        email: "a@x.com".to_string(),
        iat: now,
        exp: now + token::VALIDITY_SECONDS,
    };
    let hs384 = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let (status, body) = send(Some(&format!("Bearer {hs384}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message_of(&body), "Invalid or expired token");
}

#[tokio::test]
async fn missing_claims_rejected() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    // well-signed and unexpired, but no email claim
    let claims = serde_json::json!({
        "sub": "1",
        "iat": now,
        "exp": now + token::VALIDITY_SECONDS,
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let (status, body) = send(Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message_of(&body), "Invalid token claims");
}

#[tokio::test]
async fn valid_token_reaches_handler_with_principal() {
    let secret = SecretString::from(TEST_SECRET.to_string());
    let token = token::issue(&secret, 7, "a@x.com").unwrap();

    let (status, body) = send(Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "7:a@x.com");
}
