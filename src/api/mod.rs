use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderName, HeaderValue, Method, Request,
    },
    middleware,
    routing::{get, post},
    Extension, Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub(crate) mod handlers;
mod openapi;
pub mod response;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

const REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String, globals: GlobalArgs, allow_origin: &str) -> Result<()> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    migrate(&pool).await?;

    let app = router(globals, pool, allow_origin)?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Apply the idempotent schema at startup, the way the ORM in a typical CRUD
/// deployment would auto-migrate.
async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .context("Failed to apply database schema")?;

    Ok(())
}

fn router(globals: GlobalArgs, pool: PgPool, allow_origin: &str) -> Result<Router> {
    let tasks = Router::new()
        .route(
            "/",
            post(handlers::tasks::create_task).get(handlers::tasks::list_tasks),
        )
        .route(
            "/:id",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route_layer(middleware::from_fn(
            handlers::auth::middleware::require_auth,
        ));

    let students = Router::new()
        .route(
            "/",
            post(handlers::students::create_student).get(handlers::students::list_students),
        )
        .route(
            "/:id",
            get(handlers::students::get_student)
                .put(handlers::students::update_student)
                .delete(handlers::students::delete_student),
        );

    let api = Router::new()
        .route("/user/register", post(handlers::users::register))
        .route("/user/login", post(handlers::users::login))
        .nest("/tasks", tasks)
        .nest("/siswa", students);

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    REQUEST_TIMEOUT_SECONDS,
                )))
                .layer(cors(allow_origin)?)
                .layer(Extension(globals))
                .layer(Extension(pool)),
        );

    Ok(app)
}

fn cors(allow_origin: &str) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT, AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    // A wildcard origin cannot be combined with credentials
    if allow_origin == "*" {
        return Ok(layer.allow_origin(Any));
    }

    let origin = HeaderValue::from_str(allow_origin)
        .with_context(|| format!("Invalid allow-origin value: {allow_origin}"))?;

    Ok(layer
        .allow_origin(AllowOrigin::exact(origin))
        .allow_credentials(true))
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;

    info!("Gracefully shutdown");
}
