use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, response::Json, routing::get};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{HealthRes, HealthService};
use nivaran_core::config::AppConfig;

#[derive(OpenApi)]
#[openapi(paths(health), components(schemas(HealthRes)))]
struct ApiDoc;

/// Main entry point for the Nivaran application
///
/// Validates the environment into an immutable configuration, then serves
/// the GraphQL API together with a small REST operational surface:
/// - `POST /graphql`: the platform API (role-guarded resolvers)
/// - `GET /health`: health check for monitoring and load balancers
/// - `/swagger-ui`: documentation for the REST surface
///
/// Configuration failures are fatal: every missing or invalid environment
/// value is reported in a single aggregated error and the process does not
/// start.
///
/// # Environment Variables
/// - `DATABASE_URL`: datastore connection string (required)
/// - `JWT_ACCESS_SECRET` / `JWT_REFRESH_SECRET`: token signing secrets (required)
/// - `REDIS_URL`: cache connection string (default: "redis://localhost:6379")
/// - `NODE_ENV`: development | production | test (default: "development")
/// - `PORT`: listen port (default: 4000)
/// - `SENTRY_DSN`: error reporting DSN (optional)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration or server startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nivaran=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));

    tracing::info!(
        "++ Starting Nivaran API on {} ({})",
        addr,
        config.environment()
    );

    let app = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_graphql::router(config.clone()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the Nivaran service.
/// This endpoint is used for monitoring and load balancer health checks.
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}
