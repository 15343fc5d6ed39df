//! Axum wiring for the GraphQL transport.
//!
//! Requests flow CSRF check -> bearer authentication -> handler. Both
//! middlewares delegate their decisions to `api-shared`; this module only
//! adapts headers and extensions to those decisions. Responses pass through
//! the error formatter before leaving the process.

use std::sync::Arc;

use async_graphql_axum::GraphQLRequest;
use axum::{
    Router,
    extract::{FromRequest, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::post,
};
use serde_json::{Value, json};

use api_shared::errors::{self, ErrorCode};
use api_shared::{Principal, PrincipalSource, auth, csrf};
use nivaran_core::config::AppConfig;
use nivaran_core::Environment;

use crate::schema::{AppSchema, SlaPolicy, build_schema};

/// Shared state for the GraphQL transport.
#[derive(Clone)]
pub struct AppState {
    schema: AppSchema,
    config: Arc<AppConfig>,
}

/// Build the `/graphql` router with CSRF and bearer-auth middleware applied.
pub fn router(config: Arc<AppConfig>) -> Router {
    let schema = build_schema(SlaPolicy {
        approaching_window: config.sla_approaching_window(),
    });
    let state = AppState { schema, config };

    // Layers run bottom-up per request: CSRF first, then authentication.
    Router::new()
        .route("/graphql", post(graphql_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_middleware,
        ))
        .layer(middleware::from_fn(csrf_middleware))
        .with_state(state)
}

/// Surfaces the principal attached to the HTTP request by the auth
/// middleware. The HTTP-shaped counterpart of the GraphQL context adapter.
struct HttpPrincipalSource<'a>(&'a axum::http::Extensions);

impl PrincipalSource for HttpPrincipalSource<'_> {
    fn principal(&self) -> Option<Principal> {
        self.0.get::<Principal>().copied()
    }
}

async fn graphql_handler(State(state): State<AppState>, request: Request) -> Response {
    let principal = HttpPrincipalSource(request.extensions()).principal();

    let gql_request: GraphQLRequest = match GraphQLRequest::from_request(request, &()).await {
        Ok(gql_request) => gql_request,
        Err(rejection) => return rejection.into_response(),
    };

    let mut inner = gql_request.into_inner();
    if let Some(principal) = principal {
        inner = inner.data(principal);
    }

    let response = state.schema.execute(inner).await;
    sanitized_response(response, state.config.environment())
}

/// Rejects forged cookie-authenticated requests.
///
/// Browsers cannot attach custom headers to simple cross-origin
/// submissions, so requiring `x-requested-with` (alongside `SameSite=Lax`
/// cookies upstream) blocks classic CSRF. Bearer-token clients are exempt.
async fn csrf_middleware(request: Request, next: Next) -> Response {
    let authorization = header_str(request.headers(), AUTHORIZATION.as_str());
    let requested_with = header_str(request.headers(), csrf::CSRF_HEADER);

    match csrf::check(authorization, requested_with) {
        Ok(()) => next.run(request).await,
        Err(err) => error_response(StatusCode::FORBIDDEN, ErrorCode::Forbidden, &err.to_string()),
    }
}

/// Authenticates bearer credentials into a request-scoped [`Principal`].
///
/// Requests without bearer credentials proceed anonymously; the role guards
/// decide what anonymous callers may reach. Requests with invalid
/// credentials are rejected outright rather than downgraded to anonymous.
async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match header_str(request.headers(), AUTHORIZATION.as_str()) {
        Some(value) if value.starts_with("Bearer ") => {
            match auth::authenticate_bearer(value, state.config.jwt_access_secret()) {
                Ok(principal) => {
                    request.extensions_mut().insert(principal);
                    next.run(request).await
                }
                Err(err) => {
                    tracing::debug!("rejected access token: {err}");
                    error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthenticated,
                        "Invalid access token",
                    )
                }
            }
        }
        _ => next.run(request).await,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Render a rejection in the GraphQL wire-error shape, so clients handle
/// middleware rejections and resolver errors uniformly.
fn error_response(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "errors": [{
                "message": message,
                "extensions": { "code": code.as_str() }
            }]
        })),
    )
        .into_response()
}

/// Serialize a GraphQL response, applying the error formatting policy to
/// every error at the boundary. Redacted originals are logged before they
/// are replaced.
fn sanitized_response(response: async_graphql::Response, environment: Environment) -> Response {
    let mut body = match serde_json::to_value(&response) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!("failed to serialize GraphQL response: {err}");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                errors::GENERIC_MESSAGE,
            );
        }
    };

    if let Some(entries) = body.get_mut("errors").and_then(Value::as_array_mut) {
        for entry in entries.iter_mut() {
            let original = entry.take();
            let formatted = errors::format_error_value(original.clone(), environment);
            if formatted.get("message") != original.get("message") {
                tracing::error!("GraphQL error redacted at boundary: {original}");
            }
            *entry = formatted;
        }
    }

    Json(body).into_response()
}
