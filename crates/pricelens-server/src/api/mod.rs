mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use pricelens_core::{AppConfig, Environment};
use pricelens_scraper::{Aggregator, PageFetcher};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

pub struct AppState<F> {
    pub aggregator: Arc<Aggregator<F>>,
}

impl<F> AppState<F> {
    pub fn new(aggregator: Aggregator<F>) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            aggregator: Arc::clone(&self.aggregator),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Caps a caller-supplied result limit. `None` keeps each site's default.
pub(super) fn normalize_limit(limit: Option<i64>) -> Option<usize> {
    limit.map(|n| usize::try_from(n.clamp(1, 50)).unwrap_or(1))
}

/// Which browser origins may call the API cross-origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    AnyOrigin,
    /// Only the listed origins. An empty list disables cross-origin access.
    Origins(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Production honours `PRICELENS_CORS_ORIGINS`; every other environment
    /// allows any origin.
    pub fn for_env(env: &Environment, origins: &[String]) -> Self {
        if *env != Environment::Production {
            return Self::AnyOrigin;
        }
        let allowed = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "ignoring unusable CORS origin");
                    None
                }
            })
            .collect();
        Self::Origins(allowed)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::for_env(&config.env, &config.cors_origins)
    }
}

fn build_cors(policy: CorsPolicy) -> CorsLayer {
    let allow_origin = match policy {
        CorsPolicy::AnyOrigin => AllowOrigin::any(),
        CorsPolicy::Origins(origins) => AllowOrigin::list(origins),
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app<F>(state: AppState<F>, cors: CorsPolicy) -> Router
where
    F: PageFetcher + 'static,
{
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/search", get(search::search::<F>))
        .route("/search", get(search::search::<F>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors(cors))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
