mod analysis;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use blogdex_acquire::AcquisitionChain;
use blogdex_core::AppConfig;
use blogdex_ranking::{RankingCache, RankingEnricher};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub chain: Arc<AcquisitionChain>,
    pub enricher: Arc<RankingEnricher>,
}

impl AppState {
    /// Wire the acquisition chain, ranking cache, and enricher from config.
    ///
    /// # Errors
    ///
    /// Fails when an HTTP client cannot be constructed.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let chain = Arc::new(AcquisitionChain::from_config(&config)?);
        let cache = Arc::new(RankingCache::new(Duration::from_secs(
            config.ranking_cache_ttl_secs,
        )));
        let enricher = Arc::new(RankingEnricher::from_parts(
            &config.search_base_url,
            config.http_timeout_secs,
            &config.user_agent,
            cache,
            config.ranking_delay_ms,
        )?);
        Ok(Self {
            config,
            chain,
            enricher,
        })
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
            "rate_limited" | "usage_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/analysis/blog", post(analysis::analyze_blog))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        )))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::MockServer;

    pub(super) async fn test_state(
        blog_server: &MockServer,
        feed_server: &MockServer,
        search_server: &MockServer,
    ) -> AppState {
        let mut config = blogdex_core::load_app_config_from_env().expect("default config");
        config.blog_base_url = blog_server.uri();
        config.feed_base_url = feed_server.uri();
        config.search_base_url = search_server.uri();
        config.page_timeout_secs = 5;
        config.http_timeout_secs = 5;
        config.ranking_delay_ms = 0;
        AppState::from_config(Arc::new(config)).expect("state builds")
    }

    #[tokio::test]
    async fn health_returns_ok_with_request_id() {
        let blog = MockServer::start().await;
        let feed = MockServer::start().await;
        let search = MockServer::start().await;
        let app = build_app(
            test_state(&blog, &feed, &search).await,
            default_rate_limit_state(),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"].as_str(), Some("ok"));
        assert!(json["meta"]["request_id"].is_string());
    }

    #[test]
    fn api_error_codes_map_to_statuses() {
        let validation = ApiError::new("req-1", "validation_error", "bad input").into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let limited = ApiError::new("req-2", "usage_limited", "limit reached").into_response();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);

        let internal = ApiError::new("req-3", "internal_error", "boom").into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
