pub mod feedback;
pub mod health;
pub mod openapi;
pub mod schemas;
pub mod status;
pub mod tryon;
pub mod uploads;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tryon_pipeline::TryOnPipeline;

use crate::config::{CorsConfig, ServerConfig};

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The try-on pipeline.
    pub pipeline: TryOnPipeline,
}

/// HTTP-level settings applied as router layers.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub cors: CorsConfig,
    pub max_body_bytes: usize,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default(), &CorsConfig::default())
    }
}

impl HttpOptions {
    pub fn from_config(server: &ServerConfig, cors: &CorsConfig) -> Self {
        Self {
            cors: cors.clone(),
            max_body_bytes: server.max_body_bytes,
        }
    }

    fn cors_layer(&self) -> CorsLayer {
        let origin = if self.cors.allows_any() {
            AllowOrigin::any()
        } else {
            let origins: Vec<HeaderValue> = self
                .cors
                .allowed_origins
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(origins)
        };
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Build the Axum router with default HTTP options.
pub fn router(state: AppState) -> Router {
    router_with(state, &HttpOptions::default())
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
pub fn router_with(state: AppState, options: &HttpOptions) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics))
        .route("/api", get(health::root))
        .route("/api/", get(health::root))
        .route("/api/tryon", post(tryon::create_tryon))
        .route("/api/tryon/{id}", get(tryon::get_tryon))
        .route("/api/upload", post(uploads::upload))
        .route("/api/feedback", post(feedback::submit_feedback))
        .route("/api/feedback/all", get(feedback::list_feedback))
        .route(
            "/api/status",
            get(status::list_status_checks).post(status::create_status_check),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(options.cors_layer())
}
