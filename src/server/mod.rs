//! HTTP server for FolioQA
//!
//! This module owns the axum router, the shared application state, CORS
//! policy, and the serve loop with graceful shutdown.

pub mod handlers;
pub mod types;

pub use types::{AskRequest, AskResponse, ErrorResponse};

use crate::config::Config;
use crate::error::{FolioError, Result};
use crate::providers::{create_provider, GenerationProvider};
use crate::session::SessionStore;
use crate::stats::InteractionStats;

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for all request handlers
///
/// Constructed once at startup and cloned by reference (`Arc`) into every
/// handler. The session store and stats recorder serialize their own
/// access internally; nothing here requires an outer lock.
pub struct AppState {
    /// The bounded in-memory session store
    pub store: SessionStore,
    /// The generation backend
    pub provider: Box<dyn GenerationProvider>,
    /// Interaction counters for `/stats`
    pub stats: InteractionStats,
    /// Portfolio context embedded in every prompt
    pub context: String,
    /// Mode string applied when a request omits one
    pub default_mode: String,
    /// How many recent exchanges go into the prompt
    pub history_window: usize,
}

impl AppState {
    /// Build application state from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Validated service configuration
    /// * `api_key` - API key for the generation provider
    ///
    /// # Errors
    ///
    /// Returns error if provider construction or context loading fails
    pub fn from_config(config: &Config, api_key: String) -> Result<Self> {
        Ok(Self {
            store: SessionStore::new(config.chat.max_exchanges),
            provider: create_provider(&config.provider, api_key)?,
            stats: InteractionStats::new(),
            context: config.load_context()?,
            default_mode: config.chat.default_mode.clone(),
            history_window: config.chat.history_window,
        })
    }
}

/// Build the service router with all routes and middleware attached
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `allowed_origins` - CORS origin allow-list; "*" permits any origin
pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/ask", post(handlers::ask))
        .route("/stats", get(handlers::stats))
        .route("/session/new", post(handlers::new_session))
        .route("/session/:session_id", get(handlers::session_history))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer from the configured origin allow-list
///
/// A list containing "*" allows any origin. Entries that fail to parse as
/// header values are skipped with a warning rather than failing startup.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([ACCEPT, CONTENT_TYPE]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping unparseable CORS origin: {:?}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Run the HTTP server until ctrl-c
///
/// # Arguments
///
/// * `config` - Validated service configuration
///
/// # Errors
///
/// Returns error if credentials are missing, the bind address is taken,
/// or the serve loop fails
pub async fn run(config: Config) -> Result<()> {
    let api_key = config.api_key()?;
    let state = Arc::new(AppState::from_config(&config, api_key)?);
    let router = build_router(state, &config.server.allowed_origins);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FolioError::Config(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("FolioQA listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FolioError::Io(e).into())
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_from_default_config() {
        let config = Config::default();
        let state = AppState::from_config(&config, "test-key".to_string()).unwrap();
        assert_eq!(state.store.max_exchanges(), 10);
        assert_eq!(state.history_window, 3);
        assert_eq!(state.default_mode, "auto");
        assert!(state.context.contains("Portfolio Assistant"));
    }

    #[test]
    fn test_app_state_requires_api_key() {
        let config = Config::default();
        assert!(AppState::from_config(&config, String::new()).is_err());
    }

    #[test]
    fn test_cors_layer_accepts_wildcard_and_lists() {
        // Constructing the layers must not panic for either shape
        let _ = cors_layer(&["*".to_string()]);
        let _ = cors_layer(&[
            "http://localhost:3000".to_string(),
            "not a header value\u{7f}".to_string(),
        ]);
    }
}
