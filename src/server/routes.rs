//! Router configuration for imgserve.
//!
//! This module defines the HTTP routes and applies the gate middleware,
//! CORS, and request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /                      - Welcome message
//! /favicon.ico           - Favicon from the static root
//! /folders               - List subdirectories (GET)
//! /folders/images        - List images in a folder (POST)
//! /{folder}/{filename}   - Stream one image (GET)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use imgserve::repo::ImageRepository;
//! use imgserve::server::{create_router, BotList, RouterConfig};
//!
//! let repository = ImageRepository::new("static");
//! let bot_list = BotList::new("bot.yaml");
//!
//! let router = create_router(repository, bot_list, RouterConfig::new());
//!
//! // Run the server
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::gate::{bot_gate, BotList};
use super::handlers::{
    fallback_handler, favicon_handler, folders_handler, image_handler, images_handler,
    method_not_allowed_handler, root_handler, AppState,
};
use crate::repo::ImageRepository;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None, // Allow any origin by default
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - All five endpoints plus a JSON 404 fallback
/// - The bot gate applied before route dispatch
/// - CORS configuration
/// - Request tracing (optional)
///
/// # Arguments
///
/// * `repository` - The image repository rooted at the static directory
/// * `bot_list` - The user-agent deny-list handed to the gate middleware
/// * `config` - Router configuration
pub fn create_router(
    repository: ImageRepository,
    bot_list: BotList,
    config: RouterConfig,
) -> Router {
    let app_state = AppState::new(repository);

    let cors = build_cors_layer(&config);

    // Middleware layers run outside-in: tracing, then CORS, then the gate,
    // then route dispatch. The gate therefore sees every request before any
    // handler, including the fallback.
    let router = Router::new()
        .route("/", get(root_handler))
        .route("/favicon.ico", get(favicon_handler))
        .route("/folders", get(folders_handler))
        .route("/folders/images", post(images_handler))
        .route("/{folder}/{filename}", get(image_handler))
        .fallback(fallback_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(app_state)
        .layer(middleware::from_fn_with_state(bot_list, bot_gate))
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
