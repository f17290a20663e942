//! # imgserve
//!
//! A read-only HTTP server exposing a static image repository.
//!
//! The service lists subdirectories of a fixed static root, lists image files
//! within a subdirectory, and streams individual images with content-type
//! inference and inline disposition. A user-agent deny-list is applied before
//! any route logic, and every failure is translated into one structured JSON
//! error shape.
//!
//! ## Architecture
//!
//! The library is organized into a few modules:
//!
//! - [`repo`] - Input validation, directory browsing, and path resolution
//!   over the static root
//! - [`server`] - Axum-based HTTP server: gate middleware, handlers, routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - The error taxonomy shared across the crate
//!
//! ## Example
//!
//! ```rust,no_run
//! use imgserve::repo::ImageRepository;
//! use imgserve::server::{create_router, BotList, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let repository = ImageRepository::new("static");
//!     let bot_list = BotList::new("bot.yaml");
//!     let router = create_router(repository, bot_list, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000")
//!         .await
//!         .expect("bind");
//!     axum::serve(listener, router).await.expect("serve");
//! }
//! ```

pub mod config;
pub mod error;
pub mod repo;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::ApiError;
pub use repo::{
    guess_mime, resolve_image, validate_filename, validate_folder, ImageRepository,
    ALLOWED_IMAGE_EXTENSIONS, LISTED_IMAGE_EXTENSIONS,
};
pub use server::{
    create_router, AppState, BotList, ErrorBody, FolderRequest, FolderResponse, ImageListResponse,
    ImagePathParams, MessageResponse, RouterConfig,
};
