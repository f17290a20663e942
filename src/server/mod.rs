//! HTTP server layer for imgserve.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │   request → gate (deny-list) → routes → handlers → response     │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │    gate     │  │  handlers   │  │        routes           │  │
//! │  │ (user-agent │  │ (endpoints, │  │  (router + CORS +       │  │
//! │  │  deny-list) │  │  errors)    │  │   tracing config)       │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod gate;
pub mod handlers;
pub mod routes;

pub use gate::{bot_gate, BotList};
pub use handlers::{
    favicon_handler, folders_handler, image_handler, images_handler, root_handler, AppState,
    ErrorBody, FolderRequest, FolderResponse, ImageListResponse, ImagePathParams, MessageResponse,
    WELCOME_MESSAGE,
};
pub use routes::{create_router, RouterConfig};
