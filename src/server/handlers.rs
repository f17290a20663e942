//! HTTP request handlers for the image repository API.
//!
//! # Endpoints
//!
//! - `GET /` - Welcome message
//! - `GET /favicon.ico` - Favicon from the static root
//! - `GET /folders` - List subdirectories of the static root
//! - `POST /folders/images` - List image files in one folder
//! - `GET /{folder}/{filename}` - Stream a single image inline

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tracing::{debug, error, warn};

use crate::error::ApiError;
use crate::repo::{self, ImageRepository};

/// Status code for a client that disconnected mid-request
/// (nginx's "client closed request" convention).
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Body of the `GET /` welcome response.
pub const WELCOME_MESSAGE: &str = "Welcome to the image API";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the image repository.
///
/// This is passed to all handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// The repository rooted at the configured static directory
    pub repository: Arc<ImageRepository>,
}

impl AppState {
    /// Create a new application state around the given repository.
    pub fn new(repository: ImageRepository) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// JSON body of `POST /folders/images`.
#[derive(Debug, Deserialize)]
pub struct FolderRequest {
    /// Name of a folder directly under the static root
    pub folder: String,
}

/// Path parameters for image requests.
///
/// Extracted from: `/{folder}/{filename}`
#[derive(Debug, Deserialize)]
pub struct ImagePathParams {
    /// Folder directly under the static root
    pub folder: String,

    /// Image filename within the folder
    pub filename: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// Welcome message returned from `GET /`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable greeting
    pub message: String,
}

/// Response from the folders list endpoint.
#[derive(Debug, Serialize)]
pub struct FolderResponse {
    /// Subdirectory names found directly under the static root, sorted
    pub folders: Vec<String>,
}

/// Response from the folder images endpoint.
#[derive(Debug, Serialize)]
pub struct ImageListResponse {
    /// Image filenames found directly inside the requested folder, sorted
    pub images: Vec<String>,
}

/// JSON error body returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error kind identifier (e.g. "not_found", "validation_error")
    pub error: String,

    /// Human-readable error message
    pub detail: String,

    /// HTTP status code (included for convenience)
    pub status: u16,
}

impl ErrorBody {
    /// Create a new error body.
    pub fn new(error: impl Into<String>, detail: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.into(),
            detail: detail.into(),
            status: status.as_u16(),
        }
    }
}

// =============================================================================
// Error Translation
// =============================================================================

/// Convert any [`ApiError`] to an HTTP response.
///
/// The single chokepoint of the error taxonomy: every variant becomes a JSON
/// body with a `detail` message and a matching status code. Server errors log
/// at ERROR, client errors at WARN (404 and client disconnects at DEBUG), and
/// no internal detail beyond the variant message ever reaches the wire.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::BotBlocked(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ConnectionReset => {
                StatusCode::from_u16(CLIENT_CLOSED_REQUEST).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let kind = self.kind();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = kind,
                status = status.as_u16(),
                "Server error: {}",
                detail
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = kind,
                status = status.as_u16(),
                "Resource not found: {}",
                detail
            );
        } else if matches!(self, ApiError::ConnectionReset) {
            debug!(
                error_type = kind,
                status = status.as_u16(),
                "Client disconnected: {}",
                detail
            );
        } else {
            warn!(
                error_type = kind,
                status = status.as_u16(),
                "Client error: {}",
                detail
            );
        }

        let body = ErrorBody::new(kind, detail, status);
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle the welcome endpoint.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// Serve the favicon from the static root.
///
/// # Endpoint
///
/// `GET /favicon.ico`
///
/// # Response
///
/// - `200 OK`: the favicon bytes
/// - `404 Not Found`: no favicon.ico in the static root
pub async fn favicon_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = state.repository.root().join("favicon.ico");

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound("favicon not found".to_string()));
        }
        Err(e) => return Err(ApiError::Internal(format!("failed to stat favicon: {}", e))),
    };
    if !metadata.is_file() {
        return Err(ApiError::NotFound("favicon not found".to_string()));
    }

    stream_inline(&path).await
}

/// Handle folder list requests.
///
/// # Endpoint
///
/// `GET /folders`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// { "folders": ["docs", "images"] }
/// ```
pub async fn folders_handler(
    State(state): State<AppState>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folders = state.repository.list_folders().await?;
    Ok(Json(FolderResponse { folders }))
}

/// Handle folder image list requests.
///
/// # Endpoint
///
/// `POST /folders/images` with body `{ "folder": "images" }`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// { "images": ["a.png", "b.jpg"] }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty folder name or malformed body
/// - `404 Not Found`: folder absent or not a directory
pub async fn images_handler(
    State(state): State<AppState>,
    payload: Result<Json<FolderRequest>, JsonRejection>,
) -> Result<Json<ImageListResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    repo::validate_folder(&request.folder)?;

    let images = state.repository.list_images(&request.folder).await?;
    Ok(Json(ImageListResponse { images }))
}

/// Handle single image requests.
///
/// # Endpoint
///
/// `GET /{folder}/{filename}`
///
/// # Response
///
/// - `200 OK`: image bytes with inferred `Content-Type` and
///   `Content-Disposition: inline`
/// - `400 Bad Request`: empty folder or disallowed filename extension
/// - `404 Not Found`: no such file under the static root
pub async fn image_handler(
    State(state): State<AppState>,
    Path(params): Path<ImagePathParams>,
) -> Result<Response, ApiError> {
    repo::validate_folder(&params.folder)?;
    repo::validate_filename(&params.filename)?;

    let path = repo::resolve_image(state.repository.root(), &params.folder, &params.filename)
        .await?;

    stream_inline(&path).await
}

/// Fallback for unmatched routes, so even those produce the structured
/// JSON error shape.
pub async fn fallback_handler() -> ApiError {
    ApiError::NotFound("no such endpoint".to_string())
}

/// Fallback for path matches with the wrong HTTP method, keeping those
/// responses in the structured JSON error shape as well.
pub async fn method_not_allowed_handler() -> Response {
    let body = ErrorBody::new(
        "method_not_allowed",
        "method not allowed for this endpoint",
        StatusCode::METHOD_NOT_ALLOWED,
    );
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}

/// Build a streamed inline file response with an inferred content type.
async fn stream_inline(path: &std::path::Path) -> Result<Response, ApiError> {
    let mime = repo::guess_mime(path);
    let file = tokio::fs::File::open(path).await?;
    let stream = ReaderStream::new(file);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.essence_str())
        .header(header::CONTENT_DISPOSITION, "inline")
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(format!("failed to build response: {}", e)))?;

    Ok(response)
}

// =============================================================================
// Tests
// =============================================================================
