//! Bot/origin gate middleware.
//!
//! Every request passes through here before any route logic. The gate
//! lowercases the `User-Agent` header and rejects the request outright when
//! any deny-list entry is a substring of it. Successful responses get
//! permissive CORS headers attached on the way out.
//!
//! # Deny-list format
//!
//! The deny-list is a YAML file holding bot name fragments:
//!
//! ```yaml
//! bot_user_agents:
//!   - name: Googlebot
//!   - name: Bingbot
//! ```
//!
//! Names are matched lowercase. The file is an explicit dependency handed to
//! the middleware through router state, and it is re-read only when its
//! modification time changes; a missing file leaves the gate permissive.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ApiError;

// =============================================================================
// Deny-list file format
// =============================================================================

#[derive(Debug, Deserialize)]
struct BotListFile {
    #[serde(default)]
    bot_user_agents: Vec<BotEntry>,
}

#[derive(Debug, Deserialize)]
struct BotEntry {
    name: String,
}

// =============================================================================
// BotList
// =============================================================================

#[derive(Debug, Default)]
struct CachedList {
    /// Modification time of the file the cached entries were parsed from.
    /// `None` until the first successful load.
    modified: Option<SystemTime>,
    entries: Arc<Vec<String>>,
}

/// Deny-list of lowercase bot user-agent substrings.
///
/// Cloning is cheap; clones share the underlying cache.
#[derive(Debug, Clone)]
pub struct BotList {
    path: PathBuf,
    cache: Arc<RwLock<CachedList>>,
}

impl BotList {
    /// Create a deny-list backed by the given YAML file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(RwLock::new(CachedList::default())),
        }
    }

    /// The deny-list file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current deny-list entries, re-reading the file only when its
    /// modification time changed since the last load.
    ///
    /// A missing file yields an empty list; an unreadable or unparsable file
    /// is a server error.
    pub async fn load(&self) -> Result<Arc<Vec<String>>, ApiError> {
        let modified = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata.modified().ok(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "deny-list file not found, gate is permissive");
                return Ok(Arc::new(Vec::new()));
            }
            Err(e) => {
                return Err(ApiError::Internal(format!(
                    "failed to stat deny-list: {}",
                    e
                )));
            }
        };

        if let Some(mtime) = modified {
            let cached = self
                .cache
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if cached.modified == Some(mtime) {
                return Ok(Arc::clone(&cached.entries));
            }
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to read deny-list: {}", e)))?;
        let parsed: BotListFile = serde_yaml::from_str(&raw)
            .map_err(|e| ApiError::Internal(format!("failed to parse deny-list: {}", e)))?;

        let entries: Arc<Vec<String>> = Arc::new(
            parsed
                .bot_user_agents
                .into_iter()
                .map(|entry| entry.name.to_lowercase())
                .collect(),
        );

        debug!(
            path = %self.path.display(),
            count = entries.len(),
            "reloaded deny-list"
        );

        let mut cached = self
            .cache
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        cached.modified = modified;
        cached.entries = Arc::clone(&entries);

        Ok(entries)
    }

    /// Check a lowercased user-agent against the current deny-list.
    pub async fn is_blocked(&self, user_agent: &str) -> Result<bool, ApiError> {
        let entries = self.load().await?;
        let ua = user_agent.to_lowercase();
        Ok(entries.iter().any(|bot| ua.contains(bot.as_str())))
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Gate middleware applied to the whole router.
///
/// Runs before route dispatch: a blocked user-agent never reaches a handler,
/// regardless of target endpoint. Responses that pass the gate carry the
/// permissive CORS headers explicitly.
pub async fn bot_gate(
    State(bot_list): State<BotList>,
    request: Request,
    next: Next,
) -> Response {
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    match bot_list.is_blocked(&user_agent).await {
        Ok(true) => {
            warn!(user_agent = %user_agent, "blocked bot user-agent");
            return ApiError::BotBlocked(format!(
                "{} Bot access is not allowed.",
                user_agent
            ))
            .into_response();
        }
        Ok(false) => {}
        Err(e) => return e.into_response(),
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}

// =============================================================================
// Tests
// =============================================================================
