//! Configuration management for imgserve.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `IMG_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use imgserve::config::Config;
//!
//! // Parse from command line and environment
//! let config = Config::parse();
//!
//! println!("Listening on {}", config.bind_address());
//! println!("Serving images from {}", config.static_root.display());
//! ```
//!
//! # Environment Variables
//!
//! All configuration options can be set via environment variables with the `IMG_` prefix:
//!
//! - `IMG_HOST` - Server bind address (default: 0.0.0.0)
//! - `IMG_PORT` - Server port (default: 8000)
//! - `IMG_STATIC_ROOT` - Base directory for served folders (default: static)
//! - `IMG_BOT_LIST` - Path to the user-agent deny-list file (default: bot.yaml)
//! - `IMG_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)
//! - `IMG_TLS_KEY_PEM` / `IMG_TLS_CERT_PEM` - Reserved for TLS key material;
//!   accepted but not used by the active serving path

use std::path::PathBuf;

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default static root directory, relative to the working directory.
pub const DEFAULT_STATIC_ROOT: &str = "static";

/// Default deny-list file, relative to the working directory.
pub const DEFAULT_BOT_LIST: &str = "bot.yaml";

// =============================================================================
// CLI Arguments
// =============================================================================

/// imgserve - A read-only HTTP server for a static image repository.
///
/// Serves folder listings and individual images from a fixed directory tree,
/// with a user-agent deny-list applied before any route logic.
#[derive(Parser, Debug, Clone)]
#[command(name = "imgserve")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "IMG_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "IMG_PORT")]
    pub port: u16,

    // =========================================================================
    // Repository Configuration
    // =========================================================================
    /// Base directory under which all served folders and files must reside.
    ///
    /// Created at startup if it does not exist.
    #[arg(long, default_value = DEFAULT_STATIC_ROOT, env = "IMG_STATIC_ROOT")]
    pub static_root: PathBuf,

    // =========================================================================
    // Gate Configuration
    // =========================================================================
    /// Path to the YAML deny-list of bot user-agent substrings.
    ///
    /// The file holds entries with a `name` field under a `bot_user_agents`
    /// key. A missing file leaves the gate permissive.
    #[arg(long, default_value = DEFAULT_BOT_LIST, env = "IMG_BOT_LIST")]
    pub bot_list: PathBuf,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "IMG_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // TLS Configuration (reserved)
    // =========================================================================
    /// Path to a PEM-encoded TLS private key. Reserved; the active serving
    /// path is plain HTTP and ignores this value.
    #[arg(long, env = "IMG_TLS_KEY_PEM")]
    pub tls_key_pem: Option<PathBuf>,

    /// Path to a PEM-encoded TLS certificate. Reserved; the active serving
    /// path is plain HTTP and ignores this value.
    #[arg(long, env = "IMG_TLS_CERT_PEM")]
    pub tls_cert_pem: Option<PathBuf>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.static_root.as_os_str().is_empty() {
            return Err(
                "Static root directory is required. Set --static-root or IMG_STATIC_ROOT"
                    .to_string(),
            );
        }

        if self.bot_list.as_os_str().is_empty() {
            return Err(
                "Deny-list path is required. Set --bot-list or IMG_BOT_LIST".to_string(),
            );
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
