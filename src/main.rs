//! imgserve - A read-only HTTP server for a static image repository.
//!
//! This binary parses configuration, prepares the static root, and starts
//! the HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgserve::{
    config::Config,
    repo::ImageRepository,
    server::{create_router, BotList, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Static root: {}", config.static_root.display());
    info!("  Deny-list: {}", config.bot_list.display());
    match &config.cors_origins {
        Some(origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    // TLS material is reserved configuration; the serving path is plain HTTP.
    if config.tls_key_pem.is_some() || config.tls_cert_pem.is_some() {
        warn!("TLS key material is configured but TLS serving is not active; ignoring");
    }

    // Prepare the repository
    let repository = ImageRepository::new(&config.static_root);
    if let Err(e) = repository.ensure_root().await {
        error!("Failed to prepare static root: {}", e);
        return ExitCode::FAILURE;
    }

    if !config.bot_list.is_file() {
        warn!(
            "Deny-list file {} not found; the gate will allow all user-agents",
            config.bot_list.display()
        );
    }
    let bot_list = BotList::new(&config.bot_list);

    // Build router configuration
    let router_config = build_router_config(&config);
    let router = create_router(repository, bot_list, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/", addr);
    info!("    curl http://{}/folders", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "imgserve=debug,tower_http=debug"
    } else {
        "imgserve=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new();

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}
