//! Test utilities for integration tests.
//!
//! Builds a temporary static root with a known directory layout, a deny-list
//! file, and a router wired the same way `main` wires the real service.

use std::io::Write;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;

use imgserve::repo::ImageRepository;
use imgserve::server::{create_router, BotList, RouterConfig};

/// User-agent used by requests that should pass the gate.
pub const BROWSER_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/121.0";

/// Deny-list used by the default fixture.
pub const DEFAULT_BOT_YAML: &str = "\
bot_user_agents:
  - name: Googlebot
  - name: Bingbot
  - name: AhrefsBot
";

/// Contents written to `images/a.png` in the fixture tree.
pub const PNG_BYTES: &[u8] = b"\x89PNG fake image data";

/// Contents written to `favicon.ico` in the fixture tree.
pub const FAVICON_BYTES: &[u8] = b"fake favicon bytes";

/// A router plus the temporary directories backing it.
///
/// Keep the struct alive for the duration of the test; dropping it removes
/// the fixture tree.
pub struct TestService {
    pub root: tempfile::TempDir,
    pub bot_file: tempfile::NamedTempFile,
    pub router: Router,
}

/// Build the default fixture:
///
/// ```text
/// <root>/
///   favicon.ico
///   docs/                  (empty)
///   images/
///     UPPER.PNG
///     a.png  b.jpg  c.jpeg  d.gif
///     e.webp                (excluded from listings)
///     notes.txt             (excluded from listings)
///     thumbs/               (subdirectory, excluded)
/// ```
pub async fn service() -> TestService {
    service_with_bots(DEFAULT_BOT_YAML).await
}

/// Build the default fixture with a custom deny-list document.
pub async fn service_with_bots(bot_yaml: &str) -> TestService {
    let root = tempfile::tempdir().unwrap();
    let base = root.path();

    tokio::fs::write(base.join("favicon.ico"), FAVICON_BYTES)
        .await
        .unwrap();

    tokio::fs::create_dir(base.join("docs")).await.unwrap();
    tokio::fs::create_dir(base.join("images")).await.unwrap();
    tokio::fs::create_dir(base.join("images/thumbs")).await.unwrap();

    tokio::fs::write(base.join("images/UPPER.PNG"), b"upper png")
        .await
        .unwrap();
    tokio::fs::write(base.join("images/a.png"), PNG_BYTES).await.unwrap();
    tokio::fs::write(base.join("images/b.jpg"), b"jpg bytes").await.unwrap();
    tokio::fs::write(base.join("images/c.jpeg"), b"jpeg bytes").await.unwrap();
    tokio::fs::write(base.join("images/d.gif"), b"gif bytes").await.unwrap();
    tokio::fs::write(base.join("images/e.webp"), b"webp bytes").await.unwrap();
    tokio::fs::write(base.join("images/notes.txt"), b"not an image")
        .await
        .unwrap();

    let mut bot_file = tempfile::NamedTempFile::new().unwrap();
    bot_file.write_all(bot_yaml.as_bytes()).unwrap();
    bot_file.flush().unwrap();

    let repository = ImageRepository::new(base);
    let bot_list = BotList::new(bot_file.path());
    let router = create_router(repository, bot_list, RouterConfig::new());

    TestService {
        root,
        bot_file,
        router,
    }
}

/// Build a GET request with the well-behaved browser user-agent.
pub fn get(uri: &str) -> Request<Body> {
    get_with_ua(uri, BROWSER_UA)
}

/// Build a GET request with an explicit user-agent.
pub fn get_with_ua(uri: &str, user_agent: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::USER_AGENT, user_agent)
        .body(Body::empty())
        .unwrap()
}

/// Build a JSON POST request with the well-behaved browser user-agent.
pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::USER_AGENT, BROWSER_UA)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect a response body into raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
