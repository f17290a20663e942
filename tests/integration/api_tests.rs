//! API integration tests for the listing and image endpoints.
//!
//! Tests verify:
//! - Folder and image listings (content, ordering, extension filter)
//! - Image streaming (content type, inline disposition, body bytes)
//! - Validation failures and the structured JSON error shape
//! - Path traversal rejection

use axum::http::StatusCode;
use tower::ServiceExt;

use imgserve::server::WELCOME_MESSAGE;

use super::test_utils::{
    body_bytes, body_json, get, post_json, service, FAVICON_BYTES, PNG_BYTES,
};

// =============================================================================
// Welcome + Favicon
// =============================================================================

#[tokio::test]
async fn test_welcome_message() {
    let service = service().await;

    let response = service.router.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], WELCOME_MESSAGE);
}

#[tokio::test]
async fn test_favicon_served() {
    let service = service().await;

    let response = service.router.oneshot(get("/favicon.ico")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "inline"
    );

    let bytes = body_bytes(response).await;
    assert_eq!(bytes, FAVICON_BYTES);
}

#[tokio::test]
async fn test_favicon_missing() {
    let service = service().await;
    tokio::fs::remove_file(service.root.path().join("favicon.ico"))
        .await
        .unwrap();

    let response = service.router.oneshot(get("/favicon.ico")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
}

// =============================================================================
// Folder Listing
// =============================================================================

#[tokio::test]
async fn test_folders_lists_only_directories() {
    let service = service().await;

    let response = service.router.oneshot(get("/folders")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // favicon.ico is a file; only the two directories appear, sorted.
    assert_eq!(json["folders"], serde_json::json!(["docs", "images"]));
}

// =============================================================================
// Image Listing
// =============================================================================

#[tokio::test]
async fn test_images_in_folder() {
    let service = service().await;

    let response = service
        .router
        .oneshot(post_json("/folders/images", r#"{"folder": "images"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // webp, txt, and the thumbs/ subdirectory are excluded; uppercase
    // extensions still match the filter.
    assert_eq!(
        json["images"],
        serde_json::json!(["UPPER.PNG", "a.png", "b.jpg", "c.jpeg", "d.gif"])
    );
}

#[tokio::test]
async fn test_images_in_empty_folder() {
    let service = service().await;

    let response = service
        .router
        .oneshot(post_json("/folders/images", r#"{"folder": "docs"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["images"], serde_json::json!([]));
}

#[tokio::test]
async fn test_images_missing_folder() {
    let service = service().await;

    let response = service
        .router
        .oneshot(post_json("/folders/images", r#"{"folder": "nope"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn test_images_empty_folder_name() {
    let service = service().await;

    let response = service
        .router
        .oneshot(post_json("/folders/images", r#"{"folder": "   "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_images_traversal_folder_rejected() {
    let service = service().await;

    let response = service
        .router
        .oneshot(post_json("/folders/images", r#"{"folder": "../"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_images_malformed_body() {
    let service = service().await;

    let response = service
        .router
        .oneshot(post_json("/folders/images", "this is not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
    assert!(json["detail"].is_string());
}

// =============================================================================
// Image Streaming
// =============================================================================

#[tokio::test]
async fn test_image_retrieval_success() {
    let service = service().await;

    let response = service.router.oneshot(get("/images/a.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "inline"
    );

    let bytes = body_bytes(response).await;
    assert_eq!(bytes, PNG_BYTES);
}

#[tokio::test]
async fn test_image_content_type_inference() {
    let service = service().await;

    let response = service
        .router
        .clone()
        .oneshot(get("/images/b.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );

    let response = service.router.oneshot(get("/images/d.gif")).await.unwrap();
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/gif"
    );
}

#[tokio::test]
async fn test_image_uppercase_extension() {
    let service = service().await;

    let response = service
        .router
        .oneshot(get("/images/UPPER.PNG"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_image_missing_file() {
    let service = service().await;

    let response = service
        .router
        .oneshot(get("/images/missing.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_image_missing_folder() {
    let service = service().await;

    let response = service
        .router
        .oneshot(get("/nonexistent/file.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_disallowed_extension() {
    let service = service().await;

    let response = service
        .router
        .oneshot(get("/images/notes.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
    assert!(json["detail"].as_str().unwrap().contains("notes.txt"));
}

#[tokio::test]
async fn test_image_no_extension() {
    let service = service().await;

    let response = service.router.oneshot(get("/images/noext")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_traversal_filename_rejected() {
    let service = service().await;

    // Percent-encoded separators decode into the path parameter and must be
    // caught by validation, not resolved.
    let response = service
        .router
        .oneshot(get("/images/..%2F..%2Fsecret.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_image_traversal_folder_rejected() {
    let service = service().await;

    let response = service
        .router
        .oneshot(get("/..%2F/a.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Error Shape
// =============================================================================

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let service = service().await;

    let response = service
        .router
        .oneshot(get("/a/b/c/d"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn test_wrong_method_returns_json_405() {
    let service = service().await;

    let response = service
        .router
        .oneshot(post_json("/folders", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "method_not_allowed");
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn test_every_error_carries_detail_and_status() {
    let service = service().await;

    let cases = [
        (get("/images/missing.png"), StatusCode::NOT_FOUND),
        (get("/images/notes.txt"), StatusCode::BAD_REQUEST),
        (get("/unknown-single-segment"), StatusCode::NOT_FOUND),
        (
            post_json("/folders/images", r#"{"folder": ""}"#),
            StatusCode::BAD_REQUEST,
        ),
        (
            post_json("/folders/images", r#"{"folder": "absent"}"#),
            StatusCode::NOT_FOUND,
        ),
    ];

    for (request, expected) in cases {
        let uri = request.uri().clone();
        let response = service.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), expected, "status for {}", uri);

        let json = body_json(response).await;
        assert!(json["detail"].is_string(), "detail for {}", uri);
        assert_eq!(
            json["status"].as_u64().unwrap(),
            expected.as_u16() as u64,
            "status field for {}",
            uri
        );
    }
}
