//! Tests the routes that never touch the store and the layers every response goes through.

use anyhow::Result;
use reqwest::{header, Method, StatusCode};
use serde_json::Value;

use crate::helpers::TestApp;

#[tokio::test]
async fn healthcheck_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get("/health-check").await?;

    assert!(res.status() == StatusCode::OK, "Healthcheck FAILED!");

    Ok(())
}

#[tokio::test]
async fn root_returns_greeting() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get("/api/").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    let message = body["message"].as_str().unwrap_or_default();
    assert!(
        message.contains("PrognosCore API"),
        "Unexpected greeting: {message}"
    );

    Ok(())
}

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get("/invalidpath").await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND,
        "Invalid Path check FAILED!, expected: {}, got: {}",
        404,
        res.status().as_u16()
    );

    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> Result<()> {
    let app = TestApp::spawn().await?;

    for res in [
        app.get("/api/").await?,
        app.post_json("/api/newsletter", &serde_json::json!({ "email": "invalid-email" }))
            .await?,
    ] {
        let id = res.headers().get("x-request-id");
        assert!(id.is_some(), "Missing x-request-id on {}", res.status());
    }

    Ok(())
}

#[tokio::test]
async fn cors_preflight_allows_any_origin_with_credentials() -> Result<()> {
    let app = TestApp::spawn().await?;
    let origin = "https://www.prognoscore.example";

    let res = app
        .http_client
        .request(Method::OPTIONS, app.url("/api/contact"))
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .send()
        .await?;

    assert!(res.status().is_success(), "Preflight failed: {}", res.status());
    let headers = res.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some(origin)
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok()),
        Some("POST")
    );

    Ok(())
}

#[tokio::test]
async fn cors_headers_on_error_responses() -> Result<()> {
    let app = TestApp::spawn().await?;
    let origin = "https://www.prognoscore.example";

    let res = app
        .http_client
        .post(app.url("/api/newsletter"))
        .header(header::ORIGIN, origin)
        .json(&serde_json::json!({ "email": "invalid-email" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some(origin)
    );

    Ok(())
}
