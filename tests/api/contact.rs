use anyhow::Result;
use chrono::Utc;
use prognoscore::web::types::{ContactForm, NewsletterSignup};
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::helpers::TestApp;

fn contact_body() -> Value {
    json!({
        "name": "Test User",
        "email": "test.user@example.com",
        "company": "Test Company",
        "reason": "demo",
        "message": "We would like to see a demo of the platform."
    })
}

#[tokio::test]
async fn contact_create_ok() -> Result<()> {
    let app = TestApp::spawn().await?;
    let started = Utc::now();

    let res = app.post_json("/api/contact", &contact_body()).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let contact: ContactForm = res.json().await?;
    assert!(!contact.id.is_empty());
    assert!(
        contact.timestamp >= started,
        "Timestamp {} before {started}",
        contact.timestamp
    );
    assert_eq!(contact.name, "Test User");
    assert_eq!(contact.email, "test.user@example.com");
    assert_eq!(contact.company.as_deref(), Some("Test Company"));
    assert_eq!(contact.reason, "demo");

    let stored: Vec<ContactForm> = app.get_list("/api/contacts").await?;
    assert_eq!(stored, vec![contact]);

    Ok(())
}

#[tokio::test]
async fn contact_with_long_text_fields_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let mut body = contact_body();
    body["name"] = json!("n".repeat(1_000));
    body["reason"] = json!("r".repeat(1_000));
    body["message"] = json!("m".repeat(6_000));

    let res = app.post_json("/api/contact", &body).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let contact: ContactForm = res.json().await?;
    assert_eq!(contact.message.len(), 6_000);

    let stored: Vec<ContactForm> = app.get_list("/api/contacts").await?;
    assert_eq!(stored, vec![contact]);

    Ok(())
}

#[tokio::test]
async fn contact_without_company_is_stored_with_null_company() -> Result<()> {
    let app = TestApp::spawn().await?;

    let mut body = contact_body();
    if let Some(obj) = body.as_object_mut() {
        obj.remove("company");
    }

    let res = app.post_json("/api/contact", &body).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert!(body["company"].is_null());

    Ok(())
}

#[tokio::test]
async fn contact_create_unprocessable_entity() -> Result<()> {
    let app = TestApp::spawn().await?;

    let without = |field: &str| {
        let mut body = contact_body();
        if let Some(obj) = body.as_object_mut() {
            obj.remove(field);
        }
        body
    };
    let with = |field: &str, value: Value| {
        let mut body = contact_body();
        body[field] = value;
        body
    };

    let cases = [
        (
            json!({ "name": "Test User", "email": "test.user@example.com" }),
            "Missing reason and message",
        ),
        (without("reason"), "Missing reason"),
        (without("message"), "Missing message"),
        (without("name"), "Missing name"),
        (without("email"), "Missing email"),
        (with("email", json!("invalid-email")), "Invalid email"),
        (with("name", json!("")), "Empty name"),
        (with("message", json!(null)), "Null message"),
    ];

    for (body, description) in cases {
        let res = app.post_json("/api/contact", &body).await?;
        assert_eq!(
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "Wrong response for request with: {description}"
        );

        let body: Value = res.json().await?;
        assert_eq!(body["error"]["message"], "Received invalid input");
        assert!(
            body["error"]["data"]["detail"].is_string(),
            "Missing detail for: {description}"
        );
    }

    let stored: Vec<ContactForm> = app.get_list("/api/contacts").await?;
    assert!(stored.is_empty());

    Ok(())
}

#[tokio::test]
async fn lists_only_contain_their_own_entity() -> Result<()> {
    let app = TestApp::spawn().await?;

    app.post_json("/api/contact", &contact_body()).await?;
    app.post_json("/api/newsletter", &json!({ "email": "reader@example.com" }))
        .await?;

    let contacts: Vec<ContactForm> = app.get_list("/api/contacts").await?;
    let signups: Vec<NewsletterSignup> = app.get_list("/api/newsletter").await?;
    let status_checks: Vec<Value> = app.get_list("/api/status").await?;

    assert_eq!(contacts.len(), 1);
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0].email, "reader@example.com");
    assert!(status_checks.is_empty());

    Ok(())
}
