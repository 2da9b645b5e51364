//! Integration tests for BizGenie.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! bg-cli migrate
//!
//! # Start the server
//! cargo run -p bizgenie-server
//!
//! # Run integration tests
//! cargo test -p bizgenie-integration-tests -- --ignored
//! ```
//!
//! Each test registers its own throwaway tenant (unique email) so tests
//! do not interfere with each other or with seeded data.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("BIZGENIE_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// A client with a cookie store, carrying the session across requests.
///
/// # Panics
///
/// Panics if the HTTP client cannot be constructed.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for a throwaway account.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@test.example", Uuid::new_v4())
}

/// Register a business admin and leave the client signed in.
///
/// Returns the session response body.
///
/// # Panics
///
/// Panics if the request fails or the server rejects the registration.
pub async fn register_business_admin(client: &Client, email: &str) -> Value {
    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({
            "name": "Test Owner",
            "email": email,
            "password": "integration-pass-1",
        }))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), 201, "registration should succeed");
    resp.json().await.expect("Failed to parse session response")
}

/// Complete onboarding for the signed-in business admin.
///
/// # Panics
///
/// Panics if the request fails or the server rejects the onboarding.
pub async fn complete_onboarding(client: &Client) -> Value {
    let resp = client
        .post(format!("{}/onboarding", base_url()))
        .json(&json!({
            "name": "Acme",
            "industry": "Retail",
            "description": "Integration test tenant",
        }))
        .send()
        .await
        .expect("Failed to complete onboarding");

    assert_eq!(resp.status(), 200, "onboarding should succeed");
    resp.json().await.expect("Failed to parse onboarding response")
}
