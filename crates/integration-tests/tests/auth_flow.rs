//! Integration tests for authentication flows.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p bizgenie-server)
//!
//! Run with: cargo test -p bizgenie-integration-tests -- --ignored

use bizgenie_integration_tests::{
    base_url, register_business_admin, session_client, unique_email,
};
use serde_json::json;

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_signs_in_and_me_reflects_identity() {
    let client = session_client();
    let email = unique_email("register");

    let session = register_business_admin(&client, &email).await;
    assert_eq!(session["role"], "business_admin");
    assert_eq!(session["onboarded"], false);

    let me = client
        .get(format!("{}/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to get /auth/me");
    assert_eq!(me.status(), 200);

    let body: serde_json::Value = me.json().await.expect("Failed to parse body");
    assert_eq!(body["email"], email);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_with_unregistered_email_yields_invalid_credentials() {
    let client = session_client();

    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({
            "email": unique_email("nobody"),
            "password": "whatever-pass-1",
        }))
        .send()
        .await
        .expect("Failed to send login");

    assert_eq!(resp.status(), 401);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("invalid credentials"));

    // No identity was emitted: the session carries nothing
    let me = client
        .get(format!("{}/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to get /auth/me");
    assert_eq!(me.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_wrong_password_yields_invalid_credentials() {
    let client = session_client();
    let email = unique_email("wrongpass");
    register_business_admin(&client, &email).await;

    let fresh = session_client();
    let resp = fresh
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({"email": email, "password": "not-the-password"}))
        .send()
        .await
        .expect("Failed to send login");

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_logout_clears_session_and_resets_view() {
    let client = session_client();
    let email = unique_email("logout");
    register_business_admin(&client, &email).await;

    let resp = client
        .post(format!("{}/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), 204);

    // Identity gone
    let me = client
        .get(format!("{}/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to get /auth/me");
    assert_eq!(me.status(), 401);

    // View router back to the sign-in state
    let nav = client
        .get(format!("{}/nav", base_url()))
        .send()
        .await
        .expect("Failed to get /nav");
    let body: serde_json::Value = nav.json().await.expect("Failed to parse nav");
    assert_eq!(body["view"], "sign_in");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_registration_conflicts() {
    let client = session_client();
    let email = unique_email("duplicate");
    register_business_admin(&client, &email).await;

    let again = session_client();
    let resp = again
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({
            "name": "Test Owner",
            "email": email,
            "password": "integration-pass-1",
        }))
        .send()
        .await
        .expect("Failed to send registration");

    assert_eq!(resp.status(), 409);
}
