//! Integration tests for the onboarding gate.
//!
//! Run with: cargo test -p bizgenie-integration-tests -- --ignored

use bizgenie_integration_tests::{
    base_url, complete_onboarding, register_business_admin, session_client, unique_email,
};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_new_business_admin_is_gated_until_onboarding_completes() {
    let client = session_client();
    register_business_admin(&client, &unique_email("gate")).await;

    // Fresh business admin: every requested tab resolves to onboarding
    let nav = client
        .get(format!("{}/nav?tab=leads", base_url()))
        .send()
        .await
        .expect("Failed to get /nav");
    let body: serde_json::Value = nav.json().await.expect("Failed to parse nav");
    assert_eq!(body["view"], "onboarding");

    // Tenant data routes are closed while the gate is up
    let leads = client
        .post(format!("{}/leads", base_url()))
        .json(&serde_json::json!({
            "name": "Early Lead",
            "email": "early@example.com",
            "phone": "+1 555 0100",
            "source": "Website",
        }))
        .send()
        .await
        .expect("Failed to post lead");
    assert_eq!(leads.status(), 403);

    // Completing onboarding transitions to the active dashboard
    let completed = complete_onboarding(&client).await;
    assert_eq!(completed["view"], "active");
    assert_eq!(completed["tab"], "dashboard");
    assert_eq!(completed["profile"]["name"], "Acme");
    assert_eq!(completed["profile"]["industry"], "Retail");

    let nav = client
        .get(format!("{}/nav?tab=dashboard", base_url()))
        .send()
        .await
        .expect("Failed to get /nav");
    let body: serde_json::Value = nav.json().await.expect("Failed to parse nav");
    assert_eq!(body["view"], "active");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_profile_is_retrievable_after_onboarding() {
    let client = session_client();
    register_business_admin(&client, &unique_email("profile")).await;
    complete_onboarding(&client).await;

    let profile = client
        .get(format!("{}/profile", base_url()))
        .send()
        .await
        .expect("Failed to get /profile");
    assert_eq!(profile.status(), 200);

    let body: serde_json::Value = profile.json().await.expect("Failed to parse profile");
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["industry"], "Retail");
    assert_eq!(body["onboarded"], true);
}
