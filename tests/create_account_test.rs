mod common;

use anyhow::Result;
use httpmock::prelude::*;
use serde_json::{json, Value};

// base64("test-key:test-secret")
const BASIC_AUTH: &str = "Basic dGVzdC1rZXk6dGVzdC1zZWNyZXQ=";

#[tokio::test]
async fn test_sandbox_application_relayed_with_basic_auth() -> Result<()> {
    let server = MockServer::start_async().await;
    let account_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/accounts")
                .header("Authorization", BASIC_AUTH)
                .json_body_partial(
                    r#"{
                        "contact": {"email_address": "test1@gmail.com", "country": "USA"},
                        "identity": {"given_name": "John", "tax_id_type": "USA_SSN"},
                        "disclosures": {"is_control_person": false}
                    }"#,
                );
            then.status(200).json_body(json!({
                "id": "b9b19618-22dd-4e80-8432-fc9e1ba0b27d",
                "account_number": "935142145",
                "status": "SUBMITTED"
            }));
        })
        .await;

    let app = common::spawn_app(common::config_for(&server)).await;
    let response = reqwest::Client::new()
        .post(format!("{}/create_alpaca_user", app))
        .json(&json!({"ignored": true}))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await?;
    account_mock.assert_async().await;
    assert_eq!(body["account_number"], "935142145");
    assert_eq!(body["status"], "SUBMITTED");
    Ok(())
}

#[tokio::test]
async fn test_provider_error_body_returned_verbatim() -> Result<()> {
    let server = MockServer::start_async().await;
    let provider_error = json!({
        "code": 40910000,
        "message": "an account with this email address already exists"
    });
    let error_body = provider_error.clone();
    server
        .mock_async(move |when, then| {
            when.method(POST).path("/v1/accounts");
            then.status(409).json_body(error_body);
        })
        .await;

    let app = common::spawn_app(common::config_for(&server)).await;
    let response = reqwest::Client::new()
        .post(format!("{}/create_alpaca_user", app))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body, provider_error);
    Ok(())
}

#[tokio::test]
async fn test_body_sections_override_sandbox_applicant() -> Result<()> {
    let server = MockServer::start_async().await;
    let account_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/accounts")
                .json_body_partial(
                    r#"{
                        "contact": {"email_address": "jane@example.com", "city": "Austin"},
                        "identity": {"given_name": "John"}
                    }"#,
                );
            then.status(200).json_body(json!({"id": "acct-2"}));
        })
        .await;

    let app = common::spawn_app(common::config_for(&server)).await;
    let response = reqwest::Client::new()
        .post(format!("{}/create_alpaca_user", app))
        .json(&json!({
            "contact": {
                "email_address": "jane@example.com",
                "phone_number": "+15125550100",
                "street_address": ["500 Congress Ave"],
                "city": "Austin",
                "state": "TX",
                "postal_code": "78701",
                "country": "USA"
            }
        }))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    account_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_invalid_bodies_are_rejected() -> Result<()> {
    let server = MockServer::start_async().await;
    let account_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/accounts");
            then.status(200).json_body(json!({"id": "never"}));
        })
        .await;

    let app = common::spawn_app(common::config_for(&server)).await;
    let client = reqwest::Client::new();

    let not_json = client
        .post(format!("{}/create_alpaca_user", app))
        .body("{not json")
        .send()
        .await?;
    assert_eq!(not_json.status(), 400);

    let wrong_shape = client
        .post(format!("{}/create_alpaca_user", app))
        .json(&json!({"disclosures": "none"}))
        .send()
        .await?;
    assert_eq!(wrong_shape.status(), 400);
    let body: Value = wrong_shape.json().await?;
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid account application"));

    assert_eq!(account_mock.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_new_account_is_funded_when_configured() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/accounts");
            then.status(200).json_body(json!({"id": "acct-funded", "status": "SUBMITTED"}));
        })
        .await;
    let journal_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/journals")
                .header("Authorization", BASIC_AUTH)
                .json_body(json!({
                    "from_account_id": "firm-account",
                    "to_account_id": "acct-funded",
                    "entry_type": "JNLC",
                    "amount": "10000"
                }));
            then.status(200).json_body(json!({"id": "jnl-1", "status": "queued"}));
        })
        .await;

    let config = common::with_funding(common::config_for(&server));
    let app = common::spawn_app(config).await;
    let body: Value = reqwest::Client::new()
        .post(format!("{}/create_alpaca_user", app))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["id"], "acct-funded");
    journal_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_missing_credentials_is_unavailable() -> Result<()> {
    let server = MockServer::start_async().await;
    let mut config = common::config_for(&server);
    config.alpaca.api_secret = None;

    let app = common::spawn_app(config).await;
    let response = reqwest::Client::new()
        .post(format!("{}/create_alpaca_user", app))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(response.status(), 503);
    Ok(())
}
