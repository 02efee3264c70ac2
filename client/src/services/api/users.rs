//! # User and Session Endpoints
//!
//! Login, logout, registration, profile lookup and the session-check flow.
//! This module is the single writer of the session slot: it stores the token
//! on successful login and clears it on logout or a server-reported inactive
//! session.

use shared::{ActiveApiKeyResponse, CreateUserRequest, LoginRequest, LoginResponse, UserProfile};

use crate::core::error::Result;
use crate::services::api::client::ApiClient;
use crate::services::api::request::RequestOptions;

/// Log in with email and password. On success the issued token is written to
/// the session slot before returning.
#[tracing::instrument(skip(client, password, opts), fields(email = %email))]
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
    opts: RequestOptions<'_>,
) -> Result<LoginResponse> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    // Login itself never sends the auth header.
    let opts = RequestOptions {
        requires_auth: false,
        ..opts
    };
    let response: LoginResponse = client.create("/users/login", &request, opts).await?;

    client.session().set_token(response.api_key.clone());
    tracing::info!("login successful");
    Ok(response)
}

/// Disconnect server-side and clear the session slot. The slot is cleared
/// even when the backend call fails.
pub async fn logout(client: &ApiClient) -> Result<()> {
    let result: Result<serde_json::Value> = client
        .fetch("/users/disconnect", &[], RequestOptions::default())
        .await;

    client.session().clear();

    if let Err(err) = result {
        tracing::warn!(error = %err, "server-side disconnect failed, session cleared locally");
    }
    Ok(())
}

/// Ask the backend whether the stored token is still active.
///
/// Returns `Ok(false)` without a network call when no token is stored. An
/// inactive verdict clears the session slot so later calls go out
/// unauthenticated instead of carrying a dead token.
pub async fn check_session(client: &ApiClient) -> Result<bool> {
    if !client.session().is_authenticated() {
        return Ok(false);
    }

    let response: ActiveApiKeyResponse = client
        .fetch("/users/isActiveApiKey", &[], RequestOptions::default())
        .await?;

    if !response.active_api_key {
        tracing::info!("backend reports the session as inactive, clearing token");
        client.session().clear();
    }
    Ok(response.active_api_key)
}

/// Register a new account. No auth header is sent.
pub async fn create_user(
    client: &ApiClient,
    request: &CreateUserRequest,
    opts: RequestOptions<'_>,
) -> Result<serde_json::Value> {
    let opts = RequestOptions {
        requires_auth: false,
        ..opts
    };
    client.create("/users", request, opts).await
}

/// Public profile of any user.
pub async fn get_user(client: &ApiClient, user_id: i64) -> Result<UserProfile> {
    client
        .fetch(&format!("/users/{user_id}"), &[], RequestOptions::default())
        .await
}
