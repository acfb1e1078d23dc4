// src/api/auth.rs

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::TokenResponse;

pub const TOKEN_PATH: &str = "/admin/token";

/// Exchanges credentials for a bearer token and stores it in the session.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<String, ApiError> {
    let resp: TokenResponse = client
        .post_form(TOKEN_PATH, &[("username", username), ("password", password)])
        .await?;

    if resp.access_token.trim().is_empty() {
        return Err(ApiError::InvalidResponse("empty access_token".to_string()));
    }

    client.session().set_token(&resp.access_token)?;
    log::info!("admin login succeeded username={username}");
    Ok(resp.access_token)
}

pub fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.session().clear_token()?;
    log::info!("admin logged out");
    Ok(())
}
