//! services/api/src/adapters/account.rs
//!
//! Implements the `IdentityService` port against the managed account API.

use crate::adapters::appwrite::{send_empty, send_json, AppwriteClient};
use async_trait::async_trait;
use paper_core::domain::User;
use paper_core::ports::{IdentityService, PortError, PortResult};
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::json;

#[derive(Clone)]
pub struct AppwriteAccountAdapter {
    client: AppwriteClient,
}

impl AppwriteAccountAdapter {
    pub fn new(client: AppwriteClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct AccountRecord {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

impl AccountRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(Deserialize)]
struct SessionRecord {
    secret: String,
}

#[derive(Deserialize)]
struct JwtRecord {
    jwt: String,
}

/// Builds the URL that starts the provider's OAuth token flow.
pub(crate) fn oauth_token_url(
    endpoint: &str,
    project_id: &str,
    provider: &str,
    success: &str,
    failure: &str,
) -> PortResult<String> {
    if provider.is_empty() || !provider.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PortError::Invalid(format!("Unsupported OAuth provider '{}'", provider)));
    }
    let base = format!("{}/account/tokens/oauth2/{}", endpoint, provider);
    let url = Url::parse_with_params(
        &base,
        &[("project", project_id), ("success", success), ("failure", failure)],
    )
    .map_err(|e| PortError::Invalid(format!("Invalid OAuth URL: {}", e)))?;
    Ok(url.to_string())
}

#[async_trait]
impl IdentityService for AppwriteAccountAdapter {
    async fn current_user(&self, jwt: &str) -> PortResult<User> {
        let record: AccountRecord = send_json(self.client.user(Method::GET, "/account", jwt)).await?;
        Ok(record.to_domain())
    }

    async fn end_session(&self, jwt: &str) -> PortResult<()> {
        send_empty(self.client.user(Method::DELETE, "/account/sessions/current", jwt)).await
    }

    async fn exchange_oauth_token(&self, user_id: &str, secret: &str) -> PortResult<String> {
        // Server-side session creation returns the session secret, which can then mint a JWT.
        let session: SessionRecord = send_json(
            self.client
                .server(Method::POST, "/account/sessions/token")
                .json(&json!({ "userId": user_id, "secret": secret })),
        )
        .await?;
        let token: JwtRecord =
            send_json(self.client.session(Method::POST, "/account/jwts", &session.secret)).await?;
        Ok(token.jwt)
    }

    fn oauth_redirect_url(&self, provider: &str, success: &str, failure: &str) -> PortResult<String> {
        oauth_token_url(self.client.endpoint(), self.client.project_id(), provider, success, failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_url_carries_project_and_redirects() {
        let url = oauth_token_url(
            "https://cloud.appwrite.io/v1",
            "proj",
            "google",
            "http://localhost:5173/auth/callback",
            "http://localhost:5173/auth/callback/error",
        )
        .unwrap();
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.path(), "/v1/account/tokens/oauth2/google");
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("project".to_string(), "proj".to_string()));
        assert_eq!(pairs[2].1, "http://localhost:5173/auth/callback/error");
    }

    #[test]
    fn provider_must_be_a_plain_name() {
        assert!(oauth_token_url("https://x/v1", "p", "../keys", "s", "f").is_err());
        assert!(oauth_token_url("https://x/v1", "p", "", "s", "f").is_err());
    }
}
