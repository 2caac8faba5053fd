//! services/api/src/adapters/appwrite.rs
//!
//! A thin REST client for the managed backend, shared by the table, account and
//! function adapters. Requests are scoped to one project; server calls carry the
//! API key, user calls carry the user's JWT instead.

use paper_core::ports::{PortError, PortResult};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const PROJECT_HEADER: &str = "X-Appwrite-Project";
pub const KEY_HEADER: &str = "X-Appwrite-Key";
pub const JWT_HEADER: &str = "X-Appwrite-JWT";
pub const SESSION_HEADER: &str = "X-Appwrite-Session";

#[derive(Clone)]
pub struct AppwriteClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
}

impl AppwriteClient {
    /// `endpoint` is the API root, e.g. `https://cloud.appwrite.io/v1`.
    pub fn new(http: reqwest::Client, endpoint: &str, project_id: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// A request authenticated with the server API key, when one is configured.
    pub fn server(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(PROJECT_HEADER, &self.project_id);
        match &self.api_key {
            Some(key) => builder.header(KEY_HEADER, key),
            None => builder,
        }
    }

    /// A request made on behalf of a signed-in user.
    pub fn user(&self, method: Method, path: &str, jwt: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(PROJECT_HEADER, &self.project_id)
            .header(JWT_HEADER, jwt)
    }

    /// A request bound to a session secret rather than a JWT.
    pub fn session(&self, method: Method, path: &str, secret: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(PROJECT_HEADER, &self.project_id)
            .header(SESSION_HEADER, secret)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub(crate) fn transport_error(e: reqwest::Error) -> PortError {
    PortError::Unexpected(format!("Appwrite request failed: {}", e))
}

/// Maps a failed Appwrite response onto the port error the core understands.
pub(crate) fn status_error(status: StatusCode, message: String) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized,
        StatusCode::NOT_FOUND => PortError::NotFound(message),
        StatusCode::BAD_REQUEST => PortError::Invalid(message),
        _ => PortError::Unexpected(format!("Appwrite returned {}: {}", status, message)),
    }
}

async fn failure(response: Response) -> PortError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    status_error(status, message)
}

/// Sends a request and decodes a successful JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> PortResult<T> {
    let response = request.send().await.map_err(transport_error)?;
    if !response.status().is_success() {
        return Err(failure(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| PortError::Unexpected(format!("Unexpected Appwrite response: {}", e)))
}

/// Sends a request whose successful response carries no useful body.
pub(crate) async fn send_empty(request: RequestBuilder) -> PortResult<()> {
    let response = request.send().await.map_err(transport_error)?;
    if !response.status().is_success() {
        return Err(failure(response).await);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_port_errors() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "x".into()),
            PortError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "Row not found".into()),
            PortError::NotFound(m) if m == "Row not found"
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "bad".into()),
            PortError::Invalid(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "down".into()),
            PortError::Unexpected(_)
        ));
    }

    #[test]
    fn urls_are_joined_without_double_slashes() {
        let client = AppwriteClient::new(reqwest::Client::new(), "https://cloud.appwrite.io/v1/", "proj");
        assert_eq!(client.url("/account"), "https://cloud.appwrite.io/v1/account");
        assert_eq!(client.project_id(), "proj");
    }
}
