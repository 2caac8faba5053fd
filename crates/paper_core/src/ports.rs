//! crates/paper_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits keep the core independent of the managed backend, the pinning
//! service and the browser used for rasterizing.

use async_trait::async_trait;
use crate::domain::{Paper, PaperFields, PaperPatch, PinnedFile, PublishReceipt, PublishRequest, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., HTTP, browser).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Row storage for papers in the hosted table.
#[async_trait]
pub trait PaperRepository: Send + Sync {
    async fn create_paper(&self, fields: PaperFields) -> PortResult<Paper>;

    async fn update_paper(&self, paper_id: &str, patch: PaperPatch) -> PortResult<Paper>;

    async fn get_paper(&self, paper_id: &str) -> PortResult<Paper>;

    async fn delete_paper(&self, paper_id: &str) -> PortResult<()>;

    /// The owner's papers, newest first, capped at [`LIST_LIMIT`].
    async fn list_papers_for_user(&self, user_id: &str) -> PortResult<Vec<Paper>>;
}

pub const LIST_LIMIT: usize = 100;

#[async_trait]
pub trait PinningService: Send + Sync {
    /// Stores an HTML document on IPFS, tagging it with the owner's id.
    async fn pin_html(&self, file_name: &str, html: &str, user_id: &str) -> PortResult<PinnedFile>;
}

/// The managed account API. Sessions are presented as short-lived JWTs.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn current_user(&self, jwt: &str) -> PortResult<User>;

    async fn end_session(&self, jwt: &str) -> PortResult<()>;

    /// Turns the `userId`/`secret` pair from an OAuth redirect into a session JWT.
    async fn exchange_oauth_token(&self, user_id: &str, secret: &str) -> PortResult<String>;

    /// Where the browser goes to start the provider's OAuth flow.
    fn oauth_redirect_url(&self, provider: &str, success: &str, failure: &str) -> PortResult<String>;
}

/// Client side of publishing: runs the upload function on the user's behalf.
#[async_trait]
pub trait PublishService: Send + Sync {
    async fn publish(&self, jwt: &str, user_id: &str, request: PublishRequest) -> PortResult<PublishReceipt>;
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Renders a complete HTML document and returns PNG bytes.
    async fn rasterize(&self, html: &str) -> PortResult<Vec<u8>>;
}
