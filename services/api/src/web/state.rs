//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use paper_core::ports::{IdentityService, PaperRepository, PinningService, Rasterizer};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub papers: Arc<dyn PaperRepository>,
    pub pinning: Arc<dyn PinningService>,
    pub identity: Arc<dyn IdentityService>,
    pub rasterizer: Arc<dyn Rasterizer>,
}

/// Who is making the request, as established by `require_identity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: String,
    /// Present when the caller authenticated with a session JWT.
    pub jwt: Option<String>,
}
