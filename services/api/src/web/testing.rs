//! In-memory stand-ins for the service ports, used by the handler tests.

use crate::config::{AppwriteConfig, Config, PinataConfig};
use crate::web::state::AppState;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Response;
use chrono::Utc;
use paper_core::domain::{Paper, PaperFields, PaperPatch, PinnedFile, User};
use paper_core::ports::{IdentityService, PaperRepository, PinningService, PortError, PortResult, Rasterizer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::Level;

pub const GATEWAY: &str = "https://example.mypinata.cloud";
pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
/// The only session token `FakeIdentity` accepts, and the user it resolves to.
pub const SESSION_JWT: &str = "valid-jwt";
pub const SESSION_USER: &str = "jwt-user";

#[derive(Default)]
pub struct InMemoryPapers {
    rows: Mutex<HashMap<String, Paper>>,
    next_id: Mutex<u32>,
}

impl InMemoryPapers {
    pub fn insert(&self, paper: Paper) {
        self.rows.lock().unwrap().insert(paper.id.clone(), paper);
    }

    pub fn get(&self, id: &str) -> Option<Paper> {
        self.rows.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

pub fn paper(id: &str, user_id: &str, title: &str) -> Paper {
    Paper {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        html_content: String::new(),
        theme: "paper".to_string(),
        font: "serif".to_string(),
        watermark: true,
        status: Default::default(),
        ipfs_cid: None,
        ipfs_gateway: None,
        user_id: user_id.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn apply(paper: &mut Paper, patch: PaperPatch) {
    if let Some(v) = patch.title {
        paper.title = v;
    }
    if let Some(v) = patch.content {
        paper.content = v;
    }
    if let Some(v) = patch.html_content {
        paper.html_content = v;
    }
    if let Some(v) = patch.theme {
        paper.theme = v;
    }
    if let Some(v) = patch.font {
        paper.font = v;
    }
    if let Some(v) = patch.watermark {
        paper.watermark = v;
    }
    if let Some(v) = patch.status {
        paper.status = v;
    }
    if patch.ipfs_cid.is_some() {
        paper.ipfs_cid = patch.ipfs_cid;
    }
    if patch.ipfs_gateway.is_some() {
        paper.ipfs_gateway = patch.ipfs_gateway;
    }
    paper.updated_at = Utc::now();
}

#[async_trait]
impl PaperRepository for InMemoryPapers {
    async fn create_paper(&self, fields: PaperFields) -> PortResult<Paper> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("row-{}", next)
        };
        let mut created = paper(&id, &fields.user_id, &fields.title);
        let user_id = fields.user_id.clone();
        apply(&mut created, fields.into());
        created.user_id = user_id;
        self.insert(created.clone());
        Ok(created)
    }

    async fn update_paper(&self, paper_id: &str, patch: PaperPatch) -> PortResult<Paper> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .get_mut(paper_id)
            .ok_or_else(|| PortError::NotFound(paper_id.to_string()))?;
        apply(row, patch);
        Ok(row.clone())
    }

    async fn get_paper(&self, paper_id: &str) -> PortResult<Paper> {
        self.get(paper_id).ok_or_else(|| PortError::NotFound(paper_id.to_string()))
    }

    async fn delete_paper(&self, paper_id: &str) -> PortResult<()> {
        self.rows
            .lock()
            .unwrap()
            .remove(paper_id)
            .map(|_| ())
            .ok_or_else(|| PortError::NotFound(paper_id.to_string()))
    }

    async fn list_papers_for_user(&self, user_id: &str) -> PortResult<Vec<Paper>> {
        let mut papers: Vec<Paper> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        papers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(papers)
    }
}

/// Records pins and hands back a CID derived from the file name.
#[derive(Default)]
pub struct FakePinning {
    pub pins: Mutex<Vec<(String, String, String)>>,
    pub fail: bool,
}

#[async_trait]
impl PinningService for FakePinning {
    async fn pin_html(&self, file_name: &str, html: &str, user_id: &str) -> PortResult<PinnedFile> {
        if self.fail {
            return Err(PortError::Unexpected("pinning service unavailable".to_string()));
        }
        self.pins
            .lock()
            .unwrap()
            .push((file_name.to_string(), html.to_string(), user_id.to_string()));
        Ok(PinnedFile {
            cid: format!("bafy-{}", file_name.len()),
            name: file_name.to_string(),
        })
    }
}

/// Accepts the JWT `valid-jwt` for user `jwt-user`.
#[derive(Default)]
pub struct FakeIdentity {
    pub ended: Mutex<Vec<String>>,
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn current_user(&self, jwt: &str) -> PortResult<User> {
        if jwt != SESSION_JWT {
            return Err(PortError::Unauthorized);
        }
        Ok(User {
            id: SESSION_USER.to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
    }

    async fn end_session(&self, jwt: &str) -> PortResult<()> {
        self.ended.lock().unwrap().push(jwt.to_string());
        Ok(())
    }

    async fn exchange_oauth_token(&self, user_id: &str, secret: &str) -> PortResult<String> {
        if secret != "oauth-secret" {
            return Err(PortError::Unauthorized);
        }
        Ok(format!("jwt-for-{}", user_id))
    }

    fn oauth_redirect_url(&self, provider: &str, success: &str, failure: &str) -> PortResult<String> {
        Ok(format!("https://auth.example/{}?success={}&failure={}", provider, success, failure))
    }
}

pub struct FakeRasterizer;

#[async_trait]
impl Rasterizer for FakeRasterizer {
    async fn rasterize(&self, html: &str) -> PortResult<Vec<u8>> {
        let mut png = PNG_MAGIC.to_vec();
        png.extend_from_slice(&(html.len() as u32).to_be_bytes());
        Ok(png)
    }
}

pub fn config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: Level::INFO,
        public_url: "http://localhost:5173".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        chrome_window_width: 1200,
        appwrite: AppwriteConfig {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: "proj".to_string(),
            api_key: "key".to_string(),
            database_id: "db".to_string(),
            collection_id: "papers".to_string(),
        },
        pinata: PinataConfig {
            jwt: "pinata-jwt".to_string(),
            gateway: GATEWAY.to_string(),
            upload_url: "https://uploads.pinata.cloud".to_string(),
        },
    }
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub papers: Arc<InMemoryPapers>,
    pub pinning: Arc<FakePinning>,
    pub identity: Arc<FakeIdentity>,
}

pub fn harness() -> Harness {
    harness_with_pinning(FakePinning::default())
}

pub fn harness_with_pinning(pinning: FakePinning) -> Harness {
    let papers = Arc::new(InMemoryPapers::default());
    let pinning = Arc::new(pinning);
    let identity = Arc::new(FakeIdentity::default());
    let state = Arc::new(AppState {
        config: Arc::new(config()),
        papers: papers.clone(),
        pinning: pinning.clone(),
        identity: identity.clone(),
        rasterizer: Arc::new(FakeRasterizer),
    });
    Harness {
        state,
        papers,
        pinning,
        identity,
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
