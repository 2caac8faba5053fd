//! services/api/src/adapters/chrome.rs
//!
//! Implements the `Rasterizer` port with a headless Chrome instance. The raster
//! document is written to a temporary file, loaded, and the `#paper-raster`
//! element is captured as a PNG.

use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions};
use paper_core::export::RASTER_ROOT_ID;
use paper_core::ports::{PortError, PortResult, Rasterizer};
use std::path::Path;
use tracing::warn;
use uuid::Uuid;

const WINDOW_HEIGHT: u32 = 1080;

#[derive(Clone)]
pub struct ChromeRasterizer {
    window_width: u32,
}

impl ChromeRasterizer {
    pub fn new(window_width: u32) -> Self {
        Self { window_width }
    }
}

fn browser_error(e: impl std::fmt::Display) -> PortError {
    PortError::Unexpected(format!("Browser error: {}", e))
}

fn screenshot(page: &Path, window_width: u32) -> PortResult<Vec<u8>> {
    let browser = Browser::new(LaunchOptions {
        headless: true,
        window_size: Some((window_width, WINDOW_HEIGHT)),
        ..Default::default()
    })
    .map_err(browser_error)?;

    let tab = browser.new_tab().map_err(browser_error)?;
    tab.navigate_to(&format!("file://{}", page.display()))
        .map_err(browser_error)?;
    tab.wait_until_navigated().map_err(browser_error)?;

    let root = tab
        .wait_for_element(&format!("#{}", RASTER_ROOT_ID))
        .map_err(browser_error)?;
    root.capture_screenshot(CaptureScreenshotFormatOption::Png)
        .map_err(browser_error)
}

fn capture_png(html: &str, window_width: u32) -> PortResult<Vec<u8>> {
    let page = std::env::temp_dir().join(format!("paper-raster-{}.html", Uuid::new_v4()));
    std::fs::write(&page, html)
        .map_err(|e| PortError::Unexpected(format!("Failed to stage raster page: {}", e)))?;

    let result = screenshot(&page, window_width);

    if let Err(e) = std::fs::remove_file(&page) {
        warn!("Failed to remove raster page {}: {}", page.display(), e);
    }
    result
}

#[async_trait]
impl Rasterizer for ChromeRasterizer {
    async fn rasterize(&self, html: &str) -> PortResult<Vec<u8>> {
        let html = html.to_string();
        let window_width = self.window_width;
        // The browser driver is blocking.
        tokio::task::spawn_blocking(move || capture_png(&html, window_width))
            .await
            .map_err(|e| PortError::Unexpected(format!("Raster task failed: {}", e)))?
    }
}
