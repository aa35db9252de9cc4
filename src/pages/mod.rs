//! Page objects for the storefront.
//!
//! Each page owns a [`Screen`], a thin capability handle over the driver that
//! applies the configured default timeout and logs every interaction. Page
//! structs compose a `Screen` rather than inheriting from a base page; the
//! shared surface lives here and the [`PageObject`] trait carries only the
//! per-page identity.

mod cart;
mod checkout;
mod inventory;
mod login;

pub use cart::CartPage;
pub use checkout::{CheckoutCompletePage, CheckoutStepOnePage, CheckoutStepTwoPage};
pub use inventory::InventoryPage;
pub use login::LoginPage;

use async_trait::async_trait;
use tracing::debug;

use crate::config::Settings;
use crate::driver::Page;
use crate::result::Result;
use crate::wait::ElementState;

/// Driver handle shared by every page object.
///
/// All waits use the configured default timeout unless a method takes its
/// own; probe methods ([`Screen::is_visible`], [`Screen::is_hidden`]) absorb
/// the timeout into a `bool` instead of failing the test.
#[derive(Debug, Clone)]
pub struct Screen {
    page: Page,
    base_url: String,
    timeout_ms: u64,
}

impl Screen {
    /// Wrap a driver page with the configured base URL and timeout.
    #[must_use]
    pub fn new(page: Page, settings: &Settings) -> Self {
        Self {
            page,
            base_url: settings.base_url.clone(),
            timeout_ms: settings.timeout_ms,
        }
    }

    /// The underlying driver page.
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Configured default timeout in milliseconds.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Navigate to a path fragment under the base URL.
    pub async fn navigate_to(&self, fragment: &str) -> Result<()> {
        let url = if fragment.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/{fragment}", self.base_url)
        };
        debug!(%url, "navigate");
        self.page.goto(&url).await
    }

    /// Current page URL.
    pub async fn current_url(&self) -> Result<String> {
        self.page.current_url().await
    }

    /// Click `selector`, waiting up to the default timeout.
    pub async fn click(&self, selector: &str) -> Result<()> {
        debug!(selector, "click");
        self.page.click(selector, self.timeout_ms).await
    }

    /// Fill the input at `selector` with `value`.
    pub async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        debug!(selector, "fill");
        self.page.fill(selector, value, self.timeout_ms).await
    }

    /// Press `key` on the element at `selector`.
    pub async fn press_key(&self, selector: &str, key: &str) -> Result<()> {
        debug!(selector, key, "press key");
        self.page.press_key(selector, key, self.timeout_ms).await
    }

    /// Pick the option with `value` in the select at `selector`.
    pub async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        debug!(selector, value, "select option");
        self.page.select_option(selector, value, self.timeout_ms).await
    }

    /// Text of the first match, trimmed; `None` when absent.
    pub async fn text(&self, selector: &str) -> Result<Option<String>> {
        let text = self.page.text(selector).await?;
        Ok(text.map(|t| t.trim().to_string()))
    }

    /// Trimmed texts of every match.
    pub async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let texts = self.page.texts(selector).await?;
        Ok(texts.into_iter().map(|t| t.trim().to_string()).collect())
    }

    /// Number of matches.
    pub async fn count(&self, selector: &str) -> Result<usize> {
        self.page.count(selector).await
    }

    /// Attribute or live `value` of the first match.
    pub async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        self.page.attribute(selector, name).await
    }

    /// Wait for `selector` to reach `state` within the default timeout.
    pub async fn wait_for(&self, selector: &str, state: ElementState) -> Result<()> {
        self.page.wait_for(selector, state, self.timeout_ms).await
    }

    /// Probe: does `selector` become visible within `timeout_ms`?
    ///
    /// A timeout here is an answer, not a failure.
    pub async fn is_visible(&self, selector: &str, timeout_ms: u64) -> bool {
        self.page
            .wait_for(selector, ElementState::Visible, timeout_ms)
            .await
            .is_ok()
    }

    /// Probe: does `selector` leave the visible state within `timeout_ms`?
    pub async fn is_hidden(&self, selector: &str, timeout_ms: u64) -> bool {
        self.page
            .wait_for(selector, ElementState::Hidden, timeout_ms)
            .await
            .is_ok()
    }
}

/// Identity and readiness of one storefront page.
#[async_trait]
pub trait PageObject {
    /// Human-readable page name for logs.
    fn page_name(&self) -> &'static str;

    /// Path fragment of this page under the base URL.
    fn url_fragment(&self) -> &'static str;

    /// The screen this page drives.
    fn screen(&self) -> &Screen;

    /// Whether the page's anchor element is currently rendered.
    async fn is_loaded(&self) -> bool;

    /// Navigate directly to this page.
    async fn open(&self) -> Result<()> {
        self.screen().navigate_to(self.url_fragment()).await
    }
}
