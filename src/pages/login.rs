//! Login page.

use async_trait::async_trait;
use tracing::info;

use crate::config::Credentials;
use crate::locator::login as sel;
use crate::result::Result;

use super::{PageObject, Screen};

/// Probe window for the error banner; it renders synchronously on rejection.
const ERROR_PROBE_MS: u64 = 2_000;

/// The login form at the site root.
#[derive(Debug, Clone)]
pub struct LoginPage {
    screen: Screen,
}

impl LoginPage {
    /// Page object over `screen`.
    #[must_use]
    pub const fn new(screen: Screen) -> Self {
        Self { screen }
    }

    /// Type into the username field.
    pub async fn enter_username(&self, username: &str) -> Result<()> {
        self.screen.fill(sel::USERNAME_INPUT, username).await
    }

    /// Type into the password field.
    pub async fn enter_password(&self, password: &str) -> Result<()> {
        self.screen.fill(sel::PASSWORD_INPUT, password).await
    }

    /// Click the submit button.
    pub async fn submit(&self) -> Result<()> {
        self.screen.click(sel::LOGIN_BUTTON).await
    }

    /// Fill both fields and submit.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        info!(username, "logging in");
        self.enter_username(username).await?;
        self.enter_password(password).await?;
        self.submit().await
    }

    /// Log in with a known account's credentials.
    pub async fn login_as(&self, credentials: &Credentials) -> Result<()> {
        self.login(&credentials.username, &credentials.password).await
    }

    /// Fill both fields and submit via Enter in the password field.
    pub async fn login_with_enter(&self, username: &str, password: &str) -> Result<()> {
        info!(username, "logging in via enter key");
        self.screen.fill(sel::USERNAME_INPUT, username).await?;
        self.screen.fill(sel::PASSWORD_INPUT, password).await?;
        self.screen.press_key(sel::PASSWORD_INPUT, "Enter").await
    }

    /// Text of the error banner, if one is shown.
    pub async fn error_message(&self) -> Result<Option<String>> {
        self.screen.text(sel::ERROR_MESSAGE).await
    }

    /// Whether the error banner is shown.
    pub async fn is_error_displayed(&self) -> bool {
        self.screen.is_visible(sel::ERROR_MESSAGE, ERROR_PROBE_MS).await
    }

    /// Whether the error banner has gone away.
    pub async fn is_error_closed(&self) -> bool {
        self.screen.is_hidden(sel::ERROR_MESSAGE, ERROR_PROBE_MS).await
    }

    /// Dismiss the error banner.
    pub async fn dismiss_error(&self) -> Result<()> {
        self.screen.click(sel::ERROR_BUTTON).await
    }

    /// Placeholder text of the username field.
    pub async fn username_placeholder(&self) -> Result<Option<String>> {
        self.screen.attribute(sel::USERNAME_INPUT, "placeholder").await
    }

    /// Placeholder text of the password field.
    pub async fn password_placeholder(&self) -> Result<Option<String>> {
        self.screen.attribute(sel::PASSWORD_INPUT, "placeholder").await
    }
}

#[async_trait]
impl PageObject for LoginPage {
    fn page_name(&self) -> &'static str {
        "login"
    }

    fn url_fragment(&self) -> &'static str {
        ""
    }

    fn screen(&self) -> &Screen {
        &self.screen
    }

    async fn is_loaded(&self) -> bool {
        self.screen.is_visible(sel::LOGIN_LOGO, ERROR_PROBE_MS).await
    }
}
