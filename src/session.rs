//! Test session lifecycle and fixtures.
//!
//! A [`TestSession`] owns one launched browser. Each call to [`TestSession::run`]
//! gets an isolated context and page, executes the test body, and on failure
//! captures the artifacts (screenshot, action trace) before tearing the
//! context down. Artifact capture never masks the test's own result: capture
//! errors are logged at warn and dropped.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::config::{Settings, UserType};
use crate::driver::{Browser, Page};
use crate::pages::{
    CartPage, CheckoutCompletePage, CheckoutStepOnePage, CheckoutStepTwoPage, InventoryPage,
    LoginPage, PageObject, Screen,
};
use crate::result::{Error, Result};
use crate::trace::ActionRecorder;

/// One browser shared by a sequence of isolated test runs.
#[derive(Debug)]
pub struct TestSession {
    settings: Settings,
    browser: Browser,
}

impl TestSession {
    /// Launch the browser and set up logging.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BrowserLaunch`] if the browser cannot start, or
    /// [`Error::Io`] if the log directory cannot be created.
    pub async fn open(settings: Settings) -> Result<Self> {
        crate::logging::init(&settings)?;
        let browser = Browser::launch(&settings).await?;
        info!(browser = %settings.browser, "session opened");
        Ok(Self { settings, browser })
    }

    /// The settings this session was opened with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run one test body in a fresh context.
    ///
    /// The body's result is returned unchanged; on failure a screenshot named
    /// `failure_<name>.png` and a trace named `trace_<name>.json` are written
    /// first, configuration permitting. A panicking body (a failed `assert!`)
    /// is caught the same way: artifacts are captured, the page and context
    /// are closed, and the unwind then resumes.
    ///
    /// # Errors
    ///
    /// Context setup errors, then whatever the body returns.
    ///
    /// # Panics
    ///
    /// Re-raises any panic from the body after teardown.
    pub async fn run<F, Fut>(&self, name: &str, body: F) -> Result<()>
    where
        F: FnOnce(TestContext) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let recorder = ActionRecorder::new(self.settings.trace_on_failure);
        let context = self.browser.new_context(recorder.clone()).await?;
        let page = context.new_page().await?;
        let ctx = TestContext {
            settings: self.settings.clone(),
            screen: Screen::new(page.clone(), &self.settings),
            recorder: recorder.clone(),
        };

        debug!(test = name, "context ready");
        let outcome = AssertUnwindSafe(body(ctx)).catch_unwind().await;

        match &outcome {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                warn!(test = name, %error, "test failed");
                self.capture_failure_artifacts(name, &page, &recorder).await;
            }
            Err(_) => {
                warn!(test = name, "test body panicked");
                self.capture_failure_artifacts(name, &page, &recorder).await;
            }
        }

        if let Err(error) = page.close().await {
            warn!(test = name, %error, "page close failed");
        }
        if let Err(error) = context.close().await {
            warn!(test = name, %error, "context close failed");
        }

        match outcome {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    /// Best-effort artifact capture; failures here are logged, never raised.
    async fn capture_failure_artifacts(&self, name: &str, page: &Page, recorder: &ActionRecorder) {
        if self.settings.screenshot_on_failure {
            match self.save_screenshot(name, page).await {
                Ok(path) => info!(test = name, %path, "failure screenshot saved"),
                Err(error) => warn!(test = name, %error, "failure screenshot not captured"),
            }
        }
        if recorder.is_enabled() {
            if let Err(error) = recorder.save(&self.settings.trace_dir, name).await {
                warn!(test = name, %error, "trace not saved");
            }
        }
    }

    async fn save_screenshot(&self, name: &str, page: &Page) -> Result<String> {
        let bytes = page.screenshot().await?;
        tokio::fs::create_dir_all(&self.settings.screenshot_dir).await?;
        let path = self.settings.screenshot_dir.join(format!("failure_{name}.png"));
        tokio::fs::write(&path, bytes).await?;
        Ok(path.display().to_string())
    }

    /// Shut the browser down.
    pub async fn close(self) -> Result<()> {
        info!("session closing");
        self.browser.close().await
    }
}

/// Everything one test body needs: page objects plus fixture helpers.
#[derive(Debug, Clone)]
pub struct TestContext {
    settings: Settings,
    screen: Screen,
    recorder: ActionRecorder,
}

impl TestContext {
    /// The settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The action recorder feeding this context's trace.
    #[must_use]
    pub const fn recorder(&self) -> &ActionRecorder {
        &self.recorder
    }

    /// Login page object.
    #[must_use]
    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(self.screen.clone())
    }

    /// Inventory page object.
    #[must_use]
    pub fn inventory_page(&self) -> InventoryPage {
        InventoryPage::new(self.screen.clone())
    }

    /// Cart page object.
    #[must_use]
    pub fn cart_page(&self) -> CartPage {
        CartPage::new(self.screen.clone())
    }

    /// Checkout information form page object.
    #[must_use]
    pub fn checkout_step_one(&self) -> CheckoutStepOnePage {
        CheckoutStepOnePage::new(self.screen.clone())
    }

    /// Checkout overview page object.
    #[must_use]
    pub fn checkout_step_two(&self) -> CheckoutStepTwoPage {
        CheckoutStepTwoPage::new(self.screen.clone())
    }

    /// Order confirmation page object.
    #[must_use]
    pub fn checkout_complete(&self) -> CheckoutCompletePage {
        CheckoutCompletePage::new(self.screen.clone())
    }

    /// Fixture: log in as `user_type` and land on the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fixture`] when the inventory never loads, carrying
    /// the login error banner if one was shown.
    pub async fn login_as(&self, user_type: UserType) -> Result<()> {
        let login = self.login_page();
        login.open().await?;
        login.login_as(&self.settings.credentials_for(user_type)).await?;

        let inventory = self.inventory_page();
        if inventory.is_loaded().await {
            return Ok(());
        }
        let banner = login.error_message().await.unwrap_or(None);
        Err(Error::Fixture {
            message: match banner {
                Some(text) => format!("login as {user_type} rejected: {text}"),
                None => format!("login as {user_type} never reached the inventory"),
            },
        })
    }

    /// Fixture: with a logged-in inventory open, put the first `count`
    /// products in the cart. Returns their names in display order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fixture`] when the inventory is not open, fewer than
    /// `count` products exist, or the badge disagrees afterwards.
    pub async fn cart_with_items(&self, count: usize) -> Result<Vec<String>> {
        let inventory = self.inventory_page();
        if !inventory.is_loaded().await {
            return Err(Error::Fixture {
                message: "cart fixture needs an open inventory page".to_string(),
            });
        }
        let names = inventory.product_names().await?;
        if names.len() < count {
            return Err(Error::Fixture {
                message: format!("cart fixture wants {count} products, grid has {}", names.len()),
            });
        }
        let chosen: Vec<String> = names.into_iter().take(count).collect();
        for name in &chosen {
            inventory.add_to_cart(name).await?;
        }
        let badge = inventory.cart_badge_count().await?;
        if badge != count {
            return Err(Error::Fixture {
                message: format!("cart badge shows {badge} after adding {count} items"),
            });
        }
        Ok(chosen)
    }
}
