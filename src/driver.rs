//! Browser control layer.
//!
//! With the `browser` feature, pages drive a real Chromium over CDP (Chrome
//! `DevTools` Protocol) via chromiumoxide. Without it, the same API runs
//! against the in-process [`crate::sim::Storefront`], so the suite stays
//! deterministic and CI needs no Chrome binary. Both backends export the same
//! three types and every public method has the same signature.

/// Minimal valid 1x1 transparent PNG, used by the simulated backend's
/// screenshots so failure artifacts are still real image files.
#[cfg(not(feature = "browser"))]
const BLANK_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x60,
    0x60, 0x60, 0x60, 0x00, 0x00, 0x00, 0x05, 0x00, 0x01, 0x87, 0xa1, 0x4e, 0xd4, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

// ============================================================================
// Real CDP implementation (`browser` feature enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use std::sync::Arc;
    use std::time::Duration;

    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::network::ClearBrowserCookiesParams;
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use tokio::sync::Mutex;
    use tracing::debug;

    use crate::config::Settings;
    use crate::result::{Error, Result};
    use crate::trace::ActionRecorder;
    use crate::wait::{poll_until, ElementState};

    fn js_string(s: &str) -> String {
        serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
    }

    /// A launched Chromium instance.
    #[derive(Debug)]
    pub struct Browser {
        settings: Settings,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch Chromium with the configured viewport and headless mode.
        ///
        /// # Errors
        ///
        /// Returns [`Error::BrowserLaunch`] if the binary cannot be started.
        pub async fn launch(settings: &Settings) -> Result<Self> {
            if settings.browser != crate::config::BrowserKind::Chromium {
                return Err(Error::BrowserLaunch {
                    message: format!(
                        "{} is not launchable over CDP; only chromium is",
                        settings.browser
                    ),
                });
            }
            let mut builder = CdpConfig::builder()
                .window_size(settings.viewport_width, settings.viewport_height)
                .no_sandbox();

            if !settings.headless {
                builder = builder.with_head();
            }

            let config = builder.build().map_err(|e| Error::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(config)
                    .await
                    .map_err(|e| Error::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            debug!(
                headless = settings.headless,
                width = settings.viewport_width,
                height = settings.viewport_height,
                "browser launched"
            );
            Ok(Self {
                settings: settings.clone(),
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open an isolated context. Cookies are cleared when its first page
        /// is created, so state never leaks between tests.
        pub async fn new_context(&self, recorder: ActionRecorder) -> Result<BrowserContext> {
            Ok(BrowserContext {
                settings: self.settings.clone(),
                browser: Arc::clone(&self.inner),
                recorder,
            })
        }

        /// Shut the browser down.
        ///
        /// # Errors
        ///
        /// Returns [`Error::BrowserLaunch`] if the CDP close handshake fails.
        pub async fn close(self) -> Result<()> {
            let mut browser = self.inner.lock().await;
            browser.close().await.map_err(|e| Error::BrowserLaunch {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }

    /// One isolated cookie/storage scope within the browser.
    #[derive(Debug, Clone)]
    pub struct BrowserContext {
        settings: Settings,
        browser: Arc<Mutex<CdpBrowser>>,
        recorder: ActionRecorder,
    }

    impl BrowserContext {
        /// Open a fresh page in this context.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Page`] if the tab cannot be created.
        pub async fn new_page(&self) -> Result<Page> {
            let browser = self.browser.lock().await;
            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| Error::Page {
                    message: e.to_string(),
                })?;
            page.execute(ClearBrowserCookiesParams::default())
                .await
                .map_err(|e| Error::Page {
                    message: e.to_string(),
                })?;
            Ok(Page {
                inner: Arc::new(Mutex::new(page)),
                slow_mo_ms: self.settings.slow_mo_ms,
                recorder: self.recorder.clone(),
            })
        }

        /// Tear the context down. Page handles close with the tabs.
        pub async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    /// A single tab.
    #[derive(Debug, Clone)]
    pub struct Page {
        inner: Arc<Mutex<CdpPage>>,
        slow_mo_ms: u64,
        recorder: ActionRecorder,
    }

    impl Page {
        async fn pace(&self) {
            if self.slow_mo_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.slow_mo_ms)).await;
            }
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> Result<T> {
            let page = self.inner.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| Error::Page {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| Error::Page {
                message: e.to_string(),
            })
        }

        /// Try a bool-returning action script until it succeeds or the
        /// deadline passes.
        async fn act(&self, selector: &str, timeout_ms: u64, expr: &str) -> Result<()> {
            poll_until(selector, timeout_ms, || async move {
                self.eval::<bool>(expr).await.unwrap_or(false)
            })
            .await?;
            self.pace().await;
            Ok(())
        }

        /// Navigate to `url` and wait for the load to settle.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Navigation`] if the browser rejects the URL.
        pub async fn goto(&self, url: &str) -> Result<()> {
            self.recorder.record("goto", url);
            let page = self.inner.lock().await;
            page.goto(url).await.map_err(|e| Error::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            page.wait_for_navigation()
                .await
                .map_err(|e| Error::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        /// Current page URL.
        pub async fn current_url(&self) -> Result<String> {
            let page = self.inner.lock().await;
            let url = page.url().await.map_err(|e| Error::Page {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_default())
        }

        /// Click the first visible match of `selector`.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Timeout`] if nothing clickable appears in time.
        pub async fn click(&self, selector: &str, timeout_ms: u64) -> Result<()> {
            self.recorder.record("click", selector);
            let expr = format!(
                "(() => {{ const el = document.querySelector({sel}); \
                 if (!el || el.offsetParent === null) return false; \
                 el.click(); return true; }})()",
                sel = js_string(selector)
            );
            self.act(selector, timeout_ms, &expr).await
        }

        /// Replace the value of the input at `selector`.
        ///
        /// Writes through the native value setter and fires `input` and
        /// `change`, so framework-managed inputs observe the edit.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Timeout`] if the input never appears.
        pub async fn fill(&self, selector: &str, value: &str, timeout_ms: u64) -> Result<()> {
            self.recorder.record("fill", selector);
            let expr = format!(
                "(() => {{ const el = document.querySelector({sel}); \
                 if (!el) return false; \
                 const proto = el instanceof HTMLTextAreaElement \
                   ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
                 Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {val}); \
                 el.dispatchEvent(new Event('input', {{bubbles: true}})); \
                 el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                 return true; }})()",
                sel = js_string(selector),
                val = js_string(value)
            );
            self.act(selector, timeout_ms, &expr).await
        }

        /// Dispatch a keydown/keyup pair on the element at `selector`.
        pub async fn press_key(&self, selector: &str, key: &str, timeout_ms: u64) -> Result<()> {
            self.recorder.record("press_key", &format!("{selector} {key}"));
            let expr = format!(
                "(() => {{ const el = document.querySelector({sel}); \
                 if (!el) return false; \
                 const opts = {{key: {key}, bubbles: true}}; \
                 el.dispatchEvent(new KeyboardEvent('keydown', opts)); \
                 el.dispatchEvent(new KeyboardEvent('keyup', opts)); \
                 if ({key} === 'Enter' && el.form) el.form.requestSubmit(); \
                 return true; }})()",
                sel = js_string(selector),
                key = js_string(key)
            );
            self.act(selector, timeout_ms, &expr).await
        }

        /// Pick the option with `value` in the select at `selector`.
        pub async fn select_option(
            &self,
            selector: &str,
            value: &str,
            timeout_ms: u64,
        ) -> Result<()> {
            self.recorder
                .record("select_option", &format!("{selector} = {value}"));
            let expr = format!(
                "(() => {{ const el = document.querySelector({sel}); \
                 if (!el) return false; \
                 el.value = {val}; \
                 el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                 return true; }})()",
                sel = js_string(selector),
                val = js_string(value)
            );
            self.act(selector, timeout_ms, &expr).await
        }

        /// Text content of the first match, if present.
        pub async fn text(&self, selector: &str) -> Result<Option<String>> {
            let expr = format!(
                "(() => {{ const el = document.querySelector({sel}); \
                 return el ? el.textContent : null; }})()",
                sel = js_string(selector)
            );
            self.eval(&expr).await
        }

        /// Text content of every match, in DOM order.
        pub async fn texts(&self, selector: &str) -> Result<Vec<String>> {
            let expr = format!(
                "Array.from(document.querySelectorAll({sel})).map(el => el.textContent)",
                sel = js_string(selector)
            );
            self.eval(&expr).await
        }

        /// Number of matches.
        pub async fn count(&self, selector: &str) -> Result<usize> {
            let expr = format!(
                "document.querySelectorAll({sel}).length",
                sel = js_string(selector)
            );
            self.eval(&expr).await
        }

        /// Attribute (or live `value` property) of the first match.
        pub async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
            let expr = format!(
                "(() => {{ const el = document.querySelector({sel}); \
                 if (!el) return null; \
                 if ({name} === 'value' && 'value' in el) return el.value; \
                 return el.getAttribute({name}); }})()",
                sel = js_string(selector),
                name = js_string(name)
            );
            self.eval(&expr).await
        }

        /// Whether the first match is currently rendered. Instant, no wait.
        pub async fn visible(&self, selector: &str) -> Result<bool> {
            let expr = format!(
                "(() => {{ const el = document.querySelector({sel}); \
                 return el !== null && el.offsetParent !== null; }})()",
                sel = js_string(selector)
            );
            self.eval(&expr).await
        }

        /// Wait until `selector` reaches `state`.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Timeout`] if the state is not reached in time.
        pub async fn wait_for(
            &self,
            selector: &str,
            state: ElementState,
            timeout_ms: u64,
        ) -> Result<()> {
            self.recorder
                .record("wait_for", &format!("{selector} {state}"));
            poll_until(selector, timeout_ms, || async move {
                let rendered = self.visible(selector).await.unwrap_or(false);
                let attached = self
                    .eval::<bool>(&format!(
                        "document.querySelector({sel}) !== null",
                        sel = js_string(selector)
                    ))
                    .await
                    .unwrap_or(false);
                match state {
                    ElementState::Visible => rendered,
                    ElementState::Hidden => !rendered,
                    ElementState::Attached => attached,
                    ElementState::Detached => !attached,
                }
            })
            .await
        }

        /// PNG screenshot of the current viewport.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Screenshot`] if capture or decode fails.
        pub async fn screenshot(&self) -> Result<Vec<u8>> {
            self.recorder.record("screenshot", "");
            let page = self.inner.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let shot = page.execute(params).await.map_err(|e| Error::Screenshot {
                message: e.to_string(),
            })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(|e| Error::Screenshot {
                    message: e.to_string(),
                })
        }

        /// Close the tab.
        pub async fn close(&self) -> Result<()> {
            let page = self.inner.lock().await;
            page.clone().close().await.map_err(|e| Error::Page {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }
}

// ============================================================================
// Simulated implementation (default build)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod simulated {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Mutex;
    use tracing::debug;

    use crate::config::Settings;
    use crate::result::{Error, Result};
    use crate::sim::Storefront;
    use crate::trace::ActionRecorder;
    use crate::wait::{poll_until, ElementState};

    /// Stand-in for a launched browser; owns only the configuration.
    #[derive(Debug)]
    pub struct Browser {
        settings: Settings,
    }

    impl Browser {
        /// "Launch" the simulated browser. Never fails.
        pub async fn launch(settings: &Settings) -> Result<Self> {
            debug!(base_url = %settings.base_url, "simulated browser ready");
            Ok(Self {
                settings: settings.clone(),
            })
        }

        /// Open an isolated context backed by a fresh storefront.
        pub async fn new_context(&self, recorder: ActionRecorder) -> Result<BrowserContext> {
            Ok(BrowserContext {
                settings: self.settings.clone(),
                store: Arc::new(Mutex::new(Storefront::new(&self.settings.base_url))),
                recorder,
            })
        }

        /// Shut down. Nothing to release.
        pub async fn close(self) -> Result<()> {
            Ok(())
        }
    }

    /// One isolated storefront instance; every test gets its own.
    #[derive(Debug, Clone)]
    pub struct BrowserContext {
        settings: Settings,
        store: Arc<Mutex<Storefront>>,
        recorder: ActionRecorder,
    }

    impl BrowserContext {
        /// Open a page sharing this context's storefront state.
        pub async fn new_page(&self) -> Result<Page> {
            Ok(Page {
                store: Arc::clone(&self.store),
                slow_mo_ms: self.settings.slow_mo_ms,
                recorder: self.recorder.clone(),
            })
        }

        /// Tear the context down.
        pub async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    /// A page view onto the shared storefront state.
    #[derive(Debug, Clone)]
    pub struct Page {
        store: Arc<Mutex<Storefront>>,
        slow_mo_ms: u64,
        recorder: ActionRecorder,
    }

    impl Page {
        async fn pace(&self) {
            if self.slow_mo_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.slow_mo_ms)).await;
            }
        }

        /// Navigate to `url`.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Navigation`] for URLs outside the storefront.
        pub async fn goto(&self, url: &str) -> Result<()> {
            self.recorder.record("goto", url);
            let ok = self.store.lock().await.goto(url);
            if ok {
                self.pace().await;
                Ok(())
            } else {
                Err(Error::Navigation {
                    url: url.to_string(),
                    message: "unknown route".to_string(),
                })
            }
        }

        /// Current page URL.
        pub async fn current_url(&self) -> Result<String> {
            Ok(self.store.lock().await.current_url())
        }

        /// Click the first visible match of `selector`.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Timeout`] if nothing clickable appears in time.
        pub async fn click(&self, selector: &str, timeout_ms: u64) -> Result<()> {
            self.recorder.record("click", selector);
            poll_until(selector, timeout_ms, || async move {
                self.store.lock().await.click(selector)
            })
            .await?;
            self.pace().await;
            Ok(())
        }

        /// Replace the value of the input at `selector`.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Timeout`] if the input never appears.
        pub async fn fill(&self, selector: &str, value: &str, timeout_ms: u64) -> Result<()> {
            self.recorder.record("fill", selector);
            poll_until(selector, timeout_ms, || async move {
                self.store.lock().await.fill(selector, value)
            })
            .await?;
            self.pace().await;
            Ok(())
        }

        /// Press `key` with the element at `selector` focused.
        pub async fn press_key(&self, selector: &str, key: &str, timeout_ms: u64) -> Result<()> {
            self.recorder.record("press_key", &format!("{selector} {key}"));
            poll_until(selector, timeout_ms, || async move {
                self.store.lock().await.press_key(selector, key)
            })
            .await?;
            self.pace().await;
            Ok(())
        }

        /// Pick the option with `value` in the select at `selector`.
        pub async fn select_option(
            &self,
            selector: &str,
            value: &str,
            timeout_ms: u64,
        ) -> Result<()> {
            self.recorder
                .record("select_option", &format!("{selector} = {value}"));
            poll_until(selector, timeout_ms, || async move {
                self.store.lock().await.select_option(selector, value)
            })
            .await?;
            self.pace().await;
            Ok(())
        }

        /// Text content of the first match, if present.
        pub async fn text(&self, selector: &str) -> Result<Option<String>> {
            Ok(self.store.lock().await.text(selector))
        }

        /// Text content of every match, in page order.
        pub async fn texts(&self, selector: &str) -> Result<Vec<String>> {
            Ok(self.store.lock().await.texts(selector))
        }

        /// Number of matches.
        pub async fn count(&self, selector: &str) -> Result<usize> {
            Ok(self.store.lock().await.count(selector))
        }

        /// Attribute (or live `value`) of the first match.
        pub async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
            Ok(self.store.lock().await.attribute(selector, name))
        }

        /// Whether the first match is currently rendered. Instant, no wait.
        pub async fn visible(&self, selector: &str) -> Result<bool> {
            Ok(self.store.lock().await.is_visible(selector))
        }

        /// Wait until `selector` reaches `state`.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Timeout`] if the state is not reached in time.
        pub async fn wait_for(
            &self,
            selector: &str,
            state: ElementState,
            timeout_ms: u64,
        ) -> Result<()> {
            self.recorder
                .record("wait_for", &format!("{selector} {state}"));
            poll_until(selector, timeout_ms, || async move {
                let rendered = self.store.lock().await.is_visible(selector);
                match state {
                    // The simulated DOM has no hidden-but-attached elements.
                    ElementState::Visible | ElementState::Attached => rendered,
                    ElementState::Hidden | ElementState::Detached => !rendered,
                }
            })
            .await
        }

        /// Placeholder PNG; the simulated backend has no pixels to capture.
        pub async fn screenshot(&self) -> Result<Vec<u8>> {
            self.recorder.record("screenshot", "");
            Ok(super::BLANK_PNG.to_vec())
        }

        /// Close the page.
        pub async fn close(&self) -> Result<()> {
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Browser, BrowserContext, Page};

#[cfg(not(feature = "browser"))]
pub use simulated::{Browser, BrowserContext, Page};
