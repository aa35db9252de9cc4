//! End-to-end test harness for the Swag Labs demo storefront.
//!
//! Page objects over an async browser driver, with fixtures, deterministic
//! test data and failure artifacts. The driver has two backends behind one
//! API: with the `browser` feature it speaks CDP (Chrome `DevTools` Protocol)
//! to a real Chromium; without it every interaction runs against an
//! in-process model of the storefront, so the default build is deterministic
//! and needs no browser binary.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌───────────────────────┐
//! │ Test body │──►│ Page objects │──►│ Driver                │
//! │ (fixtures)│   │ (Screen)     │   │ cdp / simulated store │
//! └───────────┘   └──────────────┘   └───────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use swaglabs_e2e::{Settings, TestSession, UserType};
//!
//! # async fn demo() -> swaglabs_e2e::Result<()> {
//! let session = TestSession::open(Settings::from_env()?).await?;
//! session
//!     .run("standard_login", |ctx| async move {
//!         ctx.login_as(UserType::Standard).await?;
//!         assert!(ctx.inventory_page().product_count().await? > 0);
//!         Ok(())
//!     })
//!     .await?;
//! session.close().await
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod data;
pub mod driver;
pub mod locator;
pub mod logging;
pub mod pages;
pub mod result;
pub mod session;
#[cfg(not(feature = "browser"))]
pub mod sim;
pub mod trace;
pub mod wait;

pub use config::{BrowserKind, Credentials, Settings, UserType};
pub use data::{CheckoutData, TestDataGenerator};
pub use locator::SortMode;
pub use pages::{
    CartPage, CheckoutCompletePage, CheckoutStepOnePage, CheckoutStepTwoPage, InventoryPage,
    LoginPage, PageObject, Screen,
};
pub use result::{Error, Result};
pub use session::{TestContext, TestSession};
pub use trace::ActionRecorder;
pub use wait::ElementState;
