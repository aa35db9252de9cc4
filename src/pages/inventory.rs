//! Inventory (product grid) page.

use async_trait::async_trait;
use tracing::info;

use crate::locator::{self, inventory as sel, SortMode};
use crate::result::{Error, Result};

use super::{PageObject, Screen};

/// Probe window for the cart badge after an add or remove.
const BADGE_PROBE_MS: u64 = 2_000;

/// Probe window for the grid container after login.
const LOADED_PROBE_MS: u64 = 10_000;

/// The product grid shown after login.
#[derive(Debug, Clone)]
pub struct InventoryPage {
    screen: Screen,
}

impl InventoryPage {
    /// Page object over `screen`.
    #[must_use]
    pub const fn new(screen: Screen) -> Self {
        Self { screen }
    }

    /// Names of the listed products, in display order.
    pub async fn product_names(&self) -> Result<Vec<String>> {
        self.screen.texts(sel::ITEM_NAME).await
    }

    /// Prices of the listed products, in display order.
    pub async fn product_prices(&self) -> Result<Vec<f64>> {
        let texts = self.screen.texts(sel::ITEM_PRICE).await?;
        texts
            .iter()
            .map(|t| {
                locator::parse_dollars(t).ok_or_else(|| Error::Page {
                    message: format!("unparseable price text '{t}'"),
                })
            })
            .collect()
    }

    /// Number of product cards on the grid.
    pub async fn product_count(&self) -> Result<usize> {
        self.screen.count(sel::ITEM).await
    }

    /// Add a product to the cart by its display name.
    pub async fn add_to_cart(&self, name: &str) -> Result<()> {
        info!(product = name, "add to cart");
        self.screen.click(&locator::add_to_cart_selector(name)).await
    }

    /// Remove a product from the cart by its display name.
    pub async fn remove_from_cart(&self, name: &str) -> Result<()> {
        info!(product = name, "remove from cart");
        self.screen.click(&locator::remove_selector(name)).await
    }

    /// Add the product at `index` in the current display order.
    pub async fn add_to_cart_by_index(&self, index: usize) -> Result<()> {
        let names = self.product_names().await?;
        let name = names.get(index).ok_or_else(|| Error::Page {
            message: format!("no product at index {index} of {}", names.len()),
        })?;
        self.add_to_cart(name).await
    }

    /// Add every listed product to the cart.
    pub async fn add_all_to_cart(&self) -> Result<Vec<String>> {
        let names = self.product_names().await?;
        for name in &names {
            self.add_to_cart(name).await?;
        }
        Ok(names)
    }

    /// Remove every carted product from the grid, leaving the badge absent.
    pub async fn remove_all_from_cart(&self) -> Result<()> {
        info!("clearing the cart from the grid");
        for name in self.product_names().await? {
            if self.screen.page().visible(&locator::remove_selector(&name)).await? {
                self.remove_from_cart(&name).await?;
            }
        }
        Ok(())
    }

    /// Whether a product's remove button is showing, i.e. it is in the cart.
    pub async fn is_product_in_cart(&self, name: &str) -> bool {
        self.screen
            .is_visible(&locator::remove_selector(name), BADGE_PROBE_MS)
            .await
    }

    /// Cart badge count; zero when the badge is absent.
    pub async fn cart_badge_count(&self) -> Result<usize> {
        if !self.screen.is_visible(sel::CART_BADGE, BADGE_PROBE_MS).await {
            return Ok(0);
        }
        let text = self.screen.text(sel::CART_BADGE).await?.unwrap_or_default();
        text.parse().map_err(|_| Error::Page {
            message: format!("non-numeric cart badge '{text}'"),
        })
    }

    /// Whether the cart badge shows no items (is absent).
    pub async fn is_cart_empty(&self) -> bool {
        self.screen.is_hidden(sel::CART_BADGE, BADGE_PROBE_MS).await
    }

    /// Change the product ordering.
    pub async fn sort_by(&self, mode: SortMode) -> Result<()> {
        info!(mode = mode.as_option_value(), "sorting inventory");
        self.screen
            .select_option(sel::SORT_SELECT, mode.as_option_value())
            .await
    }

    /// Header branding text.
    pub async fn app_logo_text(&self) -> Result<Option<String>> {
        self.screen.text(sel::APP_LOGO).await
    }

    /// Footer legal text.
    pub async fn footer_text(&self) -> Result<Option<String>> {
        self.screen.text(sel::FOOTER).await
    }

    /// Open the cart page.
    pub async fn open_cart(&self) -> Result<()> {
        self.screen.click(sel::CART_LINK).await
    }

    /// Log out through the burger menu.
    pub async fn logout(&self) -> Result<()> {
        info!("logging out");
        self.screen.click(sel::MENU_BUTTON).await?;
        self.screen.click(sel::LOGOUT_LINK).await
    }
}

#[async_trait]
impl PageObject for InventoryPage {
    fn page_name(&self) -> &'static str {
        "inventory"
    }

    fn url_fragment(&self) -> &'static str {
        "inventory.html"
    }

    fn screen(&self) -> &Screen {
        &self.screen
    }

    async fn is_loaded(&self) -> bool {
        self.screen.is_visible(sel::CONTAINER, LOADED_PROBE_MS).await
    }
}
