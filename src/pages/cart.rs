//! Cart page.

use async_trait::async_trait;
use tracing::info;

use crate::locator::{self, cart as sel};
use crate::result::{Error, Result};

use super::{PageObject, Screen};

const LOADED_PROBE_MS: u64 = 5_000;

/// The cart contents page.
#[derive(Debug, Clone)]
pub struct CartPage {
    screen: Screen,
}

impl CartPage {
    /// Page object over `screen`.
    #[must_use]
    pub const fn new(screen: Screen) -> Self {
        Self { screen }
    }

    /// Number of rows in the cart.
    pub async fn item_count(&self) -> Result<usize> {
        self.screen.count(sel::CART_ITEM).await
    }

    /// Product names in the cart, in row order.
    pub async fn item_names(&self) -> Result<Vec<String>> {
        self.screen.texts(sel::ITEM_NAME).await
    }

    /// Price of each row, in row order.
    pub async fn item_prices(&self) -> Result<Vec<f64>> {
        let texts = self.screen.texts(locator::inventory::ITEM_PRICE).await?;
        texts
            .iter()
            .map(|t| {
                locator::parse_dollars(t).ok_or_else(|| Error::Page {
                    message: format!("unparseable price text '{t}'"),
                })
            })
            .collect()
    }

    /// Sum of the row prices, rounded to cents.
    pub async fn total_price(&self) -> Result<f64> {
        Ok(locator::round_cents(self.item_prices().await?.iter().sum()))
    }

    /// Whether a product name appears among the rows.
    pub async fn is_item_in_cart(&self, name: &str) -> Result<bool> {
        Ok(self.item_names().await?.iter().any(|n| n == name))
    }

    /// Whether the cart has no rows.
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.item_count().await? == 0)
    }

    /// Quantity of each row, in row order.
    pub async fn item_quantities(&self) -> Result<Vec<u32>> {
        let texts = self.screen.texts(sel::ITEM_QUANTITY).await?;
        texts
            .iter()
            .map(|t| {
                t.parse().map_err(|_| Error::Page {
                    message: format!("non-numeric quantity '{t}'"),
                })
            })
            .collect()
    }

    /// Remove a product by its display name.
    pub async fn remove_item(&self, name: &str) -> Result<()> {
        info!(product = name, "removing from cart");
        self.screen.click(&locator::remove_selector(name)).await
    }

    /// Remove every row until the cart is empty.
    pub async fn remove_all_items(&self) -> Result<()> {
        info!("clearing the cart");
        for name in self.item_names().await? {
            self.remove_item(&name).await?;
        }
        Ok(())
    }

    /// Remove the product at `index` in row order.
    pub async fn remove_item_by_index(&self, index: usize) -> Result<()> {
        let names = self.item_names().await?;
        let name = names.get(index).ok_or_else(|| Error::Page {
            message: format!("no cart row at index {index} of {}", names.len()),
        })?;
        self.remove_item(name).await
    }

    /// Return to the inventory.
    pub async fn continue_shopping(&self) -> Result<()> {
        self.screen.click(sel::CONTINUE_SHOPPING).await
    }

    /// Advance to checkout step one.
    pub async fn checkout(&self) -> Result<()> {
        info!("starting checkout");
        self.screen.click(sel::CHECKOUT).await
    }
}

#[async_trait]
impl PageObject for CartPage {
    fn page_name(&self) -> &'static str {
        "cart"
    }

    fn url_fragment(&self) -> &'static str {
        "cart.html"
    }

    fn screen(&self) -> &Screen {
        &self.screen
    }

    async fn is_loaded(&self) -> bool {
        self.screen.is_visible(sel::CHECKOUT, LOADED_PROBE_MS).await
    }
}
