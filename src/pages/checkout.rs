//! The three checkout pages: information form, overview, confirmation.

use async_trait::async_trait;
use tracing::info;

use crate::data::CheckoutData;
use crate::locator::{self, checkout as sel};
use crate::result::{Error, Result};

use super::{PageObject, Screen};

const ERROR_PROBE_MS: u64 = 2_000;
const LOADED_PROBE_MS: u64 = 5_000;

/// Totals read off the checkout overview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    /// Item total before tax
    pub subtotal: f64,
    /// Tax line
    pub tax: f64,
    /// Displayed grand total
    pub total: f64,
}

impl OrderSummary {
    /// Whether the displayed total equals subtotal plus tax to the cent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        locator::approx_eq(locator::round_cents(self.subtotal + self.tax), self.total)
    }
}

/// Checkout step one: the buyer information form.
#[derive(Debug, Clone)]
pub struct CheckoutStepOnePage {
    screen: Screen,
}

impl CheckoutStepOnePage {
    /// Page object over `screen`.
    #[must_use]
    pub const fn new(screen: Screen) -> Self {
        Self { screen }
    }

    /// Fill all three form fields.
    pub async fn fill_information(&self, data: &CheckoutData) -> Result<()> {
        info!(
            first = %data.first_name,
            last = %data.last_name,
            "filling checkout information"
        );
        self.screen.fill(sel::FIRST_NAME, &data.first_name).await?;
        self.screen.fill(sel::LAST_NAME, &data.last_name).await?;
        self.screen.fill(sel::POSTAL_CODE, &data.postal_code).await
    }

    /// Submit the form toward the overview.
    pub async fn continue_to_overview(&self) -> Result<()> {
        self.screen.click(sel::CONTINUE).await
    }

    /// Abandon checkout back to the cart.
    pub async fn cancel(&self) -> Result<()> {
        self.screen.click(sel::CANCEL).await
    }

    /// Text of the validation error banner, if shown.
    pub async fn error_message(&self) -> Result<Option<String>> {
        self.screen.text(sel::ERROR_MESSAGE).await
    }

    /// Whether the validation error banner is shown.
    pub async fn is_error_displayed(&self) -> bool {
        self.screen.is_visible(sel::ERROR_MESSAGE, ERROR_PROBE_MS).await
    }
}

#[async_trait]
impl PageObject for CheckoutStepOnePage {
    fn page_name(&self) -> &'static str {
        "checkout step one"
    }

    fn url_fragment(&self) -> &'static str {
        "checkout-step-one.html"
    }

    fn screen(&self) -> &Screen {
        &self.screen
    }

    async fn is_loaded(&self) -> bool {
        self.screen.is_visible(sel::FIRST_NAME, LOADED_PROBE_MS).await
    }
}

/// Checkout step two: the order overview with totals.
#[derive(Debug, Clone)]
pub struct CheckoutStepTwoPage {
    screen: Screen,
}

impl CheckoutStepTwoPage {
    /// Page object over `screen`.
    #[must_use]
    pub const fn new(screen: Screen) -> Self {
        Self { screen }
    }

    async fn dollar_line(&self, selector: &str) -> Result<f64> {
        let text = self.screen.text(selector).await?.ok_or_else(|| Error::Page {
            message: format!("missing summary line '{selector}'"),
        })?;
        locator::parse_dollars(&text).ok_or_else(|| Error::Page {
            message: format!("unparseable summary line '{text}'"),
        })
    }

    /// Product names listed on the overview.
    pub async fn item_names(&self) -> Result<Vec<String>> {
        self.screen.texts(locator::cart::ITEM_NAME).await
    }

    /// Number of rows on the overview.
    pub async fn item_count(&self) -> Result<usize> {
        self.screen.count(locator::cart::CART_ITEM).await
    }

    /// Item total before tax.
    pub async fn subtotal(&self) -> Result<f64> {
        self.dollar_line(sel::SUBTOTAL_LABEL).await
    }

    /// Tax line.
    pub async fn tax(&self) -> Result<f64> {
        self.dollar_line(sel::TAX_LABEL).await
    }

    /// Displayed grand total.
    pub async fn total(&self) -> Result<f64> {
        self.dollar_line(sel::TOTAL_LABEL).await
    }

    /// Whether the displayed total equals subtotal plus tax to the cent.
    pub async fn verify_total_calculation(&self) -> Result<bool> {
        Ok(self.order_summary().await?.is_consistent())
    }

    /// All three totals off the summary block.
    pub async fn order_summary(&self) -> Result<OrderSummary> {
        Ok(OrderSummary {
            subtotal: self.dollar_line(sel::SUBTOTAL_LABEL).await?,
            tax: self.dollar_line(sel::TAX_LABEL).await?,
            total: self.dollar_line(sel::TOTAL_LABEL).await?,
        })
    }

    /// Place the order.
    pub async fn finish(&self) -> Result<()> {
        info!("placing order");
        self.screen.click(sel::FINISH).await
    }

    /// Abandon checkout back to the cart.
    pub async fn cancel(&self) -> Result<()> {
        self.screen.click(sel::CANCEL).await
    }
}

#[async_trait]
impl PageObject for CheckoutStepTwoPage {
    fn page_name(&self) -> &'static str {
        "checkout step two"
    }

    fn url_fragment(&self) -> &'static str {
        "checkout-step-two.html"
    }

    fn screen(&self) -> &Screen {
        &self.screen
    }

    async fn is_loaded(&self) -> bool {
        self.screen.is_visible(sel::FINISH, LOADED_PROBE_MS).await
    }
}

/// The order confirmation page.
#[derive(Debug, Clone)]
pub struct CheckoutCompletePage {
    screen: Screen,
}

impl CheckoutCompletePage {
    /// Page object over `screen`.
    #[must_use]
    pub const fn new(screen: Screen) -> Self {
        Self { screen }
    }

    /// Confirmation headline text.
    pub async fn header(&self) -> Result<Option<String>> {
        self.screen.text(sel::COMPLETE_HEADER).await
    }

    /// Confirmation body text.
    pub async fn body(&self) -> Result<Option<String>> {
        self.screen.text(sel::COMPLETE_TEXT).await
    }

    /// Whether the confirmation rendered fully, illustration included.
    pub async fn is_order_complete(&self) -> bool {
        self.screen.is_visible(sel::COMPLETE_HEADER, ERROR_PROBE_MS).await
            && self.screen.is_visible(sel::PONY_EXPRESS, ERROR_PROBE_MS).await
    }

    /// Return to the inventory.
    pub async fn back_home(&self) -> Result<()> {
        self.screen.click(sel::BACK_HOME).await
    }
}

#[async_trait]
impl PageObject for CheckoutCompletePage {
    fn page_name(&self) -> &'static str {
        "checkout complete"
    }

    fn url_fragment(&self) -> &'static str {
        "checkout-complete.html"
    }

    fn screen(&self) -> &Screen {
        &self.screen
    }

    async fn is_loaded(&self) -> bool {
        self.screen.is_visible(sel::COMPLETE_HEADER, LOADED_PROBE_MS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_consistency_to_the_cent() {
        let good = OrderSummary {
            subtotal: 39.98,
            tax: 3.20,
            total: 43.18,
        };
        assert!(good.is_consistent());

        let off_by_two_cents = OrderSummary {
            subtotal: 39.98,
            tax: 3.20,
            total: 43.20,
        };
        assert!(!off_by_two_cents.is_consistent());
    }
}
