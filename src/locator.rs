//! Selector catalog and string helpers shared by the page objects.
//!
//! Selectors mirror the storefront's DOM exactly; each page object pulls its
//! set from here so a markup change is a one-line fix.

/// Tolerance for currency comparisons after rounding to cents.
pub const EPSILON: f64 = 0.01;

/// Login page selectors.
pub mod login {
    /// Username input
    pub const USERNAME_INPUT: &str = "[data-test=\"username\"]";
    /// Password input
    pub const PASSWORD_INPUT: &str = "[data-test=\"password\"]";
    /// Submit button
    pub const LOGIN_BUTTON: &str = "[data-test=\"login-button\"]";
    /// Error banner shown on a rejected login
    pub const ERROR_MESSAGE: &str = "[data-test=\"error\"]";
    /// Dismiss button inside the error banner
    pub const ERROR_BUTTON: &str = ".error-button";
    /// Logo above the form
    pub const LOGIN_LOGO: &str = ".login_logo";
}

/// Inventory page selectors.
pub mod inventory {
    /// Product grid container
    pub const CONTAINER: &str = ".inventory_container";
    /// One product card
    pub const ITEM: &str = ".inventory_item";
    /// Product name inside a card
    pub const ITEM_NAME: &str = ".inventory_item_name";
    /// Product price inside a card
    pub const ITEM_PRICE: &str = ".inventory_item_price";
    /// Cart badge showing the item count
    pub const CART_BADGE: &str = ".shopping_cart_badge";
    /// Link to the cart page
    pub const CART_LINK: &str = ".shopping_cart_link";
    /// Sort dropdown
    pub const SORT_SELECT: &str = ".product_sort_container";
    /// Burger menu open button
    pub const MENU_BUTTON: &str = "#react-burger-menu-btn";
    /// Header branding
    pub const APP_LOGO: &str = ".app_logo";
    /// Page footer
    pub const FOOTER: &str = ".footer";
    /// Logout entry inside the burger menu
    pub const LOGOUT_LINK: &str = "#logout_sidebar_link";
}

/// Cart page selectors.
pub mod cart {
    /// One cart row
    pub const CART_ITEM: &str = ".cart_item";
    /// Product name inside a row
    pub const ITEM_NAME: &str = ".inventory_item_name";
    /// Quantity cell inside a row
    pub const ITEM_QUANTITY: &str = ".cart_quantity";
    /// Back to the inventory
    pub const CONTINUE_SHOPPING: &str = "[data-test=\"continue-shopping\"]";
    /// Forward to checkout step one
    pub const CHECKOUT: &str = "[data-test=\"checkout\"]";
}

/// Checkout selectors, across all three checkout pages.
pub mod checkout {
    /// First name input (step one)
    pub const FIRST_NAME: &str = "[data-test=\"firstName\"]";
    /// Last name input (step one)
    pub const LAST_NAME: &str = "[data-test=\"lastName\"]";
    /// Postal code input (step one)
    pub const POSTAL_CODE: &str = "[data-test=\"postalCode\"]";
    /// Continue to the overview (step one)
    pub const CONTINUE: &str = "[data-test=\"continue\"]";
    /// Cancel back to the cart (steps one and two)
    pub const CANCEL: &str = "[data-test=\"cancel\"]";
    /// Place the order (step two)
    pub const FINISH: &str = "[data-test=\"finish\"]";
    /// Validation error banner (step one)
    pub const ERROR_MESSAGE: &str = "[data-test=\"error\"]";
    /// Item-total line on the overview
    pub const SUBTOTAL_LABEL: &str = ".summary_subtotal_label";
    /// Tax line on the overview
    pub const TAX_LABEL: &str = ".summary_tax_label";
    /// Grand-total line on the overview
    pub const TOTAL_LABEL: &str = ".summary_total_label";
    /// Confirmation headline (complete page)
    pub const COMPLETE_HEADER: &str = ".complete-header";
    /// Confirmation body text (complete page)
    pub const COMPLETE_TEXT: &str = ".complete-text";
    /// Confirmation illustration (complete page)
    pub const PONY_EXPRESS: &str = ".pony_express";
    /// Back to the inventory (complete page)
    pub const BACK_HOME: &str = "[data-test=\"back-to-products\"]";
}

/// Slug for a product name as the storefront builds its `data-test` ids.
///
/// Lowercase, spaces to hyphens; every other character (parentheses, dots,
/// `()` pairs) passes through unchanged.
#[must_use]
pub fn product_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Add-to-cart button selector for a product name.
#[must_use]
pub fn add_to_cart_selector(name: &str) -> String {
    format!("[data-test=\"add-to-cart-{}\"]", product_slug(name))
}

/// Remove-from-cart button selector for a product name.
#[must_use]
pub fn remove_selector(name: &str) -> String {
    format!("[data-test=\"remove-{}\"]", product_slug(name))
}

/// The four orderings the sort dropdown offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Name ascending
    NameAscending,
    /// Name descending
    NameDescending,
    /// Price ascending
    PriceLowToHigh,
    /// Price descending
    PriceHighToLow,
}

impl SortMode {
    /// All modes, for parametrized tests.
    pub const ALL: [Self; 4] = [
        Self::NameAscending,
        Self::NameDescending,
        Self::PriceLowToHigh,
        Self::PriceHighToLow,
    ];

    /// The `value` attribute of the corresponding `<option>`.
    #[must_use]
    pub const fn as_option_value(&self) -> &'static str {
        match self {
            Self::NameAscending => "az",
            Self::NameDescending => "za",
            Self::PriceLowToHigh => "lohi",
            Self::PriceHighToLow => "hilo",
        }
    }
}

/// Parse a dollar amount out of a display string.
///
/// Takes everything after the first `$`, so it accepts both a bare price
/// (`$29.99`) and a labelled line (`Item total: $53.97`). Returns `None` when
/// no `$` is present or the remainder is not a number.
#[must_use]
pub fn parse_dollars(text: &str) -> Option<f64> {
    let (_, rest) = text.split_once('$')?;
    rest.trim().parse().ok()
}

/// Whether two currency amounts agree within [`EPSILON`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Round a currency amount to cents.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
