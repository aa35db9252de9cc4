//! In-process model of the storefront.
//!
//! The default (no `browser` feature) driver runs every page interaction
//! against this state machine instead of a real browser, so the whole suite
//! is deterministic and needs no Chrome binary. The DOM it exposes is the
//! subset of the real site the page objects touch, keyed by the exact same
//! selectors.

use crate::locator::{self, product_slug, round_cents, SortMode};

/// Sales tax applied on the checkout overview.
pub const TAX_RATE: f64 = 0.08;

/// Headline on the order-complete page.
pub const COMPLETE_HEADER_TEXT: &str = "Thank you for your order!";

/// Body text on the order-complete page.
pub const COMPLETE_BODY_TEXT: &str =
    "Your order has been dispatched, and will arrive just as fast as the pony can get there!";

/// Header branding shown on every logged-in page.
pub const APP_LOGO_TEXT: &str = "Swag Labs";

/// Footer legal text shown on every logged-in page.
pub const FOOTER_TEXT: &str =
    "© 2026 Sauce Labs. All Rights Reserved. Terms of Service | Privacy Policy";

const PASSWORD: &str = "secret_sauce";
const LOCKED_USER: &str = "locked_out_user";

const KNOWN_USERS: &[&str] = &[
    "standard_user",
    "locked_out_user",
    "problem_user",
    "performance_glitch_user",
    "error_user",
    "visual_user",
];

/// The fixed product catalog.
pub const CATALOG: &[(&str, f64)] = &[
    ("Sauce Labs Backpack", 29.99),
    ("Sauce Labs Bike Light", 9.99),
    ("Sauce Labs Bolt T-Shirt", 15.99),
    ("Sauce Labs Fleece Jacket", 49.99),
    ("Sauce Labs Onesie", 7.99),
    ("Test.allTheThings() T-Shirt (Red)", 15.99),
];

/// Pages of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login form
    Login,
    /// Product grid
    Inventory,
    /// Cart contents
    Cart,
    /// Checkout form
    CheckoutStepOne,
    /// Checkout overview
    CheckoutStepTwo,
    /// Order confirmation
    CheckoutComplete,
}

impl Route {
    /// Path fragment appended to the base URL.
    #[must_use]
    pub const fn fragment(&self) -> &'static str {
        match self {
            Self::Login => "",
            Self::Inventory => "inventory.html",
            Self::Cart => "cart.html",
            Self::CheckoutStepOne => "checkout-step-one.html",
            Self::CheckoutStepTwo => "checkout-step-two.html",
            Self::CheckoutComplete => "checkout-complete.html",
        }
    }

    fn from_fragment(fragment: &str) -> Option<Self> {
        match fragment {
            "" | "index.html" => Some(Self::Login),
            "inventory.html" => Some(Self::Inventory),
            "cart.html" => Some(Self::Cart),
            "checkout-step-one.html" => Some(Self::CheckoutStepOne),
            "checkout-step-two.html" => Some(Self::CheckoutStepTwo),
            "checkout-complete.html" => Some(Self::CheckoutComplete),
            _ => None,
        }
    }
}

/// The whole mutable state of one browser context against the storefront.
#[derive(Debug)]
pub struct Storefront {
    base_url: String,
    route: Route,
    session_user: Option<String>,
    login_error: Option<String>,
    checkout_error: Option<String>,
    username_field: String,
    password_field: String,
    first_name_field: String,
    last_name_field: String,
    postal_code_field: String,
    cart: Vec<String>,
    sort: SortMode,
    menu_open: bool,
}

impl Storefront {
    /// Fresh context on the login page.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            route: Route::Login,
            session_user: None,
            login_error: None,
            checkout_error: None,
            username_field: String::new(),
            password_field: String::new(),
            first_name_field: String::new(),
            last_name_field: String::new(),
            postal_code_field: String::new(),
            cart: Vec::new(),
            sort: SortMode::NameAscending,
            menu_open: false,
        }
    }

    /// Current page URL.
    #[must_use]
    pub fn current_url(&self) -> String {
        let fragment = self.route.fragment();
        if fragment.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/{fragment}", self.base_url)
        }
    }

    /// Navigate by URL. Protected routes bounce back to login without a
    /// session, as the real site does.
    pub fn goto(&mut self, url: &str) -> bool {
        let fragment = url
            .strip_prefix(&self.base_url)
            .map_or(url, |rest| rest.trim_start_matches('/'));
        let Some(route) = Route::from_fragment(fragment) else {
            return false;
        };
        self.menu_open = false;
        self.route = if route == Route::Login || self.session_user.is_some() {
            route
        } else {
            Route::Login
        };
        true
    }

    /// Product names in the current sort order.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<String> {
        let mut items: Vec<(&str, f64)> = CATALOG.iter().copied().collect();
        match self.sort {
            SortMode::NameAscending => items.sort_by(|a, b| a.0.cmp(b.0)),
            SortMode::NameDescending => items.sort_by(|a, b| b.0.cmp(a.0)),
            SortMode::PriceLowToHigh => {
                items.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            }
            SortMode::PriceHighToLow => {
                items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            }
        }
        items.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn price_of(name: &str) -> Option<f64> {
        CATALOG
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, price)| *price)
    }

    fn cart_price_texts(&self) -> Vec<String> {
        self.cart
            .iter()
            .filter_map(|name| Self::price_of(name))
            .map(|price| format!("${price:.2}"))
            .collect()
    }

    /// Sum of cart item prices, rounded to cents.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        round_cents(
            self.cart
                .iter()
                .filter_map(|name| Self::price_of(name))
                .sum(),
        )
    }

    fn header_visible(&self, selector: &str) -> Option<bool> {
        if self.route == Route::Login {
            return None;
        }
        match selector {
            locator::inventory::CART_LINK
            | locator::inventory::MENU_BUTTON
            | locator::inventory::APP_LOGO
            | locator::inventory::FOOTER => Some(true),
            locator::inventory::CART_BADGE => Some(!self.cart.is_empty()),
            locator::inventory::LOGOUT_LINK => Some(self.menu_open),
            _ => None,
        }
    }

    /// Whether the element `selector` exists and is rendered right now.
    #[allow(clippy::too_many_lines)]
    #[must_use]
    pub fn is_visible(&self, selector: &str) -> bool {
        if let Some(v) = self.header_visible(selector) {
            return v;
        }
        match self.route {
            Route::Login => match selector {
                locator::login::USERNAME_INPUT
                | locator::login::PASSWORD_INPUT
                | locator::login::LOGIN_BUTTON
                | locator::login::LOGIN_LOGO => true,
                locator::login::ERROR_MESSAGE | locator::login::ERROR_BUTTON => {
                    self.login_error.is_some()
                }
                _ => false,
            },
            Route::Inventory => match selector {
                locator::inventory::CONTAINER
                | locator::inventory::ITEM
                | locator::inventory::ITEM_NAME
                | locator::inventory::ITEM_PRICE
                | locator::inventory::SORT_SELECT => true,
                _ => self.button_target(selector).is_some(),
            },
            Route::Cart => match selector {
                locator::cart::CONTINUE_SHOPPING | locator::cart::CHECKOUT => true,
                locator::cart::CART_ITEM
                | locator::cart::ITEM_NAME
                | locator::cart::ITEM_QUANTITY
                | locator::inventory::ITEM_PRICE => !self.cart.is_empty(),
                _ => matches!(self.button_target(selector), Some(ButtonTarget::Remove(_))),
            },
            Route::CheckoutStepOne => match selector {
                locator::checkout::FIRST_NAME
                | locator::checkout::LAST_NAME
                | locator::checkout::POSTAL_CODE
                | locator::checkout::CONTINUE
                | locator::checkout::CANCEL => true,
                locator::checkout::ERROR_MESSAGE => self.checkout_error.is_some(),
                _ => false,
            },
            Route::CheckoutStepTwo => matches!(
                selector,
                locator::checkout::FINISH
                    | locator::checkout::CANCEL
                    | locator::checkout::SUBTOTAL_LABEL
                    | locator::checkout::TAX_LABEL
                    | locator::checkout::TOTAL_LABEL
                    | locator::cart::CART_ITEM
                    | locator::cart::ITEM_NAME
                    | locator::cart::ITEM_QUANTITY
                    | locator::inventory::ITEM_PRICE
            ),
            Route::CheckoutComplete => matches!(
                selector,
                locator::checkout::COMPLETE_HEADER
                    | locator::checkout::COMPLETE_TEXT
                    | locator::checkout::PONY_EXPRESS
                    | locator::checkout::BACK_HOME
            ),
        }
    }

    /// Text of the first element matching `selector`, if rendered.
    #[must_use]
    pub fn text(&self, selector: &str) -> Option<String> {
        self.texts(selector).into_iter().next()
    }

    /// Texts of every element matching `selector`, in page order.
    #[must_use]
    pub fn texts(&self, selector: &str) -> Vec<String> {
        if !self.is_visible(selector) {
            return Vec::new();
        }
        match selector {
            locator::inventory::APP_LOGO => return vec![APP_LOGO_TEXT.to_string()],
            locator::inventory::FOOTER => return vec![FOOTER_TEXT.to_string()],
            _ => {}
        }
        match self.route {
            Route::Login => match selector {
                locator::login::ERROR_MESSAGE => {
                    self.login_error.clone().into_iter().collect()
                }
                locator::login::LOGIN_LOGO => vec!["Swag Labs".to_string()],
                _ => Vec::new(),
            },
            Route::Inventory => match selector {
                locator::inventory::ITEM_NAME => self.sorted_names(),
                locator::inventory::ITEM_PRICE => self
                    .sorted_names()
                    .iter()
                    .filter_map(|name| Self::price_of(name))
                    .map(|price| format!("${price:.2}"))
                    .collect(),
                locator::inventory::CART_BADGE => vec![self.cart.len().to_string()],
                _ => Vec::new(),
            },
            Route::Cart => match selector {
                locator::cart::ITEM_NAME => self.cart.clone(),
                locator::cart::ITEM_QUANTITY => {
                    self.cart.iter().map(|_| "1".to_string()).collect()
                }
                locator::inventory::ITEM_PRICE => self.cart_price_texts(),
                locator::inventory::CART_BADGE => vec![self.cart.len().to_string()],
                _ => Vec::new(),
            },
            Route::CheckoutStepOne => match selector {
                locator::checkout::ERROR_MESSAGE => {
                    self.checkout_error.clone().into_iter().collect()
                }
                locator::inventory::CART_BADGE => vec![self.cart.len().to_string()],
                _ => Vec::new(),
            },
            Route::CheckoutStepTwo => {
                let subtotal = self.subtotal();
                let tax = round_cents(subtotal * TAX_RATE);
                match selector {
                    locator::cart::ITEM_NAME => self.cart.clone(),
                    locator::cart::ITEM_QUANTITY => {
                        self.cart.iter().map(|_| "1".to_string()).collect()
                    }
                    locator::inventory::ITEM_PRICE => self.cart_price_texts(),
                    locator::checkout::SUBTOTAL_LABEL => {
                        vec![format!("Item total: ${subtotal:.2}")]
                    }
                    locator::checkout::TAX_LABEL => vec![format!("Tax: ${tax:.2}")],
                    locator::checkout::TOTAL_LABEL => {
                        vec![format!("Total: ${:.2}", round_cents(subtotal + tax))]
                    }
                    locator::inventory::CART_BADGE => vec![self.cart.len().to_string()],
                    _ => Vec::new(),
                }
            }
            Route::CheckoutComplete => match selector {
                locator::checkout::COMPLETE_HEADER => vec![COMPLETE_HEADER_TEXT.to_string()],
                locator::checkout::COMPLETE_TEXT => vec![COMPLETE_BODY_TEXT.to_string()],
                _ => Vec::new(),
            },
        }
    }

    /// How many elements match `selector`.
    #[must_use]
    pub fn count(&self, selector: &str) -> usize {
        if !self.is_visible(selector) {
            return 0;
        }
        match (self.route, selector) {
            (Route::Inventory, locator::inventory::ITEM) => CATALOG.len(),
            (Route::Cart | Route::CheckoutStepTwo, locator::cart::CART_ITEM) => self.cart.len(),
            _ => {
                let texts = self.texts(selector);
                if texts.is_empty() {
                    1
                } else {
                    texts.len()
                }
            }
        }
    }

    /// Attribute value of the first match, if any.
    #[must_use]
    pub fn attribute(&self, selector: &str, name: &str) -> Option<String> {
        if !self.is_visible(selector) {
            return None;
        }
        match (selector, name) {
            (locator::inventory::SORT_SELECT, "value") => {
                Some(self.sort.as_option_value().to_string())
            }
            (locator::login::USERNAME_INPUT, "placeholder") => Some("Username".to_string()),
            (locator::login::PASSWORD_INPUT, "placeholder") => Some("Password".to_string()),
            (locator::checkout::FIRST_NAME, "placeholder") => Some("First Name".to_string()),
            (locator::checkout::LAST_NAME, "placeholder") => Some("Last Name".to_string()),
            (locator::checkout::POSTAL_CODE, "placeholder") => {
                Some("Zip/Postal Code".to_string())
            }
            (locator::login::USERNAME_INPUT, "value") => Some(self.username_field.clone()),
            (locator::login::PASSWORD_INPUT, "value") => Some(self.password_field.clone()),
            (locator::checkout::FIRST_NAME, "value") => Some(self.first_name_field.clone()),
            (locator::checkout::LAST_NAME, "value") => Some(self.last_name_field.clone()),
            (locator::checkout::POSTAL_CODE, "value") => Some(self.postal_code_field.clone()),
            _ => None,
        }
    }

    /// Type `value` into the input `selector`. False when no such input is
    /// rendered.
    pub fn fill(&mut self, selector: &str, value: &str) -> bool {
        if !self.is_visible(selector) {
            return false;
        }
        let slot = match (self.route, selector) {
            (Route::Login, locator::login::USERNAME_INPUT) => &mut self.username_field,
            (Route::Login, locator::login::PASSWORD_INPUT) => &mut self.password_field,
            (Route::CheckoutStepOne, locator::checkout::FIRST_NAME) => &mut self.first_name_field,
            (Route::CheckoutStepOne, locator::checkout::LAST_NAME) => &mut self.last_name_field,
            (Route::CheckoutStepOne, locator::checkout::POSTAL_CODE) => {
                &mut self.postal_code_field
            }
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Pick `value` in the select `selector`.
    pub fn select_option(&mut self, selector: &str, value: &str) -> bool {
        if self.route != Route::Inventory || selector != locator::inventory::SORT_SELECT {
            return false;
        }
        let mode = match value {
            "az" => SortMode::NameAscending,
            "za" => SortMode::NameDescending,
            "lohi" => SortMode::PriceLowToHigh,
            "hilo" => SortMode::PriceHighToLow,
            _ => return false,
        };
        self.sort = mode;
        true
    }

    /// Press a key with `selector` focused. Enter on the password field
    /// submits the login form.
    pub fn press_key(&mut self, selector: &str, key: &str) -> bool {
        if !self.is_visible(selector) {
            return false;
        }
        if self.route == Route::Login
            && selector == locator::login::PASSWORD_INPUT
            && key == "Enter"
        {
            self.submit_login();
        }
        true
    }

    /// Click `selector`. False when no such element is rendered, which the
    /// driver layer turns into a timeout by polling.
    pub fn click(&mut self, selector: &str) -> bool {
        if !self.is_visible(selector) {
            return false;
        }
        match self.route {
            Route::Login => match selector {
                locator::login::LOGIN_BUTTON => {
                    self.submit_login();
                    true
                }
                locator::login::ERROR_BUTTON => {
                    self.login_error = None;
                    true
                }
                _ => true,
            },
            _ => self.click_logged_in(selector),
        }
    }

    fn click_logged_in(&mut self, selector: &str) -> bool {
        match selector {
            locator::inventory::CART_LINK => {
                self.route = Route::Cart;
                self.menu_open = false;
                return true;
            }
            locator::inventory::MENU_BUTTON => {
                self.menu_open = true;
                return true;
            }
            locator::inventory::LOGOUT_LINK => {
                self.logout();
                return true;
            }
            _ => {}
        }
        match self.route {
            Route::Inventory | Route::Cart => match self.button_target(selector) {
                Some(ButtonTarget::Add(name)) => {
                    self.cart.push(name);
                    true
                }
                Some(ButtonTarget::Remove(name)) => {
                    self.cart.retain(|item| *item != name);
                    true
                }
                None => match selector {
                    locator::cart::CONTINUE_SHOPPING => {
                        self.route = Route::Inventory;
                        true
                    }
                    locator::cart::CHECKOUT => {
                        self.route = Route::CheckoutStepOne;
                        self.checkout_error = None;
                        true
                    }
                    _ => true,
                },
            },
            Route::CheckoutStepOne => match selector {
                locator::checkout::CONTINUE => {
                    self.submit_checkout_form();
                    true
                }
                locator::checkout::CANCEL => {
                    self.route = Route::Cart;
                    self.checkout_error = None;
                    true
                }
                _ => true,
            },
            Route::CheckoutStepTwo => match selector {
                locator::checkout::FINISH => {
                    self.cart.clear();
                    self.route = Route::CheckoutComplete;
                    true
                }
                locator::checkout::CANCEL => {
                    self.route = Route::Cart;
                    true
                }
                _ => true,
            },
            Route::CheckoutComplete => {
                if selector == locator::checkout::BACK_HOME {
                    self.route = Route::Inventory;
                }
                true
            }
            Route::Login => true,
        }
    }

    fn submit_login(&mut self) {
        let username = self.username_field.clone();
        let password = self.password_field.clone();
        self.login_error = if username.is_empty() {
            Some("Epic sadface: Username is required".to_string())
        } else if password.is_empty() {
            Some("Epic sadface: Password is required".to_string())
        } else if username == LOCKED_USER && password == PASSWORD {
            Some("Epic sadface: Sorry, this user has been locked out.".to_string())
        } else if KNOWN_USERS.contains(&username.as_str()) && password == PASSWORD {
            self.session_user = Some(username);
            self.route = Route::Inventory;
            self.username_field.clear();
            self.password_field.clear();
            None
        } else {
            Some(
                "Epic sadface: Username and password do not match any user in this service"
                    .to_string(),
            )
        };
    }

    fn submit_checkout_form(&mut self) {
        self.checkout_error = if self.first_name_field.is_empty() {
            Some("Error: First Name is required".to_string())
        } else if self.last_name_field.is_empty() {
            Some("Error: Last Name is required".to_string())
        } else if self.postal_code_field.is_empty() {
            Some("Error: Postal Code is required".to_string())
        } else {
            self.route = Route::CheckoutStepTwo;
            None
        };
    }

    fn logout(&mut self) {
        self.session_user = None;
        self.login_error = None;
        self.cart.clear();
        self.menu_open = false;
        self.route = Route::Login;
        self.username_field.clear();
        self.password_field.clear();
    }

    /// Resolve an add/remove button selector to its product, respecting
    /// current cart membership and (on the cart page) cart contents.
    fn button_target(&self, selector: &str) -> Option<ButtonTarget> {
        let slug = selector
            .strip_prefix("[data-test=\"")?
            .strip_suffix("\"]")?;
        if let Some(product) = slug.strip_prefix("add-to-cart-") {
            if self.route != Route::Inventory {
                return None;
            }
            let name = Self::name_for_slug(product)?;
            if self.cart.contains(&name) {
                return None;
            }
            return Some(ButtonTarget::Add(name));
        }
        if let Some(product) = slug.strip_prefix("remove-") {
            let name = Self::name_for_slug(product)?;
            if self.cart.contains(&name) {
                return Some(ButtonTarget::Remove(name));
            }
        }
        None
    }

    fn name_for_slug(slug: &str) -> Option<String> {
        CATALOG
            .iter()
            .find(|(name, _)| product_slug(name) == slug)
            .map(|(name, _)| (*name).to_string())
    }
}

enum ButtonTarget {
    Add(String),
    Remove(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::locator::{add_to_cart_selector, remove_selector};

    const BASE: &str = "https://www.saucedemo.com";

    fn logged_in() -> Storefront {
        let mut store = Storefront::new(BASE);
        assert!(store.fill(locator::login::USERNAME_INPUT, "standard_user"));
        assert!(store.fill(locator::login::PASSWORD_INPUT, "secret_sauce"));
        assert!(store.click(locator::login::LOGIN_BUTTON));
        assert_eq!(store.route, Route::Inventory);
        store
    }

    mod login {
        use super::*;

        #[test]
        fn test_valid_login_lands_on_inventory() {
            let store = logged_in();
            assert!(store.current_url().ends_with("inventory.html"));
        }

        #[test]
        fn test_locked_user_gets_locked_message() {
            let mut store = Storefront::new(BASE);
            store.fill(locator::login::USERNAME_INPUT, "locked_out_user");
            store.fill(locator::login::PASSWORD_INPUT, "secret_sauce");
            store.click(locator::login::LOGIN_BUTTON);
            assert_eq!(store.route, Route::Login);
            let msg = store.text(locator::login::ERROR_MESSAGE).unwrap();
            assert!(msg.contains("locked out"));
        }

        #[test]
        fn test_empty_username_message() {
            let mut store = Storefront::new(BASE);
            store.fill(locator::login::PASSWORD_INPUT, "secret_sauce");
            store.click(locator::login::LOGIN_BUTTON);
            assert_eq!(
                store.text(locator::login::ERROR_MESSAGE).unwrap(),
                "Epic sadface: Username is required"
            );
        }

        #[test]
        fn test_error_dismiss_clears_banner() {
            let mut store = Storefront::new(BASE);
            store.fill(locator::login::USERNAME_INPUT, "nobody");
            store.fill(locator::login::PASSWORD_INPUT, "nothing");
            store.click(locator::login::LOGIN_BUTTON);
            assert!(store.is_visible(locator::login::ERROR_MESSAGE));
            store.click(locator::login::ERROR_BUTTON);
            assert!(!store.is_visible(locator::login::ERROR_MESSAGE));
        }

        #[test]
        fn test_enter_in_password_field_submits() {
            let mut store = Storefront::new(BASE);
            store.fill(locator::login::USERNAME_INPUT, "standard_user");
            store.fill(locator::login::PASSWORD_INPUT, "secret_sauce");
            store.press_key(locator::login::PASSWORD_INPUT, "Enter");
            assert_eq!(store.route, Route::Inventory);
        }

        #[test]
        fn test_protected_route_redirects_without_session() {
            let mut store = Storefront::new(BASE);
            assert!(store.goto(&format!("{BASE}/inventory.html")));
            assert_eq!(store.route, Route::Login);
        }
    }

    mod inventory {
        use super::*;

        #[test]
        fn test_six_products_listed() {
            let store = logged_in();
            assert_eq!(store.count(locator::inventory::ITEM), 6);
            assert_eq!(store.texts(locator::inventory::ITEM_NAME).len(), 6);
        }

        #[test]
        fn test_add_toggles_button_and_badge() {
            let mut store = logged_in();
            let add = add_to_cart_selector("Sauce Labs Backpack");
            let remove = remove_selector("Sauce Labs Backpack");
            assert!(store.is_visible(&add));
            assert!(!store.is_visible(&remove));
            store.click(&add);
            assert!(!store.is_visible(&add));
            assert!(store.is_visible(&remove));
            assert_eq!(store.text(locator::inventory::CART_BADGE).unwrap(), "1");
        }

        #[test]
        fn test_remove_restores_empty_badge() {
            let mut store = logged_in();
            store.click(&add_to_cart_selector("Sauce Labs Onesie"));
            store.click(&remove_selector("Sauce Labs Onesie"));
            assert!(!store.is_visible(locator::inventory::CART_BADGE));
        }

        #[test]
        fn test_sort_by_price_ascending() {
            let mut store = logged_in();
            store.select_option(locator::inventory::SORT_SELECT, "lohi");
            let prices: Vec<f64> = store
                .texts(locator::inventory::ITEM_PRICE)
                .iter()
                .filter_map(|t| crate::locator::parse_dollars(t))
                .collect();
            assert!(prices.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn test_logout_requires_open_menu() {
            let mut store = logged_in();
            assert!(!store.is_visible(locator::inventory::LOGOUT_LINK));
            store.click(locator::inventory::MENU_BUTTON);
            assert!(store.is_visible(locator::inventory::LOGOUT_LINK));
            store.click(locator::inventory::LOGOUT_LINK);
            assert_eq!(store.route, Route::Login);
        }
    }

    mod checkout {
        use super::*;

        fn at_step_one(items: &[&str]) -> Storefront {
            let mut store = logged_in();
            for item in items {
                store.click(&add_to_cart_selector(item));
            }
            store.click(locator::inventory::CART_LINK);
            store.click(locator::cart::CHECKOUT);
            assert_eq!(store.route, Route::CheckoutStepOne);
            store
        }

        #[test]
        fn test_missing_first_name_blocks_continue() {
            let mut store = at_step_one(&["Sauce Labs Backpack"]);
            store.fill(locator::checkout::LAST_NAME, "Keller");
            store.fill(locator::checkout::POSTAL_CODE, "12345");
            store.click(locator::checkout::CONTINUE);
            assert_eq!(store.route, Route::CheckoutStepOne);
            assert_eq!(
                store.text(locator::checkout::ERROR_MESSAGE).unwrap(),
                "Error: First Name is required"
            );
        }

        #[test]
        fn test_overview_totals_add_up() {
            let mut store = at_step_one(&["Sauce Labs Backpack", "Sauce Labs Bike Light"]);
            store.fill(locator::checkout::FIRST_NAME, "Maya");
            store.fill(locator::checkout::LAST_NAME, "Novak");
            store.fill(locator::checkout::POSTAL_CODE, "54321");
            store.click(locator::checkout::CONTINUE);
            assert_eq!(store.route, Route::CheckoutStepTwo);
            let subtotal = store.text(locator::checkout::SUBTOTAL_LABEL).unwrap();
            let tax = store.text(locator::checkout::TAX_LABEL).unwrap();
            let total = store.text(locator::checkout::TOTAL_LABEL).unwrap();
            assert_eq!(subtotal, "Item total: $39.98");
            assert_eq!(tax, "Tax: $3.20");
            assert_eq!(total, "Total: $43.18");
        }

        #[test]
        fn test_cancel_from_either_step_returns_to_cart() {
            let mut store = at_step_one(&["Sauce Labs Onesie"]);
            store.click(locator::checkout::CANCEL);
            assert_eq!(store.route, Route::Cart);

            store.click(locator::cart::CHECKOUT);
            store.fill(locator::checkout::FIRST_NAME, "Hugo");
            store.fill(locator::checkout::LAST_NAME, "Bauer");
            store.fill(locator::checkout::POSTAL_CODE, "11111");
            store.click(locator::checkout::CONTINUE);
            store.click(locator::checkout::CANCEL);
            assert_eq!(store.route, Route::Cart);
        }

        #[test]
        fn test_finish_empties_cart_and_confirms() {
            let mut store = at_step_one(&["Sauce Labs Fleece Jacket"]);
            store.fill(locator::checkout::FIRST_NAME, "Elena");
            store.fill(locator::checkout::LAST_NAME, "Garcia");
            store.fill(locator::checkout::POSTAL_CODE, "99999");
            store.click(locator::checkout::CONTINUE);
            store.click(locator::checkout::FINISH);
            assert_eq!(store.route, Route::CheckoutComplete);
            assert_eq!(
                store.text(locator::checkout::COMPLETE_HEADER).unwrap(),
                COMPLETE_HEADER_TEXT
            );
            store.click(locator::checkout::BACK_HOME);
            assert_eq!(store.route, Route::Inventory);
            assert!(!store.is_visible(locator::inventory::CART_BADGE));
        }
    }
}
