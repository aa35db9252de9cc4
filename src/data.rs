//! Deterministic test data.
//!
//! Everything generated here comes from a seeded RNG so a failing run can be
//! reproduced exactly from its seed. Negative-path corpora are fixed lists.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carmen", "Derek", "Elena", "Felix", "Greta", "Hugo", "Ingrid", "Jonas",
    "Klara", "Louis", "Maya", "Nils", "Olga", "Pavel",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Bauer", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hoffman",
    "Ivanova", "Jensen", "Keller", "Lindgren", "Moretti", "Novak", "Okafor", "Petrov",
];

/// Name and address fields for the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutData {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Five-digit postal code
    pub postal_code: String,
}

/// One invalid-credential case for negative login tests.
#[derive(Debug, Clone)]
pub struct InvalidLogin {
    /// Username to submit
    pub username: &'static str,
    /// Password to submit
    pub password: &'static str,
    /// Short label for test diagnostics
    pub case: &'static str,
}

/// Credential pairs the login form must reject.
#[must_use]
pub fn invalid_logins() -> Vec<InvalidLogin> {
    vec![
        InvalidLogin {
            username: "invalid_user",
            password: "secret_sauce",
            case: "unknown username",
        },
        InvalidLogin {
            username: "standard_user",
            password: "wrong_password",
            case: "wrong password",
        },
        InvalidLogin {
            username: "",
            password: "secret_sauce",
            case: "empty username",
        },
        InvalidLogin {
            username: "standard_user",
            password: "",
            case: "empty password",
        },
        InvalidLogin {
            username: "",
            password: "",
            case: "both empty",
        },
        InvalidLogin {
            username: "guest_4831",
            password: "letmein",
            case: "unregistered pair",
        },
    ]
}

/// Hostile strings for input-handling tests.
///
/// Injection payloads, traversal attempts, template expressions, an oversized
/// string and embedded null bytes. None of these may ever produce a login.
#[must_use]
pub fn malicious_inputs() -> Vec<String> {
    vec![
        "<script>alert('XSS')</script>".to_string(),
        "' OR '1'='1".to_string(),
        "'; DROP TABLE users--".to_string(),
        "../../../etc/passwd".to_string(),
        "${7*7}".to_string(),
        "{{7*7}}".to_string(),
        "AAAA".repeat(1000),
        "user\0name".to_string(),
    ]
}

/// Seeded generator for checkout form data.
#[derive(Debug)]
pub struct TestDataGenerator {
    rng: StdRng,
}

impl Default for TestDataGenerator {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl TestDataGenerator {
    /// Generator seeded for reproducible output.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A plausible checkout form fill.
    pub fn checkout_data(&mut self) -> CheckoutData {
        let first = FIRST_NAMES[self.rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.gen_range(0..LAST_NAMES.len())];
        let postal: u32 = self.rng.gen_range(10_000..100_000);
        CheckoutData {
            first_name: first.to_string(),
            last_name: last.to_string(),
            postal_code: postal.to_string(),
        }
    }
}
