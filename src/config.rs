//! Process-wide configuration loaded from the environment.
//!
//! Every setting has a default; a missing variable is never an error, but a
//! value that cannot be coerced to its declared type fails fast with
//! [`Error::Config`] before any test runs. The snapshot is immutable after
//! construction: test code only reads it.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::result::{Error, Result};

/// Prefix for all environment variables read by [`Settings::from_env`].
pub const ENV_PREFIX: &str = "SWAG_";

/// Which browser engine to launch.
///
/// A closed set: unrecognized values are rejected at configuration-load time
/// rather than at first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    /// Chromium over CDP (the only engine the `browser` feature drives)
    Chromium,
    /// Firefox (accepted in configuration, not yet launchable)
    Firefox,
    /// WebKit (accepted in configuration, not yet launchable)
    Webkit,
}

impl BrowserKind {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Firefox => "firefox",
            Self::Webkit => "webkit",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" => Ok(Self::Chromium),
            "firefox" => Ok(Self::Firefox),
            "webkit" => Ok(Self::Webkit),
            other => Err(format!(
                "unknown browser '{other}' (expected chromium, firefox or webkit)"
            )),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The storefront's fixed set of demo accounts.
///
/// A closed enumeration: lookups are total by construction, and parsing an
/// unknown identifier fails loudly instead of silently falling back to the
/// standard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserType {
    /// Fully working account
    Standard,
    /// Account that is locked out and can never log in
    Locked,
    /// Account with intentionally buggy UI behavior
    Problem,
    /// Account with artificial latency
    Performance,
    /// Account that triggers server-side errors
    Error,
    /// Account with visual glitches
    Visual,
}

impl UserType {
    /// All user types, for parametrized tests.
    pub const ALL: [Self; 6] = [
        Self::Standard,
        Self::Locked,
        Self::Problem,
        Self::Performance,
        Self::Error,
        Self::Visual,
    ];

    /// User types expected to reach the inventory after login.
    pub const LOGIN_CAPABLE: [Self; 5] = [
        Self::Standard,
        Self::Problem,
        Self::Performance,
        Self::Error,
        Self::Visual,
    ];

    /// Canonical lowercase identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Locked => "locked",
            Self::Problem => "problem",
            Self::Performance => "performance",
            Self::Error => "error",
            Self::Visual => "visual",
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "locked" => Ok(Self::Locked),
            "problem" => Ok(Self::Problem),
            "performance" => Ok(Self::Performance),
            "error" => Ok(Self::Error),
            "visual" => Ok(Self::Visual),
            other => Err(format!("unknown user type '{other}'")),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (username, password) pair for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
    /// Which demo account this is
    pub user_type: UserType,
}

/// Immutable process-wide settings snapshot.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the application under test
    pub base_url: String,

    /// Standard user account name
    pub standard_user: String,
    /// Locked-out user account name
    pub locked_user: String,
    /// Problem user account name
    pub problem_user: String,
    /// Performance-glitch user account name
    pub performance_user: String,
    /// Error user account name
    pub error_user: String,
    /// Visual user account name
    pub visual_user: String,
    /// Password shared by all demo accounts
    pub default_password: String,

    /// Browser engine to launch
    pub browser: BrowserKind,
    /// Run the browser headless
    pub headless: bool,
    /// Delay in milliseconds inserted after each driver action
    pub slow_mo_ms: u64,
    /// Default timeout for element waits, in milliseconds
    pub timeout_ms: u64,
    /// Browser viewport width
    pub viewport_width: u32,
    /// Browser viewport height
    pub viewport_height: u32,

    /// Number of parallel workers the runner may use
    pub workers: u32,
    /// Retry count applied by the external runner, not by page objects
    pub retries: u32,
    /// Capture a screenshot when a test fails
    pub screenshot_on_failure: bool,
    /// Record an execution trace per test context
    pub trace_on_failure: bool,

    /// Directory for failure screenshots
    pub screenshot_dir: PathBuf,
    /// Directory for execution traces
    pub trace_dir: PathBuf,
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Run visual regression scenarios
    pub run_visual_tests: bool,
    /// Run accessibility scenarios
    pub run_accessibility_tests: bool,
    /// Run performance scenarios
    pub run_performance_tests: bool,

    /// Seed for the deterministic test-data generator
    pub data_seed: u64,

    /// Optional webhook for failure notifications
    pub slack_webhook_url: Option<String>,
    /// Optional SMTP server for mail notifications
    pub smtp_server: Option<String>,
    /// SMTP port
    pub smtp_port: u16,
    /// Optional address for mail notifications
    pub notify_email: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.saucedemo.com".to_string(),
            standard_user: "standard_user".to_string(),
            locked_user: "locked_out_user".to_string(),
            problem_user: "problem_user".to_string(),
            performance_user: "performance_glitch_user".to_string(),
            error_user: "error_user".to_string(),
            visual_user: "visual_user".to_string(),
            default_password: "secret_sauce".to_string(),
            browser: BrowserKind::Chromium,
            headless: true,
            slow_mo_ms: 0,
            timeout_ms: 30_000,
            viewport_width: 1920,
            viewport_height: 1080,
            workers: 4,
            retries: 1,
            screenshot_on_failure: true,
            trace_on_failure: true,
            screenshot_dir: PathBuf::from("screenshots"),
            trace_dir: PathBuf::from("reports/traces"),
            log_dir: PathBuf::from("logs"),
            log_level: "info".to_string(),
            run_visual_tests: true,
            run_accessibility_tests: true,
            run_performance_tests: false,
            data_seed: 42,
            slack_webhook_url: None,
            smtp_server: None,
            smtp_port: 587,
            notify_email: None,
        }
    }
}

impl Settings {
    /// Build settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any present variable fails typed coercion.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Injection point used by `from_env` and by tests, which would otherwise
    /// race on the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any present value fails typed coercion.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Self::default();

        if let Some(v) = lookup_trimmed(&lookup, "BASE_URL") {
            s.base_url = v.trim_end_matches('/').to_string();
        }
        set_string(&lookup, "STANDARD_USER", &mut s.standard_user);
        set_string(&lookup, "LOCKED_USER", &mut s.locked_user);
        set_string(&lookup, "PROBLEM_USER", &mut s.problem_user);
        set_string(&lookup, "PERFORMANCE_USER", &mut s.performance_user);
        set_string(&lookup, "ERROR_USER", &mut s.error_user);
        set_string(&lookup, "VISUAL_USER", &mut s.visual_user);
        set_string(&lookup, "DEFAULT_PASSWORD", &mut s.default_password);

        set_parsed(&lookup, "BROWSER", &mut s.browser)?;
        set_bool(&lookup, "HEADLESS", &mut s.headless)?;
        set_parsed(&lookup, "SLOW_MO_MS", &mut s.slow_mo_ms)?;
        set_parsed(&lookup, "TIMEOUT_MS", &mut s.timeout_ms)?;
        set_parsed(&lookup, "VIEWPORT_WIDTH", &mut s.viewport_width)?;
        set_parsed(&lookup, "VIEWPORT_HEIGHT", &mut s.viewport_height)?;
        set_parsed(&lookup, "WORKERS", &mut s.workers)?;
        set_parsed(&lookup, "RETRIES", &mut s.retries)?;
        set_bool(&lookup, "SCREENSHOT_ON_FAILURE", &mut s.screenshot_on_failure)?;
        set_bool(&lookup, "TRACE_ON_FAILURE", &mut s.trace_on_failure)?;

        set_path(&lookup, "SCREENSHOT_DIR", &mut s.screenshot_dir);
        set_path(&lookup, "TRACE_DIR", &mut s.trace_dir);
        set_path(&lookup, "LOG_DIR", &mut s.log_dir);

        if let Some(level) = lookup_trimmed(&lookup, "LOG_LEVEL") {
            let level = level.to_ascii_lowercase();
            match level.as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => s.log_level = level,
                other => {
                    return Err(Error::Config {
                        key: full_key("LOG_LEVEL"),
                        message: format!("unknown log level '{other}'"),
                    })
                }
            }
        }

        set_bool(&lookup, "RUN_VISUAL_TESTS", &mut s.run_visual_tests)?;
        set_bool(&lookup, "RUN_ACCESSIBILITY_TESTS", &mut s.run_accessibility_tests)?;
        set_bool(&lookup, "RUN_PERFORMANCE_TESTS", &mut s.run_performance_tests)?;
        set_parsed(&lookup, "DATA_SEED", &mut s.data_seed)?;

        s.slack_webhook_url = lookup_trimmed(&lookup, "SLACK_WEBHOOK_URL");
        s.smtp_server = lookup_trimmed(&lookup, "SMTP_SERVER");
        set_parsed(&lookup, "SMTP_PORT", &mut s.smtp_port)?;
        s.notify_email = lookup_trimmed(&lookup, "NOTIFY_EMAIL");

        Ok(s)
    }

    /// Credentials for one of the storefront's demo accounts.
    ///
    /// Total over [`UserType`]; the password is shared by every account.
    #[must_use]
    pub fn credentials_for(&self, user_type: UserType) -> Credentials {
        let username = match user_type {
            UserType::Standard => &self.standard_user,
            UserType::Locked => &self.locked_user,
            UserType::Problem => &self.problem_user,
            UserType::Performance => &self.performance_user,
            UserType::Error => &self.error_user,
            UserType::Visual => &self.visual_user,
        };
        Credentials {
            username: username.clone(),
            password: self.default_password.clone(),
            user_type,
        }
    }

    /// URL of a page given its path fragment (e.g. `inventory.html`).
    #[must_use]
    pub fn page_url(&self, fragment: &str) -> String {
        if fragment.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{fragment}", self.base_url)
        }
    }
}

fn full_key(key: &str) -> String {
    format!("{ENV_PREFIX}{key}")
}

fn lookup_trimmed<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&full_key(key))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn set_string<F>(lookup: &F, key: &str, slot: &mut String)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup_trimmed(lookup, key) {
        *slot = v;
    }
}

fn set_path<F>(lookup: &F, key: &str, slot: &mut PathBuf)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup_trimmed(lookup, key) {
        *slot = PathBuf::from(v);
    }
}

fn set_parsed<F, T>(lookup: &F, key: &str, slot: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    if let Some(v) = lookup_trimmed(lookup, key) {
        *slot = v.parse().map_err(|e: T::Err| Error::Config {
            key: full_key(key),
            message: e.to_string(),
        })?;
    }
    Ok(())
}

fn set_bool<F>(lookup: &F, key: &str, slot: &mut bool) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup_trimmed(lookup, key) {
        *slot = match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(Error::Config {
                    key: full_key(key),
                    message: format!("expected a boolean, got '{other}'"),
                })
            }
        };
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    mod defaults {
        use super::*;

        #[test]
        fn test_empty_environment_yields_defaults() {
            let s = Settings::from_lookup(|_| None).unwrap();
            assert_eq!(s.base_url, "https://www.saucedemo.com");
            assert_eq!(s.browser, BrowserKind::Chromium);
            assert_eq!(s.timeout_ms, 30_000);
            assert_eq!(s.default_password, "secret_sauce");
            assert_eq!(s.data_seed, 42);
            assert!(s.screenshot_on_failure);
        }

        #[test]
        fn test_page_url_joins_fragments() {
            let s = Settings::default();
            assert_eq!(s.page_url(""), "https://www.saucedemo.com");
            assert_eq!(
                s.page_url("inventory.html"),
                "https://www.saucedemo.com/inventory.html"
            );
        }

        #[test]
        fn test_trailing_slash_stripped_from_base_url() {
            let s =
                Settings::from_lookup(lookup_from(&[("BASE_URL", "http://localhost:8080/")]))
                    .unwrap();
            assert_eq!(s.base_url, "http://localhost:8080");
        }
    }

    mod coercion {
        use super::*;

        #[test]
        fn test_integer_override() {
            let s = Settings::from_lookup(lookup_from(&[("TIMEOUT_MS", "5000")])).unwrap();
            assert_eq!(s.timeout_ms, 5000);
        }

        #[test]
        fn test_non_integer_timeout_fails_fast() {
            let err = Settings::from_lookup(lookup_from(&[("TIMEOUT_MS", "soon")])).unwrap_err();
            match err {
                Error::Config { key, .. } => assert_eq!(key, "SWAG_TIMEOUT_MS"),
                other => panic!("expected Config error, got {other}"),
            }
        }

        #[test]
        fn test_bool_spellings() {
            for truthy in ["1", "true", "YES", "on"] {
                let s = Settings::from_lookup(lookup_from(&[("HEADLESS", truthy)])).unwrap();
                assert!(s.headless, "{truthy} should be true");
            }
            let s = Settings::from_lookup(lookup_from(&[("HEADLESS", "off")])).unwrap();
            assert!(!s.headless);
        }

        #[test]
        fn test_bad_bool_fails_fast() {
            assert!(Settings::from_lookup(lookup_from(&[("HEADLESS", "maybe")])).is_err());
        }

        #[test]
        fn test_unknown_log_level_rejected() {
            assert!(Settings::from_lookup(lookup_from(&[("LOG_LEVEL", "loud")])).is_err());
        }
    }

    mod browser_kind {
        use super::*;

        #[test]
        fn test_known_kinds_parse() {
            assert_eq!("chromium".parse::<BrowserKind>().unwrap(), BrowserKind::Chromium);
            assert_eq!("Firefox".parse::<BrowserKind>().unwrap(), BrowserKind::Firefox);
            assert_eq!("WEBKIT".parse::<BrowserKind>().unwrap(), BrowserKind::Webkit);
        }

        #[test]
        fn test_unknown_kind_rejected_at_load() {
            let err = Settings::from_lookup(lookup_from(&[("BROWSER", "netscape")])).unwrap_err();
            assert!(err.to_string().contains("SWAG_BROWSER"));
        }
    }

    mod user_type {
        use super::*;

        #[test]
        fn test_all_identifiers_round_trip() {
            for ut in UserType::ALL {
                assert_eq!(ut.as_str().parse::<UserType>().unwrap(), ut);
            }
        }

        #[test]
        fn test_unknown_user_type_fails_loudly() {
            assert!("standrad".parse::<UserType>().is_err());
        }

        #[test]
        fn test_credentials_lookup_is_total() {
            let s = Settings::default();
            let creds = s.credentials_for(UserType::Performance);
            assert_eq!(creds.username, "performance_glitch_user");
            assert_eq!(creds.password, "secret_sauce");
            assert_eq!(creds.user_type, UserType::Performance);
        }

        #[test]
        fn test_locked_user_not_login_capable() {
            assert!(!UserType::LOGIN_CAPABLE.contains(&UserType::Locked));
            assert_eq!(UserType::ALL.len(), 6);
        }
    }
}
