//! Element states and polling cadence for waits.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::result::{Error, Result};

/// Interval between condition checks while waiting.
pub const POLL_INTERVAL_MS: u64 = 50;

/// Observable states an element wait can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Present in the DOM and rendered
    Visible,
    /// Absent from the DOM or not rendered
    Hidden,
    /// Present in the DOM regardless of rendering
    Attached,
    /// Absent from the DOM
    Detached,
}

impl ElementState {
    /// Lowercase name for log lines.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Attached => "attached",
            Self::Detached => "detached",
        }
    }
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Poll `check` until it returns true or `timeout_ms` elapses.
///
/// The first check happens immediately, so an already-satisfied condition
/// never sleeps.
///
/// # Errors
///
/// Returns [`Error::Timeout`] carrying `selector` once the deadline passes.
pub async fn poll_until<F, Fut>(selector: &str, timeout_ms: u64, mut check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        if check().await {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(Error::Timeout {
                selector: selector.to_string(),
                ms: timeout_ms,
            });
        }
        tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}
