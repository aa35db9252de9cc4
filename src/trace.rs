//! Per-context action recording.
//!
//! Every driver action appends one event; on test failure the whole sequence
//! is written out as JSON so a red run can be replayed from its artifact.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::result::{Error, Result};

/// One recorded action.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEvent {
    /// Milliseconds since the recorder started
    pub elapsed_ms: u64,
    /// Action name (`click`, `fill`, `goto`, ...)
    pub action: String,
    /// Selector, URL or value the action targeted
    pub detail: String,
}

#[derive(Debug, Serialize)]
struct TraceFile<'a> {
    test: &'a str,
    started_at: String,
    events: &'a [TraceEvent],
}

/// Shared, clonable recorder of driver actions.
///
/// Cloning is cheap; all clones feed the same event list. A disabled recorder
/// drops events without locking anything it does not have to.
#[derive(Debug, Clone)]
pub struct ActionRecorder {
    enabled: bool,
    started: Instant,
    started_at: String,
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl ActionRecorder {
    /// New recorder; `enabled` mirrors the trace-on-failure setting.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started: Instant::now(),
            started_at: chrono::Utc::now().to_rfc3339(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Whether events are being kept.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one event.
    pub fn record(&self, action: &str, detail: &str) {
        if !self.enabled {
            return;
        }
        let event = TraceEvent {
            elapsed_ms: u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
            action: action.to_string(),
            detail: detail.to_string(),
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Number of events recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the recorded sequence to `dir/trace_<test_name>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Json`] when the directory cannot be
    /// created or the file cannot be written. Callers in the session layer
    /// log this and keep going.
    pub async fn save(&self, dir: &Path, test_name: &str) -> Result<PathBuf> {
        let events = self
            .events
            .lock()
            .map_err(|_| Error::Fixture {
                message: "trace event list poisoned".to_string(),
            })?
            .clone();
        let file = TraceFile {
            test: test_name,
            started_at: self.started_at.clone(),
            events: &events,
        };
        let json = serde_json::to_vec_pretty(&file)?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("trace_{test_name}.json"));
        tokio::fs::write(&path, json).await?;
        debug!(path = %path.display(), events = events.len(), "trace saved");
        Ok(path)
    }
}
