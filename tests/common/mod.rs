//! Shared harness setup for the flow tests.

use swaglabs_e2e::{Settings, TestSession};
use tempfile::TempDir;

/// Settings pointing every artifact directory into `dir`.
pub fn artifact_settings(dir: &TempDir) -> Settings {
    Settings {
        screenshot_dir: dir.path().join("screenshots"),
        trace_dir: dir.path().join("traces"),
        log_dir: dir.path().join("logs"),
        ..Settings::default()
    }
}

/// A session whose artifacts land in a throwaway directory.
pub async fn open_session() -> (TestSession, TempDir) {
    let dir = tempfile::tempdir().expect("artifact dir");
    let session = TestSession::open(artifact_settings(&dir))
        .await
        .expect("session open");
    (session, dir)
}
