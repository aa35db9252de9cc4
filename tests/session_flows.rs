//! Session lifecycle: artifacts on failure, silence on success.

mod common;

use swaglabs_e2e::{Error, PageObject, UserType};

#[tokio::test]
async fn failing_test_leaves_screenshot_and_trace() {
    let (session, dir) = common::open_session().await;
    let outcome = session
        .run("doomed", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            Err(Error::Fixture {
                message: "deliberate failure".to_string(),
            })
        })
        .await;
    assert!(outcome.is_err());

    let screenshot = dir.path().join("screenshots").join("failure_doomed.png");
    assert!(screenshot.exists(), "missing {}", screenshot.display());
    let bytes = std::fs::read(&screenshot).expect("screenshot bytes");
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);

    let trace = dir.path().join("traces").join("trace_doomed.json");
    assert!(trace.exists(), "missing {}", trace.display());
    let body = std::fs::read_to_string(&trace).expect("trace body");
    let parsed: serde_json::Value = serde_json::from_str(&body).expect("trace json");
    assert_eq!(parsed["test"], "doomed");
    assert!(parsed["events"].as_array().map_or(0, Vec::len) > 0);

    session.close().await.expect("close");
}

#[tokio::test]
async fn panicking_body_still_leaves_artifacts() {
    use futures::FutureExt;

    let (session, dir) = common::open_session().await;
    let run = session.run("panicked", |ctx| async move {
        ctx.login_as(UserType::Standard).await?;
        assert_eq!(ctx.inventory_page().product_count().await?, 7);
        Ok(())
    });
    let outcome = std::panic::AssertUnwindSafe(run).catch_unwind().await;
    assert!(outcome.is_err(), "the failed assertion should unwind");

    let screenshot = dir.path().join("screenshots").join("failure_panicked.png");
    assert!(screenshot.exists(), "missing {}", screenshot.display());

    let trace = dir.path().join("traces").join("trace_panicked.json");
    assert!(trace.exists(), "missing {}", trace.display());
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&trace).expect("trace body"))
            .expect("trace json");
    assert_eq!(parsed["test"], "panicked");

    session.close().await.expect("close");
}

#[tokio::test]
async fn passing_test_leaves_no_artifacts() {
    let (session, dir) = common::open_session().await;
    session
        .run("healthy", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            Ok(())
        })
        .await
        .expect("healthy flow");

    assert!(!dir.path().join("screenshots").join("failure_healthy.png").exists());
    assert!(!dir.path().join("traces").join("trace_healthy.json").exists());
    session.close().await.expect("close");
}

#[tokio::test]
async fn artifact_capture_respects_configuration() {
    let dir = tempfile::tempdir().expect("artifact dir");
    let settings = swaglabs_e2e::Settings {
        screenshot_on_failure: false,
        trace_on_failure: false,
        ..common::artifact_settings(&dir)
    };
    let session = swaglabs_e2e::TestSession::open(settings).await.expect("session");
    let outcome = session
        .run("quiet_failure", |_ctx| async move {
            Err(Error::Fixture {
                message: "deliberate failure".to_string(),
            })
        })
        .await;
    assert!(outcome.is_err());
    assert!(!dir.path().join("screenshots").join("failure_quiet_failure.png").exists());
    assert!(!dir.path().join("traces").join("trace_quiet_failure.json").exists());
    session.close().await.expect("close");
}

#[tokio::test]
async fn contexts_do_not_share_login_state() {
    let (session, _dir) = common::open_session().await;
    session
        .run("first_context", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            Ok(())
        })
        .await
        .expect("first context");

    session
        .run("second_context", |ctx| async move {
            let login = ctx.login_page();
            login.open().await?;
            assert!(login.is_loaded().await, "second context should start logged out");
            let url = login.screen().current_url().await?;
            assert!(!url.contains("inventory.html"), "state leaked to {url}");
            Ok(())
        })
        .await
        .expect("second context");
    session.close().await.expect("close");
}
