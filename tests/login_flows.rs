//! Login behavior across the demo accounts and the rejection corpus.

mod common;

use swaglabs_e2e::data::invalid_logins;
use swaglabs_e2e::{PageObject, UserType};

#[tokio::test]
async fn login_capable_users_reach_the_inventory() {
    let (session, _dir) = common::open_session().await;
    for user_type in UserType::LOGIN_CAPABLE {
        session
            .run(&format!("login_{user_type}"), |ctx| async move {
                ctx.login_as(user_type).await?;
                let inventory = ctx.inventory_page();
                let url = inventory.screen().current_url().await?;
                assert!(
                    url.contains("inventory.html"),
                    "{user_type} landed on {url}"
                );
                Ok(())
            })
            .await
            .expect("login flow");
    }
    session.close().await.expect("close");
}

#[tokio::test]
async fn locked_out_user_sees_locked_message() {
    let (session, _dir) = common::open_session().await;
    session
        .run("locked_out", |ctx| async move {
            let login = ctx.login_page();
            login.open().await?;
            let creds = ctx.settings().credentials_for(UserType::Locked);
            login.login_as(&creds).await?;
            assert!(login.is_error_displayed().await);
            let message = login.error_message().await?.expect("error banner");
            assert!(message.contains("locked out"), "got '{message}'");
            let url = login.screen().current_url().await?;
            assert!(!url.contains("inventory.html"), "locked user reached {url}");
            Ok(())
        })
        .await
        .expect("locked flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn invalid_credentials_are_rejected_with_messages() {
    let (session, _dir) = common::open_session().await;
    for case in invalid_logins() {
        session
            .run("invalid_credentials", |ctx| async move {
                let login = ctx.login_page();
                login.open().await?;
                login.login(case.username, case.password).await?;
                assert!(login.is_error_displayed().await, "{} not rejected", case.case);
                let message = login.error_message().await?.expect("error banner");
                match (case.username.is_empty(), case.password.is_empty()) {
                    (true, _) => assert!(message.contains("Username is required")),
                    (false, true) => assert!(message.contains("Password is required")),
                    (false, false) => assert!(message.contains("do not match")),
                }
                Ok(())
            })
            .await
            .expect("invalid credential flow");
    }
    session.close().await.expect("close");
}

#[tokio::test]
async fn error_banner_can_be_dismissed() {
    let (session, _dir) = common::open_session().await;
    session
        .run("dismiss_error", |ctx| async move {
            let login = ctx.login_page();
            login.open().await?;
            login.login("nobody", "nothing").await?;
            assert!(login.is_error_displayed().await);
            login.dismiss_error().await?;
            assert!(login.is_error_closed().await);
            assert_eq!(login.error_message().await?, None);
            Ok(())
        })
        .await
        .expect("dismiss flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn form_fields_carry_their_placeholders() {
    let (session, _dir) = common::open_session().await;
    session
        .run("placeholders", |ctx| async move {
            let login = ctx.login_page();
            login.open().await?;
            assert_eq!(login.username_placeholder().await?.as_deref(), Some("Username"));
            assert_eq!(login.password_placeholder().await?.as_deref(), Some("Password"));
            Ok(())
        })
        .await
        .expect("placeholder flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn enter_key_submits_the_form() {
    let (session, _dir) = common::open_session().await;
    session
        .run("enter_submits", |ctx| async move {
            let login = ctx.login_page();
            login.open().await?;
            let creds = ctx.settings().credentials_for(UserType::Standard);
            login.login_with_enter(&creds.username, &creds.password).await?;
            assert!(ctx.inventory_page().is_loaded().await);
            Ok(())
        })
        .await
        .expect("enter flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn logout_returns_to_the_login_form() {
    let (session, _dir) = common::open_session().await;
    session
        .run("logout", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            ctx.inventory_page().logout().await?;
            assert!(ctx.login_page().is_loaded().await);
            Ok(())
        })
        .await
        .expect("logout flow");
    session.close().await.expect("close");
}
