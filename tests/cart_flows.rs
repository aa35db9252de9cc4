//! Cart page behavior and the cart fixture.

mod common;

use swaglabs_e2e::{PageObject, UserType};

#[tokio::test]
async fn cart_shows_added_products_with_quantities() {
    let (session, _dir) = common::open_session().await;
    session
        .run("cart_contents", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            let added = ctx.cart_with_items(2).await?;
            ctx.inventory_page().open_cart().await?;

            let cart = ctx.cart_page();
            assert_eq!(cart.item_count().await?, 2);
            assert_eq!(cart.item_names().await?, added);
            assert_eq!(cart.item_quantities().await?, vec![1, 1]);
            assert!(cart.is_item_in_cart(&added[0]).await?);
            assert!(!cart.is_empty().await?);

            let prices = cart.item_prices().await?;
            assert_eq!(prices.len(), 2);
            let total = cart.total_price().await?;
            assert!((total - prices.iter().sum::<f64>()).abs() < 0.01);
            Ok(())
        })
        .await
        .expect("cart contents flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn removing_from_the_cart_updates_rows_and_badge() {
    let (session, _dir) = common::open_session().await;
    session
        .run("cart_removal", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            let added = ctx.cart_with_items(3).await?;
            ctx.inventory_page().open_cart().await?;

            let cart = ctx.cart_page();
            cart.remove_item(&added[1]).await?;
            let remaining = cart.item_names().await?;
            assert_eq!(remaining.len(), 2);
            assert!(!remaining.contains(&added[1]));
            assert_eq!(ctx.inventory_page().cart_badge_count().await?, 2);
            Ok(())
        })
        .await
        .expect("cart removal flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn remove_by_index_targets_the_right_row() {
    let (session, _dir) = common::open_session().await;
    session
        .run("cart_remove_by_index", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            let added = ctx.cart_with_items(2).await?;
            ctx.inventory_page().open_cart().await?;

            let cart = ctx.cart_page();
            cart.remove_item_by_index(0).await?;
            assert_eq!(cart.item_names().await?, vec![added[1].clone()]);
            Ok(())
        })
        .await
        .expect("remove by index flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn clearing_the_cart_removes_every_row_and_the_badge() {
    let (session, _dir) = common::open_session().await;
    session
        .run("cart_clear", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            ctx.cart_with_items(6).await?;
            ctx.inventory_page().open_cart().await?;

            let cart = ctx.cart_page();
            assert_eq!(cart.item_count().await?, 6);
            cart.remove_all_items().await?;
            assert!(cart.is_empty().await?);
            assert!(ctx.inventory_page().is_cart_empty().await);
            Ok(())
        })
        .await
        .expect("cart clear flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn continue_shopping_returns_to_the_grid() {
    let (session, _dir) = common::open_session().await;
    session
        .run("continue_shopping", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            ctx.cart_with_items(1).await?;
            ctx.inventory_page().open_cart().await?;
            ctx.cart_page().continue_shopping().await?;
            assert!(ctx.inventory_page().is_loaded().await);
            assert_eq!(ctx.inventory_page().cart_badge_count().await?, 1);
            Ok(())
        })
        .await
        .expect("continue shopping flow");
    session.close().await.expect("close");
}

#[tokio::test]
async fn cart_fixture_rejects_impossible_requests() {
    let (session, _dir) = common::open_session().await;
    let outcome = session
        .run("cart_fixture_overask", |ctx| async move {
            ctx.login_as(UserType::Standard).await?;
            ctx.cart_with_items(7).await?;
            Ok(())
        })
        .await;
    let err = outcome.expect_err("fixture should refuse 7 items");
    assert!(err.to_string().contains("fixture"), "got '{err}'");
    session.close().await.expect("close");
}
