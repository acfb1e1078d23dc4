use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use fnb_admin::guard::{Navigation, Route};
use fnb_admin::models::OrderStatus;
use fnb_admin::order_detail::{DetailState, LoadOutcome};
use fnb_admin::pages::OrdersPage;
use fnb_admin::pages::orders::NEW_ORDER_MARK;

mod support;

#[tokio::test]
async fn status_change_shows_server_value_after_refetch() {
    let server = MockServer::start_async().await;
    let before = server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/");
            then.status(200)
                .json_body(json!([support::order_summary_json(42, "MOI")]));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = OrdersPage::new(client);
    assert_eq!(page.enter().await, Navigation::Stay);
    assert_eq!(page.status_of(42), Some(OrderStatus::New));
    assert!(page.render().contains(NEW_ORDER_MARK));

    before.delete_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/admin/orders/42/status")
                .query_param("status", "DANG_GIAO")
                .header("authorization", support::BEARER);
            then.status(200)
                .json_body(support::order_summary_json(42, "DANG_GIAO"));
        })
        .await;
    let after = server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/");
            then.status(200)
                .json_body(json!([support::order_summary_json(42, "DANG_GIAO")]));
        })
        .await;

    assert_eq!(
        page.set_status(42, OrderStatus::Delivering).await,
        Navigation::Stay
    );

    update.assert_async().await;
    after.assert_async().await;
    assert_eq!(page.status_of(42), Some(OrderStatus::Delivering));
    let text = page.render();
    assert!(text.contains("Đang giao"));
    assert!(!text.contains(NEW_ORDER_MARK));
}

#[tokio::test]
async fn expired_session_during_status_change_redirects() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/");
            then.status(200)
                .json_body(json!([support::order_summary_json(42, "MOI")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/admin/orders/42/status");
            then.status(401);
        })
        .await;

    let (client, session) = support::authed_client(&server);
    let mut page = OrdersPage::new(client);
    page.enter().await;

    let nav = page.set_status(42, OrderStatus::Delivering).await;

    assert_eq!(nav, Navigation::Redirect(Route::Login));
    support::assert_logged_out(&session);
    assert_eq!(page.status_of(42), Some(OrderStatus::New));
    assert_eq!(list.hits_async().await, 1);
}

#[tokio::test]
async fn later_selection_wins_over_slow_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/1");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(support::order_json(1, "Khách A", 0.0));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/2");
            then.status(200)
                .json_body(support::order_json(2, "Khách B", 0.0));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let page = OrdersPage::new(client);

    let (first, second) = tokio::join!(page.show(1), page.show(2));

    assert_eq!(first, LoadOutcome::Stale);
    assert_eq!(second, LoadOutcome::Shown);
    match page.detail().state() {
        DetailState::Loaded(breakdown) => {
            assert_eq!(breakdown.order_id, 2);
            assert_eq!(breakdown.customer_name, "Khách B");
        }
        other => panic!("unexpected detail state: {other:?}"),
    }
}

#[tokio::test]
async fn closing_detail_drops_in_flight_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/1");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(support::order_json(1, "Khách A", 0.0));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let page = OrdersPage::new(client);

    let (outcome, ()) = tokio::join!(page.show(1), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        page.close_detail();
    });

    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(page.detail().state(), DetailState::Closed);
    assert!(page.detail().render().is_empty());
}

#[tokio::test]
async fn detail_shows_discount_row_with_voucher_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/7");
            then.status(200)
                .json_body(support::order_json(7, "Khách C", 9000.0));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let page = OrdersPage::new(client);

    assert_eq!(page.show(7).await, LoadOutcome::Shown);
    let text = page.detail().render();
    assert!(text.contains("Chi tiết Đơn hàng #7"));
    assert!(text.contains("2x Trà Sữa"));
    assert!(text.contains("+ Size L"));
    assert!(text.contains("Giảm giá (GIAM10)"));
    assert!(text.contains("-9.000đ"));
    assert!(text.contains("96.000đ"));
    assert!(text.contains("Nhanh"));
}

#[tokio::test]
async fn detail_load_with_expired_session_redirects() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/7");
            then.status(401);
        })
        .await;

    let (client, session) = support::authed_client(&server);
    let page = OrdersPage::new(client);

    let outcome = page.show(7).await;
    assert_eq!(outcome, LoadOutcome::Redirect(Route::Login));
    assert_eq!(outcome.navigation(), Navigation::Redirect(Route::Login));
    support::assert_logged_out(&session);
    assert_eq!(page.detail().state(), DetailState::Closed);
}
