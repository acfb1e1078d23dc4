use httpmock::prelude::*;
use serde_json::json;

use fnb_admin::guard::Navigation;
use fnb_admin::models::VoucherType;
use fnb_admin::pages::products::NO_CATEGORY_MESSAGE;
use fnb_admin::pages::{OptionsPage, ProductsPage, categories, vouchers};

mod support;

fn decline(_: &str) -> bool {
    false
}

fn accept(_: &str) -> bool {
    true
}

#[tokio::test]
async fn created_category_appears_once_after_refetch() {
    let server = MockServer::start_async().await;
    let empty_list = server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/categories/");
            then.status(200).json_body(json!([]));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = categories::page(client);
    assert_eq!(page.enter().await, Navigation::Stay);
    assert!(page.items().is_empty());

    empty_list.delete_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/admin/categories/")
                .json_body(json!({ "name": "Trà Sữa", "display_order": 0 }));
            then.status(200).json_body(support::category_json(5, "Trà Sữa"));
        })
        .await;
    let refetch = server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/categories/");
            then.status(200)
                .json_body(json!([support::category_json(5, "Trà Sữa")]));
        })
        .await;

    page.open_create();
    page.draft_mut().expect("form open").name = "  Trà Sữa ".into();
    assert_eq!(page.submit().await, Navigation::Stay);

    create.assert_async().await;
    refetch.assert_async().await;
    assert!(page.form().is_none());
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].id, 5);
    assert_eq!(page.render().matches("Trà Sữa").count(), 1);
}

#[tokio::test]
async fn rejected_create_keeps_form_open() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/categories/");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/admin/categories/");
            then.status(400)
                .json_body(json!({ "detail": "Category already exists" }));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = categories::page(client);
    page.enter().await;
    page.open_create();
    page.draft_mut().expect("form open").name = "Cà Phê".into();

    assert_eq!(page.submit().await, Navigation::Stay);
    let form = page.form().expect("form stays open");
    assert_eq!(form.error.as_deref(), Some("Category already exists"));
    assert_eq!(form.draft.name, "Cà Phê");
}

async fn mock_catalog(server: &MockServer, categories: serde_json::Value) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/products/");
            then.status(200).json_body(json!([support::product_json(
                3,
                "Trà Sữa",
                1,
                vec![support::option_group_json(1, "Topping")]
            )]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/categories/");
            then.status(200).json_body(categories);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/options/");
            then.status(200).json_body(json!([
                support::option_group_json(1, "Topping"),
                support::option_group_json(2, "Size")
            ]));
        })
        .await;
}

#[tokio::test]
async fn product_without_categories_is_blocked_locally() {
    let server = MockServer::start_async().await;
    mock_catalog(&server, json!([])).await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/admin/products/");
            then.status(200).json_body(json!({}));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = ProductsPage::new(client);
    assert_eq!(page.enter().await, Navigation::Stay);

    page.crud_mut().open_create();
    {
        let draft = page.crud_mut().draft_mut().expect("form open");
        draft.name = "Bạc Xỉu".into();
        draft.base_price = 29000.0;
    }
    assert_eq!(page.crud_mut().submit().await, Navigation::Stay);

    assert_eq!(create.hits_async().await, 0);
    let form = page.crud().form().expect("form stays open");
    assert_eq!(form.error.as_deref(), Some(NO_CATEGORY_MESSAGE));
}

#[tokio::test]
async fn product_rows_use_catalog_names() {
    let server = MockServer::start_async().await;
    mock_catalog(&server, json!([support::category_json(1, "Trà")])).await;

    let (client, _session) = support::authed_client(&server);
    let mut page = ProductsPage::new(client);
    page.enter().await;

    let text = page.render();
    assert!(text.contains("35.000đ"));
    assert!(text.contains("Trà Sữa"));
    assert!(text.contains("Topping"));
    assert!(text.contains("Còn hàng"));
    assert_eq!(page.catalog().options.len(), 2);
}

#[tokio::test]
async fn linking_options_replaces_the_full_set() {
    let server = MockServer::start_async().await;
    mock_catalog(&server, json!([support::category_json(1, "Trà")])).await;
    let link = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/admin/products/3/link_options")
                .json_body(json!({ "option_ids": [1, 2] }));
            then.status(200).json_body(json!({ "ok": true }));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = ProductsPage::new(client);
    page.enter().await;

    // Same selection saved twice sends the same body twice.
    for _ in 0..2 {
        assert!(page.open_options(3));
        let membership = page.membership_mut().expect("editor open");
        assert!(membership.contains(1));
        assert!(membership.toggle(2));
        assert_eq!(page.save_options().await, Navigation::Stay);
        assert!(page.membership().is_none());
    }

    assert_eq!(link.hits_async().await, 2);
}

#[tokio::test]
async fn failed_link_keeps_editor_open() {
    let server = MockServer::start_async().await;
    mock_catalog(&server, json!([support::category_json(1, "Trà")])).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/admin/products/3/link_options");
            then.status(404).json_body(json!({ "detail": "Option not found" }));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = ProductsPage::new(client);
    page.enter().await;
    page.open_options(3);
    page.membership_mut().expect("editor open").toggle(2);

    assert_eq!(page.save_options().await, Navigation::Stay);
    assert_eq!(page.crud().notice(), Some("Option not found"));
    let membership = page.membership().expect("editor still open");
    assert!(membership.is_dirty());
}

#[tokio::test]
async fn option_value_needs_a_listed_group() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/options/");
            then.status(200)
                .json_body(json!([support::option_group_json(1, "Size")]));
        })
        .await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/admin/options/1/values/")
                .json_body(json!({ "name": "Size L", "price_adjustment": 5000.0 }));
            then.status(200).json_body(json!({ "id": 12 }));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = OptionsPage::new(client);
    page.enter().await;

    page.add_value(99, "Size L", 5000.0).await;
    assert_eq!(page.crud().notice(), Some("Option group 99 does not exist"));
    page.add_value(1, "   ", 5000.0).await;
    assert_eq!(add.hits_async().await, 0);

    assert_eq!(page.add_value(1, "Size L", 5000.0).await, Navigation::Stay);
    assert_eq!(add.hits_async().await, 1);
    assert_eq!(page.crud().notice(), None);
    assert!(page.render().contains("(+5.000đ)"));
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/options/");
            then.status(200)
                .json_body(json!([support::option_group_json(1, "Size")]));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/admin/options/1");
            then.status(200);
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = OptionsPage::new(client);
    page.enter().await;

    page.delete_group(1, &decline).await;
    assert_eq!(delete.hits_async().await, 0);
    assert_eq!(page.crud().items().len(), 1);
}

#[tokio::test]
async fn failed_delete_leaves_list_untouched() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/vouchers/");
            then.status(200).json_body(json!([{
                "id": 4,
                "code": "GIAM10",
                "type": "percentage",
                "value": 10.0,
                "min_order_value": 0.0,
                "max_discount": null,
                "is_active": true
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/admin/vouchers/4");
            then.status(409)
                .json_body(json!({ "detail": "Voucher is used by an order" }));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = vouchers::page(client);
    page.enter().await;

    assert_eq!(page.delete(4, &accept).await, Navigation::Stay);
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.notice(), Some("Voucher is used by an order"));
    assert_eq!(list.hits_async().await, 1);
}

#[tokio::test]
async fn uncapped_percentage_voucher_sends_null_cap() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/vouchers/");
            then.status(200).json_body(json!([]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/admin/vouchers/").json_body(json!({
                "code": "GIAM10",
                "description": "",
                "type": "percentage",
                "value": 10.0,
                "min_order_value": 0.0,
                "max_discount": null,
                "is_active": true
            }));
            then.status(200).json_body(json!({ "id": 1 }));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let mut page = vouchers::page(client);
    page.enter().await;

    page.open_create();
    {
        let draft = page.draft_mut().expect("form open");
        draft.code = "GIAM10".into();
        draft.set_kind(VoucherType::Percentage);
        draft.set_value_input("10");
        draft.set_max_discount_input("");
    }
    assert_eq!(page.submit().await, Navigation::Stay);
    create.assert_async().await;
}
