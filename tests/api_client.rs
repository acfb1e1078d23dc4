use httpmock::prelude::*;
use serde_json::json;

use fnb_admin::api::{self, ApiClient};
use fnb_admin::error::{ApiError, OPERATION_FAILED};
use fnb_admin::models::NewCategory;
use fnb_admin::session::{MemorySessionStore, SessionStore};

mod support;

#[tokio::test]
async fn authenticated_calls_carry_the_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/admin/categories/")
                .header("authorization", support::BEARER);
            then.status(200)
                .json_body(json!([support::category_json(1, "Trà Sữa")]));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let categories = api::categories::list(&client).await.expect("list");

    mock.assert_async().await;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Trà Sữa");
}

#[tokio::test]
async fn no_session_means_no_authorization_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/orders/").matches(|req| {
                req.headers.as_ref().is_none_or(|headers| {
                    !headers
                        .iter()
                        .any(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                })
            });
            then.status(200).json_body(json!([]));
        })
        .await;

    let (client, _session) = support::anonymous_client(&server);
    let orders = api::orders::list(&client).await.expect("list");

    mock.assert_async().await;
    assert!(orders.is_empty());
}

#[tokio::test]
async fn unauthorized_response_clears_the_session() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/vouchers/");
            then.status(401)
                .json_body(json!({ "detail": "Could not validate credentials" }));
        })
        .await;

    let (client, session) = support::authed_client(&server);
    let err = api::vouchers::list(&client).await.unwrap_err();

    assert!(err.is_unauthorized());
    support::assert_logged_out(&session);
}

#[tokio::test]
async fn rejected_request_surfaces_server_detail() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/admin/categories/")
                .json_body(json!({ "name": "Trà Sữa", "display_order": 0 }));
            then.status(400)
                .json_body(json!({ "detail": "Category already exists" }));
        })
        .await;

    let (client, session) = support::authed_client(&server);
    let err = api::categories::create(
        &client,
        &NewCategory {
            name: "Trà Sữa".into(),
            display_order: 0,
        },
    )
    .await
    .unwrap_err();

    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Category already exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn rejection_without_detail_uses_generic_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/admin/products/9");
            then.status(500).body("Internal Server Error");
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let err = api::products::delete(&client, 9).await.unwrap_err();

    assert_eq!(err.user_message(), OPERATION_FAILED);
}

#[tokio::test]
async fn missing_base_url_fails_before_any_request() {
    let session = std::sync::Arc::new(MemorySessionStore::with_token(support::TOKEN));
    let client = ApiClient::with_base_url(None, session.clone());

    let err = api::categories::list(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Config(_)), "got {err:?}");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn unreachable_backend_names_the_host() {
    let session = std::sync::Arc::new(MemorySessionStore::with_token(support::TOKEN));
    let client = ApiClient::with_base_url(Some("http://127.0.0.1:1"), session);

    let err = api::orders::list(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }), "got {err:?}");
    assert!(err.user_message().contains("http://127.0.0.1:1"));
}

#[tokio::test]
async fn image_upload_is_multipart_under_file_field() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/admin/upload-image")
                .header("authorization", support::BEARER)
                .body_contains("name=\"file\"")
                .body_contains("filename=\"tra-sua.png\"")
                .body_contains("PNGDATA");
            then.status(200)
                .json_body(json!({ "image_url": "/static/images/tra-sua.png" }));
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    let uploaded = api::products::upload_image(&client, "tra-sua.png", b"PNGDATA".to_vec())
        .await
        .expect("upload");

    mock.assert_async().await;
    assert_eq!(uploaded.image_url, "/static/images/tra-sua.png");
    assert_eq!(
        client.resolve_image_url(&uploaded.image_url),
        format!("{}/static/images/tra-sua.png", server.base_url())
    );
}

#[tokio::test]
async fn empty_success_body_is_accepted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/admin/vouchers/4");
            then.status(204);
        })
        .await;

    let (client, _session) = support::authed_client(&server);
    api::vouchers::delete(&client, 4).await.expect("delete");
}
