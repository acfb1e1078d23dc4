#![allow(dead_code)]

use std::sync::Arc;

use httpmock::MockServer;
use serde_json::{Value, json};

use fnb_admin::api::ApiClient;
use fnb_admin::session::{MemorySessionStore, SessionStore};

pub const TOKEN: &str = "abc123";
pub const BEARER: &str = "Bearer abc123";

/// Client against the mock server with a logged-in session.
pub fn authed_client(server: &MockServer) -> (ApiClient, Arc<MemorySessionStore>) {
    let session = Arc::new(MemorySessionStore::with_token(TOKEN));
    let client = ApiClient::with_base_url(Some(&server.base_url()), session.clone());
    (client, session)
}

/// Client against the mock server with no session.
pub fn anonymous_client(server: &MockServer) -> (ApiClient, Arc<MemorySessionStore>) {
    let session = Arc::new(MemorySessionStore::new());
    let client = ApiClient::with_base_url(Some(&server.base_url()), session.clone());
    (client, session)
}

pub fn assert_logged_out(session: &MemorySessionStore) {
    assert!(!session.is_authenticated(), "session should have been cleared");
}

pub fn category_json(id: i32, name: &str) -> Value {
    json!({ "id": id, "name": name, "display_order": 0 })
}

pub fn option_group_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "CHON_NHIEU",
        "values": [
            { "id": id * 10 + 1, "name": "Trân châu", "price_adjustment": 5000.0 }
        ]
    })
}

pub fn product_json(id: i32, name: &str, category_id: i32, options: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "base_price": 35000.0,
        "image_url": "🧋",
        "is_best_seller": false,
        "is_out_of_stock": false,
        "category_id": category_id,
        "options": options
    })
}

pub fn order_summary_json(id: i32, status: &str) -> Value {
    json!({ "id": id, "status": status, "total_amount": 105000.0 })
}

pub fn order_json(id: i32, customer: &str, discount: f64) -> Value {
    json!({
        "id": id,
        "status": "MOI",
        "customer_name": customer,
        "customer_phone": "0901234567",
        "customer_address": "12 Lê Lợi",
        "customer_note": null,
        "delivery_method_selected": "NHANH",
        "payment_method": "MOMO",
        "items": [
            {
                "id": 1,
                "product_name": "Trà Sữa",
                "quantity": 2,
                "item_price": 90000.0,
                "options_selected": [ { "value_name": "Size L" } ],
                "item_note": null
            }
        ],
        "sub_total": 90000.0,
        "delivery_fee": 15000.0,
        "discount_amount": discount,
        "voucher_code": if discount > 0.0 { json!("GIAM10") } else { Value::Null },
        "total_amount": 105000.0 - discount
    })
}
