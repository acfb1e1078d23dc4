// src/api/orders.rs

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Order, OrderStatus, OrderSummary};

pub async fn list(client: &ApiClient) -> Result<Vec<OrderSummary>, ApiError> {
    client.get("/admin/orders/").await
}

/// Full order with nested items and selected options.
pub async fn get(client: &ApiClient, id: i32) -> Result<Order, ApiError> {
    client.get(&format!("/admin/orders/{id}")).await
}

/// Requests a status transition. The backend decides; callers refetch to
/// see the accepted value.
pub async fn update_status(client: &ApiClient, id: i32, status: OrderStatus) -> Result<(), ApiError> {
    client
        .put_with_query(
            &format!("/admin/orders/{id}/status"),
            &[("status", status.as_str())],
        )
        .await?;
    log::info!("order status update requested id={id} status={status}");
    Ok(())
}
