// src/api/vouchers.rs

use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Voucher, VoucherPayload};

pub async fn list(client: &ApiClient) -> Result<Vec<Voucher>, ApiError> {
    client.get("/admin/vouchers/").await
}

pub async fn create(client: &ApiClient, voucher: &VoucherPayload) -> Result<(), ApiError> {
    client
        .send_json(Method::POST, "/admin/vouchers/", voucher)
        .await?;
    log::info!("voucher created code={}", voucher.code);
    Ok(())
}

pub async fn update(client: &ApiClient, id: i32, voucher: &VoucherPayload) -> Result<(), ApiError> {
    client
        .send_json(Method::PUT, &format!("/admin/vouchers/{id}"), voucher)
        .await?;
    log::info!("voucher updated id={id} code={}", voucher.code);
    Ok(())
}

pub async fn delete(client: &ApiClient, id: i32) -> Result<(), ApiError> {
    client.delete(&format!("/admin/vouchers/{id}")).await?;
    log::info!("voucher deleted id={id}");
    Ok(())
}
