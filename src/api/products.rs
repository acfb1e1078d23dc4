// src/api/products.rs

use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{LinkOptionsRequest, Product, ProductPayload, UploadedImage};

pub async fn list(client: &ApiClient) -> Result<Vec<Product>, ApiError> {
    client.get("/admin/products/").await
}

pub async fn create(client: &ApiClient, product: &ProductPayload) -> Result<(), ApiError> {
    client
        .send_json(Method::POST, "/admin/products/", product)
        .await?;
    log::info!(
        "product created name={} category_id={}",
        product.name,
        product.category_id
    );
    Ok(())
}

pub async fn update(client: &ApiClient, id: i32, product: &ProductPayload) -> Result<(), ApiError> {
    client
        .send_json(Method::PUT, &format!("/admin/products/{id}"), product)
        .await?;
    log::info!("product updated id={id}");
    Ok(())
}

pub async fn delete(client: &ApiClient, id: i32) -> Result<(), ApiError> {
    client.delete(&format!("/admin/products/{id}")).await?;
    log::info!("product deleted id={id}");
    Ok(())
}

/// Replaces the full set of option groups linked to a product.
pub async fn link_options(client: &ApiClient, id: i32, option_ids: Vec<i32>) -> Result<(), ApiError> {
    let body = LinkOptionsRequest { option_ids };
    client
        .send_json(
            Method::POST,
            &format!("/admin/products/{id}/link_options"),
            &body,
        )
        .await?;
    log::info!("product options linked id={id} option_ids={:?}", body.option_ids);
    Ok(())
}

pub async fn upload_image(
    client: &ApiClient,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<UploadedImage, ApiError> {
    let value = client
        .upload_file("/admin/upload-image", file_name, bytes)
        .await?;
    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("upload response: {e}")))
}
