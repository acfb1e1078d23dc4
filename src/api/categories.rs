// src/api/categories.rs

use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, NewCategory};

pub async fn list(client: &ApiClient) -> Result<Vec<Category>, ApiError> {
    client.get("/admin/categories/").await
}

pub async fn create(client: &ApiClient, category: &NewCategory) -> Result<(), ApiError> {
    client
        .send_json(Method::POST, "/admin/categories/", category)
        .await?;
    log::info!("category created name={}", category.name);
    Ok(())
}
