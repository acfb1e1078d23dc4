// src/api/options.rs

use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{NewOptionGroup, NewOptionValue, OptionGroup};

pub async fn list(client: &ApiClient) -> Result<Vec<OptionGroup>, ApiError> {
    client.get("/admin/options/").await
}

pub async fn create(client: &ApiClient, group: &NewOptionGroup) -> Result<(), ApiError> {
    client.send_json(Method::POST, "/admin/options/", group).await?;
    log::info!("option group created name={}", group.name);
    Ok(())
}

/// Deletes a group together with its values.
pub async fn delete(client: &ApiClient, id: i32) -> Result<(), ApiError> {
    client.delete(&format!("/admin/options/{id}")).await?;
    log::info!("option group deleted id={id}");
    Ok(())
}

/// Values only exist under a group, so the group id is part of the path.
pub async fn add_value(
    client: &ApiClient,
    group_id: i32,
    value: &NewOptionValue,
) -> Result<(), ApiError> {
    client
        .send_json(
            Method::POST,
            &format!("/admin/options/{group_id}/values/"),
            value,
        )
        .await?;
    log::info!("option value created group_id={group_id} name={}", value.name);
    Ok(())
}

pub async fn delete_value(client: &ApiClient, value_id: i32) -> Result<(), ApiError> {
    client.delete(&format!("/admin/values/{value_id}")).await?;
    log::info!("option value deleted id={value_id}");
    Ok(())
}
