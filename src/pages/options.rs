// src/pages/options.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{self, ApiClient};
use crate::crud::{Confirm, CrudPage, CrudResource};
use crate::error::ApiError;
use crate::guard::Navigation;
use crate::models::{NewOptionGroup, NewOptionValue, OptionGroup, OptionType};
use crate::money::format_adjustment;

pub struct OptionGroupResource {
    client: ApiClient,
}

impl OptionGroupResource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionGroupDraft {
    pub name: String,
    pub kind: OptionType,
}

impl Default for OptionGroupDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: OptionType::MultipleChoice,
        }
    }
}

#[async_trait]
impl CrudResource for OptionGroupResource {
    type Record = OptionGroup;
    type Draft = OptionGroupDraft;
    type Payload = NewOptionGroup;

    fn title(&self) -> &'static str {
        "⚙️ Quản lý Tùy chọn"
    }

    fn record_id(&self, record: &OptionGroup) -> i32 {
        record.id
    }

    async fn list(&self) -> Result<Vec<OptionGroup>, ApiError> {
        api::options::list(&self.client).await
    }

    async fn create(&self, payload: &NewOptionGroup) -> Result<(), ApiError> {
        api::options::create(&self.client, payload).await
    }

    async fn delete(&self, id: i32) -> Result<(), ApiError> {
        api::options::delete(&self.client, id).await
    }

    fn blank_draft(&self) -> OptionGroupDraft {
        OptionGroupDraft::default()
    }

    fn draft_from(&self, record: &OptionGroup) -> OptionGroupDraft {
        OptionGroupDraft {
            name: record.name.clone(),
            kind: record.kind,
        }
    }

    fn prepare(&self, draft: &OptionGroupDraft) -> Result<NewOptionGroup, String> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err("Option group name must not be empty".to_string());
        }
        Ok(NewOptionGroup {
            name: name.to_string(),
            kind: draft.kind,
            display_order: 0,
        })
    }

    fn columns(&self) -> &'static [&'static str] {
        &["ID", "Nhóm", "Loại", "Số lựa chọn"]
    }

    fn row(&self, record: &OptionGroup) -> Vec<String> {
        vec![
            record.id.to_string(),
            record.name.clone(),
            record.kind.label().to_string(),
            record.values.len().to_string(),
        ]
    }

    fn empty_message(&self) -> &'static str {
        "Chưa có Nhóm Tùy chọn nào."
    }

    fn delete_prompt(&self) -> &'static str {
        "Deleting this group also deletes all of its values. Continue?"
    }

    fn details(&self, records: &[OptionGroup]) -> String {
        let mut out = String::new();
        for group in records {
            out.push_str(&format!("\n{} ({}):\n", group.name, group.kind.label()));
            if group.values.is_empty() {
                out.push_str("  (chưa có lựa chọn)\n");
            }
            for value in &group.values {
                out.push_str(&format!(
                    "  - [{}] {} ({})\n",
                    value.id,
                    value.name,
                    format_adjustment(value.price_adjustment)
                ));
            }
        }
        out
    }
}

/// Option groups with their nested values.
pub struct OptionsPage {
    client: ApiClient,
    crud: CrudPage<OptionGroupResource>,
}

impl OptionsPage {
    pub fn new(client: ApiClient) -> Self {
        let session = Arc::clone(client.session());
        Self {
            crud: CrudPage::new(OptionGroupResource::new(client.clone()), session),
            client,
        }
    }

    pub fn crud(&self) -> &CrudPage<OptionGroupResource> {
        &self.crud
    }

    pub fn crud_mut(&mut self) -> &mut CrudPage<OptionGroupResource> {
        &mut self.crud
    }

    pub async fn enter(&mut self) -> Navigation {
        self.crud.enter().await
    }

    /// Adds a value under `group_id`, which must be one of the listed groups.
    pub async fn add_value(&mut self, group_id: i32, name: &str, price_adjustment: f64) -> Navigation {
        if self.crud.find(group_id).is_none() {
            self.crud
                .set_notice(format!("Option group {group_id} does not exist"));
            return Navigation::Stay;
        }
        let name = name.trim();
        if name.is_empty() {
            self.crud.set_notice("Option value name must not be empty");
            return Navigation::Stay;
        }
        if !price_adjustment.is_finite() {
            self.crud.set_notice("Price adjustment must be a number");
            return Navigation::Stay;
        }

        let value = NewOptionValue {
            name: name.to_string(),
            price_adjustment,
        };
        let client = self.client.clone();
        self.crud
            .run(async move { api::options::add_value(&client, group_id, &value).await })
            .await
    }

    pub async fn delete_value(&mut self, value_id: i32, confirm: &dyn Confirm) -> Navigation {
        if !confirm.confirm("Are you sure you want to delete this option value?") {
            return Navigation::Stay;
        }
        let client = self.client.clone();
        self.crud
            .run(async move { api::options::delete_value(&client, value_id).await })
            .await
    }

    pub async fn delete_group(&mut self, group_id: i32, confirm: &dyn Confirm) -> Navigation {
        self.crud.delete(group_id, confirm).await
    }

    pub fn render(&self) -> String {
        self.crud.render()
    }
}
