// src/pages/categories.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{self, ApiClient};
use crate::crud::{CrudPage, CrudResource};
use crate::error::ApiError;
use crate::models::{Category, NewCategory};

pub struct CategoryResource {
    client: ApiClient,
}

impl CategoryResource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub display_order: i32,
}

#[async_trait]
impl CrudResource for CategoryResource {
    type Record = Category;
    type Draft = CategoryDraft;
    type Payload = NewCategory;

    fn title(&self) -> &'static str {
        "📚 Quản lý Danh mục"
    }

    fn record_id(&self, record: &Category) -> i32 {
        record.id
    }

    async fn list(&self) -> Result<Vec<Category>, ApiError> {
        api::categories::list(&self.client).await
    }

    async fn create(&self, payload: &NewCategory) -> Result<(), ApiError> {
        api::categories::create(&self.client, payload).await
    }

    fn blank_draft(&self) -> CategoryDraft {
        CategoryDraft::default()
    }

    fn draft_from(&self, record: &Category) -> CategoryDraft {
        CategoryDraft {
            name: record.name.clone(),
            display_order: record.display_order,
        }
    }

    fn prepare(&self, draft: &CategoryDraft) -> Result<NewCategory, String> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err("Category name must not be empty".to_string());
        }
        Ok(NewCategory {
            name: name.to_string(),
            display_order: draft.display_order,
        })
    }

    fn columns(&self) -> &'static [&'static str] {
        &["ID", "Tên Danh mục", "Thứ tự"]
    }

    fn row(&self, record: &Category) -> Vec<String> {
        vec![
            record.id.to_string(),
            record.name.clone(),
            record.display_order.to_string(),
        ]
    }

    fn empty_message(&self) -> &'static str {
        "Chưa có danh mục nào."
    }
}

pub type CategoriesPage = CrudPage<CategoryResource>;

pub fn page(client: ApiClient) -> CategoriesPage {
    let session = Arc::clone(client.session());
    CrudPage::new(CategoryResource::new(client), session)
}
