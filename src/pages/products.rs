// src/pages/products.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{self, ApiClient};
use crate::crud::{Confirm, CrudPage, CrudResource};
use crate::error::ApiError;
use crate::guard::Navigation;
use crate::membership::OptionMembership;
use crate::models::{Category, OptionGroup, Product, ProductPayload};
use crate::money::format_currency;

pub const NO_CATEGORY_MESSAGE: &str = "No category exists yet, please create a category first";

/// Categories and option groups loaded next to the product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub options: Vec<OptionGroup>,
}

pub struct ProductResource {
    client: ApiClient,
    catalog: Mutex<Catalog>,
}

impl ProductResource {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            catalog: Mutex::new(Catalog::default()),
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn category_name(&self, id: i32) -> Option<String> {
        let catalog = self.catalog.lock().unwrap_or_else(|e| e.into_inner());
        catalog
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    /// URL, emoji, or server path.
    pub image_url: String,
    pub is_best_seller: bool,
    pub is_out_of_stock: bool,
    /// Selected category as picked in the form; converted on submit.
    pub category_id: String,
}

#[async_trait]
impl CrudResource for ProductResource {
    type Record = Product;
    type Draft = ProductDraft;
    type Payload = ProductPayload;

    fn title(&self) -> &'static str {
        "🍔 Quản lý Sản phẩm"
    }

    fn record_id(&self, record: &Product) -> i32 {
        record.id
    }

    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let (products, categories, options) = tokio::try_join!(
            api::products::list(&self.client),
            api::categories::list(&self.client),
            api::options::list(&self.client),
        )?;
        let mut catalog = self.catalog.lock().unwrap_or_else(|e| e.into_inner());
        *catalog = Catalog {
            categories,
            options,
        };
        Ok(products)
    }

    async fn create(&self, payload: &ProductPayload) -> Result<(), ApiError> {
        api::products::create(&self.client, payload).await
    }

    async fn update(&self, id: i32, payload: &ProductPayload) -> Result<(), ApiError> {
        api::products::update(&self.client, id, payload).await
    }

    async fn delete(&self, id: i32) -> Result<(), ApiError> {
        api::products::delete(&self.client, id).await
    }

    fn blank_draft(&self) -> ProductDraft {
        let catalog = self.catalog.lock().unwrap_or_else(|e| e.into_inner());
        ProductDraft {
            category_id: catalog
                .categories
                .first()
                .map(|c| c.id.to_string())
                .unwrap_or_default(),
            ..ProductDraft::default()
        }
    }

    fn draft_from(&self, record: &Product) -> ProductDraft {
        ProductDraft {
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            base_price: record.base_price,
            image_url: record.image_url.clone().unwrap_or_default(),
            is_best_seller: record.is_best_seller,
            is_out_of_stock: record.is_out_of_stock,
            category_id: record.category_id.to_string(),
        }
    }

    fn prepare(&self, draft: &ProductDraft) -> Result<ProductPayload, String> {
        let catalog = self.catalog.lock().unwrap_or_else(|e| e.into_inner());
        if catalog.categories.is_empty() {
            return Err(NO_CATEGORY_MESSAGE.to_string());
        }

        let name = draft.name.trim();
        if name.is_empty() {
            return Err("Product name must not be empty".to_string());
        }
        if !draft.base_price.is_finite() || draft.base_price < 0.0 {
            return Err("Price must be a non-negative number".to_string());
        }

        let category_id: i32 = draft
            .category_id
            .trim()
            .parse()
            .map_err(|_| format!("Invalid category: {:?}", draft.category_id))?;
        if !catalog.categories.iter().any(|c| c.id == category_id) {
            return Err(format!("Category {category_id} does not exist"));
        }

        Ok(ProductPayload {
            name: name.to_string(),
            description: draft.description.trim().to_string(),
            base_price: draft.base_price,
            image_url: draft.image_url.trim().to_string(),
            is_best_seller: draft.is_best_seller,
            is_out_of_stock: draft.is_out_of_stock,
            category_id,
        })
    }

    fn columns(&self) -> &'static [&'static str] {
        &["ID", "Ảnh", "Tên", "Giá", "Danh mục", "Tùy chọn", "Trạng thái"]
    }

    fn row(&self, record: &Product) -> Vec<String> {
        let image = record
            .image_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(|u| self.client.resolve_image_url(u))
            .unwrap_or_default();
        let name = if record.is_best_seller {
            format!("{} ⭐", record.name)
        } else {
            record.name.clone()
        };
        let options = if record.options.is_empty() {
            "Chưa có".to_string()
        } else {
            record
                .options
                .iter()
                .map(|o| o.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let stock = if record.is_out_of_stock {
            "Hết hàng"
        } else {
            "Còn hàng"
        };

        vec![
            record.id.to_string(),
            image,
            name,
            format_currency(record.base_price),
            self.category_name(record.category_id)
                .unwrap_or_else(|| "N/A".to_string()),
            options,
            stock.to_string(),
        ]
    }

    fn empty_message(&self) -> &'static str {
        "Chưa có sản phẩm nào."
    }

    fn delete_prompt(&self) -> &'static str {
        "Are you sure you want to delete this product?"
    }
}

pub struct ProductsPage {
    client: ApiClient,
    crud: CrudPage<ProductResource>,
    membership: Option<OptionMembership>,
}

impl ProductsPage {
    pub fn new(client: ApiClient) -> Self {
        let session = Arc::clone(client.session());
        Self {
            crud: CrudPage::new(ProductResource::new(client.clone()), session),
            client,
            membership: None,
        }
    }

    pub fn crud(&self) -> &CrudPage<ProductResource> {
        &self.crud
    }

    pub fn crud_mut(&mut self) -> &mut CrudPage<ProductResource> {
        &mut self.crud
    }

    pub fn catalog(&self) -> Catalog {
        self.crud.resource().catalog()
    }

    pub async fn enter(&mut self) -> Navigation {
        self.crud.enter().await
    }

    pub async fn delete(&mut self, id: i32, confirm: &dyn Confirm) -> Navigation {
        self.crud.delete(id, confirm).await
    }

    /// Opens the option-link editor seeded from the product's current links.
    pub fn open_options(&mut self, product_id: i32) -> bool {
        match self.crud.find(product_id) {
            Some(product) => {
                self.membership = Some(OptionMembership::from_product(product));
                true
            }
            None => false,
        }
    }

    pub fn membership(&self) -> Option<&OptionMembership> {
        self.membership.as_ref()
    }

    pub fn membership_mut(&mut self) -> Option<&mut OptionMembership> {
        self.membership.as_mut()
    }

    pub fn close_options(&mut self) {
        self.membership = None;
    }

    /// Saves the pending membership in one call, then reloads the list.
    /// The editor stays open if the save fails.
    pub async fn save_options(&mut self) -> Navigation {
        let Some(mut membership) = self.membership.take() else {
            return Navigation::Stay;
        };
        let client = self.client.clone();
        let result = membership.save(&client).await;
        if result.is_err() {
            self.membership = Some(membership);
        }
        self.crud.run(async move { result }).await
    }

    /// Uploads an image and puts the returned URL into the open form.
    pub async fn upload_image(&mut self, file_name: &str, bytes: Vec<u8>) -> Navigation {
        if self.crud.form().is_none() {
            self.crud.open_create();
        }
        match api::products::upload_image(&self.client, file_name, bytes).await {
            Ok(uploaded) => {
                log::info!("product image uploaded url={}", uploaded.image_url);
                if let Some(draft) = self.crud.draft_mut() {
                    draft.image_url = uploaded.image_url;
                }
                Navigation::Stay
            }
            Err(e) => self.crud.report(e),
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.crud.render();
        if let Some(membership) = &self.membership {
            out.push_str(&format!(
                "\nTùy chọn cho sản phẩm #{}:\n",
                membership.product_id()
            ));
            let catalog = self.catalog();
            if catalog.options.is_empty() {
                out.push_str("Không có Tùy chọn nào.\n");
            }
            for option in &catalog.options {
                let mark = if membership.contains(option.id) { "x" } else { " " };
                out.push_str(&format!(
                    "[{mark}] {} - {} ({})\n",
                    option.id,
                    option.name,
                    option.kind.label()
                ));
            }
        }
        out
    }
}
