// src/pages/orders.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{self, ApiClient};
use crate::crud::{CrudPage, CrudResource};
use crate::error::ApiError;
use crate::guard::Navigation;
use crate::models::{OrderStatus, OrderSummary};
use crate::money::format_currency;
use crate::order_detail::{DetailState, LoadOutcome, OrderDetailView};

pub const NEW_ORDER_MARK: &str = "🔔";

/// Orders are placed by customers; the admin list only reads them and
/// moves them between statuses.
pub struct OrderResource {
    client: ApiClient,
}

impl OrderResource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrudResource for OrderResource {
    type Record = OrderSummary;
    type Draft = ();
    type Payload = ();

    fn title(&self) -> &'static str {
        "📦 Quản lý Đơn hàng"
    }

    fn record_id(&self, record: &OrderSummary) -> i32 {
        record.id
    }

    async fn list(&self) -> Result<Vec<OrderSummary>, ApiError> {
        api::orders::list(&self.client).await
    }

    async fn create(&self, _payload: &()) -> Result<(), ApiError> {
        Err(ApiError::Unsupported("creating orders"))
    }

    fn blank_draft(&self) {}

    fn draft_from(&self, _record: &OrderSummary) {}

    fn prepare(&self, _draft: &()) -> Result<(), String> {
        Err("Orders cannot be created or edited here".to_string())
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Mã ĐH", "Tổng tiền", "Trạng thái", ""]
    }

    fn row(&self, record: &OrderSummary) -> Vec<String> {
        let flag = if record.status == OrderStatus::New {
            NEW_ORDER_MARK
        } else {
            ""
        };
        vec![
            format!("#{}", record.id),
            format_currency(record.total_amount),
            record.status.label().to_string(),
            flag.to_string(),
        ]
    }

    fn empty_message(&self) -> &'static str {
        "Chưa có đơn hàng nào."
    }
}

pub struct OrdersPage {
    client: ApiClient,
    crud: CrudPage<OrderResource>,
    detail: OrderDetailView,
}

impl OrdersPage {
    pub fn new(client: ApiClient) -> Self {
        let session = Arc::clone(client.session());
        Self {
            crud: CrudPage::new(OrderResource::new(client.clone()), session),
            detail: OrderDetailView::new(client.clone()),
            client,
        }
    }

    pub fn crud(&self) -> &CrudPage<OrderResource> {
        &self.crud
    }

    pub fn detail(&self) -> &OrderDetailView {
        &self.detail
    }

    pub async fn enter(&mut self) -> Navigation {
        self.crud.enter().await
    }

    /// Status of `order_id` as last fetched from the server.
    pub fn status_of(&self, order_id: i32) -> Option<OrderStatus> {
        self.crud.find(order_id).map(|o| o.status)
    }

    /// Requests a status change and then shows whatever the server now
    /// reports. An open detail for the same order is refetched too.
    pub async fn set_status(&mut self, order_id: i32, status: OrderStatus) -> Navigation {
        let client = self.client.clone();
        log::info!("order status change requested order_id={order_id} status={status}");
        let nav = self
            .crud
            .run(async move { api::orders::update_status(&client, order_id, status).await })
            .await;
        if nav.is_redirect() {
            self.detail.close();
            return nav;
        }

        let showing = match self.detail.state() {
            DetailState::Loaded(b) => Some(b.order_id),
            DetailState::Loading { order_id: id } | DetailState::Failed { order_id: id, .. } => {
                Some(id)
            }
            DetailState::Closed => None,
        };
        if showing == Some(order_id) {
            return self.detail.load(order_id).await.navigation();
        }
        nav
    }

    /// Opens the detail for `order_id`, fetched fresh by id.
    pub async fn show(&self, order_id: i32) -> LoadOutcome {
        self.detail.load(order_id).await
    }

    pub fn close_detail(&self) {
        self.detail.close();
    }

    pub fn render(&self) -> String {
        let mut out = self.crud.render();
        let detail = self.detail.render();
        if !detail.is_empty() {
            out.push('\n');
            out.push_str(&detail);
        }
        out
    }
}
