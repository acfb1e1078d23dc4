// src/pages/vouchers.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{self, ApiClient};
use crate::crud::{CrudPage, CrudResource};
use crate::error::ApiError;
use crate::models::{Voucher, VoucherPayload, VoucherType};
use crate::money::format_currency;
use crate::render::{self, yes_no};

pub struct VoucherResource {
    client: ApiClient,
}

impl VoucherResource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// Voucher form. `max_discount` is `None` for "no cap"; it is never
/// `Some(0.0)` and never set while the type is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherDraft {
    pub code: String,
    pub description: String,
    kind: VoucherType,
    pub value: f64,
    pub min_order_value: f64,
    max_discount: Option<f64>,
    pub is_active: bool,
}

impl Default for VoucherDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            description: String::new(),
            kind: VoucherType::Fixed,
            value: 0.0,
            min_order_value: 0.0,
            max_discount: None,
            is_active: true,
        }
    }
}

impl VoucherDraft {
    pub fn kind(&self) -> VoucherType {
        self.kind
    }

    pub fn max_discount(&self) -> Option<f64> {
        self.max_discount
    }

    /// Switching to a fixed voucher drops any cap left from percentage mode.
    pub fn set_kind(&mut self, kind: VoucherType) {
        self.kind = kind;
        if kind == VoucherType::Fixed {
            self.max_discount = None;
        }
    }

    /// Sets the cap from a number. Zero or negative means "no cap".
    pub fn set_max_discount(&mut self, cap: Option<f64>) {
        self.max_discount = match cap {
            Some(c) if c.is_finite() && c > 0.0 && self.kind == VoucherType::Percentage => Some(c),
            _ => None,
        };
    }

    /// Sets the cap from raw form input. Blank, zero and unparsable input
    /// all mean "no cap".
    pub fn set_max_discount_input(&mut self, raw: &str) {
        self.set_max_discount(parse_amount(raw));
    }

    pub fn set_value_input(&mut self, raw: &str) {
        self.value = parse_amount(raw).unwrap_or(0.0);
    }

    pub fn set_min_order_input(&mut self, raw: &str) {
        self.min_order_value = parse_amount(raw).unwrap_or(0.0);
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[async_trait]
impl CrudResource for VoucherResource {
    type Record = Voucher;
    type Draft = VoucherDraft;
    type Payload = VoucherPayload;

    fn title(&self) -> &'static str {
        "🎟️ Quản lý Mã Giảm Giá"
    }

    fn record_id(&self, record: &Voucher) -> i32 {
        record.id
    }

    async fn list(&self) -> Result<Vec<Voucher>, ApiError> {
        api::vouchers::list(&self.client).await
    }

    async fn create(&self, payload: &VoucherPayload) -> Result<(), ApiError> {
        api::vouchers::create(&self.client, payload).await
    }

    async fn update(&self, id: i32, payload: &VoucherPayload) -> Result<(), ApiError> {
        api::vouchers::update(&self.client, id, payload).await
    }

    async fn delete(&self, id: i32) -> Result<(), ApiError> {
        api::vouchers::delete(&self.client, id).await
    }

    fn blank_draft(&self) -> VoucherDraft {
        VoucherDraft::default()
    }

    fn draft_from(&self, record: &Voucher) -> VoucherDraft {
        let mut draft = VoucherDraft {
            code: record.code.clone(),
            description: record.description.clone().unwrap_or_default(),
            kind: record.kind,
            value: record.value,
            min_order_value: record.min_order_value,
            max_discount: None,
            is_active: record.is_active,
        };
        draft.set_max_discount(record.max_discount);
        draft
    }

    fn prepare(&self, draft: &VoucherDraft) -> Result<VoucherPayload, String> {
        let code = draft.code.trim();
        if code.is_empty() {
            return Err("Voucher code must not be empty".to_string());
        }
        if draft.value < 0.0 || draft.min_order_value < 0.0 {
            return Err("Amounts must not be negative".to_string());
        }
        if draft.kind == VoucherType::Percentage && draft.value > 100.0 {
            return Err("A percentage voucher cannot exceed 100%".to_string());
        }

        let max_discount = match draft.kind {
            VoucherType::Fixed => None,
            VoucherType::Percentage => draft.max_discount.filter(|c| *c > 0.0),
        };

        Ok(VoucherPayload {
            code: code.to_string(),
            description: draft.description.trim().to_string(),
            kind: draft.kind,
            value: draft.value,
            min_order_value: draft.min_order_value,
            max_discount,
            is_active: draft.is_active,
        })
    }

    fn columns(&self) -> &'static [&'static str] {
        &["ID", "Mã", "Loại", "Giá trị", "Đơn tối thiểu", "Giảm tối đa", "Kích hoạt"]
    }

    fn row(&self, record: &Voucher) -> Vec<String> {
        let (kind, value) = match record.kind {
            VoucherType::Fixed => ("Cố định", format_currency(record.value)),
            VoucherType::Percentage => ("Phần trăm", format!("{}%", record.value)),
        };
        let cap = match (record.kind, record.max_discount) {
            (VoucherType::Percentage, Some(cap)) if cap > 0.0 => format_currency(cap),
            (VoucherType::Percentage, _) => "Không giới hạn".to_string(),
            (VoucherType::Fixed, _) => "-".to_string(),
        };
        vec![
            record.id.to_string(),
            record.code.clone(),
            kind.to_string(),
            value,
            format_currency(record.min_order_value),
            cap,
            yes_no(record.is_active).to_string(),
        ]
    }

    fn empty_message(&self) -> &'static str {
        "Chưa có mã giảm giá nào."
    }

    fn delete_prompt(&self) -> &'static str {
        "Are you sure you want to delete this voucher?"
    }
}

/// What each listed voucher would take off an order of `sub_total`.
pub fn discount_preview(vouchers: &[Voucher], sub_total: f64) -> String {
    let rows: Vec<Vec<String>> = vouchers
        .iter()
        .map(|v| {
            let discount = v.discount_for(sub_total);
            vec![
                v.code.clone(),
                format_currency(discount),
                format_currency(sub_total - discount),
            ]
        })
        .collect();
    let mut out = format!("Xem trước cho đơn {}:\n", format_currency(sub_total));
    out.push_str(&render::table(
        &["Mã", "Giảm", "Còn lại"],
        &rows,
        "Chưa có mã giảm giá nào.",
    ));
    out
}

pub type VouchersPage = CrudPage<VoucherResource>;

pub fn page(client: ApiClient) -> VouchersPage {
    let session = Arc::clone(client.session());
    CrudPage::new(VoucherResource::new(client), session)
}
