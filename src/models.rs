// src/models.rs
//
// Records exchanged with the admin API. The backend owns all of them;
// the client only holds re-fetchable copies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    #[serde(rename = "CHON_1")]
    SingleChoice,
    #[serde(rename = "CHON_NHIEU")]
    MultipleChoice,
}

impl OptionType {
    pub fn label(self) -> &'static str {
        match self {
            OptionType::SingleChoice => "Chọn 1",
            OptionType::MultipleChoice => "Chọn nhiều",
        }
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CHON_1" | "SINGLE" | "SINGLE_CHOICE" => Ok(OptionType::SingleChoice),
            "CHON_NHIEU" | "MULTIPLE" | "MULTIPLE_CHOICE" => Ok(OptionType::MultipleChoice),
            other => Err(format!("unknown option type: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValue {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub price_adjustment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOptionValue {
    pub name: String,
    pub price_adjustment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionType,
    #[serde(default)]
    pub values: Vec<OptionValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOptionGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_price: f64,
    /// Absolute URL, emoji glyph, or server-relative path.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_out_of_stock: bool,
    pub category_id: i32,
    /// Linked option groups, read-only projection.
    #[serde(default)]
    pub options: Vec<OptionGroup>,
}

/// Body for both product create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    pub image_url: String,
    pub is_best_seller: bool,
    pub is_out_of_stock: bool,
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkOptionsRequest {
    pub option_ids: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherType {
    Fixed,
    Percentage,
}

impl FromStr for VoucherType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(VoucherType::Fixed),
            "percentage" | "percent" => Ok(VoucherType::Percentage),
            other => Err(format!("unknown voucher type: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: i32,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: VoucherType,
    pub value: f64,
    #[serde(default)]
    pub min_order_value: f64,
    #[serde(default)]
    pub max_discount: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Voucher {
    /// Discount this voucher would grant on `sub_total`.
    pub fn discount_for(&self, sub_total: f64) -> f64 {
        if !self.is_active || sub_total <= 0.0 || sub_total < self.min_order_value {
            return 0.0;
        }
        let raw = match self.kind {
            VoucherType::Fixed => self.value,
            VoucherType::Percentage => {
                let pct = sub_total * self.value / 100.0;
                match self.max_discount {
                    Some(cap) if cap > 0.0 => pct.min(cap),
                    _ => pct,
                }
            }
        };
        raw.clamp(0.0, sub_total)
    }
}

/// Body for voucher create and update. `max_discount` is always sent,
/// `null` meaning uncapped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoucherPayload {
    pub code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: VoucherType,
    pub value: f64,
    pub min_order_value: f64,
    pub max_discount: Option<f64>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "MOI")]
    New,
    #[serde(rename = "DA_XAC_NHAN")]
    Confirmed,
    #[serde(rename = "DANG_THUC_HIEN")]
    InProgress,
    #[serde(rename = "DANG_GIAO")]
    Delivering,
    #[serde(rename = "HOAN_TAT")]
    Completed,
    #[serde(rename = "DA_HUY")]
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::New,
        OrderStatus::Confirmed,
        OrderStatus::InProgress,
        OrderStatus::Delivering,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    /// Value used on the wire and in the status query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "MOI",
            OrderStatus::Confirmed => "DA_XAC_NHAN",
            OrderStatus::InProgress => "DANG_THUC_HIEN",
            OrderStatus::Delivering => "DANG_GIAO",
            OrderStatus::Completed => "HOAN_TAT",
            OrderStatus::Canceled => "DA_HUY",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::New => "Mới",
            OrderStatus::Confirmed => "Đã xác nhận",
            OrderStatus::InProgress => "Đang làm",
            OrderStatus::Delivering => "Đang giao",
            OrderStatus::Completed => "Hoàn tất",
            OrderStatus::Canceled => "Đã hủy",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Accepts the wire value or the English name (`delivering`, `IN_PROGRESS`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace('-', "_");
        if let Some(status) = OrderStatus::ALL.iter().find(|st| st.as_str() == key) {
            return Ok(*status);
        }
        match key.as_str() {
            "NEW" => Ok(OrderStatus::New),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "DELIVERING" => Ok(OrderStatus::Delivering),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELED" | "CANCELLED" => Ok(OrderStatus::Canceled),
            _ => Err(format!("unknown order status: {}", s.trim())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMethod {
    #[serde(rename = "NHANH")]
    Express,
    #[serde(rename = "TIEU_CHUAN")]
    #[serde(other)]
    Standard,
}

impl DeliveryMethod {
    pub fn label(self) -> &'static str {
        match self {
            DeliveryMethod::Express => "Nhanh",
            DeliveryMethod::Standard => "Tiêu chuẩn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "MOMO")]
    Momo,
    #[serde(rename = "TIEN_MAT")]
    #[serde(other)]
    Cash,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Momo => "MoMo",
            PaymentMethod::Cash => "Tiền mặt",
        }
    }
}

/// Row of the order list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderSummary {
    pub id: i32,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectedOption {
    pub value_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderItem {
    pub id: i32,
    pub product_name: String,
    pub quantity: u32,
    /// Line total.
    pub item_price: f64,
    #[serde(default)]
    pub options_selected: Vec<SelectedOption>,
    #[serde(default)]
    pub item_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub id: i32,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    #[serde(default)]
    pub customer_note: Option<String>,
    #[serde(rename = "delivery_method_selected", alias = "delivery_method")]
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub sub_total: f64,
    #[serde(default)]
    pub delivery_fee: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub voucher_code: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}
