// src/order_detail.rs
//
// Detail view of one order. Requests are keyed by order id and only the
// most recently requested id may reach the screen.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{self, ApiClient};
use crate::guard::{self, Navigation};
use crate::models::Order;
use crate::money::format_currency;

pub const FREE_DELIVERY: &str = "Miễn phí";

#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    /// `2x Trà Sữa`
    pub heading: String,
    pub price: String,
    pub options: Vec<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalKind {
    Subtotal,
    DeliveryFee,
    Discount,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalRow {
    pub kind: TotalKind,
    pub label: String,
    pub value: String,
}

/// Read-only display strings derived from an [`Order`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBreakdown {
    pub order_id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_note: Option<String>,
    pub delivery: String,
    pub payment: String,
    pub status: String,
    pub lines: Vec<LineView>,
    pub totals: Vec<TotalRow>,
}

fn non_blank(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl OrderBreakdown {
    pub fn from_order(order: &Order) -> Self {
        let lines = order
            .items
            .iter()
            .map(|item| LineView {
                heading: format!("{}x {}", item.quantity, item.product_name),
                price: format_currency(item.item_price),
                options: item
                    .options_selected
                    .iter()
                    .map(|o| o.value_name.clone())
                    .collect(),
                note: non_blank(&item.item_note),
            })
            .collect();

        let mut totals = vec![
            TotalRow {
                kind: TotalKind::Subtotal,
                label: "Tạm tính".to_string(),
                value: format_currency(order.sub_total),
            },
            TotalRow {
                kind: TotalKind::DeliveryFee,
                label: "Phí giao hàng".to_string(),
                value: if order.delivery_fee > 0.0 {
                    format_currency(order.delivery_fee)
                } else {
                    FREE_DELIVERY.to_string()
                },
            },
        ];
        if order.discount_amount > 0.0 {
            let label = match non_blank(&order.voucher_code) {
                Some(code) => format!("Giảm giá ({code})"),
                None => "Giảm giá".to_string(),
            };
            totals.push(TotalRow {
                kind: TotalKind::Discount,
                label,
                value: format!("-{}", format_currency(order.discount_amount)),
            });
        }
        totals.push(TotalRow {
            kind: TotalKind::Total,
            label: "Tổng cộng".to_string(),
            value: format_currency(order.total_amount),
        });

        Self {
            order_id: order.id,
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            customer_address: order.customer_address.clone(),
            customer_note: non_blank(&order.customer_note),
            delivery: order.delivery_method.label().to_string(),
            payment: order.payment_method.label().to_string(),
            status: order.status.label().to_string(),
            lines,
            totals,
        }
    }

    pub fn discount_row(&self) -> Option<&TotalRow> {
        self.totals.iter().find(|t| t.kind == TotalKind::Discount)
    }

    pub fn render(&self) -> String {
        let mut out = format!("Chi tiết Đơn hàng #{}\n", self.order_id);
        out.push_str(&format!("Khách hàng: {}\n", self.customer_name));
        out.push_str(&format!("SĐT: {}\n", self.customer_phone));
        out.push_str(&format!("Địa chỉ: {}\n", self.customer_address));
        if let Some(note) = &self.customer_note {
            out.push_str(&format!("Ghi chú KH: {note}\n"));
        }
        out.push_str(&format!("Giao hàng: {}\n", self.delivery));
        out.push_str(&format!("Thanh toán: {}\n", self.payment));
        out.push_str(&format!("Trạng thái: {}\n", self.status));

        out.push_str("\nCác món đã đặt:\n");
        for line in &self.lines {
            out.push_str(&format!("- {} ({})\n", line.heading, line.price));
            for option in &line.options {
                out.push_str(&format!("    + {option}\n"));
            }
            if let Some(note) = &line.note {
                out.push_str(&format!("    Ghi chú: {note}\n"));
            }
        }

        out.push('\n');
        let width = self
            .totals
            .iter()
            .map(|t| t.label.chars().count())
            .max()
            .unwrap_or(0);
        for row in &self.totals {
            let pad = width - row.label.chars().count();
            out.push_str(&format!("{}:{} {}\n", row.label, " ".repeat(pad), row.value));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Closed,
    Loading { order_id: i32 },
    Loaded(OrderBreakdown),
    Failed { order_id: i32, message: String },
}

/// What happened to one `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Shown,
    Failed,
    /// A newer request superseded this one; its result was dropped.
    Stale,
    Redirect(guard::Route),
}

impl LoadOutcome {
    pub fn navigation(self) -> Navigation {
        match self {
            LoadOutcome::Redirect(route) => Navigation::Redirect(route),
            _ => Navigation::Stay,
        }
    }
}

/// Takes `&self` so several loads may be in flight at once; each carries a
/// ticket and only the newest ticket may write the state.
pub struct OrderDetailView {
    client: ApiClient,
    latest: AtomicU64,
    state: Mutex<DetailState>,
}

impl OrderDetailView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            latest: AtomicU64::new(0),
            state: Mutex::new(DetailState::Closed),
        }
    }

    pub fn state(&self) -> DetailState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_state(&self, ticket: u64, next: DetailState) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        // Checked under the lock so a newer `load` cannot slip in between.
        if self.latest.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *state = next;
        true
    }

    /// Fetches `order_id` fresh from the server and shows it, unless a
    /// later `load` or `close` happened meanwhile.
    pub async fn load(&self, order_id: i32) -> LoadOutcome {
        let ticket = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = DetailState::Loading { order_id };
            ticket
        };

        let result = api::orders::get(&self.client, order_id).await;

        let (next, outcome) = match result {
            Ok(order) if order.id != order_id => {
                log::warn!("order detail id mismatch requested={order_id} got={}", order.id);
                (
                    DetailState::Failed {
                        order_id,
                        message: "Không tìm thấy dữ liệu.".to_string(),
                    },
                    LoadOutcome::Failed,
                )
            }
            Ok(order) => (
                DetailState::Loaded(OrderBreakdown::from_order(&order)),
                LoadOutcome::Shown,
            ),
            Err(e) if e.is_unauthorized() => {
                let nav = guard::expire_session(self.client.session().as_ref());
                self.close();
                return match nav {
                    Navigation::Redirect(route) => LoadOutcome::Redirect(route),
                    Navigation::Stay => LoadOutcome::Failed,
                };
            }
            Err(e) => {
                log::warn!("order detail load failed order_id={order_id}: {e}");
                (
                    DetailState::Failed {
                        order_id,
                        message: e.user_message(),
                    },
                    LoadOutcome::Failed,
                )
            }
        };

        if self.set_state(ticket, next) {
            outcome
        } else {
            log::debug!("dropping stale order detail order_id={order_id} ticket={ticket}");
            LoadOutcome::Stale
        }
    }

    /// Hides the view and invalidates any request still in flight.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.latest.fetch_add(1, Ordering::SeqCst);
        *state = DetailState::Closed;
    }

    pub fn render(&self) -> String {
        match self.state() {
            DetailState::Closed => String::new(),
            DetailState::Loading { order_id } => {
                format!("Chi tiết Đơn hàng #{order_id}\nĐang tải chi tiết...\n")
            }
            DetailState::Loaded(breakdown) => breakdown.render(),
            DetailState::Failed { order_id, message } => {
                format!("Chi tiết Đơn hàng #{order_id}\n! {message}\n")
            }
        }
    }
}
