// src/pages/dashboard.rs

use std::sync::Arc;

use crate::api::{self, ApiClient};
use crate::guard::{self, Navigation, Route};
use crate::session::SessionStore;

/// Sections reachable from the landing page, in display order.
pub const SECTIONS: [(Route, &str); 5] = [
    (Route::Categories, "📚 Quản lý Danh mục"),
    (Route::Products, "🍔 Quản lý Sản phẩm"),
    (Route::Options, "⚙️ Quản lý Tùy chọn"),
    (Route::Vouchers, "🎟️ Quản lý Mã Giảm Giá"),
    (Route::Orders, "📦 Quản lý Đơn hàng"),
];

pub struct DashboardPage {
    client: ApiClient,
    authorized: bool,
}

impl DashboardPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            authorized: false,
        }
    }

    fn session(&self) -> &Arc<dyn SessionStore> {
        self.client.session()
    }

    pub fn enter(&mut self) -> Navigation {
        match guard::require_session(self.session().as_ref()) {
            Ok(_) => {
                self.authorized = true;
                Navigation::Stay
            }
            Err(route) => {
                self.authorized = false;
                Navigation::Redirect(route)
            }
        }
    }

    pub fn links(&self) -> &'static [(Route, &'static str)] {
        &SECTIONS
    }

    pub fn logout(&mut self) -> Navigation {
        if let Err(e) = api::auth::logout(&self.client) {
            log::error!("logout could not clear the session: {e}");
        }
        self.authorized = false;
        Navigation::Redirect(Route::Login)
    }

    pub fn render(&self) -> String {
        if !self.authorized {
            return String::new();
        }
        let mut out = String::from("Trang quản trị\n");
        for (route, title) in self.links() {
            out.push_str(&format!("  {title}  {route}\n"));
        }
        out
    }
}
