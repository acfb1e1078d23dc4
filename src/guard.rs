// src/guard.rs

use std::fmt;

use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Categories,
    Products,
    Options,
    Vouchers,
    Orders,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Categories => "/dashboard/categories",
            Route::Products => "/dashboard/products",
            Route::Options => "/dashboard/options",
            Route::Vouchers => "/dashboard/vouchers",
            Route::Orders => "/dashboard/orders",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of a page action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(Route),
}

impl Navigation {
    pub fn is_redirect(self) -> bool {
        matches!(self, Navigation::Redirect(_))
    }
}

/// Runs before any protected page loads data. Returns the token, or the
/// login route when there is none.
pub fn require_session(session: &dyn SessionStore) -> Result<String, Route> {
    match session.token() {
        Some(token) => Ok(token),
        None => {
            log::debug!("no admin session, redirecting to {}", Route::Login);
            Err(Route::Login)
        }
    }
}

/// Drops the session after the backend rejected it.
pub fn expire_session(session: &dyn SessionStore) -> Navigation {
    if let Err(e) = session.clear_token() {
        log::error!("failed to clear expired session: {e}");
    }
    Navigation::Redirect(Route::Login)
}
