// src/pages/login.rs

use crate::api::{self, ApiClient};
use crate::guard::{Navigation, Route};

#[derive(Debug, Default)]
pub struct LoginPage {
    pub username: String,
    pub password: String,
    error: Option<String>,
    submitting: bool,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Exchanges the credentials for a token. On success the token is in
    /// the session store and the caller goes to the dashboard.
    pub async fn submit(&mut self, client: &ApiClient) -> Navigation {
        let username = self.username.trim().to_string();
        if username.is_empty() || self.password.is_empty() {
            self.error = Some("Username and password are required".to_string());
            return Navigation::Stay;
        }

        self.error = None;
        self.submitting = true;
        let result = api::auth::login(client, &username, &self.password).await;
        self.submitting = false;

        match result {
            Ok(_) => {
                self.password.clear();
                Navigation::Redirect(Route::Dashboard)
            }
            Err(e) => {
                log::warn!("login failed username={username}: {e}");
                self.error = Some(e.user_message());
                Navigation::Stay
            }
        }
    }
}
