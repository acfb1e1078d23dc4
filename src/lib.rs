pub mod api;
pub mod config;
pub mod crud;
pub mod error;
pub mod guard;
pub mod membership;
pub mod models;
pub mod money;
pub mod order_detail;
pub mod pages;
pub mod render;
pub mod session;

use std::sync::Arc;

use api::ApiClient;
use config::Config;
use session::{FileSessionStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: Arc<dyn SessionStore>,
    pub client: ApiClient,
}

impl AppState {
    /// Session persisted to `config.session_file`, shared with the client.
    pub fn from_config(config: Config) -> Self {
        let session: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(config.session_file.clone()));
        let client = ApiClient::new(&config, Arc::clone(&session));
        Self {
            config,
            session,
            client,
        }
    }
}
