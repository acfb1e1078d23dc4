// src/config.rs

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ApiError;

pub const API_URL_VAR: &str = "FNB_API_URL";
pub const SESSION_FILE_VAR: &str = "FNB_SESSION_FILE";
pub const HTTP_TIMEOUT_VAR: &str = "FNB_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Option<String>,
    pub session_file: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the process environment. A missing base URL is not an error
    /// here; it is reported when a request is attempted.
    pub fn from_env() -> Self {
        let api_url = env::var(API_URL_VAR)
            .ok()
            .map(|v| normalize_base_url(&v))
            .filter(|v| !v.is_empty());

        let session_file = env::var(SESSION_FILE_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_session_file);

        let timeout_secs = env::var(HTTP_TIMEOUT_VAR)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url,
            session_file,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

pub(crate) fn missing_api_url() -> ApiError {
    ApiError::Config(format!(
        "API URL is not set, check {API_URL_VAR} in the environment or .env"
    ))
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn default_session_file() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("fnb-admin").join("session.json"),
        None => PathBuf::from(".fnb-admin-session.json"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::ApiClient;
    use crate::session::MemorySessionStore;
    use serial_test::serial;

    fn set_env(key: &str, value: &str) {
        unsafe {
            env::set_var(key, value);
        }
    }

    fn unset_env(key: &str) {
        unsafe {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn missing_api_url_is_reported_lazily() {
        unset_env(API_URL_VAR);
        let config = Config::from_env();
        assert!(config.api_url.is_none());

        let client = ApiClient::new(&config, Arc::new(MemorySessionStore::new()));
        assert!(matches!(client.base_url(), Err(ApiError::Config(_))));
    }

    #[test]
    #[serial]
    fn api_url_is_trimmed() {
        set_env(API_URL_VAR, " https://api.example.com/ ");
        let config = Config::from_env();
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        unset_env(API_URL_VAR);
    }

    #[test]
    #[serial]
    fn bad_timeout_falls_back_to_default() {
        set_env(HTTP_TIMEOUT_VAR, "soon");
        let config = Config::from_env();
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        set_env(HTTP_TIMEOUT_VAR, "5");
        let config = Config::from_env();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        unset_env(HTTP_TIMEOUT_VAR);
    }

    #[test]
    #[serial]
    fn session_file_override() {
        set_env(SESSION_FILE_VAR, "/tmp/fnb-test-session.json");
        let config = Config::from_env();
        assert_eq!(config.session_file, PathBuf::from("/tmp/fnb-test-session.json"));
        unset_env(SESSION_FILE_VAR);
    }
}
