// src/api/client.rs
//
// Bearer-token client for the admin REST API.
// Authorization: `Authorization: Bearer <token>` taken from the session store.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{self, Config};
use crate::error::{ApiError, OPERATION_FAILED};
use crate::session::SessionStore;

/// Multipart field name expected by the upload endpoint.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct ApiClient {
    base_url: Option<String>,
    http: reqwest::Client,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("http client builder failed, using defaults: {e}");
                reqwest::Client::new()
            });

        Self {
            base_url: config.api_url.clone(),
            http,
            session,
        }
    }

    /// Client against `base_url` with a default timeout.
    pub fn with_base_url(base_url: Option<&str>, session: Arc<dyn SessionStore>) -> Self {
        let config = Config {
            api_url: base_url
                .map(config::normalize_base_url)
                .filter(|u| !u.is_empty()),
            session_file: Default::default(),
            request_timeout: Duration::from_secs(30),
        };
        Self::new(&config, session)
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> Result<&str, ApiError> {
        self.base_url.as_deref().ok_or_else(config::missing_api_url)
    }

    /// Host part of the base URL, used in network error messages.
    fn host(&self) -> String {
        self.base_url.clone().unwrap_or_default()
    }

    /// Image URLs come back absolute, server-relative, or as an emoji glyph.
    pub fn resolve_image_url(&self, image_url: &str) -> String {
        let trimmed = image_url.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return trimmed.to_string();
        }
        match (trimmed.starts_with('/'), self.base_url.as_deref()) {
            (true, Some(base)) => format!("{base}{trimmed}"),
            _ => trimmed.to_string(),
        }
    }

    /// Issues an authenticated request and returns the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut req = self.request(method, path)?;
        if let Some(body) = body {
            req = req.json(body);
        }
        self.execute(req, path, true).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.call(Method::GET, path, None).await?;
        decode(value, path)
    }

    pub async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let req = self.request(method, path)?.json(body);
        self.execute(req, path, true).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.call(Method::DELETE, path, None).await.map(|_| ())
    }

    pub async fn put_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let req = self.request(Method::PUT, path)?.query(query);
        self.execute(req, path, true).await
    }

    /// Form-encoded POST for login. A 401 still drops any stored token, but
    /// it surfaces as `Rejected` (bad credentials) rather than `Unauthorized`.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url()?);
        let req = self.http.post(url).form(form);
        let value = self.execute(req, path, false).await?;
        decode(value, path)
    }

    /// Multipart upload of a single file under [`UPLOAD_FIELD`]. The
    /// content type (and boundary) is left to reqwest.
    pub async fn upload_file(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);
        let req = self.request(Method::POST, path)?.multipart(form);
        self.execute(req, path, true).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{path}", self.base_url()?);
        let mut req = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    async fn execute(
        &self,
        req: RequestBuilder,
        path: &str,
        authenticated: bool,
    ) -> Result<Value, ApiError> {
        let resp = req.send().await.map_err(|source| {
            log::error!("request failed path={path} error={source}");
            ApiError::Network {
                host: self.host(),
                source,
            }
        })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("401 from path={path}, clearing token");
            if let Err(e) = self.session.clear_token() {
                log::error!("failed to clear session after 401: {e}");
            }
            if authenticated {
                return Err(ApiError::Unauthorized);
            }
        }

        let body = read_body(resp, &self.host()).await?;

        if !status.is_success() {
            let message = error_detail(&body).unwrap_or_else(|| OPERATION_FAILED.to_string());
            log::warn!("request rejected path={path} status={status} message={message}");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("{e}; path={path} body={body}")))
    }
}

async fn read_body(resp: Response, host: &str) -> Result<String, ApiError> {
    resp.text().await.map_err(|source| ApiError::Network {
        host: host.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(value: Value, path: &str) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("{e}; path={path}")))
}

/// Human-readable `detail` from an error body. FastAPI validation errors
/// carry a list of `{ "msg": ... }` objects instead of a string.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
