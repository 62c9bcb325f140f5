//! REST implementation of [`LinkBackend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use ats_core::config::backend::{BackendConfig, BodyCasing};
use ats_core::error::{AppError, ErrorKind};
use ats_core::result::AppResult;
use ats_entity::link::{
    CreateLinkRequest, LinkId, LinkListResponse, LinkPatch, LinkRecord, LinkScope,
    UpdatePermissionRequest,
};
use ats_entity::permission::PermissionLevel;

use crate::backend::LinkBackend;

const USER_AGENT: &str = concat!("campus-ats/", env!("CARGO_PKG_VERSION"));
const LINKS_PATH: &str = "links";
/// Longest backend error body quoted in an error message.
const MAX_DETAIL_CHARS: usize = 200;

/// Talks to `{base_url}/links` over HTTP with an optional bearer token.
#[derive(Debug, Clone)]
pub struct HttpLinkBackend {
    http: Client,
    base_url: Url,
    access_token: Option<String>,
    casing: BodyCasing,
}

impl HttpLinkBackend {
    /// Build a backend client from configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            AppError::configuration(format!("Invalid backend.base_url '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "backend.base_url '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url,
            access_token: config
                .access_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
            casing: config.request_casing,
        })
    }

    /// Build `{base_url}/{segments...}`.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Serialize a request body with the configured key casing.
    fn body<T: Serialize>(&self, body: &T) -> AppResult<Value> {
        let value = serde_json::to_value(body)?;
        Ok(match (self.casing, value) {
            (BodyCasing::CamelCase, Value::Object(map)) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (camel_case(&key), value))
                    .collect(),
            ),
            (_, value) => value,
        })
    }

    /// Send a request and decode its JSON body; `None` for an empty body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> AppResult<Option<T>> {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Network, format!("{action}: request failed"), e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Network,
                format!("{action}: failed to read response body"),
                e,
            )
        })?;

        debug!(action, status = status.as_u16(), bytes = body.len(), "Backend responded");

        if !status.is_success() {
            return Err(AppError::backend_status(
                status.as_u16(),
                format!(
                    "{action}: backend returned {status}: {}",
                    error_detail(&String::from_utf8_lossy(&body))
                ),
            ));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body).map(Some).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("{action}: unexpected response shape: {e}"),
                e,
            )
        })
    }

    async fn send_required<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> AppResult<T> {
        self.send(request, action).await?.ok_or_else(|| {
            AppError::new(
                ErrorKind::Serialization,
                format!("{action}: backend returned an empty body"),
            )
        })
    }
}

#[async_trait]
impl LinkBackend for HttpLinkBackend {
    async fn list_links(&self, scope: Option<&LinkScope>) -> AppResult<LinkListResponse> {
        let mut url = self.endpoint(&[LINKS_PATH]);
        if let Some(scope) = scope {
            url.query_pairs_mut()
                .append_pair("scope", &scope.query_value());
        }
        debug!(%url, "Listing shareable links");
        self.send_required(self.http.get(url), "list links").await
    }

    async fn create_link(&self, request: &CreateLinkRequest) -> AppResult<LinkRecord> {
        let url = self.endpoint(&[LINKS_PATH]);
        debug!(%url, scope = %request.scope, "Creating shareable link");
        let body = self.body(request)?;
        self.send_required(self.http.post(url).json(&body), "create link")
            .await
    }

    async fn update_permission(
        &self,
        id: &LinkId,
        level: PermissionLevel,
    ) -> AppResult<LinkPatch> {
        let url = self.endpoint(&[LINKS_PATH, id.as_str()]);
        let body = self.body(&UpdatePermissionRequest {
            permission_level: level,
        })?;
        debug!(%url, %level, "Updating link permission");
        Ok(self
            .send(self.http.patch(url).json(&body), "update link permission")
            .await?
            .unwrap_or_default())
    }
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Pull a readable message out of a backend error body.
///
/// Understands `{"detail": ...}`, `{"error": ...}` and `{"message": ...}`;
/// anything else is quoted verbatim, truncated.
fn error_detail(body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for key in ["detail", "error", "message"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no details".to_string();
    }
    trimmed.chars().take(MAX_DETAIL_CHARS).collect()
}
