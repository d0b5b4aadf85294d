//! JSON-over-HTTP bridge to the backend process.
//!
//! Each backend function is reached at `POST {base_url}/{Function}`. The
//! request body is a JSON array holding the arguments in the function's
//! declared order. A 2xx response carries the JSON result (`null` or an empty
//! body for functions without one); any other status is a rejection whose
//! body is the backend's error message.
//!
//! Only connection setup is bounded by a timeout. Once the request is sent the
//! caller waits for the backend to settle the call, however long that takes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};
use url::Url;

use super::{AccountService, BridgeError, BridgeMethod};
use crate::model::AccountItem;

/// Base URL used when neither the command line nor the config file names one.
pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:34115/bridge";

/// Connection setup timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP implementation of [`AccountService`].
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpBridge {
    client: Client,
    base_url: Url,
}

impl HttpBridge {
    /// Creates a bridge rooted at `base_url` with the default connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidUrl`] when `base_url` is not an absolute
    /// http(s) URL, or [`BridgeError::ClientBuild`] when the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, BridgeError> {
        Self::with_connect_timeout(
            base_url,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    /// Creates a bridge rooted at `base_url` with an explicit connect timeout.
    ///
    /// # Errors
    ///
    /// Same as [`HttpBridge::new`].
    pub fn with_connect_timeout(
        base_url: &str,
        connect_timeout: Duration,
    ) -> Result<Self, BridgeError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|source| BridgeError::ClientBuild { source })?;
        Ok(Self { client, base_url })
    }

    /// Returns the normalized base URL (always ending in `/`).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, method: BridgeMethod) -> Result<Url, BridgeError> {
        self.base_url
            .join(method.as_str())
            .map_err(|error| BridgeError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: error.to_string(),
            })
    }

    #[instrument(skip_all, fields(method = %method))]
    async fn call(&self, method: BridgeMethod, args: Value) -> Result<Value, BridgeError> {
        let url = self.endpoint(method)?;
        debug!(%url, "Calling backend function");

        let response = self
            .client
            .post(url)
            .json(&args)
            .send()
            .await
            .map_err(|source| BridgeError::Transport { method, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| BridgeError::Transport { method, source })?;

        if !status.is_success() {
            let message = rejection_message(status, &body);
            warn!(status = status.as_u16(), %message, "Backend rejected call");
            return Err(BridgeError::Rejected {
                method,
                status: Some(status.as_u16()),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|source| BridgeError::Decode { method, source })
    }

    async fn call_decoded<T: DeserializeOwned>(
        &self,
        method: BridgeMethod,
        args: Value,
    ) -> Result<T, BridgeError> {
        let value = self.call(method, args).await?;
        serde_json::from_value(value).map_err(|source| BridgeError::Decode { method, source })
    }

    async fn call_items(
        &self,
        method: BridgeMethod,
        args: Value,
    ) -> Result<Vec<AccountItem>, BridgeError> {
        // An empty result may arrive as `null`.
        let items: Option<Vec<AccountItem>> = self.call_decoded(method, args).await?;
        Ok(items.unwrap_or_default())
    }

    async fn call_unit(&self, method: BridgeMethod, args: Value) -> Result<(), BridgeError> {
        self.call(method, args).await.map(|_| ())
    }
}

#[async_trait]
impl AccountService for HttpBridge {
    async fn account_page_items(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<AccountItem>, BridgeError> {
        self.call_items(BridgeMethod::AccountPageItems, json!([page, page_size]))
            .await
    }

    async fn account_send_code(&self, phone: &str) -> Result<(), BridgeError> {
        self.call_unit(BridgeMethod::AccountSendCode, json!([phone]))
            .await
    }

    async fn account_confirm(
        &self,
        phone: &str,
        code: &str,
        password: &str,
    ) -> Result<(), BridgeError> {
        self.call_unit(BridgeMethod::AccountConfirm, json!([phone, code, password]))
            .await
    }

    async fn account_delete(&self, id: u64) -> Result<(), BridgeError> {
        self.call_unit(BridgeMethod::AccountDelete, json!([id])).await
    }

    async fn account_private_message(
        &self,
        full_text: &str,
        keyword: &str,
        link_url: &str,
        usernames: &[String],
    ) -> Result<(), BridgeError> {
        self.call_unit(
            BridgeMethod::AccountPrivateMessage,
            json!([full_text, keyword, link_url, usernames]),
        )
        .await
    }

    async fn account_private_message_count(&self) -> Result<i64, BridgeError> {
        self.call_decoded(BridgeMethod::AccountPrivateMessageCount, json!([]))
            .await
    }

    async fn account_search_phone(&self, phone: &str) -> Result<Vec<AccountItem>, BridgeError> {
        self.call_items(BridgeMethod::AccountSearchPhone, json!([phone]))
            .await
    }

    async fn account_switch(&self, phone: &str) -> Result<(), BridgeError> {
        self.call_unit(BridgeMethod::AccountSwitch, json!([phone]))
            .await
    }

    async fn set_app_info(&self, app_id: &str, app_hash: &str) -> Result<(), BridgeError> {
        self.call_unit(BridgeMethod::SetAppInfo, json!([app_id, app_hash]))
            .await
    }

    async fn get_app_info_status(&self) -> Result<bool, BridgeError> {
        self.call_decoded(BridgeMethod::GetAppInfoStatus, json!([]))
            .await
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, BridgeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BridgeError::InvalidUrl {
            url: raw.to_string(),
            reason: "URL is empty".to_string(),
        });
    }

    let mut url = Url::parse(trimmed).map_err(|error| BridgeError::InvalidUrl {
        url: trimmed.to_string(),
        reason: error.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(BridgeError::InvalidUrl {
                url: trimmed.to_string(),
                reason: format!("scheme '{scheme}' is not supported, use http or https"),
            });
        }
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Extracts a readable message from a rejection body.
///
/// Accepts a bare text body, a JSON string, or a JSON object carrying
/// `error` or `message`; falls back to the status reason.
fn rejection_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(message)) => message,
        Ok(Value::Object(object)) => ["error", "message"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map_or_else(|| trimmed.to_string(), str::to_string),
        _ => trimmed.to_string(),
    }
}
