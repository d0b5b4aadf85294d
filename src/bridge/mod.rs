//! Typed access to the backend's account functions.
//!
//! The backend exposes a flat set of asynchronous functions. This module
//! models them as the [`AccountService`] trait, one method per function, so the
//! store can run against the real bridge or against an in-memory double.
//!
//! # Architecture
//!
//! - [`AccountService`] - Async trait with one method per backend function
//! - [`BridgeMethod`] - The backend functions and their wire names
//! - [`HttpBridge`] - JSON-over-HTTP implementation of [`AccountService`]
//! - [`BridgeError`] - Failure of a single call
//!
//! Argument order is part of each function's contract; implementations must
//! forward arguments positionally and unchanged.

mod error;
mod http;

pub use error::BridgeError;
pub use http::{DEFAULT_BRIDGE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, HttpBridge};

use std::fmt;

use async_trait::async_trait;

use crate::model::AccountItem;

/// Backend functions reachable over the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeMethod {
    AccountPageItems,
    AccountSendCode,
    AccountConfirm,
    AccountDelete,
    AccountPrivateMessage,
    AccountPrivateMessageCount,
    AccountSearchPhone,
    AccountSwitch,
    SetAppInfo,
    GetAppInfoStatus,
}

impl BridgeMethod {
    /// All backend functions, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::AccountPageItems,
        Self::AccountSendCode,
        Self::AccountConfirm,
        Self::AccountDelete,
        Self::AccountPrivateMessage,
        Self::AccountPrivateMessageCount,
        Self::AccountSearchPhone,
        Self::AccountSwitch,
        Self::SetAppInfo,
        Self::GetAppInfoStatus,
    ];

    /// Returns the function name the backend binds.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountPageItems => "AccountPageItems",
            Self::AccountSendCode => "AccountSendCode",
            Self::AccountConfirm => "AccountConfirm",
            Self::AccountDelete => "AccountDelete",
            Self::AccountPrivateMessage => "AccountPrivateMessage",
            Self::AccountPrivateMessageCount => "AccountPrivateMessageCount",
            Self::AccountSearchPhone => "AccountSearchPhone",
            Self::AccountSwitch => "AccountSwitch",
            Self::SetAppInfo => "SetAppInfo",
            Self::GetAppInfoStatus => "GetAppInfoStatus",
        }
    }
}

impl fmt::Display for BridgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The backend's account-management surface.
///
/// Every method suspends until the backend settles the call. Implementations
/// do not retry and do not reinterpret failures.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// `AccountPageItems(page, pageSize)`: one page of accounts, newest first.
    async fn account_page_items(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<AccountItem>, BridgeError>;

    /// `AccountSendCode(phone)`: asks the backend to deliver a verification code.
    async fn account_send_code(&self, phone: &str) -> Result<(), BridgeError>;

    /// `AccountConfirm(phone, code, password)`: completes a login.
    async fn account_confirm(
        &self,
        phone: &str,
        code: &str,
        password: &str,
    ) -> Result<(), BridgeError>;

    /// `AccountDelete(id)`.
    async fn account_delete(&self, id: u64) -> Result<(), BridgeError>;

    /// `AccountPrivateMessage(full_text, keyword, link_url, usernames)`.
    async fn account_private_message(
        &self,
        full_text: &str,
        keyword: &str,
        link_url: &str,
        usernames: &[String],
    ) -> Result<(), BridgeError>;

    /// `AccountPrivateMessageCount()`: remaining send quota.
    async fn account_private_message_count(&self) -> Result<i64, BridgeError>;

    /// `AccountSearchPhone(phone)`.
    async fn account_search_phone(&self, phone: &str) -> Result<Vec<AccountItem>, BridgeError>;

    /// `AccountSwitch(phone)`: activates the session for `phone`.
    async fn account_switch(&self, phone: &str) -> Result<(), BridgeError>;

    /// `SetAppInfo(appID, appHash)`.
    async fn set_app_info(&self, app_id: &str, app_hash: &str) -> Result<(), BridgeError>;

    /// `GetAppInfoStatus()`: whether `appID`/`appHash` are configured.
    async fn get_app_info_status(&self) -> Result<bool, BridgeError>;
}
