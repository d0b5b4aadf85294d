//! Application state and backend orchestration.
//!
//! [`AppStore`] is the single source of truth for account-related UI state.
//! Each action forwards to the [`AccountService`], waits for the backend to
//! settle, and, for the fetch actions, replaces the matching state field
//! wholesale. Backend failures are returned to the caller exactly as the
//! bridge reported them and leave state untouched.
//!
//! State lives in `tokio::sync::watch` channels: readers take the current
//! value with the accessors or subscribe to be woken on every replacement.
//! Overlapping actions are not de-duplicated; when two fetches race, the one
//! whose response arrives last wins.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use account_desk_core::{AppStore, HttpBridge, Router};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bridge = HttpBridge::new("http://127.0.0.1:34115/bridge")?;
//! let store = AppStore::new(Arc::new(bridge), Arc::new(Router::with_default_routes()));
//!
//! store.app_init().await?;
//! store.get_accounts_default().await?;
//! println!("{:?}", store.account_items());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::bridge::{AccountService, BridgeError};
use crate::model::AccountItem;
use crate::router::{LOGIN_PATH, Location, ROOT_PATH, Router, RouterError};

/// Page requested by [`AppStore::get_accounts_default`].
pub const DEFAULT_PAGE: u32 = 1;
/// Page size requested by [`AppStore::get_accounts_default`].
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Failure of [`AppStore::app_init`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The status query failed; carried through unchanged.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// The target route is missing from the router's table.
    #[error("initial navigation failed: {0}")]
    Navigation(#[from] RouterError),
}

/// Point-in-time copy of the store's state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    /// `None` until the first successful page fetch.
    pub account_items: Option<Vec<AccountItem>>,
    /// Remaining bulk-message send quota.
    pub account_private_count: i64,
    pub app_info_status: bool,
}

/// Account state plus the actions that drive it.
pub struct AppStore {
    service: Arc<dyn AccountService>,
    router: Arc<Router>,
    account_items: watch::Sender<Option<Vec<AccountItem>>>,
    account_private_count: watch::Sender<i64>,
    // Part of the state shape; no action writes it.
    app_info_status: watch::Sender<bool>,
}

impl fmt::Debug for AppStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppStore")
            .field("router", &self.router)
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl AppStore {
    /// Creates a store in its initial state.
    #[must_use]
    pub fn new(service: Arc<dyn AccountService>, router: Arc<Router>) -> Self {
        let initial = StoreSnapshot::default();
        let (account_items, _) = watch::channel(initial.account_items);
        let (account_private_count, _) = watch::channel(initial.account_private_count);
        let (app_info_status, _) = watch::channel(initial.app_info_status);

        Self {
            service,
            router,
            account_items,
            account_private_count,
            app_info_status,
        }
    }

    /// Restores the initial state, as an application reload would.
    ///
    /// Subscribers stay attached and observe the reset.
    pub fn reset(&self) {
        let initial = StoreSnapshot::default();
        self.account_items.send_replace(initial.account_items);
        self.account_private_count
            .send_replace(initial.account_private_count);
        self.app_info_status.send_replace(initial.app_info_status);
        debug!("Store state reset");
    }

    /// The router this store navigates on initialization.
    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Current account page, `None` before the first fetch.
    #[must_use]
    pub fn account_items(&self) -> Option<Vec<AccountItem>> {
        self.account_items.borrow().clone()
    }

    /// Current remaining send quota.
    #[must_use]
    pub fn account_private_count(&self) -> i64 {
        *self.account_private_count.borrow()
    }

    #[must_use]
    pub fn app_info_status(&self) -> bool {
        *self.app_info_status.borrow()
    }

    /// Copies all state fields at once.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            account_items: self.account_items(),
            account_private_count: self.account_private_count(),
            app_info_status: self.app_info_status(),
        }
    }

    /// Wakes on every replacement of the account page.
    #[must_use]
    pub fn subscribe_accounts(&self) -> watch::Receiver<Option<Vec<AccountItem>>> {
        self.account_items.subscribe()
    }

    /// Wakes on every replacement of the send quota.
    #[must_use]
    pub fn subscribe_private_count(&self) -> watch::Receiver<i64> {
        self.account_private_count.subscribe()
    }

    /// Fetches one page of accounts and replaces the account list with it.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged; the account list is not touched.
    pub async fn get_accounts(&self, page: u32, page_size: u32) -> Result<(), BridgeError> {
        debug!(page, page_size, "Fetching account page");
        let items = self.service.account_page_items(page, page_size).await?;
        debug!(count = items.len(), "Account page loaded");
        self.account_items.send_replace(Some(items));
        Ok(())
    }

    /// [`AppStore::get_accounts`] with [`DEFAULT_PAGE`] and [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Same as [`AppStore::get_accounts`].
    pub async fn get_accounts_default(&self) -> Result<(), BridgeError> {
        self.get_accounts(DEFAULT_PAGE, DEFAULT_PAGE_SIZE).await
    }

    /// Asks the backend to send a verification code to `phone`.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged.
    pub async fn account_send_code(&self, phone: &str) -> Result<(), BridgeError> {
        debug!(phone, "Requesting verification code");
        self.service.account_send_code(phone).await
    }

    /// Confirms a login (or adds a new account) with the received code and
    /// the account's two-step password.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged.
    pub async fn account_login(
        &self,
        phone: &str,
        code: &str,
        password: &str,
    ) -> Result<(), BridgeError> {
        debug!(phone, "Confirming login");
        self.service.account_confirm(phone, code, password).await
    }

    /// Deletes the account with `id`.
    ///
    /// The account list is not updated; callers re-fetch the page.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged.
    pub async fn account_delete(&self, id: u64) -> Result<(), BridgeError> {
        debug!(id, "Deleting account");
        self.service.account_delete(id).await
    }

    /// Asks the backend to send `full_text` to each of `usernames`, with
    /// `keyword` linked to `link_url`.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged.
    pub async fn account_send_message(
        &self,
        full_text: &str,
        keyword: &str,
        link_url: &str,
        usernames: &[String],
    ) -> Result<(), BridgeError> {
        debug!(
            keyword,
            link_url,
            recipients = usernames.len(),
            "Requesting private message batch"
        );
        self.service
            .account_private_message(full_text, keyword, link_url, usernames)
            .await
    }

    /// Fetches the remaining send quota and replaces the stored value.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged; the stored quota is not touched.
    pub async fn get_account_private_count(&self) -> Result<(), BridgeError> {
        let count = self.service.account_private_message_count().await?;
        debug!(count, "Private message quota loaded");
        self.account_private_count.send_replace(count);
        Ok(())
    }

    /// Searches accounts by phone number.
    ///
    /// The matches are handed back to the caller; store state is not touched.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged.
    pub async fn search_phone_account(&self, phone: &str) -> Result<Vec<AccountItem>, BridgeError> {
        debug!(phone, "Searching accounts by phone");
        self.service.account_search_phone(phone).await
    }

    /// Activates the backend session for `phone`.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged.
    pub async fn trigger_login(&self, phone: &str) -> Result<(), BridgeError> {
        debug!(phone, "Switching active session");
        self.service.account_switch(phone).await
    }

    /// Pushes the backend's `appID`/`appHash` configuration.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged.
    pub async fn set_app_info_init(&self, app_id: &str, app_hash: &str) -> Result<(), BridgeError> {
        debug!(app_id, "Setting app configuration");
        self.service.set_app_info(app_id, app_hash).await
    }

    /// Asks the backend whether `appID`/`appHash` are configured.
    ///
    /// The answer is returned, not stored.
    ///
    /// # Errors
    ///
    /// Returns the bridge's error unchanged.
    pub async fn get_app_info_status(&self) -> Result<bool, BridgeError> {
        self.service.get_app_info_status().await
    }

    /// Routes to `/` when the backend is configured and to `/login` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Bridge`] when the status query fails (no
    /// navigation happens) and [`StoreError::Navigation`] when the target
    /// route is missing from the router's table.
    pub async fn app_init(&self) -> Result<Location, StoreError> {
        let configured = self.get_app_info_status().await?;
        let target = if configured { ROOT_PATH } else { LOGIN_PATH };
        info!(configured, target, "Selecting initial route");
        Ok(self.router.push(target)?)
    }
}
