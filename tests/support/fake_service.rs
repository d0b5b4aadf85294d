//! In-memory `AccountService` that records calls and replays scripted results.

use std::collections::HashMap;
use std::sync::Mutex;

use account_desk_core::{AccountItem, AccountService, BridgeError, BridgeMethod};
use async_trait::async_trait;
use tokio::sync::oneshot;

/// One recorded backend call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PageItems {
        page: u32,
        page_size: u32,
    },
    SendCode(String),
    Confirm {
        phone: String,
        code: String,
        password: String,
    },
    Delete(u64),
    PrivateMessage {
        full_text: String,
        keyword: String,
        link_url: String,
        usernames: Vec<String>,
    },
    PrivateMessageCount,
    SearchPhone(String),
    Switch(String),
    SetAppInfo {
        app_id: String,
        app_hash: String,
    },
    GetAppInfoStatus,
}

#[derive(Debug, Default)]
pub struct FakeAccountService {
    calls: Mutex<Vec<Call>>,
    pages: Mutex<HashMap<u32, Vec<AccountItem>>>,
    page_gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    private_count: Mutex<i64>,
    app_info_status: Mutex<bool>,
    search_results: Mutex<Vec<AccountItem>>,
    failing: Mutex<HashMap<BridgeMethod, String>>,
}

impl FakeAccountService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: u32, items: Vec<AccountItem>) -> Self {
        self.pages.lock().unwrap().insert(page, items);
        self
    }

    /// Holds `AccountPageItems` for `page` until the returned sender fires.
    pub fn gate_page(&self, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.page_gates.lock().unwrap().insert(page, rx);
        tx
    }

    pub fn with_private_count(self, count: i64) -> Self {
        *self.private_count.lock().unwrap() = count;
        self
    }

    pub fn with_app_info_status(self, configured: bool) -> Self {
        *self.app_info_status.lock().unwrap() = configured;
        self
    }

    pub fn with_search_results(self, items: Vec<AccountItem>) -> Self {
        *self.search_results.lock().unwrap() = items;
        self
    }

    pub fn failing(self, method: BridgeMethod, message: &str) -> Self {
        self.set_failing(method, message);
        self
    }

    /// Makes every later call to `method` reject with `message`.
    pub fn set_failing(&self, method: BridgeMethod, message: &str) {
        self.failing
            .lock()
            .unwrap()
            .insert(method, message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, method: BridgeMethod) -> Result<(), BridgeError> {
        match self.failing.lock().unwrap().get(&method) {
            Some(message) => Err(BridgeError::rejected(method, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccountService for FakeAccountService {
    async fn account_page_items(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<AccountItem>, BridgeError> {
        self.record(Call::PageItems { page, page_size });
        let gate = self.page_gates.lock().unwrap().remove(&page);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.check(BridgeMethod::AccountPageItems)?;
        Ok(self
            .pages
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .unwrap_or_default())
    }

    async fn account_send_code(&self, phone: &str) -> Result<(), BridgeError> {
        self.record(Call::SendCode(phone.to_string()));
        self.check(BridgeMethod::AccountSendCode)
    }

    async fn account_confirm(
        &self,
        phone: &str,
        code: &str,
        password: &str,
    ) -> Result<(), BridgeError> {
        self.record(Call::Confirm {
            phone: phone.to_string(),
            code: code.to_string(),
            password: password.to_string(),
        });
        self.check(BridgeMethod::AccountConfirm)
    }

    async fn account_delete(&self, id: u64) -> Result<(), BridgeError> {
        self.record(Call::Delete(id));
        self.check(BridgeMethod::AccountDelete)
    }

    async fn account_private_message(
        &self,
        full_text: &str,
        keyword: &str,
        link_url: &str,
        usernames: &[String],
    ) -> Result<(), BridgeError> {
        self.record(Call::PrivateMessage {
            full_text: full_text.to_string(),
            keyword: keyword.to_string(),
            link_url: link_url.to_string(),
            usernames: usernames.to_vec(),
        });
        self.check(BridgeMethod::AccountPrivateMessage)
    }

    async fn account_private_message_count(&self) -> Result<i64, BridgeError> {
        self.record(Call::PrivateMessageCount);
        self.check(BridgeMethod::AccountPrivateMessageCount)?;
        Ok(*self.private_count.lock().unwrap())
    }

    async fn account_search_phone(&self, phone: &str) -> Result<Vec<AccountItem>, BridgeError> {
        self.record(Call::SearchPhone(phone.to_string()));
        self.check(BridgeMethod::AccountSearchPhone)?;
        Ok(self.search_results.lock().unwrap().clone())
    }

    async fn account_switch(&self, phone: &str) -> Result<(), BridgeError> {
        self.record(Call::Switch(phone.to_string()));
        self.check(BridgeMethod::AccountSwitch)
    }

    async fn set_app_info(&self, app_id: &str, app_hash: &str) -> Result<(), BridgeError> {
        self.record(Call::SetAppInfo {
            app_id: app_id.to_string(),
            app_hash: app_hash.to_string(),
        });
        self.check(BridgeMethod::SetAppInfo)
    }

    async fn get_app_info_status(&self) -> Result<bool, BridgeError> {
        self.record(Call::GetAppInfoStatus);
        self.check(BridgeMethod::GetAppInfoStatus)?;
        Ok(*self.app_info_status.lock().unwrap())
    }
}

pub fn account(id: u64, phone: &str) -> AccountItem {
    AccountItem {
        id: Some(id),
        phone: Some(phone.to_string()),
        name: Some(format!("account-{id}")),
        is_premium: Some(false),
        is_active: Some(true),
        created_at: Some("2024-01-01".to_string()),
    }
}
