//! CLI command handlers.

mod accounts;
mod messaging;
mod routes;
mod session;

pub use accounts::{run_accounts_command, run_delete_command, run_search_command};
pub use messaging::{run_quota_command, run_send_message_command};
pub use routes::run_routes_command;
pub use session::{
    run_configure_command, run_init_command, run_login_command, run_send_code_command,
    run_status_command, run_switch_command,
};

use account_desk_core::AccountItem;
use anyhow::{Context, Result};

/// Renders accounts as pretty JSON, one array per call.
pub(crate) fn render_accounts_json(items: &[AccountItem]) -> Result<String> {
    serde_json::to_string_pretty(items).context("Failed to render accounts as JSON")
}
