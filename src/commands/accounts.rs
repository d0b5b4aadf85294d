//! Account list handlers: page, search, delete.

use account_desk_core::AppStore;
use anyhow::{Context, Result};
use tracing::info;

use super::render_accounts_json;

pub async fn run_accounts_command(store: &AppStore, page: u32, page_size: u32) -> Result<()> {
    store
        .get_accounts(page, page_size)
        .await
        .with_context(|| format!("Failed to load account page {page}"))?;

    let items = store.account_items().unwrap_or_default();
    info!(page, page_size, count = items.len(), "Accounts loaded");
    println!("{}", render_accounts_json(&items)?);
    Ok(())
}

pub async fn run_search_command(store: &AppStore, phone: &str) -> Result<()> {
    let matches = store
        .search_phone_account(phone)
        .await
        .with_context(|| format!("Failed to search accounts for '{phone}'"))?;

    if matches.is_empty() {
        println!("No accounts match '{phone}'.");
        return Ok(());
    }
    println!("{}", render_accounts_json(&matches)?);
    Ok(())
}

pub async fn run_delete_command(store: &AppStore, id: u64) -> Result<()> {
    store
        .account_delete(id)
        .await
        .with_context(|| format!("Failed to delete account {id}"))?;
    println!("Deleted account {id}.");
    Ok(())
}
