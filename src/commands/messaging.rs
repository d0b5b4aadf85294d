//! Private message handlers.

use account_desk_core::AppStore;
use anyhow::{Context, Result, bail};
use tracing::info;

pub async fn run_send_message_command(
    store: &AppStore,
    text: &str,
    keyword: &str,
    link: &str,
    usernames: &[String],
) -> Result<()> {
    let recipients: Vec<String> = usernames
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if recipients.is_empty() {
        bail!("No recipient usernames given");
    }

    store
        .account_send_message(text, keyword, link, &recipients)
        .await
        .context("Failed to send private messages")?;

    info!(recipients = recipients.len(), "Private message batch accepted");
    println!("Message batch queued for {} recipient(s).", recipients.len());
    Ok(())
}

pub async fn run_quota_command(store: &AppStore) -> Result<()> {
    store
        .get_account_private_count()
        .await
        .context("Failed to load private message quota")?;
    println!("remaining = {}", store.account_private_count());
    Ok(())
}
