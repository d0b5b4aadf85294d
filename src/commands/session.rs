//! Backend setup and login handlers.

use account_desk_core::{AppStore, View};
use anyhow::{Context, Result};
use tracing::info;

pub async fn run_init_command(store: &AppStore) -> Result<()> {
    let location = store
        .app_init()
        .await
        .context("Failed to select the start screen")?;
    let view = location.view().map_or_else(|| "-".to_string(), |view| view.to_string());
    println!("route = {}", location.href());
    println!("view = {view}");
    if location.view() == Some(View::Login) {
        println!("Backend is not configured yet; run `account-desk configure`.");
    }
    Ok(())
}

pub async fn run_status_command(store: &AppStore) -> Result<()> {
    let configured = store
        .get_app_info_status()
        .await
        .context("Failed to query backend configuration status")?;
    println!("configured = {configured}");
    Ok(())
}

pub async fn run_configure_command(store: &AppStore, app_id: &str, app_hash: &str) -> Result<()> {
    store
        .set_app_info_init(app_id, app_hash)
        .await
        .context("Failed to store app configuration")?;
    info!(app_id, "App configuration stored");
    println!("App configuration saved.");
    Ok(())
}

pub async fn run_send_code_command(store: &AppStore, phone: &str) -> Result<()> {
    store
        .account_send_code(phone)
        .await
        .with_context(|| format!("Failed to request a verification code for '{phone}'"))?;
    println!("Verification code sent to {phone}.");
    Ok(())
}

pub async fn run_login_command(
    store: &AppStore,
    phone: &str,
    code: &str,
    password: &str,
) -> Result<()> {
    store
        .account_login(phone, code, password)
        .await
        .with_context(|| format!("Failed to log in '{phone}'"))?;
    println!("Logged in {phone}.");
    Ok(())
}

pub async fn run_switch_command(store: &AppStore, phone: &str) -> Result<()> {
    store
        .trigger_login(phone)
        .await
        .with_context(|| format!("Failed to switch to '{phone}'"))?;
    println!("Active session: {phone}.");
    Ok(())
}
