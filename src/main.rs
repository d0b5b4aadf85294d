//! CLI entry point for account-desk.

use std::sync::Arc;

use account_desk_core::{AppStore, DEFAULT_PAGE_SIZE, HttpBridge, Router};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

mod app_config;
mod cli;
mod commands;

use app_config::{Settings, bridge_url_from_env, load_default_file_config, resolve_settings};
use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let loaded_config = load_default_file_config()?;
    let settings = resolve_settings(
        &args,
        bridge_url_from_env(),
        loaded_config.config.as_ref(),
    );

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");
    if let Some(path) = &loaded_config.path {
        debug!(
            path = %path.display(),
            loaded = loaded_config.config.is_some(),
            "Config file resolved"
        );
    }

    let Some(command) = args.command else {
        info!("No command given. Run `account-desk --help` to list commands.");
        info!("Example: account-desk accounts --page 1");
        return Ok(());
    };

    run_command(command, &settings, Arc::new(Router::with_default_routes())).await
}

fn build_store(settings: &Settings, router: Arc<Router>) -> Result<AppStore> {
    let bridge = HttpBridge::with_connect_timeout(&settings.bridge_url, settings.connect_timeout)
        .with_context(|| format!("Invalid bridge URL '{}'", settings.bridge_url))?;
    debug!(bridge_url = %bridge.base_url(), "Backend bridge ready");
    Ok(AppStore::new(Arc::new(bridge), router))
}

/// Dispatches `command`; the bridge is only built for commands that reach the backend.
async fn run_command(command: Command, settings: &Settings, router: Arc<Router>) -> Result<()> {
    let store = || build_store(settings, Arc::clone(&router));
    match command {
        Command::Routes => {
            commands::run_routes_command(&router);
            Ok(())
        }
        Command::Init => commands::run_init_command(&store()?).await,
        Command::Status => commands::run_status_command(&store()?).await,
        Command::Configure { app_id, app_hash } => {
            commands::run_configure_command(&store()?, &app_id, &app_hash).await
        }
        Command::Accounts { page, page_size } => {
            let page_size = page_size
                .or(settings.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE);
            commands::run_accounts_command(&store()?, page, page_size).await
        }
        Command::SendCode { phone } => commands::run_send_code_command(&store()?, &phone).await,
        Command::Login {
            phone,
            code,
            password,
        } => commands::run_login_command(&store()?, &phone, &code, &password).await,
        Command::Delete { id } => commands::run_delete_command(&store()?, id).await,
        Command::SendMessage {
            text,
            keyword,
            link,
            usernames,
        } => {
            commands::run_send_message_command(&store()?, &text, &keyword, &link, &usernames)
                .await
        }
        Command::Quota => commands::run_quota_command(&store()?).await,
        Command::Search { phone } => commands::run_search_command(&store()?, &phone).await,
        Command::Switch { phone } => commands::run_switch_command(&store()?, &phone).await,
    }
}
