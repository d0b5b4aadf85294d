//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

use account_desk_core::DEFAULT_PAGE;

/// Manage messaging accounts through a running account-desk backend.
///
/// Every command is one round trip to the backend bridge; the command prints
/// the result and exits.
#[derive(Parser, Debug)]
#[command(name = "account-desk")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Backend bridge base URL (overrides ACCOUNT_DESK_BRIDGE_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub bridge_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick the start screen: home when the backend is configured, login otherwise
    Init,
    /// Report whether the backend has its app ID and hash configured
    Status,
    /// Store the backend's app ID and app hash
    Configure {
        #[arg(long)]
        app_id: String,
        #[arg(long)]
        app_hash: String,
    },
    /// List one page of accounts
    Accounts {
        /// 1-based page number
        #[arg(
            long,
            default_value_t = DEFAULT_PAGE,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        page: u32,
        /// Rows per page (1-500, default from config or 10)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=500))]
        page_size: Option<u32>,
    },
    /// Request a verification code for a phone number
    SendCode { phone: String },
    /// Confirm a login with the received code
    Login {
        phone: String,
        #[arg(long)]
        code: String,
        /// Two-step verification password, empty when not enabled
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Delete an account by ID
    Delete { id: u64 },
    /// Send a private message batch to a list of usernames
    SendMessage {
        /// Full message text
        #[arg(long)]
        text: String,
        /// Substring of the text rendered as a link
        #[arg(long)]
        keyword: String,
        /// Target of the keyword link
        #[arg(long)]
        link: String,
        /// Comma-separated recipient usernames
        #[arg(long, value_delimiter = ',', required = true, num_args = 1..)]
        usernames: Vec<String>,
    },
    /// Show the remaining private message quota
    Quota,
    /// Search accounts by phone number
    Search { phone: String },
    /// Activate the backend session of an account
    Switch { phone: String },
    /// Print the navigation route table
    Routes,
}
