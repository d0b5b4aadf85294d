//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use account_desk_core::DEFAULT_BRIDGE_URL;
use account_desk_core::bridge::DEFAULT_CONNECT_TIMEOUT_SECS;
use anyhow::{Context, Result, bail};

use crate::cli::Args;

/// Environment variable overriding the configured bridge URL.
pub const BRIDGE_URL_ENV: &str = "ACCOUNT_DESK_BRIDGE_URL";

const CONFIG_DIR_NAME: &str = "account-desk";
const CONFIG_FILE_NAME: &str = "config.toml";
const MAX_PAGE_SIZE: u64 = 500;
const MAX_CONNECT_TIMEOUT_SECS: u64 = 3600;

/// TOML-backed file configuration for account-desk defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Backend bridge base URL.
    pub bridge_url: Option<String>,
    /// Default page size for `accounts`.
    pub page_size: Option<u32>,
    /// Bridge connection setup timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(page_size) = self.page_size
            && !(1..=MAX_PAGE_SIZE).contains(&u64::from(page_size))
        {
            bail!(
                "Invalid config value for `page_size`: {page_size}. \
                 Expected range: 1..={MAX_PAGE_SIZE}"
            );
        }

        if let Some(timeout) = self.connect_timeout_secs
            && !(1..=MAX_CONNECT_TIMEOUT_SECS).contains(&timeout)
        {
            bail!(
                "Invalid config value for `connect_timeout_secs`: {timeout}. \
                 Expected range: 1..={MAX_CONNECT_TIMEOUT_SECS}"
            );
        }

        if let Some(bridge_url) = &self.bridge_url
            && bridge_url.trim().is_empty()
        {
            bail!("Invalid config value for `bridge_url`: must not be empty");
        }

        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl std::str::FromStr for VerbositySetting {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "default" => Ok(Self::Default),
            "verbose" => Ok(Self::Verbose),
            "quiet" => Ok(Self::Quiet),
            "debug" => Ok(Self::Debug),
            _ => bail!("Expected one of: default, verbose, quiet, debug; got '{value}'"),
        }
    }
}

impl VerbositySetting {
    /// Returns the `EnvFilter` directive this setting maps to.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Effective settings after merging CLI, environment, file config and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bridge_url: String,
    pub page_size: Option<u32>,
    pub connect_timeout: Duration,
    pub log_level: &'static str,
}

/// Merges settings sources.
///
/// Bridge URL priority: `--bridge-url` > environment > config file > default.
/// Log level priority: `-q` > `-v`/`-vv` > config verbosity > info
/// (`RUST_LOG` is applied later by the subscriber).
#[must_use]
pub fn resolve_settings(
    args: &Args,
    env_bridge_url: Option<String>,
    file_config: Option<&FileConfig>,
) -> Settings {
    let bridge_url = args
        .bridge_url
        .clone()
        .or_else(|| env_bridge_url.filter(|value| !value.trim().is_empty()))
        .or_else(|| file_config.and_then(|config| config.bridge_url.clone()))
        .unwrap_or_else(|| DEFAULT_BRIDGE_URL.to_string());

    let connect_timeout = Duration::from_secs(
        file_config
            .and_then(|config| config.connect_timeout_secs)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
    );

    let log_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_config
                .and_then(|config| config.verbosity)
                .unwrap_or(VerbositySetting::Default)
                .log_level(),
            1 => "debug",
            _ => "trace",
        }
    };

    Settings {
        bridge_url,
        page_size: file_config.and_then(|config| config.page_size),
        connect_timeout,
        log_level,
    }
}

/// Reads the bridge URL override from the environment.
#[must_use]
pub fn bridge_url_from_env() -> Option<String> {
    env::var(BRIDGE_URL_ENV).ok()
}

/// Resolves the config file location.
///
/// `$XDG_CONFIG_HOME/account-desk/config.toml`, falling back to
/// `$HOME/.config/account-desk/config.toml`. Empty variables count as unset.
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    let dir_from = |name: &str| {
        env::var_os(name)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    };
    let base = dir_from("XDG_CONFIG_HOME")
        .or_else(|| dir_from("HOME").map(|home| home.join(".config")))?;
    Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads config from the default path; a missing file is not an error.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(file) if file.exists() => Some(read_config_file(file)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

/// Keys accepted in the config file.
#[derive(Debug, Clone, Copy)]
enum ConfigKey {
    BridgeUrl,
    PageSize,
    ConnectTimeoutSecs,
    Verbosity,
}

impl ConfigKey {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "bridge_url" => Some(Self::BridgeUrl),
            "page_size" => Some(Self::PageSize),
            "connect_timeout_secs" => Some(Self::ConnectTimeoutSecs),
            "verbosity" => Some(Self::Verbosity),
            _ => None,
        }
    }

    fn apply(self, cfg: &mut FileConfig, value: &str) -> Result<()> {
        match self {
            Self::BridgeUrl => cfg.bridge_url = Some(quoted(value)?.to_string()),
            Self::PageSize => cfg.page_size = Some(u32::try_from(unsigned(value)?)?),
            Self::ConnectTimeoutSecs => cfg.connect_timeout_secs = Some(unsigned(value)?),
            Self::Verbosity => cfg.verbosity = Some(quoted(value)?.parse()?),
        }
        Ok(())
    }
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (index, raw_line) in raw.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((name, value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };
        let name = name.trim();
        let Some(key) = ConfigKey::from_name(name) else {
            bail!("Unknown configuration key: '{name}' on line {line_number}");
        };
        key.apply(&mut cfg, value.trim())
            .with_context(|| format!("Invalid `{name}` value on line {line_number}"))?;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Drops a trailing `#` comment, ignoring `#` inside double quotes.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn quoted(value: &str) -> Result<&str> {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .context("Expected double-quoted string")
}

fn unsigned(value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .with_context(|| format!("Expected a non-negative integer, got '{value}'"))
}
