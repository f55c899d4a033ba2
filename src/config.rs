//! Runtime configuration shared by the CLI and the desktop app.
//!
//! Resolution order: built-in defaults, then `CEX_*` environment variables,
//! then whatever the front end overrides from its own flags.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Storage key (and file stem) for the favorites set.
pub const FAVORITES_KEY: &str = "favoriteCountries";

const APP_DIR: &str = "country-explorer";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    /// Total request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    pub favorites_path: PathBuf,
    /// Locale tag for number formatting (`en`, `de`, `fr`, ...).
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: None,
            favorites_path: default_favorites_path(),
            locale: "en".into(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `CEX_BASE_URL`, `CEX_TIMEOUT_SECS`, `CEX_FAVORITES`
    /// and `CEX_LOCALE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("CEX_BASE_URL") {
            cfg.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = get("CEX_TIMEOUT_SECS") {
            cfg.timeout = Some(parse_timeout(&secs).context("invalid CEX_TIMEOUT_SECS")?);
        }
        if let Some(path) = get("CEX_FAVORITES") {
            cfg.favorites_path = PathBuf::from(path);
        }
        if let Some(locale) = get("CEX_LOCALE") {
            cfg.locale = locale.trim().to_string();
        }
        Ok(cfg)
    }
}

/// Parse a timeout given in whole seconds. `0` is rejected.
pub fn parse_timeout(s: &str) -> Result<Duration> {
    let secs: u64 = s
        .trim()
        .parse()
        .with_context(|| format!("expected whole seconds, got '{}'", s.trim()))?;
    if secs == 0 {
        anyhow::bail!("timeout must be at least one second");
    }
    Ok(Duration::from_secs(secs))
}

/// `<config dir>/country-explorer/favoriteCountries.json`, falling back to the
/// working directory when the platform has no config dir.
pub fn default_favorites_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(format!("{}.json", FAVORITES_KEY))
}
