//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`QUOTE_*`)
//! 2. Config file (`QUOTE_CONFIG`, else `config.json` in the platform config dir)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use quote_core::quotation::DEFAULT_VALIDITY_DAYS;
use quote_core::validation::validate_validity_days;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration load failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Application configuration.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigState {
    /// Name printed as the issuer of a quotation
    pub company_name: String,

    /// Forces every quotation into this display currency when set
    pub display_currency: Option<String>,

    /// Number of decimal places when formatting amounts
    pub currency_decimals: u8,

    /// Days a quotation stays valid, `0..=MAX_VALIDITY_DAYS`
    pub validity_days: i64,
}

impl Default for ConfigState {
    /// Returns default configuration.
    ///
    /// ## Default Values
    /// - Company: "Quotation Desk"
    /// - Display currency: taken from each quotation
    /// - Decimals: 2
    /// - Validity: 30 days
    fn default() -> Self {
        ConfigState {
            company_name: "Quotation Desk".to_string(),
            display_currency: None,
            currency_decimals: 2,
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }
}

impl ConfigState {
    /// Loads defaults, then the config file, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => ConfigState::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ConfigState =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        check_validity_days(config.validity_days, "validityDays")?;
        debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }

    /// Applies `QUOTE_*` overrides from a variable lookup.
    ///
    /// ## Environment Variables
    /// - `QUOTE_COMPANY_NAME`: Override company name
    /// - `QUOTE_DISPLAY_CURRENCY`: Force a display currency
    /// - `QUOTE_DECIMALS`: Decimal places for amounts (e.g., "2")
    /// - `QUOTE_VALIDITY_DAYS`: Quotation validity in days
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("QUOTE_COMPANY_NAME") {
            self.company_name = name;
        }

        if let Some(code) = var("QUOTE_DISPLAY_CURRENCY") {
            self.display_currency = Some(code);
        }

        if let Some(decimals) = var("QUOTE_DECIMALS") {
            self.currency_decimals = decimals
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("QUOTE_DECIMALS".to_string()))?;
        }

        if let Some(days) = var("QUOTE_VALIDITY_DAYS") {
            let days = days
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("QUOTE_VALIDITY_DAYS".to_string()))?;
            check_validity_days(days, "QUOTE_VALIDITY_DAYS")?;
            self.validity_days = days;
        }

        Ok(())
    }

    /// Formats an amount with the currency's symbol, thousands separators and
    /// the configured number of decimals.
    ///
    /// ## Example
    /// ```rust
    /// use quote_cli_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234.5, "USD"), "$1,234.50");
    /// assert_eq!(config.format_currency(-3.0, "EUR"), "-€3.00");
    /// assert_eq!(config.format_currency(7.0, "CHF"), "CHF 7.00");
    /// ```
    pub fn format_currency(&self, amount: f64, code: &str) -> String {
        let decimals = self.currency_decimals as usize;
        let digits = format!("{:.*}", decimals, amount.abs());
        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (digits.as_str(), None),
        };

        let is_zero = digits.chars().all(|c| c == '0' || c == '.');
        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

        let mut out = format!("{}{}{}", sign, currency_symbol(code), group_thousands(whole));
        if let Some(frac) = frac {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

/// Display prefix for a currency code.
pub fn currency_symbol(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        "CNY" => "CN¥".to_string(),
        "HKD" => "HK$".to_string(),
        "TWD" => "NT$".to_string(),
        "" => String::new(),
        other => format!("{} ", other),
    }
}

fn check_validity_days(days: i64, key: &str) -> Result<(), ConfigError> {
    validate_validity_days(days).map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("QUOTE_CONFIG") {
        return Some(PathBuf::from(path));
    }

    ProjectDirs::from("com", "quotation", "quote").map(|dirs| dirs.config_dir().join("config.json"))
}
