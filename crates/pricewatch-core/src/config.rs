use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_HISTORY_PATH: &str = "/data/history.json";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Resolve only the history file location.
///
/// Used by commands that inspect the snapshot and have no need for the
/// Telegram credentials.
#[must_use]
pub fn load_history_path() -> PathBuf {
    dotenvy::dotenv().ok();
    history_path_from(|key| std::env::var(key))
}

fn history_path_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    PathBuf::from(
        lookup("PRICEWATCH_HISTORY_PATH").unwrap_or_else(|_| DEFAULT_HISTORY_PATH.to_string()),
    )
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Empty values are treated the same as unset: an empty bot token would
    // only surface later as a 404 from the Bot API.
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let telegram_token = require("TELEGRAM_TOKEN")?;
    let telegram_chat_id = require("TELEGRAM_CHAT_ID")?;
    let telegram_api_base = or_default("PRICEWATCH_TELEGRAM_API_BASE", "https://api.telegram.org");

    let category = or_default("PRICEWATCH_CATEGORY", "men_trousers");
    if category.is_empty() || category.contains('/') {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICEWATCH_CATEGORY".to_string(),
            reason: format!("\"{category}\" is not a valid category slug"),
        });
    }

    let api_base = or_default(
        "PRICEWATCH_API_BASE",
        "https://www2.hm.com/hmwebservices/service/productlist/pl_pl/category",
    );
    let site_origin = or_default("PRICEWATCH_SITE_ORIGIN", "https://www2.hm.com");
    let history_path = history_path_from(&lookup);

    let request_timeout_secs = parse_u64("PRICEWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PRICEWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("PRICEWATCH_ACCEPT_LANGUAGE", "pl-PL,pl;q=0.9,en;q=0.8");
    let currency = or_default("PRICEWATCH_CURRENCY", "zł");
    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");

    Ok(AppConfig {
        telegram_token,
        telegram_chat_id,
        telegram_api_base,
        category,
        api_base,
        site_origin,
        history_path,
        request_timeout_secs,
        user_agent,
        accept_language,
        currency,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
