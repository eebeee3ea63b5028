use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

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

/// Load application configuration from environment variables already in the
/// process. Does NOT load `.env` files — useful for tests or when the caller
/// manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration from the provided env-var lookup function.
///
/// The core parsing/validation logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let google_maps_api_key = require("GOOGLE_MAPS_API_KEY")?;
    let serpapi_api_key = lookup("SERPAPI_API_KEY").ok().filter(|s| !s.is_empty());

    let env = parse_environment(&or_default("PRECALL_ENV", "development"));
    let bind_addr = parse_addr("PRECALL_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("PRECALL_LOG_LEVEL", "info");
    let cache_path = PathBuf::from(or_default("PRECALL_CACHE_PATH", "./audit_cache.db"));
    let cache_ttl_hours = parse_u64("PRECALL_CACHE_TTL_HOURS", "24")?;
    let http_timeout_secs = parse_u64("PRECALL_HTTP_TIMEOUT_SECS", "10")?;
    let scan_user_agent = or_default("PRECALL_SCAN_USER_AGENT", "precall/0.1 (pre-call-audit)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        google_maps_api_key,
        serpapi_api_key,
        cache_path,
        cache_ttl_hours,
        http_timeout_secs,
        scan_user_agent,
    })
}

fn parse_environment(raw: &str) -> Environment {
    match raw.to_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
