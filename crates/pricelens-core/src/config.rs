use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PRICELENS_ENV", "development"))?;
    let bind_addr = parse_addr("PRICELENS_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("PRICELENS_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("PRICELENS_REQUEST_TIMEOUT_SECS", "20")?;
    let site_timeout_secs = parse_u64("PRICELENS_SITE_TIMEOUT_SECS", "45")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "PRICELENS_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    if site_timeout_secs == 0 {
        return Err(invalid(
            "PRICELENS_SITE_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let user_agent = or_default("PRICELENS_USER_AGENT", DEFAULT_USER_AGENT);
    let max_retries = parse_u32("PRICELENS_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("PRICELENS_RETRY_BACKOFF_BASE_SECS", "1")?;
    let cors_origins = parse_origin_list(&or_default("PRICELENS_CORS_ORIGINS", ""))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        site_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        cors_origins,
    })
}

/// Split a comma-separated origin list, dropping blank entries.
fn parse_origin_list(s: &str) -> Result<Vec<String>, ConfigError> {
    s.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin.starts_with("http://") || origin.starts_with("https://") {
                Ok(origin.trim_end_matches('/').to_string())
            } else {
                Err(ConfigError::InvalidEnvVar {
                    var: "PRICELENS_CORS_ORIGINS".to_string(),
                    reason: format!("origin must start with http:// or https://; got \"{origin}\""),
                })
            }
        })
        .collect()
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICELENS_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
