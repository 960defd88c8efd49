use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PRICELENS_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 20);
    assert_eq!(cfg.site_timeout_secs, 45);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
    assert!(cfg.cors_origins.is_empty());
}

#[test]
fn build_app_config_applies_overrides() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_ENV", "production");
    map.insert("PRICELENS_BIND_ADDR", "127.0.0.1:9100");
    map.insert("PRICELENS_LOG_LEVEL", "debug");
    map.insert("PRICELENS_REQUEST_TIMEOUT_SECS", "5");
    map.insert("PRICELENS_SITE_TIMEOUT_SECS", "12");
    map.insert("PRICELENS_USER_AGENT", "pricelens-test/1.0");
    map.insert("PRICELENS_MAX_RETRIES", "0");
    map.insert("PRICELENS_RETRY_BACKOFF_BASE_SECS", "3");
    map.insert(
        "PRICELENS_CORS_ORIGINS",
        "https://shop.example, http://localhost:3000/,",
    );
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9100");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.site_timeout_secs, 12);
    assert_eq!(cfg.user_agent, "pricelens-test/1.0");
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_secs, 3);
    assert_eq!(
        cfg.cors_origins,
        vec!["https://shop.example", "http://localhost:3000"]
    );
}

#[test]
fn build_app_config_rejects_origin_without_scheme() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_CORS_ORIGINS", "shop.example");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_CORS_ORIGINS"),
        "expected InvalidEnvVar for PRICELENS_CORS_ORIGINS, got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_BIND_ADDR"),
        "expected InvalidEnvVar(PRICELENS_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_numeric_retries() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_MAX_RETRIES", "many");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_MAX_RETRIES"),
        "expected InvalidEnvVar(PRICELENS_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_site_timeout() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_SITE_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_SITE_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PRICELENS_SITE_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_request_timeout() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PRICELENS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}
