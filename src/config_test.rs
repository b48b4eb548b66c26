use super::*;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

// =============================================================================
// defaults
// =============================================================================

#[test]
fn empty_environment_uses_defaults() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.jwt_secret, DEVELOPMENT_JWT_SECRET);
    assert!(config.using_development_secret);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert!(config.database_url.is_none());
    assert!(!config.cookie_secure);
}

#[test]
fn blank_secret_falls_back_to_development_secret() {
    let config = config_from(&[("JWT_SECRET", "   ")]).unwrap();
    assert!(config.using_development_secret);
}

// =============================================================================
// overrides
// =============================================================================

#[test]
fn explicit_values_are_used() {
    let config = config_from(&[
        ("JWT_SECRET", "s3cret"),
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/gatehouse"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("COOKIE_SECURE", "yes"),
    ])
    .unwrap();
    assert_eq!(config.jwt_secret, "s3cret");
    assert!(!config.using_development_secret);
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/gatehouse"));
    assert_eq!(config.db_max_connections, 12);
    assert!(config.cookie_secure);
}

#[test]
fn invalid_port_is_an_error() {
    let err = config_from(&[("PORT", "eighty")]).unwrap_err();
    assert!(err.to_string().contains("PORT"));
}

#[test]
fn invalid_cookie_secure_is_an_error() {
    assert!(config_from(&[("COOKIE_SECURE", "maybe")]).is_err());
}

#[test]
fn debug_redacts_secrets() {
    let config = config_from(&[("JWT_SECRET", "hunter2"), ("DATABASE_URL", "postgres://u:pw@h/db")]).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("hunter2"));
    assert!(!debug.contains("pw@h"));
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_variants() {
    for val in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
    for val in ["0", "False", "no", "off"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
    assert_eq!(parse_bool(""), None);
    assert_eq!(parse_bool("maybe"), None);
}
