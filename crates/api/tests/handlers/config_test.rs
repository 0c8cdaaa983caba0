use std::collections::HashMap;

use campus_api::config::ApiConfig;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_when_only_the_database_is_set() {
    let config = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/campus")]))
        .unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.database_max_connections, 5);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.allotment_policy_url, None);
    assert_eq!(config.allotment_policy_timeout, 10);
}

#[test]
fn database_url_is_required() {
    let err = ApiConfig::from_lookup(lookup(&[("API_PORT", "8080")])).unwrap_err();
    assert!(err.to_string().contains("DATABASE_URL"));
}

#[test]
fn empty_values_count_as_unset() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/campus"),
        ("API_PORT", ""),
        ("ALLOTMENT_POLICY_URL", "  "),
    ]))
    .unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.allotment_policy_url, None);
}

#[test]
fn overrides_are_parsed() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://db/campus"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("DATABASE_MAX_CONNECTIONS", "20"),
        ("API_CORS_ORIGINS", "https://admin.campus.test, https://campus.test,"),
        ("ALLOTMENT_POLICY_URL", "http://policy:9000/"),
        ("ALLOTMENT_POLICY_TIMEOUT_SECONDS", "3"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.database_max_connections, 20);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "https://admin.campus.test".to_string(),
            "https://campus.test".to_string()
        ])
    );
    assert_eq!(config.allotment_policy_url.as_deref(), Some("http://policy:9000"));
    assert_eq!(config.allotment_policy_timeout, 3);
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case("warn", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn log_levels(#[case] raw: &str, #[case] expected: Level) {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/campus"),
        ("LOG_LEVEL", raw),
    ]))
    .unwrap();
    assert_eq!(config.log_level, expected);
}

#[rstest]
#[case("API_PORT", "eighty")]
#[case("DATABASE_MAX_CONNECTIONS", "-1")]
#[case("API_REQUEST_TIMEOUT_SECONDS", "soon")]
fn invalid_numbers_are_errors(#[case] key: &str, #[case] raw: &str) {
    let result = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/campus"),
        (key, raw),
    ]));
    assert!(result.is_err());
}
