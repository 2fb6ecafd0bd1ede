use std::collections::HashMap;

use super::*;

#[test]
fn empty_file_gives_defaults() {
    let config = TryOnConfig::parse("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.shutdown_timeout_seconds, 30);
    assert_eq!(config.store.backend, "memory");
    assert!(config.store.url.is_none());
    assert_eq!(config.generation.variant, "flash-image");
    assert_eq!(config.generation.timeout_seconds, 120);
    assert!(!config.notification.enabled());
    assert_eq!(config.notification.timeout_seconds, 10);
    assert!(config.cors.allows_any());
}

#[test]
fn full_file() {
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 8001
        max_body_bytes = 1048576

        [store]
        backend = "redis"
        url = "redis://cache:6379"
        prefix = "staging"
        pool_size = 4

        [generation]
        variant = "flash-image-preview"
        model = "gemini-custom"
        endpoint = "http://localhost:9000/v1beta"
        timeout_seconds = 60

        [notification]
        webhook_url = "https://hooks.example.com/tryon"
        timeout_seconds = 3

        [notification.headers]
        "X-Source" = "tryon"

        [cors]
        allowed_origins = ["https://shop.example.com"]
    "#;

    let config = TryOnConfig::parse(toml).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8001);
    assert_eq!(config.server.max_body_bytes, 1_048_576);
    assert_eq!(config.store.backend, "redis");
    assert_eq!(config.store.prefix.as_deref(), Some("staging"));
    assert_eq!(config.store.pool_size, Some(4));
    assert_eq!(config.generation.variant, "flash-image-preview");
    assert_eq!(config.generation.model.as_deref(), Some("gemini-custom"));
    assert_eq!(config.generation.timeout_seconds, 60);
    assert!(config.notification.enabled());
    assert_eq!(config.notification.headers.get("X-Source").unwrap(), "tryon");
    assert!(!config.cors.allows_any());
}

#[test]
fn unknown_field_type_is_config_error() {
    let err = TryOnConfig::parse("[server]\nport = \"eighty\"").unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn missing_file_gives_defaults() {
    let config = TryOnConfig::load("/nonexistent/tryon.toml").unwrap();
    assert_eq!(config.server.port, 8080);
}

#[test]
fn env_overrides_file() {
    let mut config = TryOnConfig::parse(
        r#"
        [generation]
        api_key = "from-file"

        [store]
        url = "redis://file:6379"
    "#,
    )
    .unwrap();

    let env: HashMap<&str, &str> = HashMap::from([
        (ENV_API_KEY, "from-env"),
        (ENV_WEBHOOK_URL, "https://hooks.example.com/x"),
        (ENV_STORE_URL, "  "),
        (ENV_CORS_ORIGINS, "https://a.example.com, https://b.example.com,"),
    ]);
    config.apply_overrides(|name| env.get(name).map(|v| (*v).to_owned()));

    assert_eq!(config.generation.api_key.as_deref(), Some("from-env"));
    assert_eq!(
        config.notification.webhook_url.as_deref(),
        Some("https://hooks.example.com/x")
    );
    assert_eq!(config.store.url.as_deref(), Some("redis://file:6379"));
    assert_eq!(
        config.cors.allowed_origins,
        vec!["https://a.example.com", "https://b.example.com"]
    );
}

#[test]
fn debug_redacts_api_key() {
    let mut config = TryOnConfig::default();
    config.generation.api_key = Some("secret-key".into());
    let debug = format!("{config:?}");
    assert!(!debug.contains("secret-key"));
    assert!(debug.contains("REDACTED"));
}
