use super::*;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

fn clear_env() {
    unsafe {
        std::env::remove_var(ENV_GATEWAY_URL);
        std::env::remove_var(ENV_STORAGE_KEY);
        std::env::remove_var(ENV_LOG_LEVEL);
    }
}

fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();
    let config = ClientConfig::load_config(None).unwrap();
    assert_eq!(config, ClientConfig::with_defaults());
    assert_eq!(config.gateway_url, "http://localhost:8000");
    assert_eq!(config.storage_key, "threadUuidMap");
    assert_eq!(config.log_level, "info");
}

#[test]
#[serial]
fn test_yaml_file() {
    clear_env();
    let file = write_config(
        ".yaml",
        "gateway_url: https://gateway.example.com/\nlog_level: debug\n",
    );
    let config = ClientConfig::load_config(Some(file.path())).unwrap();
    assert_eq!(config.gateway_url, "https://gateway.example.com/");
    assert_eq!(config.gateway_base(), "https://gateway.example.com");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.storage_key, "threadUuidMap");
}

#[test]
#[serial]
fn test_json_file() {
    clear_env();
    let file = write_config(".json", r#"{"storage_key":"customMap"}"#);
    let config = ClientConfig::load_config(Some(file.path())).unwrap();
    assert_eq!(config.storage_key, "customMap");
    assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
}

#[test]
#[serial]
fn test_unsupported_extension() {
    clear_env();
    let file = write_config(".toml", "gateway_url = 'x'");
    let err = ClientConfig::load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
#[serial]
fn test_malformed_file() {
    clear_env();
    let file = write_config(".json", "{ not json");
    let err = ClientConfig::load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
#[serial]
fn test_missing_file() {
    clear_env();
    let err = ClientConfig::load_config(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
#[serial]
fn test_env_fills_defaults_only() {
    clear_env();
    unsafe {
        std::env::set_var(ENV_GATEWAY_URL, "https://env.example.com");
        std::env::set_var(ENV_STORAGE_KEY, "envMap");
        std::env::set_var(ENV_LOG_LEVEL, "trace");
    }

    let from_env = ClientConfig::load_config(None).unwrap();
    assert_eq!(from_env.gateway_url, "https://env.example.com");
    assert_eq!(from_env.storage_key, "envMap");
    assert_eq!(from_env.log_level, "trace");

    let file = write_config(".yaml", "log_level: warn\n");
    let from_file = ClientConfig::load_config(Some(file.path())).unwrap();
    assert_eq!(from_file.log_level, "warn");
    assert_eq!(from_file.storage_key, "envMap");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_gateway_url() {
    clear_env();
    unsafe {
        std::env::set_var(ENV_GATEWAY_URL, "localhost:8000");
    }
    let err = ClientConfig::load_config(None).unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "gateway_url"));
}

#[test]
fn test_blank_storage_key_is_invalid() {
    let config = ClientConfig {
        storage_key: "  ".to_string(),
        ..ClientConfig::with_defaults()
    };
    assert!(config.validate().is_err());
}
