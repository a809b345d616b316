use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_gradex_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("GRADEX_PORT");
        env::remove_var("GRADEX_BIND_ADDR");
        env::remove_var("GRADEX_STORAGE_PATH");
        env::remove_var("GRADEX_EMBEDDER_PATH");
        env::remove_var("GRADEX_CROSS_ENCODER_PATH");
        env::remove_var("GRADEX_OCR_URL");
        env::remove_var("GRADEX_VISION_MODEL");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.storage_path, PathBuf::from("./.data/reports"));
    assert!(config.embedder_path.is_none());
    assert!(config.cross_encoder_path.is_none());
    assert_eq!(config.ocr_url, DEFAULT_OCR_URL);
    assert_eq!(config.vision_model, DEFAULT_VISION_MODEL);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_gradex_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.vision_model, DEFAULT_VISION_MODEL);
}

#[test]
#[serial]
fn test_from_env_custom_values() {
    clear_gradex_env();

    with_env_vars(
        &[
            ("GRADEX_PORT", "3000"),
            ("GRADEX_OCR_URL", "http://ocr.internal:9000"),
            ("GRADEX_VISION_MODEL", "gemini-2.0-pro"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.port, 3000);
            assert_eq!(config.ocr_url, "http://ocr.internal:9000");
            assert_eq!(config.vision_model, "gemini-2.0-pro");
        },
    );
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_gradex_env();

    with_env_vars(&[("GRADEX_PORT", "not-a-port")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::PortParseError { .. })
        ));
    });

    with_env_vars(&[("GRADEX_PORT", "0")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidPort { .. })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_blank_model_path_is_none() {
    clear_gradex_env();

    with_env_vars(&[("GRADEX_EMBEDDER_PATH", "  ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.embedder_path.is_none());
    });
}

#[test]
fn test_validate_missing_model_dir() {
    let config = Config {
        embedder_path: Some(PathBuf::from("/definitely/not/a/real/dir")),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_defaults_ok() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}
