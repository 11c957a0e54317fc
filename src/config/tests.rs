use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

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

fn clear_ailment_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("AILMENT_PORT");
        env::remove_var("AILMENT_BIND_ADDR");
        env::remove_var("AILMENT_CONDITIONS_PATH");
        env::remove_var("AILMENT_CACHE_TTL_SECS");
        env::remove_var("AILMENT_STORE_TIMEOUT_MS");
        env::remove_var("AILMENT_RESULT_CACHE_CAPACITY");
        env::remove_var("AILMENT_HIGH_THRESHOLD");
        env::remove_var("AILMENT_MEDIUM_THRESHOLD");
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
    assert!(config.conditions_path.is_none());
    assert_eq!(config.cache_ttl_secs, 3600);
    assert_eq!(config.store_timeout_ms, 2000);
    assert_eq!(config.result_cache_capacity, 10_000);
    assert_eq!(config.high_threshold, 0.7);
    assert_eq!(config.medium_threshold, 0.4);
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
    clear_ailment_env();

    let config = Config::from_env().expect("should parse with defaults");
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_ailment_env();

    with_env_vars(&[("AILMENT_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_full_config_parse() {
    clear_ailment_env();

    with_env_vars(
        &[
            ("AILMENT_PORT", "9090"),
            ("AILMENT_BIND_ADDR", "0.0.0.0"),
            ("AILMENT_CONDITIONS_PATH", " /data/conditions.json "),
            ("AILMENT_CACHE_TTL_SECS", "60"),
            ("AILMENT_STORE_TIMEOUT_MS", "500"),
            ("AILMENT_RESULT_CACHE_CAPACITY", "42"),
            ("AILMENT_HIGH_THRESHOLD", "0.8"),
            ("AILMENT_MEDIUM_THRESHOLD", "0.5"),
        ],
        || {
            let config = Config::from_env().expect("should parse full config");

            assert_eq!(config.socket_addr(), "0.0.0.0:9090");
            assert_eq!(
                config.conditions_path,
                Some(PathBuf::from("/data/conditions.json"))
            );
            assert_eq!(config.cache_ttl(), Duration::from_secs(60));
            assert_eq!(config.result_cache_capacity, 42);

            let repo = config.repository_config();
            assert_eq!(repo.ttl, Duration::from_secs(60));
            assert_eq!(repo.store_timeout, Duration::from_millis(500));

            let pipeline = config.pipeline_config();
            assert_eq!(pipeline.thresholds.high, 0.8);
            assert_eq!(pipeline.thresholds.medium, 0.5);
            assert_eq!(pipeline.result_cache_capacity, 42);
        },
    );
}

#[test]
#[serial]
fn test_blank_conditions_path_is_unset() {
    clear_ailment_env();

    with_env_vars(&[("AILMENT_CONDITIONS_PATH", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.conditions_path.is_none());
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_ailment_env();

    with_env_vars(&[("AILMENT_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_ailment_env();

    with_env_vars(&[("AILMENT_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_ailment_env();

    with_env_vars(&[("AILMENT_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_threshold_not_number() {
    clear_ailment_env();

    with_env_vars(&[("AILMENT_HIGH_THRESHOLD", "very")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::FloatParseError { name: "AILMENT_HIGH_THRESHOLD", .. }));
    });
}

#[test]
#[serial]
fn test_invalid_capacity_uses_default() {
    clear_ailment_env();

    with_env_vars(&[("AILMENT_RESULT_CACHE_CAPACITY", "lots")], || {
        let config = Config::from_env().expect("should parse with fallback");
        assert_eq!(config.result_cache_capacity, 10_000);
    });
}

#[test]
fn test_validate_threshold_ordering() {
    let inverted = Config {
        high_threshold: 0.3,
        medium_threshold: 0.5,
        ..Default::default()
    };
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::InvalidThresholds { .. })
    ));

    let equal = Config {
        high_threshold: 0.5,
        medium_threshold: 0.5,
        ..Default::default()
    };
    assert!(equal.validate().is_err());

    let out_of_range = Config {
        high_threshold: 1.5,
        ..Default::default()
    };
    assert!(out_of_range.validate().is_err());
}

#[test]
fn test_validate_zero_store_timeout() {
    let config = Config {
        store_timeout_ms: 0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_validate_nonexistent_conditions_path() {
    let config = Config {
        conditions_path: Some(PathBuf::from("/nonexistent/conditions.json")),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::PathNotFound { .. })));
}

#[test]
fn test_validate_conditions_path_is_directory() {
    let config = Config {
        conditions_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src")),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_success() {
    assert!(Config::default().validate().is_ok());

    let config = Config {
        conditions_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidThresholds {
        medium: 0.5,
        high: 0.3,
    };
    assert!(err.to_string().contains("medium=0.5"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));
}
