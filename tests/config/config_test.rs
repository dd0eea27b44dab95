//! Coverage for config parsing, env overrides and path resolution.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use courier::config::{config_dir, CourierConfig, Preferences, RedactionPolicy};
use courier::types::ResourcePresence;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml: &str) -> CourierConfig {
    match CourierConfig::from_toml(toml) {
        Ok(config) => config,
        Err(e) => panic!("config should parse: {e:#}"),
    }
}

#[test]
fn default_preferences_enable_everything_and_redact() {
    let prefs = Preferences::default();
    assert!(prefs.chat_logging);
    assert!(prefs.group_chat_logging);
    assert!(prefs.presence_notifications);
    assert!(prefs.status_display);
    assert!(prefs.subscription_notify);
    assert_eq!(prefs.redaction_policy, RedactionPolicy::Redact);
    assert_eq!(prefs.login_presence, ResourcePresence::Online);
}

#[test]
fn empty_toml_gives_defaults() {
    assert_eq!(parse(""), CourierConfig::default());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = parse(
        r#"
        [preferences]
        chat_logging = false
        redaction_policy = "on"
        login_presence = "xa"

        [logging]
        level = "debug"
        logs_dir = "/var/log/courier"
        "#,
    );
    assert!(!config.preferences.chat_logging);
    assert!(config.preferences.group_chat_logging);
    assert_eq!(config.preferences.redaction_policy, RedactionPolicy::On);
    assert_eq!(config.preferences.login_presence, ResourcePresence::Xa);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.logging.logs_dir.as_deref(),
        Some(Path::new("/var/log/courier"))
    );
}

#[test]
fn unknown_redaction_policy_is_rejected() {
    let result = CourierConfig::from_toml(
        r#"
        [preferences]
        redaction_policy = "sometimes"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn env_overrides_file_values() {
    let mut config = parse(
        r#"
        [preferences]
        status_display = true
        redaction_policy = "redact"
        "#,
    );
    config.apply_overrides(env_from(&[
        ("COURIER_STATUS_DISPLAY", "off"),
        ("COURIER_CHAT_LOGGING", "0"),
        ("COURIER_SUBSCRIPTION_NOTIFY", "No"),
        ("COURIER_REDACTION_POLICY", "off"),
        ("COURIER_LOGIN_PRESENCE", "dnd"),
        ("COURIER_LOG_LEVEL", "courier=trace"),
        ("COURIER_LOGS_DIR", "/tmp/courier-logs"),
    ]));

    let prefs = &config.preferences;
    assert!(!prefs.status_display);
    assert!(!prefs.chat_logging);
    assert!(!prefs.subscription_notify);
    assert!(prefs.presence_notifications);
    assert_eq!(prefs.redaction_policy, RedactionPolicy::Off);
    assert_eq!(prefs.login_presence, ResourcePresence::Dnd);
    assert_eq!(config.logging.level, "courier=trace");
    assert_eq!(
        config.logging.logs_dir,
        Some(PathBuf::from("/tmp/courier-logs"))
    );
}

#[test]
fn invalid_env_values_are_ignored() {
    let mut config = CourierConfig::default();
    config.apply_overrides(env_from(&[
        ("COURIER_GROUP_CHAT_LOGGING", "maybe"),
        ("COURIER_REDACTION_POLICY", "sometimes"),
        ("COURIER_LOGIN_PRESENCE", "invisible"),
    ]));
    assert_eq!(config, CourierConfig::default());
}

#[test]
fn config_path_prefers_env() {
    let path = CourierConfig::config_path_with(env_from(&[(
        "COURIER_CONFIG_PATH",
        "/etc/courier/courier.toml",
    )]));
    assert_eq!(path, PathBuf::from("/etc/courier/courier.toml"));

    let fallback = CourierConfig::config_path_with(|_| None);
    assert_eq!(fallback, PathBuf::from("courier.toml"));
}

#[test]
fn config_file_on_disk_round_trips_through_from_toml() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("courier.toml");
    std::fs::write(
        &path,
        "[preferences]\ngroup_chat_logging = false\n",
    )
    .expect("should write config");

    let contents = std::fs::read_to_string(&path).expect("should read config");
    let config = parse(&contents);
    assert!(!config.preferences.group_chat_logging);
}

#[test]
fn config_dir_resolves() {
    let dir = config_dir();
    assert!(dir.is_ok());
    let path = match dir {
        Ok(path) => path,
        Err(e) => panic!("config_dir should resolve: {e}"),
    };
    assert!(path.ends_with(".courier"));
}
