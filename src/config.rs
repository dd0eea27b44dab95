//! Configuration loading and validation.
//!
//! Loads `./courier.toml` (or `$COURIER_CONFIG_PATH`). Environment variables
//! override file values; file values override defaults.
//!
//! Precedence: env vars > config file > defaults.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::ResourcePresence;

/// Text written to the chat log in place of a redacted message.
pub const REDACTED_PLACEHOLDER: &str = "[redacted]";

// ── Top-level config ────────────────────────────────────────────

/// Top-level configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// User preferences read by the dispatcher.
    pub preferences: Preferences,
    /// Tracing output settings.
    pub logging: LoggingConfig,
}

impl CourierConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// If the file does not exist, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from the TOML file only, no env overrides.
    fn load_from_file() -> Result<Self> {
        let path = Self::config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                Self::from_toml(&contents)
                    .with_context(|| format!("invalid config at {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "failed to read config file {}: {e}",
                path.display()
            )),
        }
    }

    /// Resolve the config file path.
    fn config_path() -> PathBuf {
        Self::config_path_with(|key| std::env::var(key).ok())
    }

    /// Resolve the config path using a custom env resolver.
    pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        env("COURIER_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("courier.toml"))
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function so tests can avoid `set_var`. Unparseable
    /// values are ignored with a warning.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        let prefs = &mut self.preferences;
        override_with(&env, "COURIER_CHAT_LOGGING", parse_flag, &mut prefs.chat_logging);
        override_with(
            &env,
            "COURIER_GROUP_CHAT_LOGGING",
            parse_flag,
            &mut prefs.group_chat_logging,
        );
        override_with(
            &env,
            "COURIER_PRESENCE_NOTIFICATIONS",
            parse_flag,
            &mut prefs.presence_notifications,
        );
        override_with(&env, "COURIER_STATUS_DISPLAY", parse_flag, &mut prefs.status_display);
        override_with(
            &env,
            "COURIER_SUBSCRIPTION_NOTIFY",
            parse_flag,
            &mut prefs.subscription_notify,
        );
        override_with(
            &env,
            "COURIER_REDACTION_POLICY",
            |v| v.parse().ok(),
            &mut prefs.redaction_policy,
        );
        override_with(
            &env,
            "COURIER_LOGIN_PRESENCE",
            |v| v.parse().ok(),
            &mut prefs.login_presence,
        );

        if let Some(v) = env("COURIER_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env("COURIER_LOGS_DIR") {
            self.logging.logs_dir = Some(PathBuf::from(v));
        }
    }

    /// Parse a TOML string into config.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or an unknown enum value.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }
}

fn override_with<T>(
    env: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    parse: impl Fn(&str) -> Option<T>,
    slot: &mut T,
) {
    let Some(raw) = env(key) else {
        return;
    };
    match parse(raw.trim()) {
        Some(value) => *slot = value,
        None => tracing::warn!(var = key, value = %raw, "ignoring invalid env override"),
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

// ── Preferences ─────────────────────────────────────────────────

/// User preferences consulted while handling events.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Log one-to-one chats.
    pub chat_logging: bool,
    /// Log room chats.
    pub group_chat_logging: bool,
    /// Raise presence change notifications.
    pub presence_notifications: bool,
    /// Show contact status changes in the UI.
    pub status_display: bool,
    /// Desktop notification on subscription requests.
    pub subscription_notify: bool,
    /// What to log for decrypted messages.
    pub redaction_policy: RedactionPolicy,
    /// Presence announced on login when the account sets none.
    pub login_presence: ResourcePresence,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            chat_logging: true,
            group_chat_logging: true,
            presence_notifications: true,
            status_display: true,
            subscription_notify: true,
            redaction_policy: RedactionPolicy::Redact,
            login_presence: ResourcePresence::Online,
        }
    }
}

/// How decrypted message content reaches the chat log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionPolicy {
    /// Do not log decrypted messages.
    Off,
    /// Log decrypted plaintext.
    On,
    /// Log [`REDACTED_PLACEHOLDER`] instead of the plaintext.
    #[default]
    Redact,
}

impl RedactionPolicy {
    /// Text to log for a message, or `None` to skip logging.
    ///
    /// Messages that were not decrypted are always logged verbatim.
    pub fn loggable_text(self, plaintext: &str, was_decrypted: bool) -> Option<&str> {
        if !was_decrypted {
            return Some(plaintext);
        }
        match self {
            Self::Off => None,
            Self::On => Some(plaintext),
            Self::Redact => Some(REDACTED_PLACEHOLDER),
        }
    }
}

impl fmt::Display for RedactionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Redact => "redact",
        })
    }
}

impl FromStr for RedactionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "off" => Ok(Self::Off),
            "on" => Ok(Self::On),
            "redact" => Ok(Self::Redact),
            other => Err(anyhow::anyhow!("unknown redaction policy: {other}")),
        }
    }
}

// ── Logging config ──────────────────────────────────────────────

/// Tracing output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for JSON log files; `None` logs to stderr only.
    pub logs_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            logs_dir: None,
        }
    }
}

/// Resolve the default config directory (`~/.courier/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".courier"))
}

// ── Tests ───────────────────────────────────────────────────────
