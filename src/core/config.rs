//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.nikmessenger/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::Level;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::directory::ContactSeed;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NikConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub contacts: Vec<ContactEntry>,
    /// What loading had to say, carried forward into `ResolvedConfig`.
    #[serde(skip)]
    pub notices: Vec<Notice>,
}

/// A log line produced while loading config, before the logger exists.
///
/// `main` replays these once the file logger is initialised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    fn info(message: String) -> Self {
        Self { level: Level::Info, message }
    }

    fn warn(message: String) -> Self {
        Self { level: Level::Warn, message }
    }

    /// Emit through the `log` facade.
    pub fn replay(&self) {
        log::log!(self.level, "{}", self.message);
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub auto_reply: Option<bool>,
    pub reply_delay_ms: Option<u64>,
    pub presence_seed: Option<u64>,
    pub seed_demo: Option<bool>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactEntry {
    pub name: String,
    pub preview: Option<String>,
    pub time: Option<String>,
    pub online: Option<bool>,
}

impl From<&ContactEntry> for ContactSeed {
    fn from(entry: &ContactEntry) -> Self {
        ContactSeed {
            name: entry.name.clone(),
            preview: entry.preview.clone(),
            time: entry.time.clone(),
            online: entry.online,
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPLY_DELAY_MS: u64 = 500;
pub const DEFAULT_LOG_FILE: &str = "nikmessenger.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Built-in directory used with `--demo` / `seed_demo = true`.
pub fn demo_contacts() -> Vec<ContactSeed> {
    let seed = |name: &str, preview: &str, time: &str, online: bool| ContactSeed {
        name: name.to_string(),
        preview: Some(preview.to_string()),
        time: Some(time.to_string()),
        online: Some(online),
    };
    vec![
        seed("Анна Смирнова", "Увидимся завтра!", "14:32", true),
        seed("Команда проекта", "Дмитрий: презентация готова", "13:15", false),
        seed("Мама", "Позвони, когда освободишься", "11:48", false),
        seed("Игорь", "Ок, договорились 👍", "Вчера", true),
    ]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` disables the synthetic reply entirely.
    pub auto_reply: Option<Duration>,
    pub presence_seed: Option<u64>,
    pub contacts: Vec<ContactSeed>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Deferred log lines from loading and resolution
    pub notices: Vec<Notice>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub no_auto_reply: bool,
    pub reply_delay_ms: Option<u64>,
    pub presence_seed: Option<u64>,
    pub demo: bool,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.nikmessenger/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".nikmessenger").join("config.toml"))
}

/// Load config from `~/.nikmessenger/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NikConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NikConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            let mut config = NikConfig::default();
            config.notices.push(Notice::warn(
                "Could not determine home directory, using default config".to_string(),
            ));
            return Ok(config);
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<NikConfig, ConfigError> {
    if !path.exists() {
        let mut config = NikConfig::default();
        config.notices.push(Notice::info(format!(
            "No config file found, generating default at {}",
            path.display()
        )));
        if let Err(e) = generate_default_config(path) {
            config
                .notices
                .push(Notice::warn(format!("Failed to write default config: {}", e)));
        }
        return Ok(config);
    }

    let contents = fs::read_to_string(path)?;
    let mut config: NikConfig = toml::from_str(&contents)?;
    config
        .notices
        .push(Notice::info(format!("Loaded config from {}", path.display())));
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# NikMessenger Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# auto_reply = true                  # NIK_AUTO_REPLY, --no-auto-reply
# reply_delay_ms = 500               # NIK_REPLY_DELAY_MS, --reply-delay-ms
# presence_seed = 42                 # NIK_PRESENCE_SEED, --seed
# seed_demo = false                  # --demo
# log_file = "nikmessenger.log"      # NIK_LOG_FILE, --log-file
# log_level = "debug"                # NIK_LOG_LEVEL: off, error, warn, info, debug, trace

# [[contacts]]
# name = "Анна"
# preview = "До завтра!"
# time = "09:41"
# online = true
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NikConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env<F>(config: &NikConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut notices = config.notices.clone();

    // Auto-reply: CLI off switch → env → config → on
    let auto_reply_enabled = if cli.no_auto_reply {
        false
    } else {
        env("NIK_AUTO_REPLY")
            .and_then(|v| parse_bool(&v))
            .or(config.general.auto_reply)
            .unwrap_or(true)
    };

    // Delay: CLI → env → config → default
    let delay_ms = cli
        .reply_delay_ms
        .or_else(|| env("NIK_REPLY_DELAY_MS").and_then(|v| v.trim().parse().ok()))
        .or(config.general.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    let presence_seed = cli
        .presence_seed
        .or_else(|| env("NIK_PRESENCE_SEED").and_then(|v| v.trim().parse().ok()))
        .or(config.general.presence_seed);

    // Explicit contacts first, then the demo set if requested
    let mut contacts: Vec<ContactSeed> = config.contacts.iter().map(ContactSeed::from).collect();
    if cli.demo || config.general.seed_demo.unwrap_or(false) {
        contacts.extend(demo_contacts());
    }

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("NIK_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.general.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let log_level = env("NIK_LOG_LEVEL")
        .or_else(|| config.general.log_level.clone())
        .and_then(|v| match v.trim().parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                notices.push(Notice::warn(format!("Unknown log level {:?}, using default", v)));
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        auto_reply: auto_reply_enabled.then(|| Duration::from_millis(delay_ms)),
        presence_seed,
        contacts,
        log_file,
        log_level,
        notices,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
