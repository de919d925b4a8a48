//! # Configuration Management Module
//!
//! Handles all configuration for partybot: credential fields, console
//! behavior, catalog endpoint settings, the default loadout applied at
//! startup, and the party roster.
//!
//! The configuration is organized into logical sections:
//!
//! - [`AuthConfig`] - stored device credentials (may be empty)
//! - [`BotConfig`] - status text, command marker, reported platform
//! - [`CatalogConfig`] - cosmetic search endpoint and request timeout
//! - [`DefaultLoadout`] - cosmetic ids equipped when the session comes up
//! - [`PartyConfig`] - friend-request policy and account roster
//! - [`LoggingConfig`] - log level and optional log file
//!
//! Configuration is TOML, loaded with [`Config::load`]. Every field carries a
//! serde default so a minimal file works; [`Config::validate`] rejects values
//! that would leave the console unusable (bad marker, zero timeout, empty
//! catalog URL). A missing or unparsable file is fatal at startup, before any
//! session is built.
//!
//! ```toml
//! [auth]
//! device_id = ""
//! account_id = ""
//! secret = ""
//!
//! [bot]
//! status_message = "partybot"
//! command_marker = "!"
//!
//! [defaults]
//! outfit = "CID_028_Athena_Commando_F"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

/// Command markers the console accepts. Mirrors the small allowed set used
/// for chat prefixes so a config typo cannot make every line "ignored".
pub const ALLOWED_MARKERS: [char; 6] = ['!', '^', '+', '$', '/', '>'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid command marker {0:?}: must be one of ! ^ + $ / >")]
    InvalidMarker(String),
    #[error("catalog timeout_seconds must be greater than zero")]
    ZeroTimeout,
    #[error("catalog base_url must not be empty")]
    EmptyCatalogUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub defaults: DefaultLoadout,
    #[serde(default)]
    pub party: PartyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Stored device credentials. All three fields must be present for direct
/// authentication; otherwise the interactive fallback is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub secret: String,
}

impl AuthConfig {
    pub fn has_device_credentials(&self) -> bool {
        !self.device_id.is_empty() && !self.account_id.is_empty() && !self.secret.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_status_message")]
    pub status_message: String,
    /// Prefix character that marks a console line as a command. Stored as a
    /// string for TOML ergonomics; only the first character is used.
    #[serde(default = "default_command_marker")]
    pub command_marker: String,
    #[serde(default = "default_platform")]
    pub platform: String,
}

impl BotConfig {
    /// First character of the configured marker, falling back to `!`.
    pub fn marker_char(&self) -> char {
        self.command_marker.chars().next().unwrap_or('!')
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            status_message: default_status_message(),
            command_marker: default_command_marker(),
            platform: default_platform(),
        }
    }
}

fn default_status_message() -> String {
    "partybot".to_string()
}

fn default_command_marker() -> String {
    "!".to_string()
}

fn default_platform() -> String {
    "Windows".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Cosmetic search endpoint. Queried with `name` and `backendType`.
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_catalog_url() -> String {
    "https://fortnite-api.com/v2/cosmetics/br/search/all".to_string()
}

fn default_timeout_seconds() -> u32 {
    5
}

/// Cosmetic ids equipped right after the session becomes active. Every slot
/// is optional; absent slots are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultLoadout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backpack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickaxe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidekick: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<BannerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    pub icon: String,
    /// Defaults to "DefaultColor" when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyConfig {
    /// Automatically accept incoming friend requests.
    #[serde(default = "default_accept_friend_requests", alias = "add_users")]
    pub accept_friend_requests: bool,
    /// Known accounts. Entries with `friend = false` are resolvable by name
    /// but cannot be joined.
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            accept_friend_requests: default_accept_friend_requests(),
            roster: Vec::new(),
        }
    }
}

fn default_accept_friend_requests() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub account_id: String,
    pub display_name: String,
    #[serde(default = "default_friend")]
    pub friend: bool,
}

fn default_friend() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: Some("partybot.log".to_string()),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject configurations that would leave the console unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let marker = &self.bot.command_marker;
        if marker.chars().count() != 1 || !ALLOWED_MARKERS.contains(&self.bot.marker_char()) {
            return Err(ConfigError::InvalidMarker(marker.clone()));
        }
        if self.catalog.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.catalog.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyCatalogUrl);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            auth: AuthConfig::default(),
            bot: BotConfig::default(),
            catalog: CatalogConfig::default(),
            defaults: DefaultLoadout::default(),
            party: PartyConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bot.marker_char(), '!');
        assert_eq!(config.catalog.timeout_seconds, 5);
        assert!(config.party.accept_friend_requests);
        assert!(!config.auth.has_device_credentials());
    }

    #[test]
    fn test_marker_validation() {
        let mut config = Config::default();
        for ok in ["!", "^", "/", ">"] {
            config.bot.command_marker = ok.to_string();
            assert!(config.validate().is_ok(), "marker {:?} should be valid", ok);
        }
        for bad in ["", "!!", "a", "?"] {
            config.bot.command_marker = bad.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidMarker(_))),
                "marker {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_timeout_and_url_validation() {
        let mut config = Config::default();
        config.catalog.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        config.catalog.timeout_seconds = 5;
        config.catalog.base_url = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyCatalogUrl));
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.bot.status_message, "partybot");
        assert_eq!(config.bot.command_marker, "!");
        assert!(config.catalog.base_url.contains("cosmetics"));
        assert!(config.defaults.outfit.is_none());
        assert!(config.party.roster.is_empty());
    }

    #[test]
    fn test_add_users_alias_accepted() {
        let config: Config = toml::from_str("[party]\nadd_users = false\n").unwrap();
        assert!(!config.party.accept_friend_requests);
    }

    #[test]
    fn test_credentials_require_all_fields() {
        let auth: AuthConfig =
            toml::from_str("device_id = \"d1\"\naccount_id = \"a1\"\nsecret = \"\"\n").unwrap();
        assert!(!auth.has_device_credentials());

        let auth: AuthConfig =
            toml::from_str("device_id = \"d1\"\naccount_id = \"a1\"\nsecret = \"s1\"\n").unwrap();
        assert!(auth.has_device_credentials());
    }

    #[test]
    fn test_roster_entry_friend_defaults_true() {
        let entry: RosterEntry =
            toml::from_str("account_id = \"abc\"\ndisplay_name = \"Zed\"\n").unwrap();
        assert!(entry.friend);
    }
}
