//! # Client Configuration
//!
//! Where the platform lives, how long to wait for it, which message locale
//! to use, and the organisation credentials.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TRADELINK_BASE_URL, TRADELINK_TIMEOUT_MS, TRADELINK_LOCALE         │
//! │     TRADELINK_ORG_ID, TRADELINK_API_KEY, TRADELINK_API_PASSWORD        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/sdk/client.toml (Linux)                                  │
//! │     ~/Library/Application Support/com.tradelink.sdk/client.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://api.squizz.com, 60 s timeout, en_AU                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "https://api.squizz.com"
//! timeout_ms = 60000   # 0 waits indefinitely
//! locale = "en_AU"
//!
//! [organisation]
//! id = "11EA64..."
//! api_key = "..."
//! api_password = "..."
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use tradelink_core::MessageCatalog;

use crate::dispatcher::DEFAULT_BASE_URL;
use crate::error::{ClientError, ClientResult};
use crate::session::OrgCredentials;

// =============================================================================
// API Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme and host of the platform, without the `/rest/...` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in milliseconds. 0 waits indefinitely.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Locale of result messages. Unknown locales fall back to en_AU.
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    60_000
}

fn default_locale() -> String {
    tradelink_core::DEFAULT_LOCALE.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            locale: default_locale(),
        }
    }
}

// =============================================================================
// Organisation
// =============================================================================

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganisationConfig {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub api_password: String,
}

impl fmt::Debug for OrganisationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrganisationConfig")
            .field("id", &self.id)
            .field("api_key", &self.api_key)
            .field("api_password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub organisation: OrganisationConfig,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn read_file(path: &Path) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClientError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file as pretty TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url).map_err(|e| {
            ClientError::InvalidConfig(format!("base_url '{}' is not a URL: {}", self.api.base_url, e))
        })?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ClientError::InvalidConfig(format!(
                "base_url must start with https:// or http://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.locale.trim().is_empty() {
            return Err(ClientError::InvalidConfig("locale must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("TRADELINK_BASE_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("TRADELINK_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(ms) => self.api.timeout_ms = ms,
                Err(_) => warn!(timeout = %timeout, "Ignoring non-numeric TRADELINK_TIMEOUT_MS"),
            }
        }

        if let Some(locale) = lookup("TRADELINK_LOCALE") {
            self.api.locale = locale;
        }

        if let Some(id) = lookup("TRADELINK_ORG_ID") {
            debug!(org_id = %id, "Overriding organisation ID from environment");
            self.organisation.id = id;
        }

        if let Some(key) = lookup("TRADELINK_API_KEY") {
            self.organisation.api_key = key;
        }

        if let Some(password) = lookup("TRADELINK_API_PASSWORD") {
            self.organisation.api_password = password;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tradelink", "sdk")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }

    pub fn catalog(&self) -> MessageCatalog {
        MessageCatalog::for_locale(&self.api.locale)
    }

    /// Organisation credentials, all three of which must be set.
    pub fn credentials(&self) -> ClientResult<OrgCredentials> {
        let org = &self.organisation;
        let missing: Vec<&str> = [
            ("organisation.id", &org.id),
            ("organisation.api_key", &org.api_key),
            ("organisation.api_password", &org.api_password),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(ClientError::InvalidConfig(format!(
                "missing credentials: {}",
                missing.join(", ")
            )));
        }

        Ok(OrgCredentials::new(&org.id, &org.api_key, &org.api_password))
    }
}
