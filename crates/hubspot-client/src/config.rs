//! Client configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `HUBSPOT_*` environment variables (highest precedence).

use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::transport::HttpTransport;

/// Public HubSpot API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

/// Environment variable holding a legacy API key.
pub const ENV_API_KEY: &str = "HUBSPOT_API_KEY";
/// Environment variable holding an access token.
pub const ENV_ACCESS_TOKEN: &str = "HUBSPOT_ACCESS_TOKEN";
/// Environment variable overriding the API base URL.
pub const ENV_API_BASE_URL: &str = "HUBSPOT_API_BASE_URL";
/// Environment variable pointing at a config file.
pub const ENV_CONFIG_PATH: &str = "HUBSPOT_MCP_CONFIG";

const PROJECT_DIR: &str = "hubspot-mcp";
const CONFIG_FILE: &str = "config.toml";

/// Resolved HubSpot settings.
///
/// Unknown keys in a config file are rejected, so a misspelt key fails to
/// load instead of being ignored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubSpotConfig {
    /// Legacy API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Private-app or OAuth access token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Base URL for all API requests.
    pub api_base_url: String,
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for HubSpotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = self.redacted();
        f.debug_struct("HubSpotConfig")
            .field("api_key", &redacted.api_key)
            .field("access_token", &redacted.access_token)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl HubSpotConfig {
    /// Keys accepted in a config file.
    pub const KEYS: [&'static str; 3] = ["api_key", "access_token", "api_base_url"];

    /// Load configuration from the process environment and an optional file.
    ///
    /// `config_path` (if given) must exist. Otherwise `$HUBSPOT_MCP_CONFIG`
    /// and then the default location are tried; a missing default file is
    /// not an error.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`HubSpotConfig::load`] but reads environment values via `env`.
    pub fn load_with<F>(config_path: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = config_path
            .map(PathBuf::from)
            .or_else(|| env(ENV_CONFIG_PATH).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(env);
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialise to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Overlay `HUBSPOT_*` values read through `env`.
    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = env(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(token) = env(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(url) = env(ENV_API_BASE_URL).filter(|u| !u.is_empty()) {
            self.api_base_url = url;
        }
    }

    /// `<config dir>/hubspot-mcp/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_DIR).join(CONFIG_FILE))
    }

    /// Resolve which file [`HubSpotConfig::load`] would read.
    pub fn resolve_config_path(config_path: Option<&str>) -> Option<PathBuf> {
        Self::resolve_config_path_with(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`HubSpotConfig::resolve_config_path`] but reads environment values via `env`.
    pub fn resolve_config_path_with<F>(config_path: Option<&str>, env: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        config_path
            .map(PathBuf::from)
            .or_else(|| env(ENV_CONFIG_PATH).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| Error::config(format!("invalid api_base_url '{}': {e}", self.api_base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "api_base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// The credential these settings select.
    pub fn credential(&self) -> Option<Credential> {
        Credential::resolve(self.access_token.as_deref(), self.api_key.as_deref())
    }

    /// Whether any credential is configured.
    pub fn has_credentials(&self) -> bool {
        self.credential().is_some()
    }

    /// A copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_deref().map(mask),
            access_token: self.access_token.as_deref().map(mask),
            api_base_url: self.api_base_url.clone(),
        }
    }

    /// Build the HTTP transport these settings describe.
    pub fn build_transport(&self) -> Result<HttpTransport> {
        HttpTransport::new(&self.api_base_url, self.credential())
    }
}

fn mask(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{tail}")
    }
}
