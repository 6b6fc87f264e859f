use std::fs;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use serde::Deserialize;
use tracing::debug;

use crate::error::BandwidthError;

pub const DEFAULT_ENDPOINT_URL: &str = "https://api.softlayer.com/rest/v3.1";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub username: Option<String>,

    pub api_key: Option<String>,

    /// REST endpoint, without a trailing service name
    pub endpoint_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            api_key: None,
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout: 30,
        }
    }
}

impl Config {
    /// Reads the given file, or `~/.softlayer.toml` when none is given. Only
    /// an explicitly requested file has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self, BandwidthError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Config::default()),
            },
        };
        debug!(path = %path.display(), "loading config");
        let contents = fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn default_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".softlayer.toml"))
    }

    pub fn with_overrides(
        mut self,
        username: Option<String>,
        api_key: Option<String>,
        endpoint_url: Option<String>,
    ) -> Self {
        if username.is_some() {
            self.username = username;
        }
        if api_key.is_some() {
            self.api_key = api_key;
        }
        if let Some(endpoint_url) = endpoint_url {
            self.endpoint_url = endpoint_url;
        }
        self
    }

    pub fn credentials(&self) -> Result<(&str, &str), BandwidthError> {
        let username = self
            .username
            .as_deref()
            .ok_or(BandwidthError::MissingCredential("username"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(BandwidthError::MissingCredential("api_key"))?;
        Ok((username, api_key))
    }
}
