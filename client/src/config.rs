//! Client configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::http::DEFAULT_BASE_URL;

const CREDENTIALS_DIR_NAME: &str = "snooze";

/// Errors raised while resolving configured values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `base_url` is not an absolute URL.
    #[error("invalid base url `{value}`: {message}")]
    BaseUrl { value: String, message: String },
    /// `credentials_dir` is not valid UTF-8.
    #[error("credentials directory `{path}` is not valid UTF-8")]
    NonUtf8Path { path: String },
}

fn default_credentials_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CREDENTIALS_DIR_NAME)
}

/// Settings for the story API client and its credential store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SNOOZE")]
pub struct ClientSettings {
    /// Story API base URL.
    pub base_url: Option<String>,
    /// Directory holding the stored token and username.
    pub credentials_dir: Option<PathBuf>,
    /// Whole-request timeout in seconds; unset or zero means no timeout.
    pub timeout_seconds: Option<u64>,
}

impl ClientSettings {
    /// Return the configured base URL, falling back to the hosted API.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BaseUrl`] when the value does not parse.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|error| SettingsError::BaseUrl {
            value: raw.to_owned(),
            message: error.to_string(),
        })
    }

    /// Return the configured credentials directory, falling back to
    /// `$XDG_CONFIG_HOME/snooze` or `$HOME/.config/snooze`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonUtf8Path`] for non-UTF-8 paths.
    pub fn credentials_dir(&self) -> Result<Utf8PathBuf, SettingsError> {
        let path = self
            .credentials_dir
            .clone()
            .unwrap_or_else(default_credentials_dir);
        Utf8PathBuf::from_path_buf(path).map_err(|path| SettingsError::NonUtf8Path {
            path: path.display().to_string(),
        })
    }

    /// Return the request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}
