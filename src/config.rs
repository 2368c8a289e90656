//! Forwarder configuration.
//!
//! Loaded once at process start and validated eagerly, so a bad deployment
//! fails before the first invocation instead of inside it.

use crate::env::{ReadEnv, SystemEnv};
use crate::error::ConfigError;
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::env::VarError;
use std::fmt;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "MOCK_API_KEY";
/// Environment variable holding the upstream URL.
pub const API_URL_VAR: &str = "MOCK_API_URL";

/// Validated forwarder configuration.
#[derive(Clone)]
pub struct ForwarderConfig {
    api_key: HeaderValue,
    api_url: Url,
}

impl ForwarderConfig {
    /// Build a config from explicit values.
    ///
    /// The key must be a legal header value and the URL an absolute
    /// `http`/`https` URL. An empty key is accepted and sent as-is.
    pub fn new(api_key: impl AsRef<str>, api_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let mut api_key =
            HeaderValue::from_str(api_key.as_ref()).map_err(|_| ConfigError::InvalidHeaderValue {
                var: API_KEY_VAR.to_string(),
            })?;
        api_key.set_sensitive(true);

        let api_url = Url::parse(api_url.as_ref()).map_err(|e| ConfigError::InvalidUrl {
            var: API_URL_VAR.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                var: API_URL_VAR.to_string(),
                reason: format!("unsupported scheme '{}'", api_url.scheme()),
            });
        }

        Ok(Self { api_key, api_url })
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(&SystemEnv)
    }

    /// Load from any environment source. The key is checked before the URL.
    pub fn from_reader<E: ReadEnv + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let api_key = required(env, API_KEY_VAR)?;
        let api_url = required(env, API_URL_VAR)?;
        Self::new(api_key, api_url)
    }

    pub fn api_key(&self) -> &HeaderValue {
        &self.api_key
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

impl fmt::Debug for ForwarderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwarderConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

/// Read a variable that must be present.
pub(crate) fn required<E: ReadEnv + ?Sized>(env: &E, var: &str) -> Result<String, ConfigError> {
    optional(env, var)?.ok_or_else(|| ConfigError::Missing {
        var: var.to_string(),
    })
}

/// Read a variable that may be absent. Present-but-garbled is still an error.
pub(crate) fn optional<E: ReadEnv + ?Sized>(
    env: &E,
    var: &str,
) -> Result<Option<String>, ConfigError> {
    match env.var(var) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
            var: var.to_string(),
        }),
    }
}
