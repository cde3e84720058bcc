//! Client configuration.
//!
//! Every field has a documented default and all of them are optional.
//! [`ClientConfig::validate`] runs once when the client is constructed.

use crate::{OpenDotaError, Result, API_KEY_ENV_VAR};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;


/// Public OpenDota REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.opendota.com/api";

/// Pause between unauthenticated calls. Keeping this at 3 s or more avoids
/// burning through the public daily quota.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How responses are handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Validated records from [`crate::opendota::types`].
    #[default]
    Typed,
    /// The decoded JSON body, untouched.
    Raw,
}

/// Where the API key travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// `Authorization: Bearer <key>`
    #[default]
    Header,
    /// `?api_key=<key>`
    Query,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Typed => write!(f, "typed"),
            OutputFormat::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OpenDotaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typed" | "pydantic" => Ok(OutputFormat::Typed),
            "raw" | "json" => Ok(OutputFormat::Raw),
            other => Err(OpenDotaError::InvalidConfig {
                message: format!("unknown output format '{other}' (expected typed or raw)"),
            }),
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Header => write!(f, "header"),
            AuthMethod::Query => write!(f, "query"),
        }
    }
}

impl FromStr for AuthMethod {
    type Err = OpenDotaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(AuthMethod::Header),
            "query" => Ok(AuthMethod::Query),
            other => Err(OpenDotaError::InvalidConfig {
                message: format!("unknown auth method '{other}' (expected header or query)"),
            }),
        }
    }
}

/// Constructor-time settings for [`crate::OpenDota`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory for recorded responses. `None` disables recording.
    pub data_dir: Option<PathBuf>,
    /// OpenDota API key. Without one, calls are paced by `delay`.
    pub api_key: Option<String>,
    /// Minimum gap between unauthenticated calls. Ignored with an API key.
    pub delay: Duration,
    /// Overrides for the standard fantasy weights.
    pub fantasy: Option<BTreeMap<String, f64>>,
    pub base_url: String,
    /// Per-call timeout.
    pub timeout: Duration,
    pub format: OutputFormat,
    pub auth_method: AuthMethod,
    /// Write successful bodies under `data_dir/cache`.
    pub record_responses: bool,
    /// Serve recorded bodies instead of calling the API.
    pub replay_cache: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            api_key: None,
            delay: DEFAULT_DELAY,
            fantasy: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            format: OutputFormat::default(),
            auth_method: AuthMethod::default(),
            record_responses: true,
            replay_cache: false,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the API key taken from `OPENDOTA_API_KEY` when set.
    pub fn from_env() -> Self {
        Self::default().with_env_api_key()
    }

    /// Fill in the API key from the environment unless one is already set.
    pub fn with_env_api_key(mut self) -> Self {
        self.api_key = resolve_api_key(self.api_key, std::env::var(API_KEY_ENV_VAR).ok());
        self
    }

    /// Record responses under `~/dota2`.
    pub fn with_default_data_dir(mut self) -> Self {
        self.data_dir = Some(default_data_dir());
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_fantasy(mut self, overrides: BTreeMap<String, f64>) -> Self {
        self.fantasy = Some(overrides);
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_auth_method(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }

    pub fn with_record_responses(mut self, on: bool) -> Self {
        self.record_responses = on;
        self
    }

    pub fn with_replay_cache(mut self, on: bool) -> Self {
        self.replay_cache = on;
        self
    }

    /// The configured key, with empty strings treated as absent.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Check the settings that can be wrong independently of the network.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(OpenDotaError::InvalidConfig {
                message: "timeout must be non-zero".to_string(),
            });
        }

        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            OpenDotaError::InvalidConfig {
                message: format!("invalid base URL '{}': {}", self.base_url, e),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(OpenDotaError::InvalidConfig {
                message: format!("base URL must be http(s), got '{}'", url.scheme()),
            });
        }

        Ok(())
    }
}

/// An explicit key wins over the environment; blank values count as unset.
pub fn resolve_api_key(explicit: Option<String>, from_env: Option<String>) -> Option<String> {
    explicit
        .filter(|k| !k.trim().is_empty())
        .or_else(|| from_env.filter(|k| !k.trim().is_empty()))
}

/// Path: ~/dota2
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dota2")
}
