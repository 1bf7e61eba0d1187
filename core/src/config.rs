//! Client configuration.
//!
//! `ClientConfig::load` layers, lowest priority first:
//! 1. built-in defaults
//! 2. `lexapi.toml` in the working directory (optional)
//! 3. `LEXAPI__*` environment variables (`LEXAPI__TIMEOUT_SECS=10`)
//! 4. the plain `LEXAPI_BASE_URL` / `LEXAPI_API_KEY` variables
//!
//! A `.env` file is read first if present.

use std::fmt;
use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat, FileSourceFile};
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.lexapi.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONFIG_FILE: &str = "lexapi.toml";

/// Settings shared by every service of an `ApiClient`.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the API.
    pub base_url: String,

    /// Sent as `Authorization: Bearer <key>` when set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Wrap the transport in the fixed retry policy.
    pub retry: bool,
}

/// The optional `lexapi.toml` in `dir`. Other formats with the same stem are ignored.
fn default_file(dir: &Path) -> File<FileSourceFile, FileFormat> {
    File::new(&dir.join(DEFAULT_CONFIG_FILE).to_string_lossy(), FileFormat::Toml).required(false)
}

fn default_user_agent() -> String {
    format!("lexapi-rust/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            retry: true,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn without_retry(mut self) -> Self {
        self.retry = false;
        self
    }

    /// Load from `lexapi.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(default_file(Path::new(".")))
    }

    /// Load from an explicit config file, which must exist, plus the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build(file: File<FileSourceFile, FileFormat>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config: Self = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("user_agent", default_user_agent())?
            .set_default("retry", true)?
            .add_source(file)
            // LEXAPI__TIMEOUT_SECS=10 -> timeout_secs = 10
            .add_source(
                Environment::with_prefix("LEXAPI")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("base_url", std::env::var("LEXAPI_BASE_URL").ok())?
            .set_override_option("api_key", std::env::var("LEXAPI_API_KEY").ok())?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        config.trace_loaded();
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Message(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Message("timeout_secs must be greater than zero".into()));
        }
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.base_url,
            has_api_key = self.api_key.is_some(),
            timeout_secs = self.timeout_secs,
            retry = self.retry,
            "Loaded client config"
        );
        debug!(?self, "Client config (full debug)");
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish()
    }
}
