//! Backend connection settings for the user store

use std::env;
use std::fmt;

use thiserror::Error;
use url::Url;

/// Environment variable holding the backend base URL
pub const ENV_USER_STORE_URL: &str = "USER_STORE_URL";

/// Environment variable holding the backend API token
pub const ENV_USER_STORE_API_TOKEN: &str = "USER_STORE_API_TOKEN";

/// Environment variable naming the plan that maps to the pro tier
pub const ENV_PRO_PLAN: &str = "SUBSCRIPTION_PRO_PLAN";

/// Local Strapi default, used when `USER_STORE_URL` is unset
pub const DEFAULT_USER_STORE_URL: &str = "http://localhost:1337";

pub const DEFAULT_PRO_PLAN: &str = "pro";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("USER_STORE_API_TOKEN is not set")]
    MissingApiToken,

    #[error("Invalid user store URL: {0}")]
    InvalidUrl(String),
}

/// Settings needed to talk to the backend user store.
#[derive(Clone)]
pub struct SyncConfig {
    base_url: String,
    api_token: String,
    pro_plan: String,
}

impl SyncConfig {
    /// Build a configuration from explicit values.
    ///
    /// The base URL must parse as an absolute URL. A trailing `/` is trimmed so
    /// endpoint paths can be appended directly. An empty token counts as missing.
    pub fn new(base_url: &str, api_token: &str) -> Result<Self, ConfigError> {
        if api_token.trim().is_empty() {
            return Err(ConfigError::MissingApiToken);
        }

        let parsed = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            pro_plan: DEFAULT_PRO_PLAN.to_string(),
        })
    }

    /// Read the configuration from the process environment.
    ///
    /// - `USER_STORE_URL`: defaults to `http://localhost:1337`
    /// - `USER_STORE_API_TOKEN`: required
    /// - `SUBSCRIPTION_PRO_PLAN`: defaults to `pro`
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var(ENV_USER_STORE_URL).unwrap_or_else(|_| DEFAULT_USER_STORE_URL.to_string());
        let api_token =
            env::var(ENV_USER_STORE_API_TOKEN).map_err(|_| ConfigError::MissingApiToken)?;
        let pro_plan = env::var(ENV_PRO_PLAN).unwrap_or_else(|_| DEFAULT_PRO_PLAN.to_string());

        Ok(Self::new(&base_url, &api_token)?.with_pro_plan(pro_plan))
    }

    pub fn with_pro_plan(mut self, pro_plan: impl Into<String>) -> Self {
        self.pro_plan = pro_plan.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn pro_plan(&self) -> &str {
        &self.pro_plan
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[redacted]")
            .field("pro_plan", &self.pro_plan)
            .finish()
    }
}
