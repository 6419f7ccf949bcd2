use std::{env, time::Duration};

use crate::{
    error::{PlannerError, Result},
    services::generation_client::DEFAULT_BASE_URL,
};

pub const API_KEY_ENV: &str = "GMS_API_KEY";
pub const BASE_URL_ENV: &str = "GMS_BASE_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings of the itinerary generator.
///
/// Without an API key the generator runs in synthetic-only mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `GMS_API_KEY` and `GMS_BASE_URL`; blank values count as unset.
    pub fn from_env() -> Self {
        Self {
            api_key: non_blank(env::var(API_KEY_ENV).ok()),
            base_url: non_blank(env::var(BASE_URL_ENV).ok())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = non_blank(Some(api_key.into()));
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(PlannerError::Config(format!(
                "base url must be an http(s) URL, got `{}`",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(PlannerError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
