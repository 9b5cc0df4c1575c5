use anyhow::{Context, Result};
use bd_core::Config as CoreConfig;

/// CLI settings: the client configuration plus output options
#[derive(Debug, Clone)]
pub struct Config {
  pub api_config: CoreConfig,
  pub compact: bool,
}

/// Overrides taken from command-line flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub compact: bool,
  pub max_rate_limit_retries: Option<u32>,
  pub call_timeout_secs: Option<u64>,
}

impl Config {
  pub fn from_env(overrides: Overrides) -> Result<Self> {
    let api_config = CoreConfig::from_env()
      .context("BORSDATA_API_KEY (or API_KEY) environment variable not set or invalid")?;
    Ok(Self::with_overrides(api_config, overrides))
  }

  pub fn with_overrides(mut api_config: CoreConfig, overrides: Overrides) -> Self {
    if overrides.max_rate_limit_retries.is_some() {
      api_config.max_rate_limit_retries = overrides.max_rate_limit_retries;
    }
    if overrides.call_timeout_secs.is_some() {
      api_config.call_timeout_secs = overrides.call_timeout_secs;
    }
    Self { api_config, compact: overrides.compact }
  }
}
