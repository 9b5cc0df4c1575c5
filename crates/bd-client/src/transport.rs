//! HTTP transport layer for Borsdata API requests
//!
//! [`Transport::get`] performs one logical authenticated GET: it builds the
//! URL, absorbs rate limiting (HTTP 429) by waiting out `Retry-After`, maps
//! every other failure to a typed [`Error`], and throttles itself briefly
//! after each success. Every attempt, retries included, first waits on the
//! shared [`SharedRateLimiter`].

use async_trait::async_trait;
use bd_core::{Config, Error, Request, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Rate limiter shared by every clone of one client
pub type SharedRateLimiter = Arc<DefaultDirectRateLimiter>;

/// Query parameter carrying the API key
pub const AUTH_KEY_PARAM: &str = "authKey";

/// Suspends the calling task. Swappable so waits can be observed in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
  /// Wait for `duration`
  async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
  async fn sleep(&self, duration: Duration) {
    if !duration.is_zero() {
      tokio::time::sleep(duration).await;
    }
  }
}

/// HTTP transport layer for making requests to the Borsdata API
pub struct Transport {
  client: Client,
  base_url: String,
  version: String,
  api_key: String,
  timeout: Duration,
  success_delay: Duration,
  default_retry_after: Duration,
  max_rate_limit_retries: Option<u32>,
  call_timeout: Option<Duration>,
  sleeper: Arc<dyn Sleeper>,
  rate_limiter: SharedRateLimiter,
  rate_limited: AtomicU64,
}

impl Transport {
  /// Create a new transport instance
  ///
  /// Fails with [`Error::MissingCredential`] before anything touches the
  /// network when the API key is empty.
  pub fn new(config: &Config) -> Result<Self> {
    config.validate()?;
    let rate_limiter = Arc::new(RateLimiter::direct(quota_for(config)?));

    let timeout = Duration::from_secs(config.timeout_secs);
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("bd-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      version: config.version.trim_matches('/').to_string(),
      api_key: config.api_key.clone(),
      timeout,
      success_delay: config.success_delay(),
      default_retry_after: Duration::from_secs(config.default_retry_after_secs),
      max_rate_limit_retries: config.max_rate_limit_retries,
      call_timeout: config.call_timeout_secs.map(Duration::from_secs),
      sleeper: Arc::new(TokioSleeper),
      rate_limiter,
      rate_limited: AtomicU64::new(0),
    })
  }

  /// Replace the sleeper used for 429 waits and the post-success throttle
  pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
    self.sleeper = sleeper;
    self
  }

  /// Replace the rate limiter, e.g. to share one ceiling between clients
  pub fn with_rate_limiter(mut self, rate_limiter: SharedRateLimiter) -> Self {
    self.rate_limiter = rate_limiter;
    self
  }

  /// Create a mock transport for testing
  #[cfg(test)]
  pub fn new_mock() -> Self {
    let config = Config::default_with_key("test_key".to_string()).with_base_url("https://mock.borsdata.se");
    Self::new(&config).expect("mock config is valid")
  }

  /// Make a GET request to the Borsdata API
  ///
  /// # Arguments
  ///
  /// * `request` - Endpoint plus optional query parameters
  ///
  /// # Returns
  ///
  /// The response body decoded as `T`; use `serde_json::Value` to get it verbatim
  #[instrument(skip(self, request), fields(endpoint = request.endpoint().name()))]
  pub async fn get<T>(&self, request: &Request) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let url = self.build_url(request)?;
    debug!("Making request to: {}", redact(&url));

    match self.call_timeout {
      Some(limit) => tokio::time::timeout(limit, self.execute(&url, request)).await.map_err(|_| {
        error!("Request to {} did not complete within {:?}", request.path(), limit);
        Error::Timeout(format!("{} did not complete within {:?}", request.path(), limit))
      })?,
      None => self.execute(&url, request).await,
    }
  }

  async fn execute<T>(&self, url: &Url, request: &Request) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let mut rate_limited = 0u32;

    loop {
      self.wait_for_rate_limit().await;
      let response = self.make_request(url).await?;
      let status = response.status();

      if status == StatusCode::TOO_MANY_REQUESTS {
        if let Some(max) = self.max_rate_limit_retries {
          if rate_limited >= max {
            error!("Still rate limited after {} retries, giving up", rate_limited);
            return Err(Error::RateLimit(format!(
              "{} still rate limited after {} retries",
              request.path(),
              rate_limited
            )));
          }
        }

        let wait = self.retry_after(&response);
        rate_limited += 1;
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
        warn!(
          "Rate limited! Retrying {} after {:.2} seconds (retry {})",
          request.path(),
          wait.as_secs_f64(),
          rate_limited
        );
        self.sleeper.sleep(wait).await;
        continue;
      }

      if status == StatusCode::IM_A_TEAPOT {
        if request.endpoint().requires_global_access() {
          error!("{} needs a Pro+ subscription", request.path());
        } else {
          error!("No access to {} with the current subscription", request.path());
        }
        return Err(Error::AccessDenied(request.path()));
      }

      if !status.is_success() {
        let reason = status_reason(&response);
        error!("Request failed with status: {}", status);
        return Err(Error::HttpStatus { status: status.as_u16(), reason });
      }

      debug!("Request successful with status: {}", status);
      self.sleeper.sleep(self.success_delay).await;

      let text = response
        .text()
        .await
        .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;
      debug!("Response body length: {} bytes", text.len());

      return match serde_json::from_str::<T>(&text) {
        Ok(data) => {
          info!("Successfully parsed response for {}", request.endpoint().name());
          Ok(data)
        }
        Err(e) => {
          error!("Failed to parse JSON response: {}", e);
          Err(Error::Parse(format!(
            "Failed to parse response: {}. Response: {}",
            e,
            preview(&text, 200)
          )))
        }
      };
    }
  }

  /// Build the full URL for an API request
  ///
  /// `authKey` always comes first, then every supplied parameter in call-site order.
  pub fn build_url(&self, request: &Request) -> Result<Url> {
    request.validate()?;

    let mut url = Url::parse(&format!("{}/{}/{}", self.base_url, self.version, request.path()))?;
    {
      let mut query_pairs = url.query_pairs_mut();
      query_pairs.append_pair(AUTH_KEY_PARAM, &self.api_key);
      for (name, value) in request.supplied_params() {
        query_pairs.append_pair(name, value);
      }
    }

    Ok(url)
  }

  /// Make the actual HTTP request
  async fn make_request(&self, url: &Url) -> Result<Response> {
    self
      .client
      .get(url.clone())
      .header(CONTENT_TYPE, "application/json")
      .header(ACCEPT, "application/json")
      .send()
      .await
      .map_err(|e| {
        let e = e.without_url();
        error!("Request failed: {}", e);
        Error::Http(format!("Request failed: {}", e))
      })
  }

  /// Seconds to wait before retrying a 429
  fn retry_after(&self, response: &Response) -> Duration {
    response
      .headers()
      .get(RETRY_AFTER)
      .and_then(|value| value.to_str().ok())
      .and_then(parse_retry_after)
      .unwrap_or_else(|| {
        warn!("429 without a usable Retry-After, waiting {:?}", self.default_retry_after);
        self.default_retry_after
      })
  }

  /// Wait until the shared limiter admits one more request
  pub async fn wait_for_rate_limit(&self) {
    self.rate_limiter.until_ready().await;
  }

  /// The limiter every attempt waits on
  pub fn rate_limiter(&self) -> &SharedRateLimiter {
    &self.rate_limiter
  }

  /// Number of 429 responses absorbed since the transport was created
  pub fn rate_limited_count(&self) -> u64 {
    self.rate_limited.load(Ordering::Relaxed)
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

impl fmt::Debug for Transport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Transport")
      .field("base_url", &self.base_url)
      .field("version", &self.version)
      .field("api_key", &"<redacted>")
      .field("timeout", &self.timeout)
      .field("success_delay", &self.success_delay)
      .field("max_rate_limit_retries", &self.max_rate_limit_retries)
      .field("call_timeout", &self.call_timeout)
      .finish()
  }
}

/// Quota of `rate_limit` requests per `rate_window_secs`, all usable as a burst
pub(crate) fn quota_for(config: &Config) -> Result<Quota> {
  config.validate()?;

  let burst = NonZeroU32::new(config.rate_limit)
    .ok_or_else(|| Error::Config("rate_limit must be greater than zero".to_string()))?;
  let period = Duration::from_secs(config.rate_window_secs) / config.rate_limit;

  Quota::with_period(period)
    .map(|quota| quota.allow_burst(burst))
    .ok_or_else(|| Error::Config(format!("rate window too short for {} requests", config.rate_limit)))
}

/// `Retry-After` in seconds; fractional values are accepted.
/// Values too large for a `Duration` are treated as unusable.
fn parse_retry_after(value: &str) -> Option<Duration> {
  let secs: f64 = value.trim().parse().ok()?;
  Duration::try_from_secs_f64(secs).ok()
}

/// The reason phrase the server sent, or the canonical one for the status
fn status_reason(response: &Response) -> String {
  response
    .extensions()
    .get::<ReasonPhrase>()
    .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
    .or_else(|| response.status().canonical_reason().map(str::to_string))
    .unwrap_or_else(|| "Unknown Status".to_string())
}

/// URL with the API key masked, for logs
fn redact(url: &Url) -> String {
  let mut masked = url.clone();
  let pairs: Vec<(String, String)> = url
    .query_pairs()
    .map(|(k, v)| {
      let v = if k == AUTH_KEY_PARAM { "***".into() } else { v.into_owned() };
      (k.into_owned(), v)
    })
    .collect();
  masked.query_pairs_mut().clear().extend_pairs(pairs);
  masked.to_string()
}

fn preview(text: &str, max_chars: usize) -> &str {
  match text.char_indices().nth(max_chars) {
    Some((idx, _)) => &text[..idx],
    None => text,
  }
}
