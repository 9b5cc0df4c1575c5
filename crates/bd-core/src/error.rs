use thiserror::Error;

/// The main error type for bd-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// No API key was available at startup
  #[error("API key not found: {0}")]
  MissingCredential(String),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// HTTP 418: the subscription tier has no access to the resource
  #[error("HTTP error! status: 418 - No access to {0} with the current subscription")]
  AccessDenied(String),

  /// Any other non-success HTTP status
  #[error("HTTP error! status: {status} - {reason}")]
  HttpStatus {
    /// Numeric status code
    status: u16,
    /// Reason phrase reported for the status
    reason: String,
  },

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// Response body was not valid JSON for the requested type
  #[error("Parse error: {0}")]
  Parse(String),

  /// Rate limited more times than the configured retry cap allows
  #[error("Rate limit exceeded: {0}")]
  RateLimit(String),

  /// The call did not finish inside the configured deadline
  #[error("Request timed out: {0}")]
  Timeout(String),

  /// A query parameter was not accepted by the endpoint
  #[error("Invalid parameter: {0}")]
  InvalidParameter(String),

  /// URL construction error
  #[error("Invalid URL: {0}")]
  Url(#[from] url::ParseError),
}

impl Error {
  /// HTTP status associated with the error, if any
  pub fn status(&self) -> Option<u16> {
    match self {
      Error::AccessDenied(_) => Some(418),
      Error::HttpStatus { status, .. } => Some(*status),
      _ => None,
    }
  }

  /// True when the server refused the resource for the current entitlement tier
  pub fn is_access_denied(&self) -> bool {
    matches!(self, Error::AccessDenied(_))
  }
}

/// Result type alias for bd-* crates
pub type Result<T> = std::result::Result<T, Error>;
