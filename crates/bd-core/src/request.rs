//! Request descriptors: an endpoint plus its optional query parameters

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// One logical API call, ready to be dispatched.
///
/// Parameters keep call-site order. A parameter whose value is `None` is
/// never sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
  endpoint: Endpoint,
  params: Vec<(&'static str, Option<String>)>,
}

impl Request {
  /// Request with no query parameters
  pub fn new(endpoint: Endpoint) -> Self {
    Self { endpoint, params: Vec::new() }
  }

  /// Add an optional parameter
  pub fn param<V: ToString>(mut self, name: &'static str, value: Option<V>) -> Self {
    self.params.push((name, value.map(|v| v.to_string())));
    self
  }

  /// The endpoint being called
  pub fn endpoint(&self) -> &Endpoint {
    &self.endpoint
  }

  /// Path relative to the versioned API root
  pub fn path(&self) -> String {
    self.endpoint.path()
  }

  /// Parameters that carry a value, in call-site order
  pub fn supplied_params(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
    self.params.iter().filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
  }

  /// Check every parameter name against the endpoint table
  pub fn validate(&self) -> Result<()> {
    for (index, (name, _)) in self.params.iter().enumerate() {
      if !self.endpoint.allows(name) {
        return Err(Error::InvalidParameter(format!(
          "{} is not accepted by {} (allowed: {:?})",
          name,
          self.endpoint.name(),
          self.endpoint.allowed_params()
        )));
      }
      if self.params[..index].iter().any(|(seen, _)| seen == name) {
        return Err(Error::InvalidParameter(format!("{} supplied more than once", name)));
      }
    }
    Ok(())
  }
}

impl From<Endpoint> for Request {
  fn from(endpoint: Endpoint) -> Self {
    Request::new(endpoint)
  }
}
