//! Endpoint groups. Each group builds request descriptors from the endpoint
//! table and hands them to the shared transport.

pub mod calendar;
pub mod holdings;
pub mod instruments;
pub mod kpis;
pub mod reports;
pub mod stock_prices;

use crate::transport::Transport;
use bd_core::{types::inst_list, Request, Result};
use serde_json::Value;
use std::sync::Arc;

/// Base trait for endpoint implementations
///
/// Provides common functionality needed by all endpoint modules
pub(crate) trait EndpointBase {
  /// Get a reference to the transport layer
  fn transport(&self) -> &Arc<Transport>;

  /// Dispatch and return the body verbatim
  async fn dispatch(&self, request: Request) -> Result<Value> {
    self.transport().get(&request).await
  }
}

/// Macro to implement the EndpointBase trait and constructor for endpoint structs
macro_rules! impl_endpoint_base {
  ($struct_name:ident) => {
    impl $struct_name {
      /// Create a new endpoint group over a shared transport
      pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
      }
    }

    impl EndpointBase for $struct_name {
      fn transport(&self) -> &Arc<Transport> {
        &self.transport
      }
    }
  };
}

pub(crate) use impl_endpoint_base;

/// `original` is sent as 1/0
pub(crate) fn original_flag(original: Option<bool>) -> Option<u8> {
  original.map(u8::from)
}

/// Render a required instrument list, rejecting empty or oversized lists
pub(crate) fn required_inst_list(ids: &[u32]) -> Result<Option<String>> {
  inst_list(ids).map(Some)
}
