//! Insider, short and buyback holdings

use super::{impl_endpoint_base, required_inst_list, EndpointBase};
use crate::transport::Transport;
use bd_core::{param, Endpoint, HoldingsKind, Request, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Holdings endpoints
pub struct HoldingsEndpoints {
  transport: Arc<Transport>,
}

impl HoldingsEndpoints {
  /// Get holdings of the given kind for a list of instruments (max 50)
  #[instrument(skip(self))]
  pub async fn holdings(&self, kind: HoldingsKind, ins_ids: &[u32]) -> Result<Value> {
    let request =
      Request::new(Endpoint::Holdings(kind)).param(param::INST_LIST, required_inst_list(ins_ids)?);
    self.dispatch(request).await
  }

  /// Insider transactions
  pub async fn insider(&self, ins_ids: &[u32]) -> Result<Value> {
    self.holdings(HoldingsKind::Insider, ins_ids).await
  }

  /// Short positions
  pub async fn shorts(&self, ins_ids: &[u32]) -> Result<Value> {
    self.holdings(HoldingsKind::Shorts, ins_ids).await
  }

  /// Share buybacks
  pub async fn buyback(&self, ins_ids: &[u32]) -> Result<Value> {
    self.holdings(HoldingsKind::Buyback, ins_ids).await
  }
}

impl_endpoint_base!(HoldingsEndpoints);
