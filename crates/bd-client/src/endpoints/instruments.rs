//! Instrument lists and instrument metadata

use super::{impl_endpoint_base, required_inst_list, EndpointBase};
use crate::transport::Transport;
use bd_core::{param, Endpoint, InstrumentOption, Request, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Instrument endpoints: nordic and global instrument lists plus metadata
pub struct InstrumentsEndpoints {
  transport: Arc<Transport>,
}

impl InstrumentsEndpoints {
  /// Get all nordic instruments, or one of the metadata collections
  ///
  /// # Arguments
  ///
  /// * `option` - `instruments`, `branches`, `countries`, `markets`, `sectors`
  ///   or `translationmetadata`
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # async fn run(client: bd_client::BorsdataClient) -> bd_core::Result<()> {
  /// use bd_core::InstrumentOption;
  ///
  /// let data = client.instruments().all(InstrumentOption::Instruments).await?;
  /// println!("{}", data["instruments"]);
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self))]
  pub async fn all(&self, option: InstrumentOption) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::Instruments(option))).await
  }

  /// Get all global instruments (requires Pro+)
  #[instrument(skip(self))]
  pub async fn global(&self) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::GlobalInstruments)).await
  }

  /// Get nordic instruments updated since the last calculation
  #[instrument(skip(self))]
  pub async fn updated(&self) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::UpdatedInstruments)).await
  }

  /// Get company descriptions for a list of instruments (max 50)
  #[instrument(skip(self))]
  pub async fn descriptions(&self, ins_ids: &[u32]) -> Result<Value> {
    let request = Request::new(Endpoint::InstrumentDescriptions)
      .param(param::INST_LIST, required_inst_list(ins_ids)?);
    self.dispatch(request).await
  }
}

impl_endpoint_base!(InstrumentsEndpoints);
