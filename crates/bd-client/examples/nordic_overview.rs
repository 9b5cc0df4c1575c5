//! Nordic Overview Example
//!
//! This example demonstrates how to use bd-client to:
//! - Load the instrument list
//! - Fetch recent prices for a few instruments
//! - Handle an entitlement gap (HTTP 418) without aborting
//!
//! Run with: cargo run -p bd-client --example nordic_overview

use bd_client::{BorsdataClient, Error};
use bd_core::{Config, InstrumentOption};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Initialize logging
  tracing_subscriber::fmt::init();

  // Load configuration from environment
  let config = Config::from_env().map_err(|e| {
    eprintln!("Failed to load configuration. Make sure BORSDATA_API_KEY is set.");
    eprintln!("Error: {}", e);
    e
  })?;

  let client = BorsdataClient::new(config)?;

  let data = client.instruments().all(InstrumentOption::Instruments).await?;
  let instruments = data["instruments"].as_array().cloned().unwrap_or_default();
  println!("Nordic instruments: {}", instruments.len());

  let sample: Vec<u32> = instruments
    .iter()
    .filter_map(|ins| ins["insId"].as_u64())
    .filter_map(|id| u32::try_from(id).ok())
    .take(3)
    .collect();

  if !sample.is_empty() {
    let prices = client.stock_prices().for_list(&sample, None, None).await?;
    for entry in prices["stockPricesArrayList"].as_array().into_iter().flatten() {
      let last = entry["stockPricesList"].as_array().and_then(|list| list.last()).cloned();
      println!("insId {}: {}", entry["instrument"], last.unwrap_or(Value::Null));
    }
  }

  match client.instruments().global().await {
    Ok(global) => {
      let count = global["instruments"].as_array().map(Vec::len).unwrap_or(0);
      println!("Global instruments: {}", count);
    }
    Err(Error::AccessDenied(path)) => {
      println!("Skipping {}: global data needs a Pro+ subscription", path);
    }
    Err(e) => return Err(e.into()),
  }

  println!("Rate limited responses absorbed: {}", client.rate_limited_count());
  Ok(())
}
