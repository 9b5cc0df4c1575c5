/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
use commands::{demo::DemoCommand, query::QueryCommand};

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "bd")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Print JSON on one line
  #[arg(long, global = true)]
  compact: bool,

  /// Give up after this many consecutive rate limited responses
  #[arg(long, global = true, env = "BD_MAX_RATE_LIMIT_RETRIES")]
  max_retries: Option<u32>,

  /// Abort a call that takes longer than this many seconds, retries included
  #[arg(long, global = true, env = "BD_CALL_TIMEOUT_SECS")]
  timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Call one API operation and print the JSON response
  Query(QueryCommand),
  /// Run a numbered sample call
  Demo(DemoCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging
  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).with_writer(std::io::stderr).init();

  // Load configuration
  let overrides = config::Overrides {
    compact: cli.compact,
    max_rate_limit_retries: cli.max_retries,
    call_timeout_secs: cli.timeout,
  };
  let config = config::Config::from_env(overrides)?;

  // Execute command
  match cli.command {
    Commands::Query(cmd) => commands::query::execute(cmd, config).await?,
    Commands::Demo(cmd) => commands::demo::execute(cmd, config).await?,
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::commands::query::QuerySubcommands;
  use bd_core::{HoldingsKind, PriceType, ReportType};
  use clap::CommandFactory;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_kpi_history() {
    let cli = Cli::try_parse_from([
      "bd", "query", "kpi-history", "3", "2", "year", "mean", "--max-count", "2",
    ])
    .unwrap();

    match cli.command {
      Commands::Query(cmd) => assert_eq!(
        cmd.command,
        QuerySubcommands::KpiHistory {
          ins_id: 3,
          kpi_id: 2,
          report_type: ReportType::Year,
          price_type: PriceType::Mean,
          max_count: Some(2),
        }
      ),
      other => panic!("unexpected command {:?}", other),
    }
  }

  #[test]
  fn test_parse_inst_list_and_kind() {
    let cli =
      Cli::try_parse_from(["bd", "--compact", "query", "holdings", "shorts", "--inst-list", "2,3,6"])
        .unwrap();

    assert!(cli.compact);
    match cli.command {
      Commands::Query(cmd) => assert_eq!(
        cmd.command,
        QuerySubcommands::Holdings { kind: HoldingsKind::Shorts, inst_list: vec![2, 3, 6] }
      ),
      other => panic!("unexpected command {:?}", other),
    }
  }

  #[test]
  fn test_parse_stock_price_dates() {
    let cli = Cli::try_parse_from(["bd", "query", "stock-prices", "3", "--from", "2022-01-01"]).unwrap();
    match cli.command {
      Commands::Query(cmd) => assert_eq!(
        cmd.command,
        QuerySubcommands::StockPrices {
          ins_id: 3,
          from: chrono::NaiveDate::from_ymd_opt(2022, 1, 1),
          to: None,
          max_count: None,
        }
      ),
      other => panic!("unexpected command {:?}", other),
    }

    assert!(Cli::try_parse_from(["bd", "query", "prices-for-date", "15/08/2023"]).is_err());
  }

  #[test]
  fn test_invalid_report_type_rejected() {
    assert!(Cli::try_parse_from(["bd", "query", "kpi-summary", "3", "weekly"]).is_err());
  }

  #[test]
  fn test_instruments_option_defaults() {
    let cli = Cli::try_parse_from(["bd", "query", "instruments"]).unwrap();
    match cli.command {
      Commands::Query(cmd) => assert_eq!(
        cmd.command,
        QuerySubcommands::Instruments { option: bd_core::InstrumentOption::Instruments }
      ),
      other => panic!("unexpected command {:?}", other),
    }
  }
}
