/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
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

use crate::config::Config;
use anyhow::Result;
use bd_client::BorsdataClient;
use bd_core::types::parse_date;
use bd_core::{CalendarKind, HoldingsKind, InstrumentOption, PriceType, ReportType};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde_json::Value;
use tracing::info;

#[derive(Args, Debug)]
pub struct QueryCommand {
  #[command(subcommand)]
  pub command: QuerySubcommands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum QuerySubcommands {
  /// All nordic instruments, or a metadata collection
  Instruments {
    /// instruments, branches, countries, markets, sectors or translationmetadata
    #[arg(default_value = "instruments")]
    option: InstrumentOption,
  },

  /// All global instruments (Pro+)
  GlobalInstruments,

  /// Updated nordic instruments
  UpdatedInstruments,

  /// Company descriptions for a list of instruments
  Descriptions {
    /// Comma separated instrument ids (max 50)
    #[arg(long, value_delimiter = ',', required = true)]
    inst_list: Vec<u32>,
  },

  /// Insider, shorts or buyback holdings
  Holdings {
    /// insider, shorts or buyback
    kind: HoldingsKind,
    /// Comma separated instrument ids (max 50)
    #[arg(long, value_delimiter = ',', required = true)]
    inst_list: Vec<u32>,
  },

  /// Report or dividend calendar
  Calendar {
    /// report or dividend
    kind: CalendarKind,
    /// Comma separated instrument ids (max 50)
    #[arg(long, value_delimiter = ',', required = true)]
    inst_list: Vec<u32>,
  },

  /// KPI history for one instrument
  KpiHistory {
    ins_id: u32,
    kpi_id: u32,
    /// year, r12 or quarter
    report_type: ReportType,
    /// low, mean or high
    price_type: PriceType,
    #[arg(long)]
    max_count: Option<u32>,
  },

  /// KPI summary for one instrument
  KpiSummary {
    ins_id: u32,
    /// year, r12 or quarter
    report_type: ReportType,
    #[arg(long)]
    max_count: Option<u32>,
  },

  /// KPI history for a list of instruments
  KpiHistoryList {
    kpi_id: u32,
    /// year, r12 or quarter
    report_type: ReportType,
    /// low, mean or high
    price_type: PriceType,
    /// Comma separated instrument ids (max 50)
    #[arg(long, value_delimiter = ',', required = true)]
    inst_list: Vec<u32>,
    #[arg(long)]
    max_count: Option<u32>,
  },

  /// KPI screener value for one instrument
  Kpi {
    ins_id: u32,
    kpi_id: u32,
    /// Calculation group, e.g. last, 1year, 5year
    calc_group: String,
    /// Calculation, e.g. latest, mean, cagr
    calc: String,
  },

  /// KPI screener value for all instruments
  KpiAll {
    kpi_id: u32,
    calc_group: String,
    calc: String,
    /// Global instruments instead of nordic (Pro+)
    #[arg(long)]
    global: bool,
  },

  /// Time of the last nordic KPI calculation
  KpisUpdated,

  /// KPI metadata
  KpisMetadata,

  /// Reports of one type for one instrument
  Reports {
    ins_id: u32,
    /// year, r12 or quarter
    report_type: ReportType,
    #[arg(long)]
    max_count: Option<u32>,
    /// Reports as originally published
    #[arg(long)]
    original: bool,
  },

  /// Reports of every type for one instrument
  ReportsAll {
    ins_id: u32,
    #[arg(long)]
    max_year_count: Option<u32>,
    #[arg(long)]
    max_r12q_count: Option<u32>,
    /// Reports as originally published
    #[arg(long)]
    original: bool,
  },

  /// Report metadata
  ReportsMetadata,

  /// Reports of every type for a list of instruments
  ReportsList {
    /// Comma separated instrument ids (max 50)
    #[arg(long, value_delimiter = ',', required = true)]
    inst_list: Vec<u32>,
    #[arg(long)]
    max_year_count: Option<u32>,
    #[arg(long)]
    max_r12q_count: Option<u32>,
    /// Reports as originally published
    #[arg(long)]
    original: bool,
  },

  /// Stock prices for one instrument
  StockPrices {
    ins_id: u32,
    /// First date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Last date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    #[arg(long)]
    max_count: Option<u32>,
  },

  /// Stock prices for a list of instruments
  StockPricesList {
    /// Comma separated instrument ids (max 50)
    #[arg(long, value_delimiter = ',', required = true)]
    inst_list: Vec<u32>,
    /// First date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Last date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
  },

  /// Last stock price of every instrument
  LastPrices {
    /// Global instruments instead of nordic (Pro+)
    #[arg(long)]
    global: bool,
  },

  /// One stock price per instrument for a date
  PricesForDate {
    /// YYYY-MM-DD
    #[arg(value_parser = parse_date)]
    date: NaiveDate,
    /// Global instruments instead of nordic (Pro+)
    #[arg(long)]
    global: bool,
  },

  /// Stock splits, max one year back
  StockSplits,
}

pub async fn execute(cmd: QueryCommand, config: Config) -> Result<()> {
  let client = BorsdataClient::new(config.api_config.clone())?;
  let value = run(&client, cmd.command).await?;
  print_value(&value, config.compact)?;

  if client.rate_limited_count() > 0 {
    info!("Absorbed {} rate limited responses", client.rate_limited_count());
  }
  Ok(())
}

pub async fn run(client: &BorsdataClient, command: QuerySubcommands) -> Result<Value> {
  let value = match command {
    QuerySubcommands::Instruments { option } => client.instruments().all(option).await?,
    QuerySubcommands::GlobalInstruments => client.instruments().global().await?,
    QuerySubcommands::UpdatedInstruments => client.instruments().updated().await?,
    QuerySubcommands::Descriptions { inst_list } => {
      client.instruments().descriptions(&inst_list).await?
    }
    QuerySubcommands::Holdings { kind, inst_list } => {
      client.holdings().holdings(kind, &inst_list).await?
    }
    QuerySubcommands::Calendar { kind, inst_list } => {
      client.calendar().calendar(kind, &inst_list).await?
    }
    QuerySubcommands::KpiHistory { ins_id, kpi_id, report_type, price_type, max_count } => {
      client.kpis().history(ins_id, kpi_id, report_type, price_type, max_count).await?
    }
    QuerySubcommands::KpiSummary { ins_id, report_type, max_count } => {
      client.kpis().summary(ins_id, report_type, max_count).await?
    }
    QuerySubcommands::KpiHistoryList { kpi_id, report_type, price_type, inst_list, max_count } => {
      client.kpis().history_for_list(kpi_id, report_type, price_type, &inst_list, max_count).await?
    }
    QuerySubcommands::Kpi { ins_id, kpi_id, calc_group, calc } => {
      client.kpis().screener(ins_id, kpi_id, &calc_group, &calc).await?
    }
    QuerySubcommands::KpiAll { kpi_id, calc_group, calc, global } => {
      if global {
        client.kpis().screener_global(kpi_id, &calc_group, &calc).await?
      } else {
        client.kpis().screener_all(kpi_id, &calc_group, &calc).await?
      }
    }
    QuerySubcommands::KpisUpdated => client.kpis().updated().await?,
    QuerySubcommands::KpisMetadata => client.kpis().metadata().await?,
    QuerySubcommands::Reports { ins_id, report_type, max_count, original } => {
      client.reports().by_type(ins_id, report_type, max_count, original.then_some(true)).await?
    }
    QuerySubcommands::ReportsAll { ins_id, max_year_count, max_r12q_count, original } => {
      client
        .reports()
        .all_types(ins_id, max_year_count, max_r12q_count, original.then_some(true))
        .await?
    }
    QuerySubcommands::ReportsMetadata => client.reports().metadata().await?,
    QuerySubcommands::ReportsList { inst_list, max_year_count, max_r12q_count, original } => {
      client
        .reports()
        .for_list(&inst_list, max_year_count, max_r12q_count, original.then_some(true))
        .await?
    }
    QuerySubcommands::StockPrices { ins_id, from, to, max_count } => {
      client.stock_prices().for_instrument(ins_id, from, to, max_count).await?
    }
    QuerySubcommands::StockPricesList { inst_list, from, to } => {
      client.stock_prices().for_list(&inst_list, from, to).await?
    }
    QuerySubcommands::LastPrices { global } => {
      if global {
        client.stock_prices().last_global().await?
      } else {
        client.stock_prices().last().await?
      }
    }
    QuerySubcommands::PricesForDate { date, global } => {
      if global {
        client.stock_prices().global_for_date(date).await?
      } else {
        client.stock_prices().for_date(date).await?
      }
    }
    QuerySubcommands::StockSplits => client.stock_prices().splits().await?,
  };

  Ok(value)
}

fn print_value(value: &Value, compact: bool) -> Result<()> {
  let rendered =
    if compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
  println!("{}", rendered);
  Ok(())
}
