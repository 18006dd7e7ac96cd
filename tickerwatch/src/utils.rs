use lib::*;
use log::*;
use simplelog::{
  ColorChoice, CombinedLogger, Config as SimpleLogConfig, ConfigBuilder, TermLogger,
  TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use crate::{DEFAULT_API_URL, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SYMBOL};

pub fn init_logger(log_file: &PathBuf) -> anyhow::Result<()> {
  Ok(CombinedLogger::init(vec![
    TermLogger::new(
      LevelFilter::Info,
      SimpleLogConfig::default(),
      TerminalMode::Mixed,
      ColorChoice::Always,
    ),
    WriteLogger::new(
      LevelFilter::Info,
      ConfigBuilder::new().set_time_format_rfc3339().build(),
      File::create(log_file)?,
    ),
  ])?)
}

pub fn simulate() -> TickerwatchResult<bool> {
  match std::env::var("SIMULATE") {
    Ok(raw) => raw.parse::<bool>().map_err(TickerwatchError::ParseBool),
    Err(_) => Ok(false),
  }
}

/// Startup knobs, read once from the environment. Nothing here is
/// reconfigurable at runtime.
#[derive(Debug, Clone)]
pub struct Config {
  pub api_url: String,
  pub poll_interval: Duration,
  pub default_symbol: Symbol,
  pub chart_dir: PathBuf,
}

impl Config {
  pub fn from_env() -> TickerwatchResult<Self> {
    let api_url =
      std::env::var("STOCK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let poll_interval = match std::env::var("POLL_INTERVAL_SECS") {
      Ok(raw) => Duration::from_secs(raw.parse::<u64>()?),
      Err(_) => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
    };
    let default_symbol = match std::env::var("DEFAULT_SYMBOL") {
      Ok(raw) => raw.parse::<Symbol>()?,
      Err(_) => DEFAULT_SYMBOL,
    };
    let chart_dir = std::env::var("CHART_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from("."));
    Ok(Self {
      api_url,
      poll_interval,
      default_symbol,
      chart_dir,
    })
  }
}
