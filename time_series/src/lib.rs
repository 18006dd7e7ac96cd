pub mod chart;
pub mod plot;
pub mod sample;
pub mod series;

pub use chart::*;
pub use plot::*;
pub use sample::*;
pub use series::*;

use log::*;
use simplelog::{
  ColorChoice, Config as SimpleLogConfig, TermLogger,
  TerminalMode,
};

pub fn init_logger() -> anyhow::Result<()> {
  Ok(TermLogger::init(
    LevelFilter::Info,
    SimpleLogConfig::default(),
    TerminalMode::Mixed,
    ColorChoice::Always,
  )?
  )
}
