mod engine;
mod utils;
use engine::*;
use utils::*;

use lib::*;
use dotenv::dotenv;
use log::*;
use std::io::BufRead;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_SYMBOL: Symbol = Symbol::Aapl;
pub const LOG_FILE: &str = "tickerwatch.log";

#[tokio::main]
async fn main() -> TickerwatchResult<()> {
  dotenv().ok();
  init_logger(&PathBuf::from(LOG_FILE))?;

  let config = Config::from_env()?;

  let (tx, rx) = crossbeam::channel::unbounded::<ChannelMsg>();

  // selector surface: one line per command, a ticker to switch, quit to stop
  let input_tx = tx.clone();
  std::thread::spawn(move || {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
      let Ok(line) = line else { break };
      let trimmed = line.trim();
      if trimmed.is_empty() {
        continue;
      }
      if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        let _ = input_tx.send(ChannelMsg::Shutdown);
        break;
      }
      match trimmed.parse::<Symbol>() {
        Ok(symbol) => {
          if input_tx.send(ChannelMsg::Select(symbol)).is_err() {
            break;
          }
        }
        Err(_) => warn!(
          "🟡 Unknown symbol: {}. Valid symbols: {:?}",
          trimmed,
          Symbol::all().map(|s| s.as_str())
        ),
      }
    }
  });

  // wait for ctrl-c SIGINT to execute graceful shutdown
  let ctrlc_tx = tx.clone();
  tokio::task::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      warn!("🟡 Shutting down tickerwatch...");
      let _ = ctrlc_tx.send(ChannelMsg::Shutdown);
    }
  });

  info!("🚀 Starting tickerwatch!");
  if simulate()? {
    let source = SimulatedSource::default();
    Engine::new(source, tx, rx, config).ignition().await
  } else {
    let source = Client::new(config.api_url.clone())?;
    Engine::new(source, tx, rx, config).ignition().await
  }
}
