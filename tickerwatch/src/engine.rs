use crossbeam::channel::{Receiver, Sender};
use lib::*;
use log::*;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use time_series::{ChartConfig, ChartSeries, Plot};
use tokio::task::JoinHandle;

use crate::utils::Config;

/// Handle to the recurring poll task armed for one symbol. Aborting the task
/// is the cancellation mechanism; dropping the handle must never leave a live
/// timer behind.
pub struct PollHandle {
  pub generation: u64,
  task: JoinHandle<()>,
}

impl PollHandle {
  pub fn disarm(&self) {
    self.task.abort();
  }
}

impl Drop for PollHandle {
  fn drop(&mut self) {
    self.task.abort();
  }
}

/// Owns the selected symbol, the published series and the poll schedule.
/// Exactly one schedule is armed at a time; every symbol switch tears the old
/// one down, refreshes once immediately, then re-arms for the new symbol.
pub struct Engine<S: SampleSource> {
  pub source: S,
  pub tx: Sender<ChannelMsg>,
  pub rx: Receiver<ChannelMsg>,
  pub symbol: Symbol,
  pub poll_interval: Duration,
  pub chart_dir: PathBuf,
  generation: u64,
  poll: Option<PollHandle>,
  series: Option<ChartSeries>,
}

impl<S: SampleSource> Engine<S> {
  pub fn new(source: S, tx: Sender<ChannelMsg>, rx: Receiver<ChannelMsg>, config: Config) -> Self {
    Self {
      source,
      tx,
      rx,
      symbol: config.default_symbol,
      poll_interval: config.poll_interval,
      chart_dir: config.chart_dir,
      generation: 0,
      poll: None,
      series: None,
    }
  }

  /// The published series. None until the first successful refresh, which is
  /// how the rendering surface knows to show "no data yet".
  pub fn series(&self) -> Option<&ChartSeries> {
    self.series.as_ref()
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// Enters the polling state for the configured default symbol, then drains
  /// the channel until shutdown or until every sender hangs up.
  pub async fn ignition(&mut self) -> TickerwatchResult<()> {
    self.select_symbol(self.symbol).await;
    while let Ok(msg) = self.rx.recv() {
      if !self.handle_msg(msg).await {
        break;
      }
    }
    self.teardown();
    Ok(())
  }

  /// Returns false when the engine should stop.
  pub async fn handle_msg(&mut self, msg: ChannelMsg) -> bool {
    match msg {
      ChannelMsg::Refresh { generation } => {
        if generation != self.generation {
          debug!("Discarding stale poll tick for generation {}", generation);
        } else {
          self.refresh().await;
        }
        true
      }
      ChannelMsg::Select(symbol) => {
        if symbol == self.symbol && self.poll.is_some() {
          debug!("{} already selected", symbol);
        } else {
          self.select_symbol(symbol).await;
        }
        true
      }
      ChannelMsg::Shutdown => false,
    }
  }

  /// Atomic transition: disarm the old schedule, refresh once for the new
  /// symbol, arm a fresh schedule stamped with the new generation.
  pub async fn select_symbol(&mut self, symbol: Symbol) {
    if let Some(poll) = self.poll.take() {
      poll.disarm();
    }
    self.generation += 1;
    self.symbol = symbol;
    info!("Selected {}", symbol);
    self.refresh().await;
    self.poll = Some(self.arm_poll());
  }

  /// Fetch, transform, publish. Failures are logged and swallowed so the
  /// schedule keeps running; the published series only changes on success.
  pub async fn refresh(&mut self) {
    match self.fetch_series().await {
      Ok(series) => {
        if let Err(e) = self.publish(&series) {
          error!("🛑 Failed to publish chart for {}: {}", self.symbol, e);
        }
        self.series = Some(series);
      }
      Err(e) => error!("🛑 Failed to refresh {}: {}", self.symbol, e),
    }
  }

  async fn fetch_series(&self) -> TickerwatchResult<ChartSeries> {
    let samples = self.source.stock_data(self.symbol).await?;
    Ok(ChartSeries::from_samples(&samples))
  }

  fn publish(&self, series: &ChartSeries) -> TickerwatchResult<()> {
    let config = ChartConfig::new(self.symbol.as_str(), series);
    fs::write(
      self.chart_dir.join("chart.json"),
      serde_json::to_string_pretty(&config)?,
    )?;
    let png = self.chart_dir.join("chart.png");
    Plot::stock_chart(
      series,
      png.to_string_lossy().as_ref(),
      &config.options.plugins.title.text,
    )?;
    info!("Published {} points for {}", series.len(), self.symbol);
    Ok(())
  }

  fn arm_poll(&self) -> PollHandle {
    let tx = self.tx.clone();
    let generation = self.generation;
    let interval = self.poll_interval;
    let task = tokio::task::spawn(async move {
      let mut ticker = tokio::time::interval(interval);
      // the immediate refresh already happened in select_symbol
      ticker.tick().await;
      loop {
        ticker.tick().await;
        if tx.send(ChannelMsg::Refresh { generation }).is_err() {
          break;
        }
      }
    });
    PollHandle { generation, task }
  }

  fn teardown(&mut self) {
    if let Some(poll) = self.poll.take() {
      poll.disarm();
    }
    warn!("🟡 Shutting down engine");
  }
}

// ==========================================================================================
//                                 Engine tests
// ==========================================================================================

#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
fn fixture_samples() -> Vec<time_series::StockSample> {
  use chrono::NaiveDate;
  [(3, 105.0, 900.0), (2, 103.0, 800.0), (1, 100.0, 700.0)]
    .into_iter()
    .map(|(day, close, volume)| time_series::StockSample {
      date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
      open: close,
      high: close,
      low: close,
      close,
      volume,
    })
    .collect()
}

/// Counts calls and serves a canned batch, or an error once the allowed
/// number of successful calls runs out.
#[cfg(test)]
#[derive(Clone)]
struct StubSource {
  samples: Vec<time_series::StockSample>,
  calls: Arc<AtomicUsize>,
  ok_calls: usize,
}

#[cfg(test)]
impl StubSource {
  fn new(samples: Vec<time_series::StockSample>) -> Self {
    Self {
      samples,
      calls: Arc::new(AtomicUsize::new(0)),
      ok_calls: usize::MAX,
    }
  }

  fn failing_after(samples: Vec<time_series::StockSample>, ok_calls: usize) -> Self {
    Self {
      ok_calls,
      ..Self::new(samples)
    }
  }

  fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[cfg(test)]
impl SampleSource for StubSource {
  async fn stock_data(&self, _symbol: Symbol) -> TickerwatchResult<Vec<time_series::StockSample>> {
    let call = self.calls.fetch_add(1, Ordering::SeqCst);
    if call < self.ok_calls {
      Ok(self.samples.clone())
    } else {
      Err(TickerwatchError::Custom("backend unreachable".to_string()))
    }
  }
}

#[cfg(test)]
fn test_engine(source: StubSource, poll_interval: Duration) -> Engine<StubSource> {
  let (tx, rx) = crossbeam::channel::unbounded::<ChannelMsg>();
  let chart_dir = std::env::temp_dir().join(format!(
    "tickerwatch_engine_{}_{:?}",
    std::process::id(),
    std::thread::current().id()
  ));
  std::fs::create_dir_all(&chart_dir).unwrap();
  let config = Config {
    api_url: "http://localhost:5000".to_string(),
    poll_interval,
    default_symbol: Symbol::Aapl,
    chart_dir,
  };
  Engine::new(source, tx, rx, config)
}

#[tokio::test]
async fn select_symbol_refreshes_once_and_publishes_chronologically() {
  let source = StubSource::new(fixture_samples());
  let mut engine = test_engine(source.clone(), Duration::from_secs(3600));

  assert!(engine.series().is_none());
  engine.select_symbol(Symbol::Aapl).await;

  assert_eq!(source.calls(), 1);
  assert_eq!(engine.generation(), 1);
  let series = engine.series().unwrap();
  assert_eq!(series.labels, vec!["1/1/2024", "1/2/2024", "1/3/2024"]);
  assert_eq!(series.close, vec![100.0, 103.0, 105.0]);
  assert_eq!(series.volume, vec![700.0, 800.0, 900.0]);
  assert!(engine.chart_dir.join("chart.json").exists());
}

#[tokio::test]
async fn failed_refresh_keeps_the_published_series() {
  let source = StubSource::failing_after(fixture_samples(), 1);
  let mut engine = test_engine(source.clone(), Duration::from_secs(3600));

  engine.select_symbol(Symbol::Nvda).await;
  let published = engine.series().cloned().unwrap();

  engine.refresh().await;
  assert_eq!(source.calls(), 2);
  assert_eq!(engine.series(), Some(&published));
}

#[tokio::test]
async fn failed_first_refresh_publishes_nothing() {
  let source = StubSource::failing_after(Vec::new(), 0);
  let mut engine = test_engine(source, Duration::from_secs(3600));

  engine.select_symbol(Symbol::Msft).await;
  assert!(engine.series().is_none());
}

#[tokio::test]
async fn stale_generation_ticks_are_discarded() {
  let source = StubSource::new(fixture_samples());
  let mut engine = test_engine(source.clone(), Duration::from_secs(3600));

  engine.select_symbol(Symbol::Aapl).await;
  engine.select_symbol(Symbol::Msft).await;
  assert_eq!(source.calls(), 2);

  // a tick from the AAPL schedule arriving after the switch
  assert!(engine.handle_msg(ChannelMsg::Refresh { generation: 1 }).await);
  assert_eq!(source.calls(), 2);

  assert!(engine.handle_msg(ChannelMsg::Refresh { generation: 2 }).await);
  assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn reselecting_the_current_symbol_is_a_no_op() {
  let source = StubSource::new(fixture_samples());
  let mut engine = test_engine(source.clone(), Duration::from_secs(3600));

  engine.select_symbol(Symbol::Aapl).await;
  assert!(engine.handle_msg(ChannelMsg::Select(Symbol::Aapl)).await);
  assert_eq!(source.calls(), 1);
  assert_eq!(engine.generation(), 1);

  assert!(engine.handle_msg(ChannelMsg::Select(Symbol::Amzn)).await);
  assert_eq!(source.calls(), 2);
  assert_eq!(engine.generation(), 2);
}

#[tokio::test]
async fn switching_symbols_disarms_the_previous_schedule() {
  let source = StubSource::new(fixture_samples());
  let mut engine = test_engine(source, Duration::from_millis(10));

  engine.select_symbol(Symbol::Aapl).await;
  tokio::time::sleep(Duration::from_millis(50)).await;

  engine.select_symbol(Symbol::Googl).await;
  // drain everything the old schedule managed to enqueue
  while engine.rx.try_recv().is_ok() {}

  tokio::time::sleep(Duration::from_millis(50)).await;
  let mut ticks = 0;
  while let Ok(msg) = engine.rx.try_recv() {
    ticks += 1;
    assert_eq!(msg, ChannelMsg::Refresh { generation: 2 });
  }
  assert!(ticks > 0);
}

#[tokio::test]
async fn empty_batches_publish_an_empty_series() {
  let source = StubSource::new(Vec::new());
  let mut engine = test_engine(source, Duration::from_secs(3600));

  engine.select_symbol(Symbol::Amzn).await;
  let series = engine.series().unwrap();
  assert!(series.is_empty());
  assert_eq!(series.close.len(), series.volume.len());
}

#[tokio::test]
async fn shutdown_stops_the_loop() {
  let source = StubSource::new(fixture_samples());
  let mut engine = test_engine(source, Duration::from_secs(3600));

  engine.select_symbol(Symbol::Aapl).await;
  assert!(!engine.handle_msg(ChannelMsg::Shutdown).await);
}
