use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time_series::StockSample;

use crate::{SampleSource, Symbol, TickerwatchResult};

/// In-process stand-in for the stock data backend, useful for running without
/// one and for tests. Mirrors the real service's response shape: one daily
/// OHLCV row per day, most recent day first, seeded per symbol so each ticker
/// gets its own stable random walk.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
  pub days: usize,
}

impl Default for SimulatedSource {
  fn default() -> Self {
    Self { days: 30 }
  }
}

impl SimulatedSource {
  pub fn new(days: usize) -> Self {
    Self { days }
  }

  fn seed(symbol: Symbol) -> u64 {
    42 + symbol.as_str().bytes().map(u64::from).sum::<u64>()
  }

  pub fn generate(&self, symbol: Symbol) -> Vec<StockSample> {
    let mut rng = StdRng::seed_from_u64(Self::seed(symbol));
    let base_price: f64 = 100.0 + rng.gen_range(50.0..200.0);
    let volatility = 0.02;
    let start = Utc::now().date_naive() - Duration::days(self.days.max(1) as i64 - 1);

    let mut samples = Vec::with_capacity(self.days);
    let mut prev_close = base_price;
    for day in 0..self.days {
      let date = start + Duration::days(day as i64);
      let open = prev_close;
      let drift = rng.gen_range(-volatility..volatility);
      let close = open * (1.0 + drift);
      let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
      let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
      let volume = rng.gen_range(10_000.0..100_000.0_f64).round();
      samples.push(StockSample {
        date,
        open,
        high,
        low,
        close,
        volume,
      });
      prev_close = close;
    }
    // the real backend orders newest first
    samples.reverse();
    samples
  }
}

impl SampleSource for SimulatedSource {
  async fn stock_data(&self, symbol: Symbol) -> TickerwatchResult<Vec<StockSample>> {
    Ok(self.generate(symbol))
  }
}

// ==========================================================================================
//                                 Simulator tests
// ==========================================================================================

#[test]
fn yields_newest_first_batches_of_the_requested_depth() {
  let source = SimulatedSource::new(30);
  let samples = source.generate(Symbol::Aapl);
  assert_eq!(samples.len(), 30);
  for pair in samples.windows(2) {
    assert!(pair[0].date > pair[1].date);
  }
}

#[test]
fn is_deterministic_per_symbol() {
  let source = SimulatedSource::default();
  let first = source.generate(Symbol::Msft);
  let second = source.generate(Symbol::Msft);
  assert_eq!(first, second);
}

#[test]
fn symbols_get_distinct_walks() {
  let source = SimulatedSource::default();
  let aapl = source.generate(Symbol::Aapl);
  let nvda = source.generate(Symbol::Nvda);
  assert_ne!(aapl[0].close, nvda[0].close);
}

#[test]
fn highs_and_lows_bracket_open_and_close() {
  let source = SimulatedSource::default();
  for sample in source.generate(Symbol::Googl) {
    assert!(sample.high >= sample.open.max(sample.close));
    assert!(sample.low <= sample.open.min(sample.close));
    assert!((10_000.0..=100_000.0).contains(&sample.volume));
  }
}
