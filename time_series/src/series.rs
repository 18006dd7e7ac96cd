use crate::StockSample;
use serde::{Deserialize, Serialize};

/// The derived view a chart renders: date labels, close prices and traded
/// volumes, index-aligned and ordered oldest-first. Rebuilt wholesale from
/// each fetched batch; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
  pub labels: Vec<String>,
  pub close: Vec<f64>,
  pub volume: Vec<f64>,
}

impl ChartSeries {
  /// Sorts by date ascending rather than trusting the backend's ordering.
  pub fn from_samples(samples: &[StockSample]) -> Self {
    let mut sorted: Vec<&StockSample> = samples.iter().collect();
    sorted.sort_by_key(|s| s.date);
    Self {
      labels: sorted.iter().map(|s| s.label()).collect(),
      close: sorted.iter().map(|s| s.close).collect(),
      volume: sorted.iter().map(|s| s.volume).collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.labels.len()
  }

  pub fn is_empty(&self) -> bool {
    self.labels.is_empty()
  }
}

// ==========================================================================================
//                                 Series tests
// ==========================================================================================

#[cfg(test)]
fn fixture_newest_first() -> Vec<StockSample> {
  use chrono::NaiveDate;
  [(3, 105.0, 900.0), (2, 103.0, 800.0), (1, 100.0, 700.0)]
    .into_iter()
    .map(|(day, close, volume)| StockSample {
      date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
      open: close,
      high: close,
      low: close,
      close,
      volume,
    })
    .collect()
}

#[test]
fn newest_first_batch_becomes_chronological() {
  let series = ChartSeries::from_samples(&fixture_newest_first());
  assert_eq!(series.labels, vec!["1/1/2024", "1/2/2024", "1/3/2024"]);
  assert_eq!(series.close, vec![100.0, 103.0, 105.0]);
  assert_eq!(series.volume, vec![700.0, 800.0, 900.0]);
}

#[test]
fn any_input_ordering_yields_the_same_series() {
  let mut samples = fixture_newest_first();
  let expected = ChartSeries::from_samples(&samples);

  samples.reverse();
  assert_eq!(ChartSeries::from_samples(&samples), expected);

  samples.swap(0, 1);
  assert_eq!(ChartSeries::from_samples(&samples), expected);
}

#[test]
fn sequences_stay_index_aligned() {
  let samples = fixture_newest_first();
  for n in 0..=samples.len() {
    let series = ChartSeries::from_samples(&samples[..n]);
    assert_eq!(series.labels.len(), n);
    assert_eq!(series.close.len(), n);
    assert_eq!(series.volume.len(), n);
  }
}

#[test]
fn empty_batch_is_an_empty_series() {
  let series = ChartSeries::from_samples(&[]);
  assert!(series.is_empty());
  assert_eq!(series.len(), 0);
}
