use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily observation for a single ticker.
/// The backend serves these newest-first; nothing downstream relies on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSample {
  pub date: NaiveDate,
  pub open: f64,
  pub high: f64,
  pub low: f64,
  pub close: f64,
  pub volume: f64,
}

impl StockSample {
  /// Display label for the x axis, e.g. "5/11/2025".
  pub fn label(&self) -> String {
    self.date.format("%-m/%-d/%Y").to_string()
  }
}

// ==========================================================================================
//                                 Sample tests
// ==========================================================================================

#[test]
fn label_has_no_zero_padding() {
  let sample = StockSample {
    date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
    open: 104.0,
    high: 106.0,
    low: 103.0,
    close: 105.0,
    volume: 900.0,
  };
  assert_eq!(sample.label(), "1/3/2024");

  let sample = StockSample {
    date: NaiveDate::from_ymd_opt(2024, 11, 25).unwrap(),
    ..sample
  };
  assert_eq!(sample.label(), "11/25/2024");
}
