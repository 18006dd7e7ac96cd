use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use time_series::StockSample;

use crate::errors::TickerwatchResult;

/// One row as the backend serializes it. The `date` field arrives either as
/// an RFC 2822 string (how the original service renders a DATE column) or as
/// plain `YYYY-MM-DD`; everything else is numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRow {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl StockRow {
    /// A malformed date fails the whole refresh cycle rather than producing a
    /// partially parsed batch.
    pub fn to_sample(&self) -> TickerwatchResult<StockSample> {
        Ok(StockSample {
            date: parse_date(&self.date)?,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        })
    }
}

fn parse_date(raw: &str) -> TickerwatchResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Ok(date.date_naive());
    }
    Ok(DateTime::parse_from_rfc3339(raw)?.date_naive())
}

// ==========================================================================================
//                                 Wire model tests
// ==========================================================================================

#[test]
fn parses_every_date_spelling_the_backend_uses() -> anyhow::Result<()> {
    let expected = NaiveDate::from_ymd_opt(2025, 5, 11).unwrap();
    assert_eq!(parse_date("2025-05-11")?, expected);
    assert_eq!(parse_date("Sun, 11 May 2025 00:00:00 GMT")?, expected);
    assert_eq!(parse_date("2025-05-11T00:00:00+00:00")?, expected);
    assert!(parse_date("five eleven").is_err());
    Ok(())
}

#[test]
fn deserializes_a_backend_payload() -> anyhow::Result<()> {
    let payload = r#"[
        {"date": "Wed, 03 Jan 2024 00:00:00 GMT", "open": 104.2, "high": 106.0, "low": 103.5, "close": 105, "volume": 900},
        {"date": "2024-01-02", "open": 101.0, "high": 103.4, "low": 100.9, "close": 103, "volume": 800}
    ]"#;
    let rows: Vec<StockRow> = serde_json::from_str(payload)?;
    let samples = rows
        .iter()
        .map(StockRow::to_sample)
        .collect::<TickerwatchResult<Vec<StockSample>>>()?;
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    assert_eq!(samples[0].close, 105.0);
    assert_eq!(samples[1].volume, 800.0);
    Ok(())
}
