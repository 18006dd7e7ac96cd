use crate::ChartSeries;
use serde::{Deserialize, Serialize};

pub const CLOSE_COLOR: &str = "rgb(75, 192, 192)";
pub const VOLUME_COLOR: &str = "rgb(255, 99, 132)";

/// Chart.js-shaped line chart configuration. This is the pass-through
/// contract the rendering surface consumes; serialized as-is with serde_json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
  #[serde(rename = "type")]
  pub kind: String,
  pub data: ChartData,
  pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
  pub labels: Vec<String>,
  pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
  pub label: String,
  pub data: Vec<f64>,
  pub border_color: String,
  pub tension: f64,
  /// Chart.js spells this one "yAxisID", not "yAxisId".
  #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
  pub y_axis_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOptions {
  pub responsive: bool,
  pub plugins: Plugins,
  pub scales: Scales,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plugins {
  pub legend: Legend,
  pub title: Title,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Legend {
  pub position: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
  pub display: bool,
  pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scales {
  pub y: Axis,
  pub y1: Axis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
  #[serde(rename = "type")]
  pub kind: String,
  pub display: bool,
  pub position: String,
  pub title: Title,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub grid: Option<Grid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
  pub draw_on_chart_area: bool,
}

impl ChartConfig {
  /// Close price on the left axis, volume on the right axis, title and
  /// dataset labels interpolating the symbol.
  pub fn new(symbol: &str, series: &ChartSeries) -> Self {
    Self {
      kind: "line".to_string(),
      data: ChartData {
        labels: series.labels.clone(),
        datasets: vec![
          ChartDataset {
            label: format!("{} Close Price", symbol),
            data: series.close.clone(),
            border_color: CLOSE_COLOR.to_string(),
            tension: 0.1,
            y_axis_id: None,
          },
          ChartDataset {
            label: format!("{} Volume", symbol),
            data: series.volume.clone(),
            border_color: VOLUME_COLOR.to_string(),
            tension: 0.1,
            y_axis_id: Some("y1".to_string()),
          },
        ],
      },
      options: ChartOptions {
        responsive: true,
        plugins: Plugins {
          legend: Legend {
            position: "top".to_string(),
          },
          title: Title {
            display: true,
            text: format!("{} Stock Data (Real-Time)", symbol),
          },
        },
        scales: Scales {
          y: Axis {
            kind: "linear".to_string(),
            display: true,
            position: "left".to_string(),
            title: Title {
              display: true,
              text: "Close Price ($)".to_string(),
            },
            grid: None,
          },
          y1: Axis {
            kind: "linear".to_string(),
            display: true,
            position: "right".to_string(),
            title: Title {
              display: true,
              text: "Volume".to_string(),
            },
            grid: Some(Grid {
              draw_on_chart_area: false,
            }),
          },
        },
      },
    }
  }
}

// ==========================================================================================
//                                 Chart config tests
// ==========================================================================================

#[test]
fn config_serializes_with_chartjs_field_spellings() {
  let series = ChartSeries {
    labels: vec!["1/1/2024".to_string(), "1/2/2024".to_string()],
    close: vec![100.0, 103.0],
    volume: vec![700.0, 800.0],
  };
  let config = ChartConfig::new("NVDA", &series);
  let json: serde_json::Value = serde_json::to_value(&config).unwrap();

  assert_eq!(json["type"], "line");
  assert_eq!(json["data"]["labels"][0], "1/1/2024");
  assert_eq!(json["data"]["datasets"][0]["label"], "NVDA Close Price");
  assert_eq!(json["data"]["datasets"][0]["borderColor"], "rgb(75, 192, 192)");
  assert_eq!(json["data"]["datasets"][0]["tension"], 0.1);
  assert!(json["data"]["datasets"][0].get("yAxisID").is_none());
  assert_eq!(json["data"]["datasets"][1]["label"], "NVDA Volume");
  assert_eq!(json["data"]["datasets"][1]["borderColor"], "rgb(255, 99, 132)");
  assert_eq!(json["data"]["datasets"][1]["yAxisID"], "y1");
  assert_eq!(json["options"]["plugins"]["legend"]["position"], "top");
  assert_eq!(
    json["options"]["plugins"]["title"]["text"],
    "NVDA Stock Data (Real-Time)"
  );
  assert_eq!(json["options"]["scales"]["y"]["position"], "left");
  assert_eq!(json["options"]["scales"]["y"]["title"]["text"], "Close Price ($)");
  assert_eq!(json["options"]["scales"]["y1"]["position"], "right");
  assert_eq!(json["options"]["scales"]["y1"]["title"]["text"], "Volume");
  assert_eq!(json["options"]["scales"]["y1"]["grid"]["drawOnChartArea"], false);
}

#[test]
fn dataset_lengths_follow_the_series() {
  let series = ChartSeries::default();
  let config = ChartConfig::new("AAPL", &series);
  assert!(config.data.labels.is_empty());
  assert!(config.data.datasets[0].data.is_empty());
  assert!(config.data.datasets[1].data.is_empty());
}
