use crate::ChartSeries;
use plotters::prelude::*;
use plotters::style::{BLACK, WHITE};

pub const CLOSE_RGB: RGBColor = RGBColor(75, 192, 192);
pub const VOLUME_RGB: RGBColor = RGBColor(255, 99, 132);

pub struct Plot;

impl Plot {
  /// Draws the dual-axis line chart: close price on the left y axis, volume
  /// on the right y axis, date labels along x. An empty series draws nothing.
  pub fn stock_chart(series: &ChartSeries, out_file: &str, title: &str) -> anyhow::Result<()> {
    if series.is_empty() {
      return Ok(());
    }

    let n = series.len();
    let (close_min, close_max) = Self::bounds(&series.close);
    let (volume_min, volume_max) = Self::bounds(&series.volume);

    let root = BitMapBackend::new(out_file, (2048, 1024)).into_drawing_area();
    root.fill(&WHITE).map_err(
      |e| anyhow::anyhow!("Failed to fill drawing area with white: {}", e)
    )?;
    let labels = series.labels.clone();
    let mut chart = ChartBuilder::on(&root)
      .margin_top(20)
      .margin_bottom(20)
      .margin_left(30)
      .margin_right(30)
      .set_all_label_area_size(140)
      .caption(
        title,
        ("sans-serif", 40.0).into_font(),
      )
      .build_cartesian_2d(0..n, close_min..close_max).map_err(
        |e| anyhow::anyhow!("Failed to build cartesian 2d: {}", e)
      )?
      .set_secondary_coord(0..n, volume_min..volume_max);
    chart
      .configure_mesh()
      .light_line_style(WHITE)
      .label_style(("sans-serif", 30, &BLACK).into_text_style(&root))
      .x_label_formatter(&|i| labels.get(*i).cloned().unwrap_or_default())
      .x_desc("Date")
      .y_desc("Close Price ($)")
      .draw().map_err(
        |e| anyhow::anyhow!("Failed to draw mesh: {}", e)
      )?;
    chart
      .configure_secondary_axes()
      .label_style(("sans-serif", 30, &BLACK).into_text_style(&root))
      .y_desc("Volume")
      .draw().map_err(
        |e| anyhow::anyhow!("Failed to draw secondary axes: {}", e)
      )?;

    chart.draw_series(
      LineSeries::new(
        series.close.iter().enumerate().map(|(i, y)| (i, *y)),
        ShapeStyle {
          color: RGBAColor::from(CLOSE_RGB),
          filled: true,
          stroke_width: 2,
        },
      )
        .point_size(3),
    ).map_err(
      |e| anyhow::anyhow!("Failed to draw close series: {}", e)
    )?
      .label("Close Price ($)")
      .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CLOSE_RGB));

    chart.draw_secondary_series(
      LineSeries::new(
        series.volume.iter().enumerate().map(|(i, y)| (i, *y)),
        ShapeStyle {
          color: RGBAColor::from(VOLUME_RGB),
          filled: true,
          stroke_width: 2,
        },
      )
        .point_size(3),
    ).map_err(
      |e| anyhow::anyhow!("Failed to draw volume series: {}", e)
    )?
      .label("Volume")
      .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], VOLUME_RGB));

    chart
      .configure_series_labels()
      .position(SeriesLabelPosition::UpperMiddle)
      .background_style(WHITE.mix(0.8))
      .border_style(BLACK)
      .label_font(("sans-serif", 30))
      .draw().map_err(
        |e| anyhow::anyhow!("Failed to draw series labels: {}", e)
      )?;

    root.present().map_err(
      |e| anyhow::anyhow!("Failed to present root: {}", e)
    )?;

    Ok(())
  }

  fn bounds(values: &[f64]) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for value in values {
      if *value < min {
        min = *value;
      }
      if *value > max {
        max = *value;
      }
    }
    // a flat series still needs a non-degenerate axis
    if min == max {
      min -= 1.0;
      max += 1.0;
    }
    (min, max)
  }
}

// ==========================================================================================
//                                 Plot tests
// ==========================================================================================

#[test]
fn bounds_pad_flat_series() {
  assert_eq!(Plot::bounds(&[5.0, 5.0, 5.0]), (4.0, 6.0));
  assert_eq!(Plot::bounds(&[1.0, 3.0]), (1.0, 3.0));
}

#[test]
fn empty_series_draws_nothing() -> anyhow::Result<()> {
  let out = std::env::temp_dir().join("tickerwatch_empty_plot.png");
  let _ = std::fs::remove_file(&out);
  Plot::stock_chart(
    &ChartSeries::default(),
    out.to_string_lossy().as_ref(),
    "AAPL Stock Data (Real-Time)",
  )?;
  assert!(!out.exists());
  Ok(())
}
