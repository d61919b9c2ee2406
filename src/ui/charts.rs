use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot, PlotPoints, Points};

use crate::color::{box_color, generate_palette};
use crate::data::describe::BoxSummary;
use crate::views::explore::ColumnChart;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Two-panel column visualisation
// ---------------------------------------------------------------------------

/// Count chart and box plot of one column, side by side.
pub fn column_charts(ui: &mut Ui, chart: &ColumnChart) {
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong(format!("Countplot: {}", chart.column));
        count_chart(&mut cols[0], chart);
        cols[1].strong(format!("Boxplot: {}", chart.column));
        match &chart.box_plot {
            Ok(summary) => box_chart(&mut cols[1], &chart.column, summary),
            Err(reason) => {
                cols[1].label(RichText::new(reason.to_string()).color(Color32::RED));
            }
        }
    });
}

/// One bar per distinct value. Numeric values sit at their own x position;
/// anything else is laid out by rank.
fn count_chart(ui: &mut Ui, chart: &ColumnChart) {
    let numeric: Option<Vec<f64>> = chart.counts.iter().map(|(v, _)| v.as_f64()).collect();
    let positions: Vec<f64> = match &numeric {
        Some(xs) => xs.clone(),
        None => (0..chart.counts.len()).map(|i| i as f64).collect(),
    };
    let width = positions
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    let width = if width.is_finite() && width > 0.0 { width * 0.8 } else { 0.8 };

    let palette = generate_palette(chart.counts.len());
    let bars: Vec<Bar> = chart
        .counts
        .iter()
        .zip(positions)
        .zip(palette)
        .map(|(((value, count), x), color)| {
            Bar::new(x, *count as f64)
                .width(width)
                .fill(color)
                .name(value.to_string())
        })
        .collect();

    Plot::new("count_plot")
        .height(CHART_HEIGHT)
        .y_axis_label("count")
        .show_x(numeric.is_some())
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&chart.column));
        });
}

fn box_chart(ui: &mut Ui, column: &str, summary: &BoxSummary) {
    let elem = BoxElem::new(
        0.0,
        BoxSpread::new(
            summary.lower_whisker,
            summary.q1,
            summary.median,
            summary.q3,
            summary.upper_whisker,
        ),
    )
    .name(column)
    .box_width(0.5)
    .fill(box_color().gamma_multiply(0.4));

    let outliers: PlotPoints = summary.outliers.iter().map(|&v| [0.0, v]).collect();

    Plot::new("box_plot")
        .height(CHART_HEIGHT)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name(column));
            plot_ui.points(Points::new(outliers).radius(3.0).color(Color32::GRAY));
        });
}
