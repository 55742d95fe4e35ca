// src/gui/components/ranking_chart.rs
//
// Year vs. national rank line chart. Rank 1 sits at the top: the plot's Y
// axis grows upward, so ranks are negated going in and the tick labels
// undo it (see ChartSeries::to_plot_y).

use eframe::egui::{self, Color32};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::rankings::ChartSeries;

const LINE_COLOR: Color32 = Color32::from_rgb(0x88, 0x84, 0xD8);
const CHART_H: f32 = 320.0;

/// Integer tick labels only; fractional grid lines stay unlabeled.
fn tick(value: f64, prefix: &str) -> String {
    if value.fract() == 0.0 { format!("{prefix}{value:.0}") } else { s!() }
}

pub fn draw(ui: &mut egui::Ui, series: &ChartSeries) {
    if series.is_empty() {
        ui.weak("Nothing to chart for the current filter.");
        return;
    }

    let invert = series.invert_y;
    let unflip = move |y: f64| if invert { -y } else { y };

    let line = Line::new("National Rank", PlotPoints::from(series.plot_points()))
        .color(LINE_COLOR)
        .width(2.0);
    let dots = Points::new("National Rank", PlotPoints::from(series.plot_points()))
        .color(LINE_COLOR)
        .radius(4.0);

    let mut plot = Plot::new("ranking_chart")
        .height(CHART_H)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .x_axis_label("Year")
        .y_axis_label("National Rank")
        .x_axis_formatter(|mark, _range| tick(mark.value, ""))
        .y_axis_formatter(move |mark, _range| tick(unflip(mark.value), "#"))
        .label_formatter(move |_name, p| format!("{:.0}: #{:.0}", p.x, unflip(p.y)));

    if let Some((lo, hi)) = series.x_range {
        plot = plot.include_x(lo).include_x(hi);
    }
    if let Some((best, worst)) = series.rank_range {
        plot = plot
            .include_y(series.to_plot_y(best))
            .include_y(series.to_plot_y(worst));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.line(line);
        plot_ui.points(dots);
    });
}
