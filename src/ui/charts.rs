use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::present::{BarSeries, DonutSeries};

pub const CHART_HEIGHT: f32 = 260.0;

/// Donut arcs are drawn as convex quads of at most this many radians.
const ARC_STEP: f32 = TAU / 120.0;

fn no_data(ui: &mut Ui) {
    ui.add_space(8.0);
    ui.label(RichText::new("No data for the current filters.").weak());
    ui.add_space(8.0);
}

/// Tick label for a category axis: the label at an integer position, blank
/// anywhere else.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// One bar per category, value text on top.
pub fn bar_chart(ui: &mut Ui, id: &str, series: &BarSeries) {
    ui.heading(series.title);
    if series.bars.is_empty() {
        no_data(ui);
        return;
    }

    let labels: Vec<String> = series.bars.iter().map(|b| b.label.clone()).collect();
    let top = series.bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let bars: Vec<Bar> = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.value)
                .name(&b.label)
                .fill(b.color)
                .width(0.6)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(series.x_label)
        .y_axis_label(series.y_label)
        .include_y(0.0)
        .include_y(top * 1.15)
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            for (i, b) in series.bars.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, b.value), b.text.clone())
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Donut chart
// ---------------------------------------------------------------------------

/// Proportion chart with a legend to its right.
pub fn donut_chart(ui: &mut Ui, series: &DonutSeries) {
    ui.heading(series.title);
    if series.slices.is_empty() {
        no_data(ui);
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(CHART_HEIGHT), Sense::hover());
        let center = response.rect.center();
        let outer = CHART_HEIGHT * 0.45;
        let inner = outer * series.hole;

        // Clockwise from twelve o'clock.
        let mut start = -FRAC_PI_2;
        for slice in &series.slices {
            let sweep = slice.fraction as f32 * TAU;
            paint_ring_segment(&painter, center, inner, outer, start, sweep, slice.color);
            if slice.fraction >= 0.04 {
                let mid = start + sweep / 2.0;
                painter.text(
                    center + Vec2::angled(mid) * (inner + outer) / 2.0,
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", slice.fraction * 100.0),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for slice in &series.slices {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, slice.color);
                    ui.label(format!("{}  ({})", slice.label, slice.count));
                });
            }
        });
    });
}

fn paint_ring_segment(
    painter: &egui::Painter,
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) {
    let steps = ((sweep / ARC_STEP).ceil() as usize).max(1);
    for k in 0..steps {
        let a0 = start + sweep * k as f32 / steps as f32;
        let a1 = start + sweep * (k + 1) as f32 / steps as f32;
        let points = vec![
            center + Vec2::angled(a0) * outer,
            center + Vec2::angled(a1) * outer,
            center + Vec2::angled(a1) * inner,
            center + Vec2::angled(a0) * inner,
        ];
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_only_at_category_positions() {
        let labels = vec!["Sales".to_string(), "Eng".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Sales");
        assert_eq!(category_label(&labels, 1.0), "Eng");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
