use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::present::MetricCard;
use crate::state::AppState;

use super::{charts, table};

// ---------------------------------------------------------------------------
// Central panel: metrics, charts, drill-down table
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = state
                .status_message
                .as_deref()
                .unwrap_or("Open a file to view the dashboard  (File → Open…)");
            ui.heading(hint);
        });
        return;
    };
    let model = session.model();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("📊 Employee Analytics Dashboard").size(26.0));
            ui.label(RichText::new("Interactive HR analytics dashboard").weak());
            ui.add_space(8.0);

            ui.columns(model.metrics.len(), |cols: &mut [Ui]| {
                for (col, card) in cols.iter_mut().zip(&model.metrics) {
                    metric_card(col, card);
                }
            });

            ui.separator();
            charts::bar_chart(ui, "department_bars", &model.department_bars);
            ui.add_space(12.0);
            charts::donut_chart(ui, &model.performance_donut);
            ui.add_space(12.0);
            charts::bar_chart(ui, "type_bars", &model.type_bars);
            ui.add_space(12.0);
            charts::bar_chart(ui, "rating_bars", &model.rating_bars);
            ui.add_space(12.0);
            table::detail_table(ui, &model.details);

            ui.separator();
            ui.label(RichText::new("📌 Built with egui | HR Analytics Project").weak());
        });
}

fn metric_card(ui: &mut Ui, card: &MetricCard) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(card.label);
        ui.label(RichText::new(&card.value).size(28.0).strong());
    });
}
