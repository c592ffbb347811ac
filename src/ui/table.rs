use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::present::DetailTable;

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable drill-down table of the visible records.
pub fn detail_table(ui: &mut Ui, table: &DetailTable) {
    ui.heading(table.title);
    ui.label(format!("{} rows", table.rows.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(120.0), table.columns.len() - 1)
        .column(Column::remainder())
        .max_scroll_height(360.0)
        .header(22.0, |mut header| {
            for name in table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
