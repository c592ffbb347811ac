use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::color::ColorMap;
use crate::session::DashboardEvent;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

enum Choice {
    Toggle(String),
    SelectAll,
    SelectNone,
}

/// Render the left filter panel and return the control changes made this frame.
pub fn side_panel(ui: &mut Ui, state: &AppState) -> Vec<DashboardEvent> {
    let mut events = Vec::new();

    ui.heading("Filters");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return events;
    };
    let dataset = session.dataset();
    let filters = session.filters();
    let department_colors = ColorMap::new(dataset.departments().iter().map(String::as_str));

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            match multi_select(
                ui,
                "Select Department",
                dataset.departments(),
                &filters.departments,
                Some(&department_colors),
            ) {
                Some(Choice::Toggle(d)) => events.push(DashboardEvent::ToggleDepartment(d)),
                Some(Choice::SelectAll) => events.push(DashboardEvent::SelectAllDepartments),
                Some(Choice::SelectNone) => events.push(DashboardEvent::SelectNoDepartments),
                None => {}
            }

            match multi_select(
                ui,
                "Employee Status",
                dataset.statuses(),
                &filters.statuses,
                None,
            ) {
                Some(Choice::Toggle(s)) => events.push(DashboardEvent::ToggleStatus(s)),
                Some(Choice::SelectAll) => events.push(DashboardEvent::SelectAllStatuses),
                Some(Choice::SelectNone) => events.push(DashboardEvent::SelectNoStatuses),
                None => {}
            }

            ui.separator();
            ui.strong("Performance Rating Range");
            match dataset.rating_bounds {
                Some(bounds) => {
                    let mut lo = filters.rating.lo;
                    let mut hi = filters.rating.hi;
                    if ui
                        .add(Slider::new(&mut lo, bounds.lo..=bounds.hi).text("min"))
                        .changed()
                    {
                        events.push(DashboardEvent::SetRatingLow(lo));
                    }
                    if ui
                        .add(Slider::new(&mut hi, bounds.lo..=bounds.hi).text("max"))
                        .changed()
                    {
                        events.push(DashboardEvent::SetRatingHigh(hi));
                    }
                    if filters.rating.is_inverted() {
                        ui.label(
                            RichText::new(format!("Range {} is empty, nothing matches.", filters.rating))
                                .weak(),
                        );
                    }
                }
                None => {
                    ui.label("No ratings in this dataset.");
                }
            }

            ui.separator();
            if ui.button("🔄 Reset Filters").clicked() {
                events.push(DashboardEvent::Reset);
            }
        });

    events
}

/// Checkbox list with All/None buttons, collapsible like a multiselect.
fn multi_select(
    ui: &mut Ui,
    title: &str,
    options: &[String],
    selected: &BTreeSet<String>,
    colors: Option<&ColorMap>,
) -> Option<Choice> {
    let mut choice = None;
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    choice = Some(Choice::SelectAll);
                }
                if ui.small_button("None").clicked() {
                    choice = Some(Choice::SelectNone);
                }
            });

            for value in options {
                let mut text = RichText::new(value);
                if let Some(cm) = colors {
                    text = text.color(cm.color_for(value));
                }
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    choice = Some(Choice::Toggle(value.clone()));
                }
            }
        });

    choice
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.data_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some((loaded, visible)) = state.counts() {
            ui.label(format!("{loaded} employees loaded, {visible} visible"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open employee data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
