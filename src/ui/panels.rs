use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate};
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let (Some((min, max)), Some(range)) = (state.bounds, state.range) else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Date range: slider pair over day offsets, plus calendar pickers ----
    ui.strong("Select Date Range:");
    let span = (max - min).num_days();
    let mut from = (range.start - min).num_days();
    let mut to = (range.end - min).num_days();

    let fmt = move |v: f64, _: RangeInclusive<usize>| format_day(min + Duration::days(v as i64));
    ui.add(egui::Slider::new(&mut from, 0..=span).text("from").custom_formatter(fmt));
    ui.add(egui::Slider::new(&mut to, 0..=span).text("to").custom_formatter(fmt));

    let mut start = min + Duration::days(from);
    let mut end = min + Duration::days(to.max(from));

    ui.horizontal(|ui: &mut Ui| {
        ui.add(DatePickerButton::new(&mut start).id_salt("range_start"));
        ui.label("–");
        ui.add(DatePickerButton::new(&mut end).id_salt("range_end"));
    });

    if ui.small_button("Full range").clicked() {
        state.reset_range();
    } else {
        state.set_range(start, end);
    }

    let days = state.range.map_or(0, |r| r.days());
    ui.label(format!(
        "{days} days, {} of {} sales in range",
        state.view.len(),
        state.dataset.as_ref().map_or(0, |ds| ds.len())
    ));
    ui.separator();

    ui.checkbox(&mut state.show_hypothesis, "Show Hypothesis Testing");
}

/// `DD Mon YYYY`, the slider label format.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%d %b %Y").to_string()
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} sales loaded, {} in range",
                ds.len(),
                state.view.len()
            ));
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
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_label_format() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 7).unwrap();
        assert_eq!(format_day(d), "07 Mar 2023");
    }
}
