use std::path::Path;

use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{narrative, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RetailDashboardApp {
    pub state: AppState,
}

impl RetailDashboardApp {
    /// Start the dashboard, optionally loading a file right away.
    pub fn new(initial_file: Option<&Path>) -> Self {
        let mut app = Self::default();
        if let Some(path) = initial_file {
            app.state.load_path(path);
        }
        app
    }
}

impl eframe::App for RetailDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                plot::no_data(ui);
                return;
            }
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| report(ui, &self.state));
        });
    }
}

fn report(ui: &mut Ui, state: &AppState) {
    ui.heading(egui::RichText::new(narrative::TITLE).size(24.0));
    ui.add_space(6.0);
    narrative::overview(ui);
    ui.separator();

    ui.heading("Data Exploration");
    if state.view.is_empty() {
        plot::empty_range_notice(ui);
    }
    if let Some(charts) = &state.charts {
        ui.strong("Price Distribution");
        plot::price_histogram(ui, &charts.price_histogram);
        ui.add_space(8.0);

        ui.strong("Units Ordered vs Avg Price Per Unit");
        plot::units_scatter(ui, &charts.scatter);
        ui.add_space(8.0);

        ui.strong("Correlation Heatmap");
        plot::correlation_heatmap(ui, &charts.correlation);
    }
    ui.separator();

    narrative::insights(ui);
    ui.separator();

    if state.show_hypothesis {
        narrative::hypothesis(ui);
        ui.separator();
    }

    narrative::recommendations(ui);
}
