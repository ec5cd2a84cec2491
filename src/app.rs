use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{overview, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SalaryStoryApp {
    pub state: AppState,
}

impl eframe::App for SalaryStoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: chart settings and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state);
            ui.separator();

            let Some(charts) = &self.state.charts else {
                plot::no_data(ui, &self.state);
                return;
            };
            let settings = &self.state.settings;
            let colors = &self.state.color_map;
            match settings.tab {
                Tab::Overview => overview::overview(ui, charts),
                Tab::BoxPlot => plot::box_plot(ui, charts, settings),
                Tab::Scatter => plot::scatter_plot(ui, charts, settings, colors),
                Tab::Heatmap => plot::correlation_heatmap(ui, charts),
                Tab::Parallel => plot::parallel_plot(ui, charts, colors),
            }
        });
    }
}
