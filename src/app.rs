use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

const DATA_SOURCE_URL: &str = "https://www.basketball-reference.com/";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HoopsExplorerApp {
    pub state: AppState,
}

impl HoopsExplorerApp {
    /// Wrap `state` and load its default (latest) season.
    pub fn new(mut state: AppState) -> Self {
        let year = state.config.latest_season();
        state.select_year(year);
        Self { state }
    }
}

impl eframe::App for HoopsExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: intro, table, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    intro(ui);
                    ui.separator();
                    table::stats_section(ui, &mut self.state);
                    ui.separator();
                    plot::chart_section(ui, &self.state);
                });
        });
    }
}

fn intro(ui: &mut Ui) {
    ui.heading(egui::RichText::new("NBA Player Statistics Explorer").size(26.0));
    ui.label(
        "Explore per-game player statistics season by season: filter by team and \
         position, export the rows you see, and switch between heatmaps, box plots, \
         rankings and scatter plots of the filtered players.",
    );
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Data source:");
        ui.hyperlink_to("Basketball-reference.com", DATA_SOURCE_URL);
    });
}
