use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HeartgridApp {
    pub state: AppState,
    heart_grid: plot::HeartGrid,
    education_bars: plot::EducationBars,
}

impl HeartgridApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            heart_grid: plot::HeartGrid::default(),
            education_bars: plot::EducationBars::default(),
        }
    }

    /// Hand every recompute since the last frame to the renderers.
    fn sync_marks(&mut self) {
        for diff in self.state.matrix.take_diffs() {
            self.heart_grid.apply(diff);
        }
        for diff in self.state.bar.take_diffs() {
            self.education_bars.apply(diff);
        }
    }
}

impl eframe::App for HeartgridApp {
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

        self.sync_marks();

        // ---- Bottom panel: bar chart ----
        egui::TopBottomPanel::bottom("bar_panel")
            .default_height(320.0)
            .resizable(true)
            .show_animated(ctx, self.state.dataset.is_some(), |ui| {
                ui.heading("Average rate by education level");
                self.education_bars.show(ui);
            });

        // ---- Central panel: heart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to view the survey  (File → Open…)");
                });
                return;
            }
            self.heart_grid.show(ui, &self.state.marital_statuses);
        });
    }
}
