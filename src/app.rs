use std::sync::Arc;

use eframe::egui::{self, ScrollArea, Ui};

use crate::data::model::LaunchRecordStore;
use crate::state::DashboardState;
use crate::ui::{panels, plot};

const CHART_HEIGHT: f32 = 340.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: DashboardState,
}

impl LaunchDashApp {
    pub fn new(store: Arc<LaunchRecordStore>) -> Self {
        Self {
            state: DashboardState::new(store),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and menu ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui: &mut Ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: dropdown, pie, range control, scatter ----
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(8.0);

                    plot::chart(
                        ui,
                        "success_pie_chart",
                        self.state.pie(),
                        &self.state.color_map,
                        CHART_HEIGHT,
                    );
                    ui.add_space(8.0);

                    panels::payload_slider(ui, &mut self.state);

                    plot::chart(
                        ui,
                        "success_payload_scatter_chart",
                        self.state.scatter(),
                        &self.state.color_map,
                        CHART_HEIGHT,
                    );
                });
        });
    }
}
