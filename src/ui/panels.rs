use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::DashboardState;

/// Payload control limits and granularity, in kg.
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and the menu / status line.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(32.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Export", |ui: &mut Ui| {
            if ui.button("Copy pie chart JSON").clicked() {
                copy_chart_json(ui, state, ChartSlot::Pie);
                ui.close_menu();
            }
            if ui.button("Copy scatter chart JSON").clicked() {
                copy_chart_json(ui, state, ChartSlot::Scatter);
                ui.close_menu();
            }
        });

        ui.separator();

        let store = state.store();
        ui.label(format!(
            "{} launches from {} sites, {} in view",
            store.len(),
            store.sites().len(),
            state.scatter().len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(msg);
        }
    });
}

#[derive(Clone, Copy)]
enum ChartSlot {
    Pie,
    Scatter,
}

fn copy_chart_json(ui: &Ui, state: &mut DashboardState, slot: ChartSlot) {
    let spec = match slot {
        ChartSlot::Pie => state.pie(),
        ChartSlot::Scatter => state.scatter(),
    };
    let title = spec.title().to_string();
    match spec.to_json() {
        Ok(json) => {
            ui.ctx().copy_text(json);
            state.status_message = Some(format!("Copied \"{title}\""));
        }
        Err(e) => {
            log::error!("Failed to serialize chart: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// Launch-site dropdown with a search box over its options.
pub fn site_dropdown(ui: &mut Ui, state: &mut DashboardState) {
    let mut selected = state.site().clone();
    let mut search = std::mem::take(&mut state.site_search);

    egui::ComboBox::from_id_salt("launch_site_dropdown")
        .width(ui.available_width().min(400.0))
        .selected_text(selected.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(egui::TextEdit::singleline(&mut search).hint_text("Select a Launch Site"));
            for option in matching_options(state.site_options(), &search) {
                let label = option.to_string();
                ui.selectable_value(&mut selected, option.clone(), label);
            }
        });

    state.site_search = search;
    state.set_site(selected);
}

/// Dropdown entries whose label contains `query`, ignoring case.
fn matching_options<'a>(options: &'a [SiteSelection], query: &str) -> Vec<&'a SiteSelection> {
    let query = query.trim().to_lowercase();
    options
        .iter()
        .filter(|o| query.is_empty() || o.to_string().to_lowercase().contains(&query))
        .collect()
}

/// Payload range control: a low and a high slider over `[0, 10000]` kg.
pub fn payload_slider(ui: &mut Ui, state: &mut DashboardState) {
    let current = state.payload_range();
    let (mut low, mut high) = (current.low(), current.high());

    ui.label("Payload range (Kg):");
    ui.horizontal(|ui: &mut Ui| {
        ui.add(payload_slider_widget(&mut low, "min"));
        ui.add(payload_slider_widget(&mut high, "max"));
    });
    ui.horizontal(|ui: &mut Ui| {
        for mark in payload_marks() {
            ui.small(format!("{mark:.0}"));
        }
    });

    state.set_payload_range(push_handles(current, low, high));
}

/// Keep the handles ordered: a handle dragged past the other pushes it along.
fn push_handles(previous: PayloadRange, mut low: f64, mut high: f64) -> PayloadRange {
    if low > previous.low() && low > high {
        high = low;
    } else if high < previous.high() && high < low {
        low = high;
    }
    PayloadRange::new(low, high)
}

fn payload_slider_widget<'a>(value: &'a mut f64, text: &'a str) -> egui::Slider<'a> {
    egui::Slider::new(value, 0.0..=PAYLOAD_SLIDER_MAX)
        .step_by(PAYLOAD_SLIDER_STEP)
        .suffix(" kg")
        .text(text)
}

fn payload_marks() -> impl Iterator<Item = f64> {
    let n = (PAYLOAD_SLIDER_MAX / PAYLOAD_SLIDER_STEP) as usize;
    (0..=n).map(|i| i as f64 * PAYLOAD_SLIDER_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_filters_options_case_insensitively() {
        let options = vec![
            SiteSelection::All,
            SiteSelection::Site("CCAFS LC-40".into()),
            SiteSelection::Site("KSC LC-39A".into()),
            SiteSelection::Site("CCAFS SLC-40".into()),
        ];
        assert_eq!(matching_options(&options, "").len(), 4);
        let ccafs = matching_options(&options, " ccafs ");
        assert_eq!(
            ccafs,
            [
                &SiteSelection::Site("CCAFS LC-40".into()),
                &SiteSelection::Site("CCAFS SLC-40".into()),
            ]
        );
        assert_eq!(matching_options(&options, "all"), [&SiteSelection::All]);
    }

    #[test]
    fn dragged_handle_pushes_the_other() {
        let previous = PayloadRange::new(2000.0, 5000.0);
        // Low handle dragged past high.
        assert_eq!(push_handles(previous, 7000.0, 5000.0), PayloadRange::new(7000.0, 7000.0));
        // High handle dragged below low.
        assert_eq!(push_handles(previous, 2000.0, 1000.0), PayloadRange::new(1000.0, 1000.0));
        // Ordinary moves pass through.
        assert_eq!(push_handles(previous, 3000.0, 4000.0), PayloadRange::new(3000.0, 4000.0));
        assert_eq!(push_handles(previous, 0.0, 10_000.0), PayloadRange::new(0.0, 10_000.0));
    }

    #[test]
    fn marks_every_thousand_kg() {
        let marks: Vec<f64> = payload_marks().collect();
        assert_eq!(marks.len(), 11);
        assert_eq!(marks.first(), Some(&0.0));
        assert_eq!(marks.last(), Some(&10_000.0));
    }
}
