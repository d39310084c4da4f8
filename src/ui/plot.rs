use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{ChartSpec, PieSlice, ScatterPoint};
use crate::color::{generate_palette, ColorMap};

/// Arc segments per full turn of the pie.
const PIE_SEGMENTS: f64 = 180.0;

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Render any [`ChartSpec`] with its title above it.
pub fn chart(ui: &mut Ui, id: &str, spec: &ChartSpec, color_map: &ColorMap, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(spec.title()).strong().size(16.0));
    });

    if let Some(message) = empty_message(spec) {
        placeholder(ui, message, height);
        return;
    }

    match spec {
        ChartSpec::Pie { slices, .. } => pie_chart(ui, id, slices, height),
        ChartSpec::Scatter {
            x_label,
            y_label,
            points,
            ..
        } => scatter_chart(ui, id, x_label, y_label, points, color_map, height),
    }
}

/// Text shown instead of a chart that has no slices or points.
fn empty_message(spec: &ChartSpec) -> Option<&'static str> {
    if !spec.is_empty() {
        return None;
    }
    Some(match spec {
        ChartSpec::Pie { .. } => "No launches recorded for this site",
        ChartSpec::Scatter { .. } => "No launches in this payload range",
    })
}

fn placeholder(ui: &mut Ui, message: &str, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.weak(message);
        });
    });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, id: &str, slices: &[PieSlice], height: f32) {
    // Slices exist but every value is zero.
    let Some(wedges) = pie_wedges(slices) else {
        placeholder(ui, "No successful launches to show", height);
        return;
    };
    let colors = generate_palette(slices.len());

    Plot::new(id)
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for ((slice, wedge), color) in slices.iter().zip(&wedges).zip(colors) {
                if wedge.sweep <= 0.0 {
                    continue;
                }
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge.outline()))
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
                let [x, y] = wedge.label_anchor();
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{:.1}%", wedge.share * 100.0)).color(Color32::BLACK),
                ));
            }
        });
}

/// One pie wedge on the unit circle. Angles in radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wedge {
    start: f64,
    sweep: f64,
    /// Fraction of the whole pie.
    share: f64,
}

impl Wedge {
    /// Closed polygon: centre, then the arc.
    fn outline(&self) -> Vec<[f64; 2]> {
        let steps = ((self.sweep / TAU) * PIE_SEGMENTS).ceil().max(1.0) as usize;
        std::iter::once([0.0, 0.0])
            .chain((0..=steps).map(|i| {
                let angle = self.start + self.sweep * i as f64 / steps as f64;
                point_on_circle(angle, 1.0)
            }))
            .collect()
    }

    fn label_anchor(&self) -> [f64; 2] {
        point_on_circle(self.start + self.sweep / 2.0, 0.65)
    }
}

fn point_on_circle(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Split the circle proportionally to slice values. Slice values need not sum
/// to one. `None` when there is nothing to draw.
fn pie_wedges(slices: &[PieSlice]) -> Option<Vec<Wedge>> {
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }

    let mut start = 0.0;
    Some(
        slices
            .iter()
            .map(|s| {
                let share = s.value.max(0.0) / total;
                let wedge = Wedge {
                    start,
                    sweep: share * TAU,
                    share,
                };
                start += wedge.sweep;
                wedge
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_chart(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    y_label: &str,
    points: &[ScatterPoint],
    color_map: &ColorMap,
    height: f32,
) {
    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        by_category.entry(&p.category).or_default().push([p.x, p.y]);
    }

    let hover_points = points.to_vec();

    Plot::new(id)
        .legend(Legend::default())
        .height(height)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .include_x(0.0)
        .include_y(-0.2)
        .include_y(1.2)
        .allow_boxed_zoom(true)
        .label_formatter(move |name, value| hover_label(&hover_points, name, value))
        .show(ui, |plot_ui| {
            for (category, coords) in by_category {
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .name(category)
                        .color(color_map.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

/// Tooltip text for a hovered point: the launch sites recorded at that exact
/// payload/outcome for the hovered booster category.
fn hover_label(points: &[ScatterPoint], category: &str, value: &PlotPoint) -> String {
    if category.is_empty() {
        return format!("{:.0} kg\nclass {:.2}", value.x, value.y);
    }
    let sites: BTreeSet<&str> = points
        .iter()
        .filter(|p| p.category == category && p.x == value.x && p.y == value.y)
        .map(|p| p.tooltip.as_str())
        .collect();
    let sites: Vec<&str> = sites.into_iter().collect();

    format!(
        "{category}\nPayload Mass (kg): {:.0}\nclass: {:.0}\nLaunch Site: {}",
        value.x,
        value.y,
        sites.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(label: &str, value: f64) -> PieSlice {
        PieSlice {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn wedges_are_proportional_to_values() {
        let wedges = pie_wedges(&[slice("A", 0.5), slice("B", 1.0)]).unwrap();
        assert_eq!(wedges.len(), 2);
        assert!((wedges[0].share - 1.0 / 3.0).abs() < 1e-12);
        assert!((wedges[1].start - wedges[0].sweep).abs() < 1e-12);
        assert!((wedges[0].sweep + wedges[1].sweep - TAU).abs() < 1e-12);
    }

    #[test]
    fn empty_or_zero_pie_has_no_wedges() {
        assert!(pie_wedges(&[]).is_none());
        assert!(pie_wedges(&[slice("A", 0.0), slice("B", 0.0)]).is_none());
    }

    #[test]
    fn outline_starts_at_centre_and_stays_on_circle() {
        let wedge = Wedge {
            start: 0.0,
            sweep: TAU / 4.0,
            share: 0.25,
        };
        let outline = wedge.outline();
        assert_eq!(outline[0], [0.0, 0.0]);
        for [x, y] in &outline[1..] {
            assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-9);
        }
        // 12 o'clock to 3 o'clock.
        let first = outline[1];
        let last = outline[outline.len() - 1];
        assert!(first[0].abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn only_empty_charts_get_a_message() {
        let empty_pie = ChartSpec::Pie {
            title: "Total Success Launches for Site Boca Chica".into(),
            slices: Vec::new(),
        };
        assert_eq!(empty_message(&empty_pie), Some("No launches recorded for this site"));

        let empty_scatter = ChartSpec::Scatter {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            points: Vec::new(),
        };
        assert_eq!(empty_message(&empty_scatter), Some("No launches in this payload range"));

        let pie = ChartSpec::Pie {
            title: "t".into(),
            slices: vec![slice("A", 0.0)],
        };
        assert_eq!(empty_message(&pie), None);
    }

    #[test]
    fn hover_lists_sites_at_point() {
        let points = vec![
            ScatterPoint { x: 500.0, y: 1.0, category: "FT".into(), tooltip: "KSC LC-39A".into() },
            ScatterPoint { x: 500.0, y: 1.0, category: "FT".into(), tooltip: "CCAFS SLC-40".into() },
            ScatterPoint { x: 500.0, y: 1.0, category: "B4".into(), tooltip: "VAFB SLC-4E".into() },
        ];
        let label = hover_label(&points, "FT", &PlotPoint::new(500.0, 1.0));
        assert!(label.contains("Launch Site: CCAFS SLC-40, KSC LC-39A"));
        assert!(!label.contains("VAFB"));
        assert!(hover_label(&points, "", &PlotPoint::new(10.0, 0.5)).starts_with("10 kg"));
    }
}
