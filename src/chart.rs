use serde::Serialize;

use crate::data::filter::{class_counts, filtered_indices, site_records, success_rate_by_site};
use crate::data::model::{LaunchRecordStore, PayloadRange, SiteSelection};

pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const CLASS_AXIS_LABEL: &str = "class";

// ---------------------------------------------------------------------------
// ChartSpec – declarative chart description
// ---------------------------------------------------------------------------

/// What to draw, independent of any renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie {
        title: String,
        slices: Vec<PieSlice>,
    },
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        points: Vec<ScatterPoint>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Payload mass in kg.
    pub x: f64,
    /// Outcome class.
    pub y: f64,
    /// Booster version category, used for colour and legend.
    pub category: String,
    /// Launch site, shown on hover.
    pub tooltip: String,
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie { title, .. } | ChartSpec::Scatter { title, .. } => title,
        }
    }

    /// Number of slices or points.
    pub fn len(&self) -> usize {
        match self {
            ChartSpec::Pie { slices, .. } => slices.len(),
            ChartSpec::Scatter { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Success-rate pie chart for the selected site.
///
/// * All sites: one slice per site, valued at that site's mean outcome class.
/// * One site: one slice per outcome class present at that site, valued at its
///   share of the site's launches, largest first. An unknown site gives an
///   empty pie.
pub fn pie_query(site: &SiteSelection, store: &LaunchRecordStore) -> ChartSpec {
    match site {
        SiteSelection::All => ChartSpec::Pie {
            title: "Total Success Launches by Site".to_string(),
            slices: success_rate_by_site(store)
                .into_iter()
                .map(|(label, value)| PieSlice { label, value })
                .collect(),
        },
        SiteSelection::Site(name) => {
            let counts = class_counts(site_records(store, site));
            let total: usize = counts.values().sum();

            let mut by_count: Vec<(u8, usize)> = counts.into_iter().collect();
            // BTreeMap order is ascending class, so a stable sort keeps ties that way.
            by_count.sort_by(|a, b| b.1.cmp(&a.1));

            ChartSpec::Pie {
                title: format!("Total Success Launches for Site {name}"),
                slices: by_count
                    .into_iter()
                    .map(|(class, count)| PieSlice {
                        label: class.to_string(),
                        value: count as f64 / total as f64,
                    })
                    .collect(),
            }
        }
    }
}

/// Payload vs. outcome scatter for the selected site, restricted to the
/// inclusive payload range. One point per surviving record, in store order.
pub fn scatter_query(
    site: &SiteSelection,
    range: PayloadRange,
    store: &LaunchRecordStore,
) -> ChartSpec {
    let title = match site {
        SiteSelection::All => "Correlation Between Payload and Success for All Sites".to_string(),
        SiteSelection::Site(name) => {
            format!("Correlation Between Payload and Success for Site {name}")
        }
    };

    let records = store.records();
    let points = filtered_indices(store, site, range)
        .into_iter()
        .map(|i| &records[i])
        .map(|rec| ScatterPoint {
            x: rec.payload_mass_kg,
            y: f64::from(rec.outcome_class),
            category: rec.booster_version_category.clone(),
            tooltip: rec.launch_site.clone(),
        })
        .collect();

    ChartSpec::Scatter {
        title,
        x_label: PAYLOAD_AXIS_LABEL.to_string(),
        y_label: CLASS_AXIS_LABEL.to_string(),
        points,
    }
}
