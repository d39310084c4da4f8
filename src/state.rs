use std::collections::BTreeSet;
use std::sync::Arc;

use crate::chart::{pie_query, scatter_query, ChartSpec};
use crate::color::ColorMap;
use crate::data::model::{LaunchRecordStore, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Current control values and the charts derived from them, independent of
/// rendering.
pub struct DashboardState {
    store: Arc<LaunchRecordStore>,

    /// Dropdown entries, derived once from the store.
    site_options: Vec<SiteSelection>,

    /// Value of the launch-site dropdown.
    site: SiteSelection,

    /// Value of the payload range control.
    payload_range: PayloadRange,

    /// Text typed into the dropdown's search box.
    pub site_search: String,

    pie: ChartSpec,
    scatter: ChartSpec,

    /// Booster category colours, fixed for the lifetime of the store.
    pub color_map: ColorMap,

    /// Status message shown in the top bar.
    pub status_message: Option<String>,
}

impl DashboardState {
    /// Start with all sites selected and the full payload span of the store.
    pub fn new(store: Arc<LaunchRecordStore>) -> Self {
        let site = SiteSelection::All;
        let payload_range = store.payload_bounds();
        let categories: BTreeSet<String> = store
            .records()
            .iter()
            .map(|r| r.booster_version_category.clone())
            .collect();

        Self {
            pie: pie_query(&site, &store),
            scatter: scatter_query(&site, payload_range, &store),
            color_map: ColorMap::new(&categories),
            site_options: store.dropdown_options(),
            store,
            site,
            payload_range,
            site_search: String::new(),
            status_message: None,
        }
    }

    pub fn store(&self) -> &LaunchRecordStore {
        &self.store
    }

    pub fn site_options(&self) -> &[SiteSelection] {
        &self.site_options
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn pie(&self) -> &ChartSpec {
        &self.pie
    }

    pub fn scatter(&self) -> &ChartSpec {
        &self.scatter
    }

    /// Change the dropdown value. Both charts watch it.
    pub fn set_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        self.site = site;
        self.refresh_pie();
        self.refresh_scatter();
    }

    /// Change the payload range. Only the scatter chart watches it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.refresh_scatter();
    }

    fn refresh_pie(&mut self) {
        self.pie = pie_query(&self.site, &self.store);
        log::debug!("pie chart for {}: {} slices", self.site, self.pie.len());
    }

    fn refresh_scatter(&mut self) {
        self.scatter = scatter_query(&self.site, self.payload_range, &self.store);
        log::debug!(
            "scatter chart for {} in [{}, {}] kg: {} points",
            self.site,
            self.payload_range.low(),
            self.payload_range.high(),
            self.scatter.len()
        );
    }
}
