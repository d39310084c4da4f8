use std::collections::BTreeSet;
use std::fmt;

/// Dropdown value that disables the site filter.
pub const ALL_SITES: &str = "All Sites";

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Payload mass in kg, finite and non-negative.
    pub payload_mass_kg: f64,
    pub booster_version_category: String,
    /// 0 = failure, 1 = success.
    pub outcome_class: u8,
}

// ---------------------------------------------------------------------------
// SiteSelection – value of the launch-site dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – value of the payload range control
// ---------------------------------------------------------------------------

/// Inclusive payload bounds in kg. Always `0 <= low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range, ordering the bounds and clamping them at zero.
    pub fn new(a: f64, b: f64) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.max(0.0),
            high: high.max(0.0),
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// LaunchRecordStore – the complete loaded table
// ---------------------------------------------------------------------------

/// Immutable snapshot of all launch records with values derived at load time.
#[derive(Debug, Clone)]
pub struct LaunchRecordStore {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in first-appearance order.
    sites: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchRecordStore {
    /// Build the store and its derived values.
    ///
    /// Returns `None` for an empty record list, since the payload bounds are
    /// undefined without at least one row.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let first = records.first()?;
        let mut min_payload = first.payload_mass_kg;
        let mut max_payload = first.payload_mass_kg;

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut sites = Vec::new();
        for rec in &records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if seen.insert(rec.launch_site.as_str()) {
                sites.push(rec.launch_site.clone());
            }
        }

        Some(LaunchRecordStore {
            records,
            sites,
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Default value of the payload range control.
    pub fn payload_bounds(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload, self.max_payload)
    }

    /// Dropdown entries: `"All Sites"` followed by every site.
    pub fn dropdown_options(&self) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(self.sites.iter().map(|s| SiteSelection::Site(s.clone())))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, class: u8) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            booster_version_category: if class == 1 { "FT" } else { "v1.1" }.to_string(),
            outcome_class: class,
        }
    }

    /// The four-launch table used across the chart tests.
    pub(crate) fn scenario_store() -> LaunchRecordStore {
        LaunchRecordStore::from_records(vec![
            record("A", 2000.0, 1),
            record("A", 8000.0, 0),
            record("B", 500.0, 1),
            record("B", 500.0, 1),
        ])
        .unwrap()
    }

    #[test]
    fn derived_values_computed_at_build() {
        let store = scenario_store();
        assert_eq!(store.len(), 4);
        assert_eq!(store.min_payload(), 500.0);
        assert_eq!(store.max_payload(), 8000.0);
        assert_eq!(store.sites(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn sites_keep_first_appearance_order() {
        let store = LaunchRecordStore::from_records(vec![
            record("VAFB SLC-4E", 1.0, 1),
            record("CCAFS LC-40", 2.0, 0),
            record("VAFB SLC-4E", 3.0, 1),
            record("KSC LC-39A", 4.0, 1),
        ])
        .unwrap();
        assert_eq!(store.sites(), ["VAFB SLC-4E", "CCAFS LC-40", "KSC LC-39A"]);
    }

    #[test]
    fn empty_records_have_no_store() {
        assert!(LaunchRecordStore::from_records(Vec::new()).is_none());
    }

    #[test]
    fn dropdown_starts_with_all_sites() {
        let options = scenario_store().dropdown_options();
        assert_eq!(
            options,
            vec![
                SiteSelection::All,
                SiteSelection::Site("A".into()),
                SiteSelection::Site("B".into()),
            ]
        );
        assert_eq!(options[0].to_string(), ALL_SITES);
    }

    #[test]
    fn site_selection_parses_sentinel() {
        assert_eq!(SiteSelection::from("All Sites"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
    }

    #[test]
    fn payload_range_is_inclusive_and_ordered() {
        let range = PayloadRange::new(600.0, 0.0);
        assert_eq!((range.low(), range.high()), (0.0, 600.0));
        assert!(range.contains(0.0));
        assert!(range.contains(600.0));
        assert!(!range.contains(600.5));
        assert_eq!(PayloadRange::new(-5.0, 10.0).low(), 0.0);
    }
}
