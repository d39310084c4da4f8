use std::collections::BTreeMap;

use super::model::{LaunchRecord, LaunchRecordStore, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Records at the selected site, in store order.
pub fn site_records<'a>(
    store: &'a LaunchRecordStore,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    store.records().iter().filter(move |rec| site.matches(rec))
}

/// Indices of records passing both the site filter and the inclusive payload
/// range.
pub fn filtered_indices(
    store: &LaunchRecordStore,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(rec) && range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Mean `outcome_class` per launch site, in first-appearance site order.
pub fn success_rate_by_site(store: &LaunchRecordStore) -> Vec<(String, f64)> {
    let mut tallies: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for rec in store.records() {
        let (successes, total) = tallies.entry(rec.launch_site.as_str()).or_default();
        *successes += usize::from(rec.outcome_class);
        *total += 1;
    }

    store
        .sites()
        .iter()
        .filter_map(|site| {
            let &(successes, total) = tallies.get(site.as_str())?;
            Some((site.clone(), successes as f64 / total as f64))
        })
        .collect()
}

/// Count of each distinct `outcome_class`, keyed by class.
pub fn class_counts<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.outcome_class).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, scenario_store};

    #[test]
    fn site_records_respects_selection() {
        let store = scenario_store();
        assert_eq!(site_records(&store, &SiteSelection::All).count(), 4);
        let b = SiteSelection::Site("B".into());
        assert!(site_records(&store, &b).all(|r| r.launch_site == "B"));
        assert_eq!(site_records(&store, &b).count(), 2);
        let missing = SiteSelection::Site("Z".into());
        assert_eq!(site_records(&store, &missing).count(), 0);
    }

    #[test]
    fn filtered_indices_uses_inclusive_bounds() {
        let store = scenario_store();
        let all = SiteSelection::All;
        assert_eq!(
            filtered_indices(&store, &all, PayloadRange::new(500.0, 2000.0)),
            vec![0, 2, 3]
        );
        assert_eq!(
            filtered_indices(&store, &SiteSelection::Site("A".into()), PayloadRange::new(2000.0, 2000.0)),
            vec![0]
        );
        assert!(filtered_indices(&store, &all, PayloadRange::new(9000.0, 10000.0)).is_empty());
    }

    #[test]
    fn success_rate_is_mean_class() {
        let rates = success_rate_by_site(&scenario_store());
        assert_eq!(rates, vec![("A".to_string(), 0.5), ("B".to_string(), 1.0)]);
    }

    #[test]
    fn class_counts_tally_each_class() {
        let records = [record("A", 1.0, 1), record("A", 2.0, 0), record("A", 3.0, 1)];
        let counts = class_counts(&records);
        assert_eq!(counts.get(&0), Some(&1));
        assert_eq!(counts.get(&1), Some(&2));
    }
}
