/// Data layer: launch records, loading, and filtering.
///
/// Architecture:
/// ```text
///  spacex_launch_dash.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate rows → LaunchRecordStore
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ LaunchRecordStore │  Vec<LaunchRecord>, site list, payload bounds
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates, per-site aggregates
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
