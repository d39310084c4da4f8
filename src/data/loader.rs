use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchRecord, LaunchRecordStore};

/// Columns the dashboard cannot run without. Any other column is ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "Launch Site",
    "Payload Mass (kg)",
    "Booster Version Category",
    "class",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to build a [`LaunchRecordStore`]. Always fatal at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read CSV header")]
    Header(#[source] csv::Error),
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("CSV line {line}: malformed row")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("CSV line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
    #[error("CSV contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the launch table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<LaunchRecordStore, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Load the launch table from any CSV byte source.
///
/// Expected layout (extra columns such as `Flight Number` are allowed):
///
/// ```text
/// Launch Site,class,Payload Mass (kg),Booster Version Category
/// CCAFS LC-40,0,0.0,v1.0
/// VAFB SLC-4E,1,9600.0,FT
/// ```
pub fn load_reader<R: Read>(source: R) -> Result<LaunchRecordStore, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(DataLoadError::Header)?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|col| !headers.iter().any(|h| h == *col))
    {
        return Err(DataLoadError::MissingColumn(missing));
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        // Header is line 1; fall back to counting when the reader has no position.
        let fallback_line = row_no as u64 + 2;
        let row = result.map_err(|source| DataLoadError::Row {
            line: source
                .position()
                .map(|p| p.line())
                .unwrap_or(fallback_line),
            source,
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);

        let raw: RawRecord = row
            .deserialize(Some(&headers))
            .map_err(|source| DataLoadError::Row { line, source })?;
        records.push(raw.validate(line)?);
    }

    let store = LaunchRecordStore::from_records(records).ok_or(DataLoadError::Empty)?;
    log::debug!(
        "parsed {} launch records across {} sites",
        store.len(),
        store.sites().len()
    );
    Ok(store)
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// One CSV row as written by the pandas export. `class` is read as a float
/// because some exports write `1.0` instead of `1`.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
    #[serde(rename = "class")]
    class: f64,
}

impl RawRecord {
    fn validate(self, line: u64) -> Result<LaunchRecord, DataLoadError> {
        let invalid = |reason: String| DataLoadError::InvalidRecord { line, reason };

        if self.launch_site.is_empty() {
            return Err(invalid("empty 'Launch Site'".to_string()));
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(invalid(format!(
                "'Payload Mass (kg)' must be a non-negative number, got {}",
                self.payload_mass_kg
            )));
        }
        let outcome_class = if self.class == 0.0 {
            0
        } else if self.class == 1.0 {
            1
        } else {
            return Err(invalid(format!("'class' must be 0 or 1, got {}", self.class)));
        };

        Ok(LaunchRecord {
            launch_site: self.launch_site,
            payload_mass_kg: self.payload_mass_kg,
            booster_version_category: self.booster_version_category,
            outcome_class,
        })
    }
}
