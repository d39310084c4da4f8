//! Writes a synthetic `spacex_launch_dash.csv` with the columns the dashboard
//! reads, so it can be run without the real launch history.
//!
//! Usage: `generate-sample [output.csv]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

const LAUNCH_SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster generations in flight order, with their success probability and
/// typical payload span in kg.
const BOOSTERS: [(&str, f64, f64, f64); 5] = [
    ("v1.0", 0.2, 0.0, 600.0),
    ("v1.1", 0.35, 500.0, 4500.0),
    ("FT", 0.75, 1000.0, 9600.0),
    ("B4", 0.6, 2000.0, 9600.0),
    ("B5", 0.9, 2500.0, 9600.0),
];

const LAUNCHES_PER_BOOSTER: usize = 11;

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: usize,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'static str,
}

/// SplitMix64, enough for reproducible sample data.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate(seed: u64) -> Vec<Row> {
    let mut rng = SplitMix64(seed);
    let mut rows = Vec::new();

    for (generation, &(category, success_rate, low, high)) in BOOSTERS.iter().enumerate() {
        for i in 0..LAUNCHES_PER_BOOSTER {
            let flight_number = rows.len() + 1;
            // The first generation only flew from the Cape.
            let launch_site = if generation == 0 {
                LAUNCH_SITES[0]
            } else {
                *rng.pick(&LAUNCH_SITES)
            };
            let payload = low + (high - low) * rng.next_f64();
            rows.push(Row {
                flight_number,
                launch_site,
                class: u8::from(rng.next_f64() < success_rate),
                payload_mass_kg: (payload / 10.0).round() * 10.0,
                booster_version: format!("F9 {category} B{:04}", 1000 + generation * 20 + i),
                booster_version_category: category,
            });
        }
    }
    rows
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("spacex_launch_dash.csv"));

    let rows = generate(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {} launches to {}", rows.len(), output_path.display());
    println!("Wrote {} launches to {}", rows.len(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = generate(7);
        let b = generate(7);
        assert_eq!(a.len(), BOOSTERS.len() * LAUNCHES_PER_BOOSTER);
        assert!(a
            .iter()
            .zip(&b)
            .all(|(x, y)| x.launch_site == y.launch_site
                && x.class == y.class
                && x.payload_mass_kg == y.payload_mass_kg));
    }

    #[test]
    fn rows_respect_loader_invariants() {
        for row in generate(42) {
            assert!(row.class <= 1);
            assert!((0.0..=10_000.0).contains(&row.payload_mass_kg));
            assert!(LAUNCH_SITES.contains(&row.launch_site));
        }
    }
}
