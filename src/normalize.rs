//! Precision normalization for loaded records.
//!
//! Coordinates are published at 4 decimal places and water depth at 2.
//! Normalization derives a new record vector; the loaded set is never
//! mutated, and absent values stay absent.

use crate::models::BoreholeRecord;

/// Normalize a loaded record set for export
///
/// Rounds lat/long to 4 decimal places and water depth to 2. No other field
/// is altered.
pub fn normalize(records: &[BoreholeRecord]) -> Vec<BoreholeRecord> {
    records
        .iter()
        .map(|record| BoreholeRecord {
            lat: record.lat.map(|v| round_to(v, 4)),
            long: record.long.map(|v| round_to(v, 4)),
            water_depth: record.water_depth.map(|v| round_to(v, 2)),
            ..record.clone()
        })
        .collect()
}

/// Round to a fixed number of decimal places
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
