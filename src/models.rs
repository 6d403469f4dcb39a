//! Core data structures for the collection export pipeline.
//!
//! Defines the borehole record schema and the statistics object
//! returned by a full processing run.

use serde::{Deserialize, Serialize};

/// One borehole/core record from the Holes workbook.
///
/// Every field is optional: the curation sheet routinely carries partially
/// filled rows, and an absent value must stay absent through normalization
/// and export (it is never coerced to zero or an empty-string sentinel at
/// this level; each exporter decides how to render a missing field).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoreholeRecord {
    /// Site/lake name; required column for all exports
    pub location: Option<String>,
    pub country: Option<String>,
    pub state_province: Option<String>,
    /// LacCore hole identifier
    pub hole_id: Option<String>,
    /// Identifier assigned in the field
    pub original_id: Option<String>,
    /// Collection date, "YYYY-MM-DD"
    pub date: Option<String>,
    /// Water depth in meters
    pub water_depth: Option<f64>,
    /// Decimal degrees
    pub lat: Option<f64>,
    /// Decimal degrees
    pub long: Option<f64>,
    pub elevation: Option<f64>,
    pub position: Option<String>,
    pub sample_type: Option<String>,
    /// Meters below lake floor, top of sampled interval
    pub mblf_t: Option<f64>,
    /// Meters below lake floor, bottom of sampled interval
    pub mblf_b: Option<f64>,
    /// International Generic Sample Number
    pub igsn: Option<String>,
}

impl BoreholeRecord {
    /// True when the record carries both coordinates and can be placed on a map
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.long.is_some()
    }
}

/// Statistics for a full export run, reported back to the CLI.
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Number of records materialized from the workbook
    pub records_loaded: usize,
    /// Cells that could not be interpreted as their field's type and were
    /// loaded as absent
    pub malformed_cells: usize,
    /// Placemarks written to the KML (records with both coordinates)
    pub placemarks_written: usize,
    /// Output files written, with their sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
    /// Total wall-clock processing time
    pub processing_time_ms: u128,
}

impl ExportStats {
    /// Total size of all written outputs in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format a byte count in human-readable form
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}
