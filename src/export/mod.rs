//! Exporters for the three publication artifacts.
//!
//! Each exporter consumes the normalized record set and writes one file;
//! they are independent of each other and only read their input. The
//! absent-aware formatting helpers live here so every exporter renders a
//! missing field the same way.

pub mod csv;
pub mod html;
pub mod kml;

use std::fmt::Display;

/// Render an optional value, or the empty string when absent
pub fn fmt_opt<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Render an optional value with an explicit placeholder for absence
pub fn fmt_opt_or<T: Display>(value: Option<T>, missing: &str) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| missing.to_string())
}
