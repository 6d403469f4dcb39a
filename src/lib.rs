//! Collection Generator Library
//!
//! A Rust library for converting the LacCore/CSDCO borehole collection
//! workbook into the three formats needed for publishing.
//!
//! This library provides tools for:
//! - Loading the Holes workbook and mapping its header row onto the fixed
//!   record schema
//! - Normalizing coordinate and depth precision without disturbing absent
//!   values
//! - Composing the per-record description string used in placemark popups
//! - Exporting the collection as CSV, as an HTML table fragment, and as a
//!   KML placemark document

pub mod cli;
pub mod config;
pub mod describe;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod processor;

// Re-export commonly used types
pub use config::Config;
pub use error::{CollectionError, Result};
pub use models::{BoreholeRecord, ExportStats};
pub use processor::CollectionProcessor;
