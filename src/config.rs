//! Configuration for an export run.
//!
//! Holds the output location and the naming scheme shared by the three
//! sibling output files.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration for the three export artifacts.
///
/// All three files share one stem: `{base_name}` or, when a date stamp is
/// set, `{base_name}_{YYYYMMDD}`. The extensions are fixed per exporter
/// (`.csv`, `.txt`, `.kml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the output files are written into
    pub output_dir: PathBuf,

    /// Common stem for the output files
    pub base_name: String,

    /// Optional "YYYYMMDD" stamp appended to the stem
    pub date_stamp: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            base_name: "collection".to_string(),
            date_stamp: None,
        }
    }
}

impl Config {
    /// Create a configuration with an explicit output directory and stem
    pub fn new(output_dir: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_name: base_name.into(),
            date_stamp: None,
        }
    }

    /// Stamp the output stem with today's date, matching the published
    /// `collection_YYYYMMDD.*` naming
    pub fn with_today_stamp(mut self) -> Self {
        self.date_stamp = Some(Local::now().format("%Y%m%d").to_string());
        self
    }

    /// The shared file stem for this run
    pub fn file_stem(&self) -> String {
        match &self.date_stamp {
            Some(stamp) => format!("{}_{}", self.base_name, stamp),
            None => self.base_name.clone(),
        }
    }

    /// Full path for an output file with the given extension
    pub fn output_path(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.file_stem(), extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_without_stamp_is_base_name() {
        let config = Config::new("/tmp/out", "collection");
        assert_eq!(config.file_stem(), "collection");
        assert_eq!(
            config.output_path("csv"),
            PathBuf::from("/tmp/out/collection.csv")
        );
    }

    #[test]
    fn stem_with_stamp_appends_date() {
        let mut config = Config::new("/tmp/out", "collection");
        config.date_stamp = Some("20260806".to_string());
        assert_eq!(config.file_stem(), "collection_20260806");
        assert_eq!(
            config.output_path("kml"),
            PathBuf::from("/tmp/out/collection_20260806.kml")
        );
    }

    #[test]
    fn today_stamp_is_eight_digits() {
        let config = Config::default().with_today_stamp();
        let stamp = config.date_stamp.expect("stamp set");
        assert_eq!(stamp.len(), 8);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }
}
