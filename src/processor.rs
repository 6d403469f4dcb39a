//! Main processing engine.
//!
//! Orchestrates the complete export workflow: materialize the workbook,
//! normalize precision, then write the CSV, HTML, and KML artifacts in
//! fixed order with per-stage timing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::*;
use tracing::info;

use crate::config::Config;
use crate::export::{csv::export_csv, html::export_html, kml::export_kml};
use crate::models::ExportStats;
use crate::{loader, normalize, CollectionError, Result};

/// Processor for one collection export run
#[derive(Debug)]
pub struct CollectionProcessor {
    input_path: PathBuf,
    config: Config,
}

impl CollectionProcessor {
    /// Create a new processor; the input workbook must already exist
    pub fn new(input_path: PathBuf, config: Config) -> Result<Self> {
        if !input_path.is_file() {
            return Err(CollectionError::SourceNotFound { path: input_path });
        }

        Ok(Self { input_path, config })
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ExportStats> {
        let start_time = Instant::now();
        println!("{}", "Starting collection export".bright_green().bold());
        println!(
            "  {} {}",
            "Workbook:".bright_cyan(),
            self.input_path.display()
        );
        println!(
            "  {} {}",
            "Output stem:".bright_cyan(),
            self.config.output_dir.join(self.config.file_stem()).display()
        );

        // Step 1: materialize the collection
        println!("\n{}", "Loading collection...".bright_yellow());
        let load_start = Instant::now();
        let loaded = loader::load_records(&self.input_path)?;
        println!(
            "  {} {} records in {:.2}s",
            "Loaded".bright_green(),
            loaded.records.len().to_string().bright_white().bold(),
            load_start.elapsed().as_secs_f64()
        );
        if loaded.malformed_cells > 0 {
            println!(
                "  {} {} cells could not be interpreted and were treated as absent",
                "Note:".bright_red(),
                loaded.malformed_cells.to_string().bright_red().bold()
            );
        }

        // Step 2: normalize coordinate and depth precision
        let records = normalize::normalize(&loaded.records);

        fs::create_dir_all(&self.config.output_dir)?;

        let mut stats = ExportStats {
            records_loaded: records.len(),
            malformed_cells: loaded.malformed_cells,
            ..Default::default()
        };

        // Step 3: export CSV, then HTML, then KML
        let csv_path = self.config.output_path("csv");
        self.run_stage("CSV", &csv_path, &mut stats, || {
            export_csv(&records, &csv_path)
        })?;

        let html_path = self.config.output_path("txt");
        self.run_stage("HTML", &html_path, &mut stats, || {
            export_html(&records, &html_path)
        })?;

        let kml_path = self.config.output_path("kml");
        let mut placemarks = 0;
        self.run_stage("KML", &kml_path, &mut stats, || {
            placemarks = export_kml(&records, &kml_path)?;
            Ok(())
        })?;
        stats.placemarks_written = placemarks;

        stats.processing_time_ms = start_time.elapsed().as_millis();
        self.print_summary(&stats);

        Ok(stats)
    }

    /// Run one export stage with timing and size reporting
    fn run_stage(
        &self,
        label: &str,
        path: &Path,
        stats: &mut ExportStats,
        stage: impl FnOnce() -> Result<()>,
    ) -> Result<()> {
        println!(
            "\n{}",
            format!("Exporting collection to {}...", label).bright_yellow()
        );
        let stage_start = Instant::now();

        stage()?;

        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        info!("{} export complete: {} ({} bytes)", label, name, size);
        println!(
            "  {} {} in {:.2}s",
            "Exported".bright_green(),
            name.bright_white(),
            stage_start.elapsed().as_secs_f64()
        );
        stats.output_sizes.push((name, size));

        Ok(())
    }

    fn print_summary(&self, stats: &ExportStats) {
        println!("\n{}", "Export Summary".bright_green().bold());
        println!(
            "  {} {}",
            "Records:".bright_cyan(),
            stats.records_loaded.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Placemarks:".bright_cyan(),
            stats.placemarks_written.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Output size:".bright_cyan(),
            ExportStats::format_size(stats.total_output_size()).bright_white()
        );
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
    }
}
