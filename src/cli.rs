//! Command-line interface components.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "collection-generator")]
#[command(about = "Filter and convert the LacCore Holes workbook into the formats needed for publishing")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the LacCore Holes workbook (.xlsx)
    #[arg(value_name = "HOLES_FILE")]
    pub holes_file: PathBuf,

    /// Directory the generated files are written into (defaults to the current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Common stem for the three output files
    #[arg(long, default_value = "collection")]
    pub base_name: String,

    /// Do not append today's date to the output file names
    #[arg(long)]
    pub no_date_stamp: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the run configuration from the parsed arguments
    pub fn to_config(&self) -> Config {
        let config = Config::new(
            self.output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            self.base_name.clone(),
        );

        if self.no_date_stamp {
            config
        } else {
            config.with_today_stamp()
        }
    }

    /// Default tracing filter directive for this invocation
    pub fn log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { "info" };
        format!("collection_generator={}", level)
    }
}
