use clap::Parser;
use collection_generator::cli::Args;
use collection_generator::CollectionProcessor;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(&args);

    let config = args.to_config();
    let result = CollectionProcessor::new(args.holes_file.clone(), config)
        .and_then(|processor| processor.process());

    match result {
        Ok(_stats) => {
            // Success - the summary has already been reported by the processor
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
