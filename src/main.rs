//! CLI entry point for the tile pattern exporter

use clap::Parser;
use tilepress::io::cli::{Cli, ExportProcessor};

// Allow print for reporting the written file
#[allow(clippy::print_stdout)]
fn main() -> tilepress::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let mut processor = ExportProcessor::new(cli);
    let output_path = processor.process()?;
    println!("{}", output_path.display());
    Ok(())
}
