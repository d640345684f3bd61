//! CLI entry point for the tile-art converter

use clap::Parser;
use tilecast::io::cli::{Cli, FileProcessor, init_logging};

fn main() -> tilecast::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
