//! Command-line interface for scrnaseq-protocols.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **resolve**: Resolve an aligner and protocol to backend arguments
//! - **catalog**: List, show, export, or validate the protocol table
//!
//! ## Usage
//!
//! ```text
//! # Arguments for STARsolo on 10x v3 data
//! scrnaseq-protocols resolve star 10XV3 --asset-root /opt/scrnaseq
//!
//! # Read aligner and protocol from a pipeline params file
//! scrnaseq-protocols resolve --params params.json
//!
//! # JSON output for scripting
//! scrnaseq-protocols --format json resolve kallisto dropseq
//!
//! # Check that every whitelist the table names is present
//! scrnaseq-protocols catalog validate --asset-root /opt/scrnaseq --inspect
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod resolve;

/// Environment variable naming the default asset root
pub const ASSET_ROOT_ENV: &str = "SCRNASEQ_ASSET_ROOT";

#[derive(Parser)]
#[command(name = "scrnaseq-protocols")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Resolve single-cell protocols to per-aligner arguments and barcode whitelists")]
#[command(
    long_about = "scrnaseq-protocols maps a sequencing chemistry (10XV2, 10XV3, dropseq, smartseq, ...) to the arguments each supported backend expects.\n\nSupported aligners: simpleaf, cellranger, cellrangerarc, star, kallisto.\n\nUnsupported aligner/protocol combinations and missing barcode whitelists are reported as errors before any backend runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve an aligner and protocol to backend arguments
    Resolve(resolve::ResolveArgs),

    /// Inspect the protocol table
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from([
            "scrnaseq-protocols",
            "resolve",
            "star",
            "10XV3",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Resolve(_)));
    }
}
