use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod parsing;
mod resolve;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("scrnaseq_protocols=debug,info")
    } else {
        EnvFilter::new("scrnaseq_protocols=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Resolve(args) => {
            cli::resolve::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
