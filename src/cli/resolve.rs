use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::ProtocolCatalog;
use crate::cli::{OutputFormat, ASSET_ROOT_ENV};
use crate::parsing::params::PipelineParams;
use crate::resolve::{ProtocolResolver, ResolvedProtocol, ResolverConfig};

#[derive(Args)]
pub struct ResolveArgs {
    /// Aligner: simpleaf, cellranger, cellrangerarc, star, or kallisto
    pub aligner: Option<String>,

    /// Protocol / chemistry (e.g. 10XV2, 10XV3, dropseq, smartseq, auto)
    pub protocol: Option<String>,

    /// Pipeline params file (JSON) to read aligner, protocol and
    /// barcode_whitelist from; command-line values take precedence
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Path to custom protocol table
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory the table's whitelist paths are relative to
    #[arg(long, env = ASSET_ROOT_ENV, default_value = ".")]
    pub asset_root: PathBuf,

    /// Barcode whitelist to use instead of the table's
    #[arg(long)]
    pub barcode_whitelist: Option<PathBuf>,

    /// Do not require the whitelist to exist
    #[arg(long)]
    pub skip_asset_check: bool,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the params file or protocol table cannot be loaded,
/// the combination is unsupported, or a required whitelist is missing.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let params = match &args.params {
        Some(path) => PipelineParams::load(path)?,
        None => PipelineParams::default(),
    }
    .with_overrides(
        args.aligner.clone(),
        args.protocol.clone(),
        args.barcode_whitelist.clone(),
    );
    let (aligner, protocol) = params.require_request()?;

    let catalog = if let Some(path) = &args.catalog {
        ProtocolCatalog::load_from_file(path)?
    } else {
        ProtocolCatalog::load_embedded()?
    };

    if verbose {
        eprintln!("Loaded protocol table with {} entries", catalog.len());
    }

    let config = ResolverConfig::new(&args.asset_root)
        .with_whitelist_override(params.barcode_whitelist.clone())
        .with_asset_check(!args.skip_asset_check);
    let resolver = ProtocolResolver::new(&catalog, config);
    let resolved = resolver.resolve_protocol_names(aligner, protocol)?;

    match format {
        OutputFormat::Text => print_text(&resolved),
        OutputFormat::Json => print_json(&resolved)?,
        OutputFormat::Tsv => print_tsv(&resolved),
    }

    Ok(())
}

fn print_text(resolved: &ResolvedProtocol) {
    let entry = &resolved.entry;

    println!("Aligner:     {}", entry.aligner);
    println!("Protocol:    {}", entry.chemistry);
    println!("Flag:        {}", entry.protocol_flag);
    println!(
        "Extra args:  {}",
        entry.extra_args.as_deref().unwrap_or("-")
    );
    match (&resolved.whitelist, resolved.whitelist_source) {
        (Some(path), Some(source)) => println!("Whitelist:   {} ({source})", path.display()),
        (Some(path), None) => println!("Whitelist:   {}", path.display()),
        (None, _) => println!("Whitelist:   -"),
    }
    println!("Arguments:   {}", resolved.command_args().join(" "));
}

fn print_json(resolved: &ResolvedProtocol) -> anyhow::Result<()> {
    let entry = &resolved.entry;
    let output = serde_json::json!({
        "aligner": entry.aligner,
        "chemistry": entry.chemistry,
        "protocol_flag": entry.protocol_flag,
        "extra_args": entry.extra_args,
        "whitelist": resolved.whitelist.as_ref().map(|p| p.display().to_string()),
        "whitelist_source": resolved.whitelist_source,
        "args": resolved.command_args(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(resolved: &ResolvedProtocol) {
    let entry = &resolved.entry;
    println!("aligner\tchemistry\tprotocol_flag\textra_args\twhitelist\targs");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        entry.aligner,
        entry.chemistry,
        entry.protocol_flag,
        entry.extra_args.as_deref().unwrap_or(""),
        resolved
            .whitelist
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        resolved.command_args().join(" "),
    );
}
