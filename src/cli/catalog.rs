use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::assets::AssetCheck;
use crate::catalog::store::ProtocolCatalog;
use crate::cli::{OutputFormat, ASSET_ROOT_ENV};
use crate::core::entry::ProtocolEntry;
use crate::core::types::Aligner;
use crate::parsing::whitelist::{self, WhitelistSummary};

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all entries in the protocol table
    List {
        /// Path to custom protocol table
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list entries for this aligner
        #[arg(long, value_enum)]
        aligner: Option<Aligner>,
    },

    /// Show the protocols one aligner supports
    Show {
        /// Aligner name
        #[arg(required = true, value_enum)]
        aligner: Aligner,

        /// Path to custom protocol table
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the protocol table to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom protocol table to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Check that every whitelist the table references exists
    Validate {
        /// Path to custom protocol table
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Directory the table's whitelist paths are relative to
        #[arg(long, env = ASSET_ROOT_ENV, default_value = ".")]
        asset_root: PathBuf,

        /// Also read each whitelist and summarize its barcodes
        #[arg(long)]
        inspect: bool,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the protocol table cannot be loaded or written, or if
/// validation finds missing or unreadable whitelists.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, aligner } => run_list(catalog, aligner, format),
        CatalogCommands::Show { aligner, catalog } => run_show(aligner, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
        CatalogCommands::Validate {
            catalog,
            asset_root,
            inspect,
        } => run_validate(catalog, &asset_root, inspect, format, verbose),
    }
}

fn load_catalog(path: Option<PathBuf>) -> anyhow::Result<ProtocolCatalog> {
    Ok(match path {
        Some(p) => ProtocolCatalog::load_from_file(&p)?,
        None => ProtocolCatalog::load_embedded()?,
    })
}

fn run_list(
    catalog_path: Option<PathBuf>,
    aligner: Option<Aligner>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let entries: Vec<&ProtocolEntry> = catalog
        .entries()
        .filter(|e| aligner.map_or(true, |a| e.aligner == a))
        .collect();

    match format {
        OutputFormat::Text => {
            println!(
                "{:<14} {:<10} {:<14} {:<16} WHITELIST",
                "ALIGNER", "PROTOCOL", "FLAG", "EXTRA ARGS"
            );
            println!("{}", "-".repeat(100));
            for e in &entries {
                println!(
                    "{:<14} {:<10} {:<14} {:<16} {}",
                    e.aligner.as_str(),
                    e.chemistry.as_str(),
                    e.protocol_flag,
                    e.extra_args.as_deref().unwrap_or("-"),
                    e.whitelist_path
                        .as_ref()
                        .map_or_else(|| "-".to_string(), |p| p.display().to_string())
                );
            }
            println!("\nTotal: {} entries", entries.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Tsv => {
            println!("aligner\tchemistry\tprotocol_flag\textra_args\twhitelist");
            for e in &entries {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    e.aligner,
                    e.chemistry,
                    e.protocol_flag,
                    e.extra_args.as_deref().unwrap_or(""),
                    e.whitelist_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

fn run_show(
    aligner: Aligner,
    catalog_path: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let chemistries = catalog.chemistries(aligner);

    match format {
        OutputFormat::Text => {
            println!("Aligner: {aligner}");
            println!(
                "Protocol option: {}",
                aligner.protocol_option().unwrap_or("(none, auto-detected)")
            );
            println!(
                "Whitelist option: {}",
                aligner.whitelist_option().unwrap_or("(none)")
            );
            println!("Auto-detection: {}", chemistries.iter().any(|c| c.is_auto()));
            println!("\nProtocols ({}):", chemistries.len());
            for chemistry in &chemistries {
                if let Some(entry) = catalog.get(aligner, chemistry.as_str()) {
                    println!("  {:<10} -> {}", chemistry.as_str(), entry.protocol_flag);
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "aligner": aligner,
                "protocol_option": aligner.protocol_option(),
                "whitelist_option": aligner.whitelist_option(),
                "protocols": chemistries,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("chemistry");
            for chemistry in &chemistries {
                println!("{chemistry}");
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;
    eprintln!("Exported {} entries to {}", catalog.len(), output.display());
    Ok(())
}

/// One asset check with its optional barcode summary
struct AssetReport {
    check: AssetCheck,
    summary: Option<Result<WhitelistSummary, String>>,
}

impl AssetReport {
    fn is_ok(&self) -> bool {
        self.check.exists && !matches!(self.summary, Some(Err(_)))
    }
}

fn run_validate(
    catalog_path: Option<PathBuf>,
    asset_root: &Path,
    inspect: bool,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    if verbose {
        eprintln!(
            "Checking whitelist assets under {} for {} entries",
            asset_root.display(),
            catalog.len()
        );
    }

    let reports: Vec<AssetReport> = catalog
        .validate_assets(asset_root)
        .into_iter()
        .map(|check| {
            let summary = (inspect && check.exists)
                .then(|| whitelist::inspect(&check.resolved).map_err(|e| e.to_string()));
            AssetReport { check, summary }
        })
        .collect();

    match format {
        OutputFormat::Text => print_validate_text(&reports),
        OutputFormat::Json => print_validate_json(asset_root, &reports)?,
        OutputFormat::Tsv => print_validate_tsv(&reports),
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} whitelist assets are missing or unreadable under {}",
            reports.len(),
            asset_root.display()
        );
    }

    Ok(())
}

fn used_by(check: &AssetCheck) -> String {
    check
        .used_by
        .iter()
        .map(|(aligner, chemistry)| format!("{aligner}/{chemistry}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn print_validate_text(reports: &[AssetReport]) {
    for report in reports {
        let status = match (report.check.exists, report.is_ok()) {
            (_, true) => "OK",
            (false, _) => "MISSING",
            (true, false) => "UNREADABLE",
        };
        println!("[{status}] {}", report.check.resolved.display());
        println!("    used by: {}", used_by(&report.check));

        match &report.summary {
            Some(Ok(summary)) => {
                let lengths: Vec<String> = summary
                    .barcode_lengths
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!(
                    "    barcodes: {} (length {}), md5: {}",
                    summary.barcodes,
                    lengths.join("/"),
                    summary.md5
                );
                if summary.invalid_barcodes > 0 {
                    println!(
                        "    warning: {} barcodes contain non-ACGT characters",
                        summary.invalid_barcodes
                    );
                }
            }
            Some(Err(e)) => println!("    error: {e}"),
            None => {}
        }
    }

    let ok = reports.iter().filter(|r| r.is_ok()).count();
    println!("\n{ok}/{} whitelist assets OK", reports.len());
}

fn print_validate_json(asset_root: &Path, reports: &[AssetReport]) -> anyhow::Result<()> {
    let assets = reports
        .iter()
        .map(|report| {
            let mut value = serde_json::to_value(&report.check)?;
            match &report.summary {
                Some(Ok(summary)) => value["summary"] = serde_json::to_value(summary)?,
                Some(Err(e)) => value["error"] = serde_json::json!(e),
                None => {}
            }
            value["ok"] = serde_json::json!(report.is_ok());
            Ok(value)
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    let output = serde_json::json!({
        "asset_root": asset_root.display().to_string(),
        "checked_at": chrono::Utc::now().to_rfc3339(),
        "assets": assets,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_validate_tsv(reports: &[AssetReport]) {
    println!("path\texists\tbarcodes\tmd5\tused_by");
    for report in reports {
        let (barcodes, md5) = match &report.summary {
            Some(Ok(summary)) => (summary.barcodes.to_string(), summary.md5.clone()),
            _ => (String::new(), String::new()),
        };
        println!(
            "{}\t{}\t{barcodes}\t{md5}\t{}",
            report.check.resolved.display(),
            report.check.exists,
            used_by(&report.check)
        );
    }
}
