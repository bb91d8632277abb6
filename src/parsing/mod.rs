//! Parsers for the files surrounding protocol resolution.
//!
//! - **Params files**: JSON pipeline parameters naming the aligner, protocol
//!   and an optional barcode whitelist override
//! - **Barcode whitelists**: one barcode per line, plain or gzip compressed
//!
//! ## Example
//!
//! ```rust,no_run
//! use scrnaseq_protocols::parsing::{params::PipelineParams, whitelist};
//! use std::path::Path;
//!
//! let params = PipelineParams::load(Path::new("params.json")).unwrap();
//! let (aligner, protocol) = params.require_request().unwrap();
//!
//! let summary = whitelist::inspect(Path::new("10x_V3_barcode_whitelist.txt.gz")).unwrap();
//! println!("{aligner}/{protocol}: {} barcodes", summary.barcodes);
//! ```

pub mod params;
pub mod whitelist;
