//! # scrnaseq-protocols
//!
//! A library for resolving single-cell RNA-seq library protocols to the
//! arguments each alignment/quantification backend expects.
//!
//! A single-cell pipeline can run simpleaf, Cell Ranger, Cell Ranger ARC,
//! STARsolo or kallisto | bustools. Each spells the same 10x Genomics, Drop-seq
//! or Smart-seq chemistry differently, and some need a barcode whitelist file.
//! `scrnaseq-protocols` keeps those spellings in one protocol table and
//! resolves a pipeline's `(aligner, protocol)` request against it before any
//! backend is started.
//!
//! ## Features
//!
//! - **Strict lookup**: unsupported combinations fail with the aligner and protocol named
//! - **Whitelist resolution**: table assets located under an asset root, or a user override
//! - **Asset checks**: missing whitelists are reported before a backend runs
//! - **Command lines**: protocol, whitelist and extra arguments in each backend's own options
//!
//! ## Example
//!
//! ```rust,no_run
//! use scrnaseq_protocols::{Aligner, ProtocolCatalog, ProtocolResolver, ResolverConfig};
//!
//! // Load the embedded protocol table
//! let catalog = ProtocolCatalog::load_embedded().unwrap();
//!
//! let resolver = ProtocolResolver::new(&catalog, ResolverConfig::new("/opt/scrnaseq"));
//! let entry = resolver.resolve(Aligner::Cellranger, "10XV2").unwrap();
//! assert_eq!(entry.protocol_flag, "SC3Pv2");
//!
//! let resolved = resolver.resolve_protocol(Aligner::Star, "10XV3").unwrap();
//! println!("STAR {}", resolved.command_args().join(" "));
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Protocol table storage and asset checks
//! - [`core`]: Aligner, chemistry and entry types
//! - [`resolve`]: Protocol resolver and backend command lines
//! - [`parsing`]: Pipeline params files and barcode whitelists
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod resolve;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::{CatalogError, ProtocolCatalog};
pub use core::entry::ProtocolEntry;
pub use core::types::*;
pub use resolve::{ProtocolError, ProtocolResolver, ResolvedProtocol, ResolverConfig};
