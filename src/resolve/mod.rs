//! Protocol resolution for backend invocations.
//!
//! - [`ProtocolResolver`]: looks up `(aligner, chemistry)` in a [`ProtocolCatalog`]
//! - [`ResolvedProtocol`]: an entry plus its located barcode whitelist
//! - [`ProtocolError`]: unsupported combinations and missing assets
//!
//! ## Resolution
//!
//! 1. **Lookup**: the pair must be present in the table. There is no fallback;
//!    an absent pair is a configuration error naming both keys.
//! 2. **Whitelist**: a user-supplied whitelist overrides the table's asset, which
//!    is otherwise located under the asset root.
//! 3. **Asset check**: the chosen whitelist must exist before any backend runs.
//! 4. **Arguments**: [`ResolvedProtocol::command_args`] spells the result in the
//!    backend's own options.
//!
//! ## Example
//!
//! ```rust,no_run
//! use scrnaseq_protocols::{Aligner, ProtocolCatalog, ProtocolResolver, ResolverConfig};
//!
//! let catalog = ProtocolCatalog::load_embedded().unwrap();
//! let resolver = ProtocolResolver::new(&catalog, ResolverConfig::new("/opt/scrnaseq"));
//!
//! let resolved = resolver.resolve_protocol(Aligner::Star, "10XV3").unwrap();
//! println!("STAR {}", resolved.command_args().join(" "));
//! ```
//!
//! [`ProtocolCatalog`]: crate::catalog::store::ProtocolCatalog

pub mod command;
pub mod resolver;

use std::path::PathBuf;
use thiserror::Error;

use crate::core::types::Aligner;

pub use resolver::{ProtocolResolver, ResolvedProtocol, ResolverConfig};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The table has no entry for this pair
    #[error(
        "Protocol '{chemistry}' is not supported by aligner '{aligner}' (supported: {}){hint}",
        list_or_none(.supported)
    )]
    Configuration {
        aligner: Aligner,
        chemistry: String,
        supported: Vec<String>,
        hint: String,
    },

    /// The aligner name is not one of the known backends
    #[error(
        "Unknown aligner '{aligner}' requested for protocol '{chemistry}' (expected one of: {known})",
        known = Aligner::known_names()
    )]
    UnknownAligner { aligner: String, chemistry: String },

    /// A whitelist the backend needs does not exist
    #[error(
        "Barcode whitelist '{}' for aligner '{aligner}' and protocol '{chemistry}' does not exist",
        .path.display()
    )]
    MissingAsset {
        aligner: Aligner,
        chemistry: String,
        path: PathBuf,
    },
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl ProtocolError {
    /// True for errors caused by the requested aligner/protocol combination
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::UnknownAligner { .. })
    }
}
