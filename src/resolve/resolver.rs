use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::catalog::store::ProtocolCatalog;
use crate::core::entry::ProtocolEntry;
use crate::core::types::{Aligner, ChemistryId, WhitelistSource};

use super::ProtocolError;

/// Configuration for the resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Directory table whitelist paths are relative to
    pub asset_root: PathBuf,
    /// Whitelist that replaces the table's asset for every lookup
    pub whitelist_override: Option<PathBuf>,
    /// Fail when a chosen whitelist does not exist
    pub check_assets: bool,
}

impl ResolverConfig {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            whitelist_override: None,
            check_assets: true,
        }
    }

    #[must_use]
    pub fn with_whitelist_override(mut self, path: Option<PathBuf>) -> Self {
        self.whitelist_override = path;
        self
    }

    #[must_use]
    pub fn with_asset_check(mut self, check_assets: bool) -> Self {
        self.check_assets = check_assets;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// A table entry together with the whitelist the backend should use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProtocol {
    pub entry: ProtocolEntry,

    /// Whitelist location, already joined onto the asset root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelist_source: Option<WhitelistSource>,
}

/// Resolves pipeline protocol requests against a protocol table
pub struct ProtocolResolver<'a> {
    catalog: &'a ProtocolCatalog,
    config: ResolverConfig,
}

impl<'a> ProtocolResolver<'a> {
    pub fn new(catalog: &'a ProtocolCatalog, config: ResolverConfig) -> Self {
        Self { catalog, config }
    }

    /// Look up the table entry for an aligner and chemistry.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Configuration` if the table has no entry for the
    /// pair. Absent pairs are never defaulted.
    pub fn resolve(
        &self,
        aligner: Aligner,
        chemistry: &str,
    ) -> Result<&'a ProtocolEntry, ProtocolError> {
        if let Some(entry) = self.catalog.get(aligner, chemistry) {
            debug!(
                "Resolved {aligner}/{chemistry} to protocol '{}'",
                entry.protocol_flag
            );
            return Ok(entry);
        }

        let supported = self
            .catalog
            .chemistries(aligner)
            .into_iter()
            .map(|c| c.to_string())
            .collect();

        Err(ProtocolError::Configuration {
            aligner,
            chemistry: chemistry.to_string(),
            supported,
            hint: self.auto_hint(chemistry),
        })
    }

    /// Look up the table entry from unparsed names, as given on a command line
    /// or in a params file.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::UnknownAligner` for an unrecognized aligner name,
    /// otherwise the errors of [`Self::resolve`].
    pub fn resolve_names(
        &self,
        aligner: &str,
        chemistry: &str,
    ) -> Result<&'a ProtocolEntry, ProtocolError> {
        let parsed = parse_aligner(aligner, chemistry)?;
        self.resolve(parsed, chemistry)
    }

    /// Resolve an entry and locate the whitelist its backend should read.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::resolve`], or `ProtocolError::MissingAsset`
    /// when asset checking is enabled and the chosen whitelist is not a file.
    pub fn resolve_protocol(
        &self,
        aligner: Aligner,
        chemistry: &str,
    ) -> Result<ResolvedProtocol, ProtocolError> {
        let entry = self.resolve(aligner, chemistry)?;

        let (whitelist, whitelist_source) = match &self.config.whitelist_override {
            // Backends without a whitelist option never read the file
            Some(path) if aligner.whitelist_option().is_none() => {
                warn!(
                    "{aligner} takes no barcode whitelist; ignoring {}",
                    path.display()
                );
                (None, None)
            }
            Some(path) => (Some(path.clone()), Some(WhitelistSource::User)),
            None => match entry.whitelist_under(&self.config.asset_root) {
                Some(path) => (Some(path), Some(WhitelistSource::Table)),
                None => (None, None),
            },
        };

        if self.config.check_assets {
            if let Some(path) = &whitelist {
                check_asset(aligner, chemistry, path)?;
            }
        }

        Ok(ResolvedProtocol {
            entry: entry.clone(),
            whitelist,
            whitelist_source,
        })
    }

    /// [`Self::resolve_protocol`] from unparsed names.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_names`] and [`Self::resolve_protocol`].
    pub fn resolve_protocol_names(
        &self,
        aligner: &str,
        chemistry: &str,
    ) -> Result<ResolvedProtocol, ProtocolError> {
        let parsed = parse_aligner(aligner, chemistry)?;
        self.resolve_protocol(parsed, chemistry)
    }

    /// Extra error text for `auto` requests the aligner cannot honor
    fn auto_hint(&self, chemistry: &str) -> String {
        if !ChemistryId::new(chemistry).is_auto() {
            return String::new();
        }

        let capable: Vec<_> = self
            .catalog
            .auto_capable_aligners()
            .into_iter()
            .map(Aligner::as_str)
            .collect();

        if capable.is_empty() {
            "; no aligner in this protocol table supports auto-detection".to_string()
        } else {
            format!(
                "; auto-detection is only supported by: {}. Please specify the protocol explicitly",
                capable.join(", ")
            )
        }
    }
}

fn parse_aligner(aligner: &str, chemistry: &str) -> Result<Aligner, ProtocolError> {
    aligner.parse().map_err(|_| ProtocolError::UnknownAligner {
        aligner: aligner.to_string(),
        chemistry: chemistry.to_string(),
    })
}

fn check_asset(aligner: Aligner, chemistry: &str, path: &Path) -> Result<(), ProtocolError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ProtocolError::MissingAsset {
            aligner,
            chemistry: chemistry.to_string(),
            path: path.to_path_buf(),
        })
    }
}
