use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::types::{Aligner, ChemistryId};

/// One row of the protocol table: how a backend spells a chemistry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolEntry {
    /// Backend this entry applies to
    pub aligner: Aligner,

    /// Chemistry identifier as requested by the pipeline
    pub chemistry: ChemistryId,

    /// Value for the backend's protocol-selection option
    pub protocol_flag: String,

    /// Additional raw arguments this chemistry needs on this backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_args: Option<String>,

    /// Barcode whitelist asset, relative to the asset root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist_path: Option<PathBuf>,
}

impl ProtocolEntry {
    pub fn new(
        aligner: Aligner,
        chemistry: impl Into<ChemistryId>,
        protocol_flag: impl Into<String>,
    ) -> Self {
        Self {
            aligner,
            chemistry: chemistry.into(),
            protocol_flag: protocol_flag.into(),
            extra_args: None,
            whitelist_path: None,
        }
    }

    #[must_use]
    pub fn with_extra_args(mut self, extra_args: impl Into<String>) -> Self {
        self.extra_args = Some(extra_args.into());
        self
    }

    #[must_use]
    pub fn with_whitelist(mut self, path: impl Into<PathBuf>) -> Self {
        self.whitelist_path = Some(path.into());
        self
    }

    /// Extra arguments split into individual command-line tokens
    #[must_use]
    pub fn extra_arg_tokens(&self) -> Vec<String> {
        self.extra_args
            .as_deref()
            .map(|args| args.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Whitelist location under `asset_root`, if this entry names one
    #[must_use]
    pub fn whitelist_under(&self, asset_root: &Path) -> Option<PathBuf> {
        self.whitelist_path.as_ref().map(|p| asset_root.join(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_arg_tokens() {
        let entry = ProtocolEntry::new(Aligner::Star, "10XV3", "CB_UMI_Simple")
            .with_extra_args("--soloUMIlen 12  --soloCBlen 16");
        assert_eq!(
            entry.extra_arg_tokens(),
            vec!["--soloUMIlen", "12", "--soloCBlen", "16"]
        );
    }

    #[test]
    fn test_extra_arg_tokens_empty_without_args() {
        let entry = ProtocolEntry::new(Aligner::Cellranger, "10XV2", "SC3Pv2");
        assert!(entry.extra_arg_tokens().is_empty());
    }

    #[test]
    fn test_whitelist_under_root() {
        let entry = ProtocolEntry::new(Aligner::Kallisto, "10XV2", "10XV2")
            .with_whitelist("assets/whitelist/wl.txt.gz");
        assert_eq!(
            entry.whitelist_under(Path::new("/pipeline")),
            Some(PathBuf::from("/pipeline/assets/whitelist/wl.txt.gz"))
        );
    }

    #[test]
    fn test_serialization_skips_absent_optionals() {
        let entry = ProtocolEntry::new(Aligner::Kallisto, "dropseq", "DROPSEQ");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("extra_args"));
        assert!(!json.contains("whitelist_path"));
        assert!(json.contains("\"aligner\":\"kallisto\""));
    }
}
