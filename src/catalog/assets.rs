use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::types::{Aligner, ChemistryId};

use super::store::ProtocolCatalog;

/// Presence of one whitelist asset referenced by the protocol table
#[derive(Debug, Clone, Serialize)]
pub struct AssetCheck {
    /// Path as written in the table
    pub path: PathBuf,

    /// Path joined onto the asset root
    pub resolved: PathBuf,

    /// Whether the resolved path is an existing file
    pub exists: bool,

    /// Entries referencing this asset
    pub used_by: Vec<(Aligner, ChemistryId)>,
}

impl ProtocolCatalog {
    /// Check every distinct whitelist asset the table references under `asset_root`
    pub fn validate_assets(&self, asset_root: &Path) -> Vec<AssetCheck> {
        let mut by_path: BTreeMap<&Path, Vec<(Aligner, ChemistryId)>> = BTreeMap::new();
        for entry in self.entries() {
            if let Some(path) = &entry.whitelist_path {
                by_path
                    .entry(path.as_path())
                    .or_default()
                    .push((entry.aligner, entry.chemistry.clone()));
            }
        }

        by_path
            .into_iter()
            .map(|(path, used_by)| {
                let resolved = asset_root.join(path);
                AssetCheck {
                    path: path.to_path_buf(),
                    exists: resolved.is_file(),
                    resolved,
                    used_by,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_whitelists_are_grouped() {
        let catalog = ProtocolCatalog::load_embedded().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let checks = catalog.validate_assets(dir.path());
        assert_eq!(checks.len(), 4);

        let v3 = checks
            .iter()
            .find(|c| c.path.ends_with("10x_V3_barcode_whitelist.txt.gz"))
            .unwrap();
        assert_eq!(
            v3.used_by,
            vec![
                (Aligner::Simpleaf, ChemistryId::new("10XV3")),
                (Aligner::Star, ChemistryId::new("10XV3")),
            ]
        );
        assert!(!v3.exists);
    }

    #[test]
    fn test_present_asset_detected() {
        let catalog = ProtocolCatalog::load_embedded().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let whitelist_dir = dir.path().join("assets/whitelist");
        std::fs::create_dir_all(&whitelist_dir).unwrap();
        std::fs::write(whitelist_dir.join("10x_V2_barcode_whitelist.txt.gz"), b"x").unwrap();

        let checks = catalog.validate_assets(dir.path());
        let present: Vec<_> = checks.iter().filter(|c| c.exists).collect();
        assert_eq!(present.len(), 1);
        assert!(present[0].resolved.starts_with(dir.path()));
    }
}
