use crate::core::types::Aligner;

use super::resolver::ResolvedProtocol;

/// STARsolo's spelling of "no whitelist"
pub const STAR_NO_WHITELIST: &str = "None";

impl ResolvedProtocol {
    /// Backend command-line arguments for this protocol.
    ///
    /// The protocol option comes first, then the whitelist option, then the
    /// entry's extra arguments in table order.
    #[must_use]
    pub fn command_args(&self) -> Vec<String> {
        let aligner = self.entry.aligner;
        let mut args = Vec::new();

        if let Some(option) = aligner.protocol_option() {
            args.push(option.to_string());
            args.push(self.entry.protocol_flag.clone());
        }

        match (aligner.whitelist_option(), &self.whitelist) {
            (Some(option), Some(path)) => {
                args.push(option.to_string());
                args.push(path.display().to_string());
            }
            (Some(option), None) if aligner == Aligner::Star => {
                args.push(option.to_string());
                args.push(STAR_NO_WHITELIST.to_string());
            }
            _ => {}
        }

        args.extend(self.entry.extra_arg_tokens());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::ProtocolCatalog;
    use crate::resolve::{ProtocolResolver, ResolverConfig};
    use std::path::PathBuf;

    fn resolve(aligner: Aligner, chemistry: &str) -> ResolvedProtocol {
        let catalog = ProtocolCatalog::load_embedded().unwrap();
        let config = ResolverConfig::new("/pipeline").with_asset_check(false);
        ProtocolResolver::new(&catalog, config)
            .resolve_protocol(aligner, chemistry)
            .unwrap()
    }

    #[test]
    fn test_star_10xv3_args() {
        assert_eq!(
            resolve(Aligner::Star, "10XV3").command_args(),
            vec![
                "--soloType",
                "CB_UMI_Simple",
                "--soloCBwhitelist",
                "/pipeline/assets/whitelist/10x_V3_barcode_whitelist.txt.gz",
                "--soloUMIlen",
                "12",
            ]
        );
    }

    #[test]
    fn test_star_without_whitelist_passes_none() {
        assert_eq!(
            resolve(Aligner::Star, "smartseq").command_args(),
            vec!["--soloType", "SmartSeq", "--soloCBwhitelist", "None"]
        );
    }

    #[test]
    fn test_cellranger_args() {
        assert_eq!(
            resolve(Aligner::Cellranger, "10XV2").command_args(),
            vec!["--chemistry", "SC3Pv2"]
        );
    }

    #[test]
    fn test_cellrangerarc_has_no_args() {
        assert!(resolve(Aligner::Cellrangerarc, "auto").command_args().is_empty());
    }

    #[test]
    fn test_simpleaf_unfiltered_permit_list() {
        assert_eq!(
            resolve(Aligner::Simpleaf, "10XV4").command_args(),
            vec![
                "--chemistry",
                "10xv4-3p",
                "--unfiltered-pl",
                "/pipeline/assets/whitelist/10x_V4_barcode_whitelist.txt.gz",
            ]
        );
    }

    #[test]
    fn test_kallisto_without_whitelist() {
        assert_eq!(
            resolve(Aligner::Kallisto, "dropseq").command_args(),
            vec!["-x", "DROPSEQ"]
        );
    }

    #[test]
    fn test_user_whitelist_dropped_for_cellranger() {
        let catalog = ProtocolCatalog::load_embedded().unwrap();
        let config = ResolverConfig::default()
            .with_whitelist_override(Some(PathBuf::from("custom.txt")))
            .with_asset_check(false);
        let resolved = ProtocolResolver::new(&catalog, config)
            .resolve_protocol(Aligner::Cellranger, "10XV3")
            .unwrap();

        assert!(resolved.whitelist.is_none());
        assert_eq!(resolved.command_args(), vec!["--chemistry", "SC3Pv3"]);
    }
}
