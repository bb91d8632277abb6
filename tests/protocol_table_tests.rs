//! Protocol Table Property Tests
//!
//! Checks that hold for every entry of the embedded protocol table, plus
//! loading behavior of custom tables.

use scrnaseq_protocols::{
    Aligner, CatalogError, ProtocolCatalog, ProtocolError, ProtocolResolver, ResolverConfig,
};

fn unchecked_config() -> ResolverConfig {
    ResolverConfig::default().with_asset_check(false)
}

/// Every present pair resolves to itself with a non-empty protocol flag
#[test]
fn test_every_entry_resolves_with_protocol_flag() {
    let catalog = ProtocolCatalog::load_embedded().unwrap();
    let resolver = ProtocolResolver::new(&catalog, unchecked_config());

    for entry in catalog.entries() {
        let resolved = resolver
            .resolve(entry.aligner, entry.chemistry.as_str())
            .unwrap_or_else(|e| panic!("{}/{} failed: {e}", entry.aligner, entry.chemistry));
        assert_eq!(resolved, entry);
        assert!(
            !resolved.protocol_flag.is_empty(),
            "{}/{} has an empty protocol flag",
            entry.aligner,
            entry.chemistry
        );
    }
}

/// Resolving by name agrees with resolving by typed aligner
#[test]
fn test_names_and_types_agree() {
    let catalog = ProtocolCatalog::load_embedded().unwrap();
    let resolver = ProtocolResolver::new(&catalog, unchecked_config());

    for entry in catalog.entries() {
        let by_name = resolver
            .resolve_names(entry.aligner.as_str(), entry.chemistry.as_str())
            .unwrap();
        assert_eq!(by_name, entry);
    }
}

/// Loading twice yields identical entries for every key
#[test]
fn test_repeated_loads_are_identical() {
    let first = ProtocolCatalog::load_embedded().unwrap();
    let second = ProtocolCatalog::load_embedded().unwrap();

    assert_eq!(first, second);
    for (a, b) in first.entries().zip(second.entries()) {
        assert_eq!(a, b);
    }
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

/// Only aligners that take a whitelist option have whitelist assets
#[test]
fn test_whitelists_only_where_backend_accepts_them() {
    let catalog = ProtocolCatalog::load_embedded().unwrap();

    for entry in catalog.entries() {
        if entry.whitelist_path.is_some() {
            assert!(
                entry.aligner.whitelist_option().is_some(),
                "{}/{} names a whitelist the backend cannot take",
                entry.aligner,
                entry.chemistry
            );
        }
    }
}

#[test]
fn test_every_aligner_has_a_section() {
    let catalog = ProtocolCatalog::load_embedded().unwrap();
    for aligner in Aligner::ALL {
        assert!(
            !catalog.chemistries(aligner).is_empty(),
            "{aligner} has no protocols"
        );
    }
}

#[test]
fn test_unsupported_pairs_are_configuration_errors() {
    let catalog = ProtocolCatalog::load_embedded().unwrap();
    let resolver = ProtocolResolver::new(&catalog, unchecked_config());

    let cases = [
        (Aligner::Cellrangerarc, "10XV1"),
        (Aligner::Cellranger, "dropseq"),
        (Aligner::Simpleaf, "smartseq"),
        (Aligner::Kallisto, "auto"),
    ];

    for (aligner, chemistry) in cases {
        match resolver.resolve(aligner, chemistry) {
            Err(ProtocolError::Configuration {
                aligner: a,
                chemistry: c,
                ..
            }) => {
                assert_eq!(a, aligner);
                assert_eq!(c, chemistry);
            }
            other => panic!("{aligner}/{chemistry}: expected Configuration error, got {other:?}"),
        }
    }
}

#[test]
fn test_custom_table_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("protocols.json");
    std::fs::write(
        &path,
        r#"{
            "star": {
                "visium": {
                    "protocol": "CB_UMI_Simple",
                    "extra_args": "--soloUMIlen 12",
                    "whitelist": "whitelists/visium.txt"
                }
            }
        }"#,
    )
    .unwrap();

    let catalog = ProtocolCatalog::load_from_file(&path).unwrap();
    assert_eq!(catalog.len(), 1);

    std::fs::create_dir_all(dir.path().join("whitelists")).unwrap();
    std::fs::write(dir.path().join("whitelists/visium.txt"), "ACGTACGTACGTACGT\n").unwrap();

    let resolver = ProtocolResolver::new(&catalog, ResolverConfig::new(dir.path()));
    let resolved = resolver.resolve_protocol(Aligner::Star, "visium").unwrap();
    assert_eq!(
        resolved.command_args().last().map(String::as_str),
        Some("12")
    );

    // The embedded table's pairs are not implicitly present
    assert!(resolver.resolve(Aligner::Star, "10XV3").is_err());
}

#[test]
fn test_missing_table_file() {
    let result = ProtocolCatalog::load_from_file(std::path::Path::new("/nonexistent/p.json"));
    assert!(matches!(result, Err(CatalogError::ReadError(_))));
}
