//! Centralized validation and helper functions.

use std::path::{Component, Path};

/// Maximum length of a chemistry identifier
pub const MAX_CHEMISTRY_LENGTH: usize = 64;

/// Gzip member header (ID1, ID2)
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Validation error types for table keys and asset paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty chemistry identifier")]
    EmptyChemistry,
    #[error("Chemistry identifier too long: exceeds {MAX_CHEMISTRY_LENGTH} characters")]
    ChemistryTooLong,
    #[error("Invalid chemistry identifier '{0}': only ASCII letters, digits, '-', '_' and '.' are allowed")]
    InvalidChemistry(String),
    #[error("Empty asset path")]
    EmptyAssetPath,
    #[error("Asset path '{0}' must be relative to the asset root")]
    AbsoluteAssetPath(String),
    #[error("Asset path '{0}' escapes the asset root")]
    AssetPathTraversal(String),
}

/// Validate a chemistry identifier used as a table key.
///
/// # Examples
///
/// ```
/// use scrnaseq_protocols::utils::validation::validate_chemistry_id;
///
/// assert!(validate_chemistry_id("10XV3").is_ok());
/// assert!(validate_chemistry_id("10xv4-3p").is_ok());
/// assert!(validate_chemistry_id("10X V3").is_err());
/// assert!(validate_chemistry_id("").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyChemistry` for an empty identifier,
/// `ValidationError::ChemistryTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidChemistry` if it contains other characters.
pub fn validate_chemistry_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyChemistry);
    }

    if id.len() > MAX_CHEMISTRY_LENGTH {
        return Err(ValidationError::ChemistryTooLong);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ValidationError::InvalidChemistry(id.to_string()));
    }

    Ok(())
}

/// Validate a whitelist path stored in a protocol table.
///
/// Table paths are joined onto an asset root, so they must be relative and
/// must not climb out of it with `..` components.
///
/// # Errors
///
/// Returns `ValidationError::EmptyAssetPath`, `ValidationError::AbsoluteAssetPath`
/// or `ValidationError::AssetPathTraversal`.
pub fn validate_asset_path(path: &Path) -> Result<(), ValidationError> {
    let display = path.display().to_string();

    if display.trim().is_empty() {
        return Err(ValidationError::EmptyAssetPath);
    }

    // Windows-style separators are not split by `components` on unix
    if path.has_root() || display.starts_with('\\') {
        return Err(ValidationError::AbsoluteAssetPath(display));
    }

    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    }) || display.split('\\').any(|part| part == "..");

    if escapes {
        return Err(ValidationError::AssetPathTraversal(display));
    }

    Ok(())
}

/// Check whether content starts with the gzip magic bytes
#[must_use]
pub fn is_gzip(content: &[u8]) -> bool {
    content.len() >= GZIP_MAGIC.len() && content[..GZIP_MAGIC.len()] == GZIP_MAGIC
}

/// Check whether a barcode consists only of `A`, `C`, `G`, `T`
#[must_use]
pub fn is_valid_barcode(barcode: &str) -> bool {
    !barcode.is_empty() && barcode.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_chemistry_ids() {
        for id in ["10XV1", "10XV2", "10XV3", "10XV4", "auto", "dropseq", "smartseq"] {
            assert!(validate_chemistry_id(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn test_invalid_chemistry_ids() {
        assert_eq!(validate_chemistry_id(""), Err(ValidationError::EmptyChemistry));
        assert_eq!(
            validate_chemistry_id(&"x".repeat(MAX_CHEMISTRY_LENGTH + 1)),
            Err(ValidationError::ChemistryTooLong)
        );
        assert!(matches!(
            validate_chemistry_id("10XV3;rm"),
            Err(ValidationError::InvalidChemistry(_))
        ));
    }

    #[test]
    fn test_relative_asset_paths_accepted() {
        assert!(validate_asset_path(Path::new("assets/whitelist/10x_V3.txt.gz")).is_ok());
        assert!(validate_asset_path(Path::new("./wl.txt")).is_ok());
    }

    #[test]
    fn test_absolute_asset_path_rejected() {
        assert!(matches!(
            validate_asset_path(Path::new("/etc/passwd")),
            Err(ValidationError::AbsoluteAssetPath(_))
        ));
    }

    #[test]
    fn test_traversal_asset_paths_rejected() {
        for attempt in ["../secret.txt", "assets/../../secret.txt", "assets\\..\\secret"] {
            assert!(
                validate_asset_path(Path::new(attempt)).is_err(),
                "{attempt} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_asset_path_rejected() {
        assert_eq!(
            validate_asset_path(Path::new("")),
            Err(ValidationError::EmptyAssetPath)
        );
    }

    #[test]
    fn test_gzip_magic() {
        assert!(is_gzip(&[0x1f, 0x8b, 0x08]));
        assert!(!is_gzip(b"AAAC"));
        assert!(!is_gzip(&[0x1f]));
    }

    #[test]
    fn test_barcode_alphabet() {
        assert!(is_valid_barcode("AAACCTGAGAAACCAT"));
        assert!(!is_valid_barcode("AAACNTGAG"));
        assert!(!is_valid_barcode("aaacctgag"));
        assert!(!is_valid_barcode(""));
    }
}
