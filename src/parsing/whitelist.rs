//! Reader for barcode whitelist files.
//!
//! A whitelist lists one valid cell barcode per line. Files may be plain text
//! or gzip compressed; compression is detected from the magic bytes rather
//! than the extension.

use std::collections::BTreeSet;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use serde::Serialize;
use thiserror::Error;

use crate::utils::validation::{is_gzip, is_valid_barcode};

#[derive(Error, Debug)]
pub enum WhitelistError {
    #[error("Failed to read whitelist {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Whitelist {} contains no barcodes", .0.display())]
    Empty(PathBuf),
}

/// Summary of a barcode whitelist file
#[derive(Debug, Clone, Serialize)]
pub struct WhitelistSummary {
    pub path: PathBuf,

    /// Whether the file was gzip compressed
    pub compressed: bool,

    /// Number of non-empty lines
    pub barcodes: usize,

    /// Distinct barcode lengths seen
    pub barcode_lengths: BTreeSet<usize>,

    /// Lines with characters outside `ACGT`
    pub invalid_barcodes: usize,

    /// MD5 of the file as stored on disk
    pub md5: String,
}

impl WhitelistSummary {
    /// True when every barcode has the same length and only `ACGT`
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.barcode_lengths.len() == 1 && self.invalid_barcodes == 0
    }
}

/// Read a whitelist file and summarize its barcodes
///
/// # Errors
///
/// Returns `WhitelistError::Io` if the file cannot be read or decompressed, or
/// `WhitelistError::Empty` if it holds no barcodes.
pub fn inspect(path: &Path) -> Result<WhitelistSummary, WhitelistError> {
    let io_error = |source| WhitelistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = std::fs::read(path).map_err(io_error)?;
    let md5 = format!("{:x}", md5::compute(&content));
    let compressed = is_gzip(&content);

    let mut summary = if compressed {
        summarize(BufReader::new(MultiGzDecoder::new(content.as_slice())))
    } else {
        summarize(content.as_slice())
    }
    .map_err(io_error)?;

    if summary.barcodes == 0 {
        return Err(WhitelistError::Empty(path.to_path_buf()));
    }

    summary.path = path.to_path_buf();
    summary.compressed = compressed;
    summary.md5 = md5;
    Ok(summary)
}

fn summarize<R: BufRead>(reader: R) -> std::io::Result<WhitelistSummary> {
    let mut summary = WhitelistSummary {
        path: PathBuf::new(),
        compressed: false,
        barcodes: 0,
        barcode_lengths: BTreeSet::new(),
        invalid_barcodes: 0,
        md5: String::new(),
    };

    for line in reader.lines() {
        let line = line?;
        let barcode = line.trim();
        if barcode.is_empty() {
            continue;
        }

        summary.barcodes += 1;
        summary.barcode_lengths.insert(barcode.len());
        if !is_valid_barcode(barcode) {
            summary.invalid_barcodes += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const BARCODES: &str = "AAACCTGAGAAACCAT\nAAACCTGAGAAACCGC\nAAACCTGAGAAACCTA\n";

    #[test]
    fn test_inspect_plain_whitelist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whitelist.txt");
        std::fs::write(&path, BARCODES).unwrap();

        let summary = inspect(&path).unwrap();
        assert!(!summary.compressed);
        assert_eq!(summary.barcodes, 3);
        assert_eq!(summary.barcode_lengths, BTreeSet::from([16]));
        assert!(summary.is_consistent());
        assert_eq!(summary.md5, format!("{:x}", md5::compute(BARCODES)));
    }

    #[test]
    fn test_inspect_gzipped_whitelist() {
        let dir = tempfile::tempdir().unwrap();
        // Extension deliberately wrong; detection uses magic bytes
        let path = dir.path().join("whitelist.txt");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(BARCODES.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let summary = inspect(&path).unwrap();
        assert!(summary.compressed);
        assert_eq!(summary.barcodes, 3);
    }

    #[test]
    fn test_inspect_flags_bad_barcodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whitelist.txt");
        std::fs::write(&path, "AAACCTGAGAAACCAT\nAAACNTGAG\n\n").unwrap();

        let summary = inspect(&path).unwrap();
        assert_eq!(summary.barcodes, 2);
        assert_eq!(summary.invalid_barcodes, 1);
        assert_eq!(summary.barcode_lengths, BTreeSet::from([9, 16]));
        assert!(!summary.is_consistent());
    }

    #[test]
    fn test_inspect_empty_whitelist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whitelist.txt");
        std::fs::write(&path, "\n\n").unwrap();

        assert!(matches!(inspect(&path), Err(WhitelistError::Empty(_))));
    }

    #[test]
    fn test_inspect_missing_file() {
        assert!(matches!(
            inspect(Path::new("/nonexistent/whitelist.txt.gz")),
            Err(WhitelistError::Io { .. })
        ));
    }
}
