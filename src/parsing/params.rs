//! Pipeline parameter files.
//!
//! Pipeline runs are configured with a JSON params file such as
//!
//! ```json
//! {
//!   "input": "samplesheet.csv",
//!   "aligner": "star",
//!   "protocol": "10XV2",
//!   "barcode_whitelist": null
//! }
//! ```
//!
//! Only the protocol-related keys are interpreted; everything else is kept
//! as-is and ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("Failed to read params file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse params file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {0} given: pass it on the command line or set '{0}' in the params file")]
    Missing(&'static str),
}

/// Protocol-related pipeline parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aligner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Whitelist that overrides the protocol table's asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_whitelist: Option<PathBuf>,

    /// Other pipeline parameters, carried but not interpreted
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl PipelineParams {
    /// Parse a params file
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Io` if the file cannot be read or
    /// `ParamsError::Json` if it is not a JSON object of parameters.
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse params from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Json` on malformed input.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let mut params: Self = serde_json::from_str(json)?;
        // Blank strings in params files mean "unset"
        params.aligner = params.aligner.filter(|s| !s.trim().is_empty());
        params.protocol = params.protocol.filter(|s| !s.trim().is_empty());
        params.barcode_whitelist = params
            .barcode_whitelist
            .filter(|p| !p.as_os_str().is_empty());
        Ok(params)
    }

    /// Overlay values given explicitly, e.g. on the command line
    #[must_use]
    pub fn with_overrides(
        mut self,
        aligner: Option<String>,
        protocol: Option<String>,
        barcode_whitelist: Option<PathBuf>,
    ) -> Self {
        if aligner.is_some() {
            self.aligner = aligner;
        }
        if protocol.is_some() {
            self.protocol = protocol;
        }
        if barcode_whitelist.is_some() {
            self.barcode_whitelist = barcode_whitelist;
        }
        self
    }

    /// The aligner and protocol, both of which must be set
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Missing` naming the first absent parameter.
    pub fn require_request(&self) -> Result<(&str, &str), ParamsError> {
        let aligner = self.aligner.as_deref().ok_or(ParamsError::Missing("aligner"))?;
        let protocol = self
            .protocol
            .as_deref()
            .ok_or(ParamsError::Missing("protocol"))?;
        Ok((aligner, protocol))
    }
}
