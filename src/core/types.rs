use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Alignment/quantification backend the pipeline can run
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Aligner {
    Simpleaf,
    Cellranger,
    Cellrangerarc,
    Star,
    Kallisto,
}

impl Aligner {
    /// All supported backends, in table order
    pub const ALL: [Aligner; 5] = [
        Self::Simpleaf,
        Self::Cellranger,
        Self::Cellrangerarc,
        Self::Star,
        Self::Kallisto,
    ];

    /// Name used in protocol tables and on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simpleaf => "simpleaf",
            Self::Cellranger => "cellranger",
            Self::Cellrangerarc => "cellrangerarc",
            Self::Star => "star",
            Self::Kallisto => "kallisto",
        }
    }

    /// Option that selects the library chemistry, if the backend takes one.
    ///
    /// Cell Ranger ARC detects its chemistry itself and has no such option.
    #[must_use]
    pub fn protocol_option(self) -> Option<&'static str> {
        match self {
            Self::Simpleaf | Self::Cellranger => Some("--chemistry"),
            Self::Cellrangerarc => None,
            Self::Star => Some("--soloType"),
            Self::Kallisto => Some("-x"),
        }
    }

    /// Option that passes a barcode whitelist file, if the backend takes one
    #[must_use]
    pub fn whitelist_option(self) -> Option<&'static str> {
        match self {
            Self::Simpleaf => Some("--unfiltered-pl"),
            Self::Cellranger | Self::Cellrangerarc => None,
            Self::Star => Some("--soloCBwhitelist"),
            Self::Kallisto => Some("-w"),
        }
    }

    /// Comma-separated list of all backend names, for error messages
    #[must_use]
    pub fn known_names() -> String {
        Self::ALL
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Aligner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unrecognized backend name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown aligner '{0}' (expected one of: {known})", known = Aligner::known_names())]
pub struct UnknownAlignerName(pub String);

impl FromStr for Aligner {
    type Err = UnknownAlignerName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAlignerName(s.to_string()))
    }
}

/// Sequencing chemistry / library protocol identifier (e.g. `10XV3`, `dropseq`)
///
/// Identifiers are compared exactly; `10XV3` and `10xv3` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChemistryId(pub String);

impl ChemistryId {
    /// Identifier requesting that the backend detect the chemistry itself
    pub const AUTO: &'static str = "auto";

    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.0 == Self::AUTO
    }
}

impl std::fmt::Display for ChemistryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChemistryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChemistryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a resolved barcode whitelist came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitelistSource {
    /// Bundled asset named by the protocol table
    Table,
    /// Supplied by the user, overriding the table
    User,
}

impl std::fmt::Display for WhitelistSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "protocol table"),
            Self::User => write!(f, "user supplied"),
        }
    }
}
