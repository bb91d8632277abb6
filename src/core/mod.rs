//! Core data types for protocol resolution.
//!
//! - [`Aligner`]: the closed set of alignment/quantification backends
//! - [`ChemistryId`]: a library chemistry identifier such as `10XV3` or `dropseq`
//! - [`ProtocolEntry`]: one row of the protocol table
//!
//! ## Chemistry naming
//!
//! Each backend spells the same chemistry differently:
//!
//! | Chemistry | simpleaf | Cell Ranger | STAR          | kallisto |
//! |-----------|----------|-------------|---------------|----------|
//! | 10XV2     | 10xv2    | SC3Pv2      | CB_UMI_Simple | 10XV2    |
//! | 10XV3     | 10xv3    | SC3Pv3      | CB_UMI_Simple | 10XV3    |
//! | dropseq   | dropseq  | -           | CB_UMI_Simple | DROPSEQ  |
//!
//! Lookups use the pipeline's identifier exactly; there is no case folding.

pub mod entry;
pub mod types;

pub use entry::ProtocolEntry;
pub use types::{Aligner, ChemistryId};
