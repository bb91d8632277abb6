//! Protocol table storage.
//!
//! The protocol table maps each backend aligner and chemistry identifier to the
//! backend's own protocol name, any extra arguments that chemistry needs, and
//! an optional barcode whitelist asset. A default table is compiled into the
//! binary, but custom tables can also be loaded from JSON files.
//!
//! ## Table format
//!
//! ```json
//! {
//!   "star": {
//!     "10XV3": {
//!       "protocol": "CB_UMI_Simple",
//!       "extra_args": "--soloUMIlen 12",
//!       "whitelist": "assets/whitelist/10x_V3_barcode_whitelist.txt.gz"
//!     }
//!   }
//! }
//! ```
//!
//! Aligner and chemistry keys must be unique; repeated keys are a load error
//! rather than last-one-wins.
//!
//! ## Example
//!
//! ```rust,no_run
//! use scrnaseq_protocols::{Aligner, ProtocolCatalog};
//! use std::path::Path;
//!
//! // Load embedded table
//! let catalog = ProtocolCatalog::load_embedded().unwrap();
//!
//! for entry in catalog.entries() {
//!     println!("{}/{} -> {}", entry.aligner, entry.chemistry, entry.protocol_flag);
//! }
//!
//! let star_v3 = catalog.get(Aligner::Star, "10XV3");
//!
//! // Load from custom file
//! let custom = ProtocolCatalog::load_from_file(Path::new("my_protocols.json")).unwrap();
//! ```

pub mod assets;
pub mod store;
