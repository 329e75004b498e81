//! # tfd-meta
//!
//! The First Descendant metadata library - stat resolution, weapon
//! flattening, and CSV export.
//!
//! This library provides functionality to:
//! - Resolve numeric stat IDs to stat names (with hardcoded overrides)
//! - Flatten nested weapon records into sparse, name-keyed rows
//! - Write and read delimited tables with a stable header
//! - Clean up weapon tables (drop empty and noise columns, fix column order)
//!
//! ## Example
//!
//! ```no_run
//! use tfd_meta::{export, CollectedDiagnostics, ExportSettings, MetadataSource};
//!
//! # fn run(source: &dyn MetadataSource) -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ExportSettings::new(".", 100);
//! let mut diagnostics = CollectedDiagnostics::default();
//!
//! let summary = export(source, &settings, &mut diagnostics)?;
//! println!("Wrote {} weapons to {}", summary.weapons, summary.weapon_table.display());
//! # Ok(())
//! # }
//! ```

pub mod flatten;
pub mod pipeline;
pub mod postprocess;
pub mod resource;
pub mod source;
pub mod stats;
pub mod table;

// Re-export commonly used items
#[doc(inline)]
pub use flatten::{
    flatten, CollectedDiagnostics, Diagnostics, FlattenedRecord, Scalar, TracingDiagnostics,
    UnresolvedStat,
};
#[doc(inline)]
pub use pipeline::{export, ExportError, ExportSettings, ExportSummary};
#[doc(inline)]
pub use postprocess::{
    drop_empty_columns, postprocess, postprocess_file, reorder_columns, ColumnLayout,
    WEAPON_LAYOUT,
};
#[doc(inline)]
pub use resource::{Language, Resource, DEFAULT_BASE_URL};
#[doc(inline)]
pub use source::{FetchError, MetadataSource};
#[doc(inline)]
pub use stats::{build_stat_dictionary, StatDictionary, StatRecord, STAT_OVERRIDES};
#[doc(inline)]
pub use table::{stat_table, weapon_header, Table, TableError};
