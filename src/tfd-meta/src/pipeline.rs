//! Export pipeline
//!
//! Fetch stats, build the dictionary, write the stat table, fetch weapons,
//! flatten, write the weapon table, then clean it up. Each step finishes
//! before the next begins.

use crate::flatten::{flatten, Diagnostics, FlattenedRecord, UnresolvedStat};
use crate::postprocess::{postprocess_file, WEAPON_LAYOUT};
use crate::resource::Resource;
use crate::source::{FetchError, MetadataSource};
use crate::stats::{build_stat_dictionary, StatRecord};
use crate::table::{stat_table, weapon_header, Table, TableError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the exported stat table
pub const STAT_TABLE_FILE: &str = "stats.csv";

/// File name of the exported weapon table
pub const WEAPON_TABLE_FILE: &str = "weapons.csv";

/// Key holding the weapon list when the document is an object
pub const WEAPON_LIST_KEY: &str = "weapons";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to parse {resource}: {source}")]
    Parse {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    #[error("Table I/O failed for {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}

/// Run parameters for [`export`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    /// Directory the tables are written into
    pub output_dir: PathBuf,
    /// Level at which weapon attack values are compared
    pub target_level: i64,
}

impl ExportSettings {
    pub fn new(output_dir: impl Into<PathBuf>, target_level: i64) -> Self {
        Self {
            output_dir: output_dir.into(),
            target_level,
        }
    }

    pub fn stat_table_path(&self) -> PathBuf {
        self.output_dir.join(STAT_TABLE_FILE)
    }

    pub fn weapon_table_path(&self) -> PathBuf {
        self.output_dir.join(WEAPON_TABLE_FILE)
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub stats: usize,
    pub weapons: usize,
    pub unresolved_stats: usize,
    pub columns: usize,
    pub stat_table: PathBuf,
    pub weapon_table: PathBuf,
}

/// Forwards to another sink while counting events
struct Counting<'a> {
    inner: &'a mut dyn Diagnostics,
    unresolved: usize,
}

impl Diagnostics for Counting<'_> {
    fn unresolved_stat(&mut self, event: &UnresolvedStat) {
        self.unresolved += 1;
        self.inner.unresolved_stat(event);
    }
}

/// Run the full export against `source`
pub fn export(
    source: &dyn MetadataSource,
    settings: &ExportSettings,
    diagnostics: &mut dyn Diagnostics,
) -> Result<ExportSummary, ExportError> {
    tracing::info!("Fetching {}", Resource::Stat);
    let stat_doc = source.fetch(Resource::Stat.path())?;
    let stat_records = StatRecord::parse_list(&stat_doc).map_err(|source| ExportError::Parse {
        resource: Resource::Stat,
        source,
    })?;
    let dictionary = build_stat_dictionary(&stat_records);
    tracing::info!(
        "Built stat dictionary: {} entries ({} fetched)",
        dictionary.len(),
        stat_records.len()
    );

    let stat_path = settings.stat_table_path();
    write_table(&stat_table(&dictionary), &stat_path)?;

    tracing::info!("Fetching {}", Resource::Weapon);
    let weapon_doc = source.fetch(Resource::Weapon.path())?;
    let raw_weapons = weapon_objects(&weapon_doc)?;

    let mut counting = Counting {
        inner: diagnostics,
        unresolved: 0,
    };
    let records: Vec<FlattenedRecord> = raw_weapons
        .iter()
        .map(|raw| flatten(raw, &dictionary, settings.target_level, &mut counting))
        .collect();
    if counting.unresolved > 0 {
        tracing::info!("{} stat entries could not be resolved", counting.unresolved);
    }

    let weapon_path = settings.weapon_table_path();
    let header = weapon_header(&records, &dictionary);
    write_table(&Table::from_records(&records, header), &weapon_path)?;

    let cleaned = postprocess_file(&weapon_path, &WEAPON_LAYOUT).map_err(|source| {
        ExportError::Table {
            path: weapon_path.clone(),
            source,
        }
    })?;
    tracing::info!(
        "Wrote {} weapons x {} columns to {}",
        records.len(),
        cleaned.column_count(),
        weapon_path.display()
    );

    Ok(ExportSummary {
        stats: dictionary.len(),
        weapons: records.len(),
        unresolved_stats: counting.unresolved,
        columns: cleaned.column_count(),
        stat_table: stat_path,
        weapon_table: weapon_path,
    })
}

fn write_table(table: &Table, path: &Path) -> Result<(), ExportError> {
    table.write_csv(path).map_err(|source| ExportError::Table {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Wrote {} rows to {}", table.row_count(), path.display());
    Ok(())
}

/// Weapon objects from the weapon document.
///
/// Accepts a bare array or an object carrying the array under
/// [`WEAPON_LIST_KEY`]. Any other shape is a parse error; array elements
/// that are not JSON objects are skipped.
fn weapon_objects(document: &Value) -> Result<Vec<&Map<String, Value>>, ExportError> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get(WEAPON_LIST_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                weapon_shape_error(format!(
                    "expected an array or an object with a \"{}\" array",
                    WEAPON_LIST_KEY
                ))
            })?,
        other => {
            return Err(weapon_shape_error(format!(
                "expected an array, found {}",
                other
            )))
        }
    };

    let objects: Vec<&Map<String, Value>> = items.iter().filter_map(Value::as_object).collect();
    if objects.len() != items.len() {
        tracing::warn!(
            "Skipped {} non-object entries in {}",
            items.len() - objects.len(),
            Resource::Weapon
        );
    }
    Ok(objects)
}

fn weapon_shape_error(message: String) -> ExportError {
    ExportError::Parse {
        resource: Resource::Weapon,
        source: serde::de::Error::custom(message),
    }
}
