//! Weapon record flattening
//!
//! A raw weapon record carries two nested lists:
//!
//! ```text
//! base_stat:   [{stat_id, stat_value}, ...]
//! firearm_atk: [{level, firearm: [{firearm_atk_type, firearm_atk_value}, ...]}, ...]
//! ```
//!
//! [`flatten`] turns these into top-level columns: each resolved stat becomes
//! a column named after the stat, and the attack value at the target level
//! becomes a single `firearm_atk` column. Everything else is copied through.

use crate::stats::StatDictionary;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Nested list of `{stat_id, stat_value}` entries
pub const STAT_FIELD: &str = "base_stat";

/// Nested per-level attack list
pub const LEVEL_FIELD: &str = "firearm_atk";

/// Derived column holding the attack value at the target level
pub const ATTACK_FIELD: &str = "firearm_atk";

/// Field used to name a record in diagnostics
pub const NAME_FIELD: &str = "weapon_name";

// ============================================================================
// Scalar values
// ============================================================================

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Convert a JSON value to a cell value.
    ///
    /// `null` has no cell value. Arrays and objects become their compact
    /// JSON text.
    pub fn from_json(value: &Value) -> Option<Scalar> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(if let Some(i) = n.as_i64() {
                Scalar::Integer(i)
            } else if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                Scalar::Float(f)
            } else {
                Scalar::Text(n.to_string())
            }),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Some(Scalar::Text(value.to_string())),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

// ============================================================================
// Flattened record
// ============================================================================

/// Sparse row: field name to scalar, absent keys have no value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlattenedRecord {
    fields: BTreeMap<String, Scalar>,
}

impl FlattenedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Scalar> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Scalar>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Field names in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rendered cell for a field, empty when absent
    pub fn cell(&self, field: &str) -> String {
        self.fields
            .get(field)
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for FlattenedRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = FlattenedRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// A stat entry whose ID is not in the dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedStat {
    pub stat_id: String,
    pub stat_value: Option<Scalar>,
    pub record_name: Option<String>,
}

impl fmt::Display for UnresolvedStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stat {} = {} on {}",
            self.stat_id,
            self.stat_value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            self.record_name.as_deref().unwrap_or("<unnamed>")
        )
    }
}

/// Sink for non-fatal data issues found while flattening
pub trait Diagnostics {
    fn unresolved_stat(&mut self, event: &UnresolvedStat);
}

/// Reports diagnostics as `tracing` debug events
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn unresolved_stat(&mut self, event: &UnresolvedStat) {
        tracing::debug!(
            stat_id = %event.stat_id,
            stat_value = %event.stat_value.as_ref().map(ToString::to_string).unwrap_or_default(),
            record = event.record_name.as_deref().unwrap_or("<unnamed>"),
            "Unresolved stat dropped"
        );
    }
}

/// Keeps every diagnostic for later inspection
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    pub unresolved: Vec<UnresolvedStat>,
}

impl Diagnostics for CollectedDiagnostics {
    fn unresolved_stat(&mut self, event: &UnresolvedStat) {
        self.unresolved.push(event.clone());
    }
}

// ============================================================================
// Flattening
// ============================================================================

/// Flatten one raw weapon record.
///
/// Never fails: missing or malformed nested lists are skipped, and stats
/// missing from `dictionary` are reported to `diagnostics` and dropped.
pub fn flatten(
    raw: &Map<String, Value>,
    dictionary: &StatDictionary,
    target_level: i64,
    diagnostics: &mut dyn Diagnostics,
) -> FlattenedRecord {
    let mut record = FlattenedRecord::new();

    for (key, value) in raw {
        if key == STAT_FIELD || key == LEVEL_FIELD {
            continue;
        }
        if let Some(scalar) = Scalar::from_json(value) {
            record.insert(key.clone(), scalar);
        }
    }

    if let Some(entries) = raw.get(STAT_FIELD).and_then(Value::as_array) {
        flatten_stats(raw, entries, dictionary, &mut record, diagnostics);
    }

    if let Some(levels) = raw.get(LEVEL_FIELD).and_then(Value::as_array) {
        if let Some(attack) = attack_at_level(levels, target_level) {
            record.insert(ATTACK_FIELD, attack);
        }
    }

    record
}

fn flatten_stats(
    raw: &Map<String, Value>,
    entries: &[Value],
    dictionary: &StatDictionary,
    record: &mut FlattenedRecord,
    diagnostics: &mut dyn Diagnostics,
) {
    for entry in entries {
        let Some(stat_id) = entry.get("stat_id").and_then(id_text) else {
            continue;
        };
        let stat_value = entry.get("stat_value").and_then(Scalar::from_json);

        match dictionary.get(&stat_id) {
            Some(name) => {
                if let Some(value) = stat_value {
                    record.insert(name, value);
                }
            }
            None => diagnostics.unresolved_stat(&UnresolvedStat {
                stat_id,
                stat_value,
                record_name: raw
                    .get(NAME_FIELD)
                    .and_then(Scalar::from_json)
                    .map(|s| s.to_string()),
            }),
        }
    }
}

/// Attack value of the first firearm entry at `target_level`.
///
/// When several entries share the level, the last one wins.
fn attack_at_level(levels: &[Value], target_level: i64) -> Option<Scalar> {
    levels
        .iter()
        .rev()
        .find(|entry| entry.get("level").and_then(level_number) == Some(target_level))?
        .get("firearm")?
        .as_array()?
        .first()?
        .get("firearm_atk_value")
        .and_then(Scalar::from_json)
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn level_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
