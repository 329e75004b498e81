//! Weapon table cleanup
//!
//! Two passes over a written table:
//! 1. Drop columns with no non-empty cell (the header over-approximates)
//! 2. Drop noise columns and order the rest as prefix, sorted middle, suffix

use crate::table::{Table, TableError};
use std::path::Path;

/// Column placement rules for the reordering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Leading columns, in this order
    pub prefix: &'static [&'static str],
    /// Trailing columns, in this order
    pub suffix: &'static [&'static str],
    /// Columns removed outright
    pub dropped: &'static [&'static str],
}

pub const WEAPON_LAYOUT: ColumnLayout = ColumnLayout {
    prefix: &[
        "weapon_name",
        "weapon_tier",
        "weapon_type",
        "weapon_rounds_type",
        "firearm_atk",
    ],
    suffix: &["weapon_perk_ability_name", "weapon_perk_ability_description"],
    dropped: &["image_url", "weapon_perk_ability_image_url", "weapon_id"],
};

/// Remove every column whose cells are all empty
pub fn drop_empty_columns(table: &Table) -> Table {
    let keep: Vec<usize> = (0..table.column_count())
        .filter(|&i| table.rows().iter().any(|row| !row[i].is_empty()))
        .collect();
    table.select(&keep)
}

/// Drop the layout's noise columns and reorder the remainder.
///
/// Prefix and suffix names missing from the table are skipped.
pub fn reorder_columns(table: &Table, layout: &ColumnLayout) -> Table {
    let placed = |name: &str| {
        layout.dropped.contains(&name)
            || layout.prefix.contains(&name)
            || layout.suffix.contains(&name)
    };

    let mut middle: Vec<usize> = (0..table.column_count())
        .filter(|&i| !placed(table.headers()[i].as_str()))
        .collect();
    middle.sort_by(|&a, &b| table.headers()[a].cmp(&table.headers()[b]));

    let order: Vec<usize> = layout
        .prefix
        .iter()
        .filter_map(|name| table.column_index(name))
        .chain(middle)
        .chain(
            layout
                .suffix
                .iter()
                .filter_map(|name| table.column_index(name)),
        )
        .collect();

    table.select(&order)
}

/// Both cleanup passes, in order
pub fn postprocess(table: &Table, layout: &ColumnLayout) -> Table {
    reorder_columns(&drop_empty_columns(table), layout)
}

/// Read a written table, clean it up, and write it back in place
pub fn postprocess_file(path: &Path, layout: &ColumnLayout) -> Result<Table, TableError> {
    let table = Table::read_csv(path)?;
    let cleaned = postprocess(&table, layout);

    tracing::debug!(
        path = %path.display(),
        before = table.column_count(),
        after = cleaned.column_count(),
        "Postprocessed table"
    );

    cleaned.write_csv(path)?;
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        let mut t = Table::new(headers.iter().copied());
        for row in rows {
            t.push_row(row.iter().map(|c| c.to_string()).collect())
                .unwrap();
        }
        t
    }

    #[test]
    fn test_drop_empty_columns() {
        let t = table(
            &["weapon_name", "HP", "Unused"],
            &[&["A", "", ""], &["B", "50", ""]],
        );
        let cleaned = drop_empty_columns(&t);

        assert_eq!(cleaned.headers(), &["weapon_name", "HP"]);
        assert_eq!(cleaned.rows()[0], vec!["A", ""]);
        assert_eq!(cleaned.rows()[1], vec!["B", "50"]);
    }

    #[test]
    fn test_drop_empty_columns_idempotent() {
        let t = table(
            &["a", "b", "c", "d"],
            &[&["1", "", "", ""], &["", "", "x", ""]],
        );
        let once = drop_empty_columns(&t);
        let twice = drop_empty_columns(&once);

        assert!(once.column_count() <= t.column_count());
        assert_eq!(once, twice);
        for name in once.headers() {
            let cells = once.column(name).unwrap();
            assert!(cells.iter().any(|c| !c.is_empty()));
        }
    }

    #[test]
    fn test_drop_empty_columns_without_rows() {
        let t = table(&["a", "b"], &[]);
        assert_eq!(drop_empty_columns(&t).column_count(), 0);
    }

    #[test]
    fn test_reorder_prefix_middle_suffix() {
        let t = table(
            &["weapon_name", "weapon_tier", "zzz_extra", "weapon_perk_ability_name"],
            &[&["Gun", "Rare", "z", "Perk"]],
        );
        let ordered = reorder_columns(&t, &WEAPON_LAYOUT);

        assert_eq!(
            ordered.headers(),
            &["weapon_name", "weapon_tier", "zzz_extra", "weapon_perk_ability_name"]
        );
    }

    #[test]
    fn test_reorder_sorts_middle_and_drops_noise() {
        let t = table(
            &[
                "weapon_perk_ability_description",
                "weapon_id",
                "Max Range",
                "image_url",
                "firearm_atk",
                "Fire Rate",
                "weapon_name",
                "weapon_perk_ability_image_url",
                "weapon_perk_ability_name",
            ],
            &[&["desc", "1", "30", "http://x", "200", "600", "Gun", "http://y", "Perk"]],
        );
        let ordered = reorder_columns(&t, &WEAPON_LAYOUT);

        assert_eq!(
            ordered.headers(),
            &[
                "weapon_name",
                "firearm_atk",
                "Fire Rate",
                "Max Range",
                "weapon_perk_ability_name",
                "weapon_perk_ability_description",
            ]
        );
        assert_eq!(
            ordered.rows()[0],
            vec!["Gun", "200", "600", "30", "Perk", "desc"]
        );
    }

    #[test]
    fn test_postprocess_runs_both_passes() {
        let t = table(
            &["zeta", "weapon_name", "alpha", "image_url"],
            &[&["", "Gun", "1", "http://x"], &["", "Rifle", "", "http://y"]],
        );
        let cleaned = postprocess(&t, &WEAPON_LAYOUT);

        assert_eq!(cleaned.headers(), &["weapon_name", "alpha"]);
        assert_eq!(cleaned.row_count(), 2);
    }

    #[test]
    fn test_postprocess_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weapons.csv");
        table(
            &["Empty", "weapon_tier", "weapon_name"],
            &[&["", "Standard", "Gun"]],
        )
        .write_csv(&path)
        .unwrap();

        let cleaned = postprocess_file(&path, &WEAPON_LAYOUT).unwrap();

        assert_eq!(cleaned.headers(), &["weapon_name", "weapon_tier"]);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "weapon_name,weapon_tier\nGun,Standard\n"
        );
    }
}
