//! Postprocess command handler

use anyhow::{Context, Result};
use std::path::Path;
use tfd_meta::{postprocess_file, WEAPON_LAYOUT};

/// Handle `tfd postprocess <input>`
pub fn handle(input: &Path) -> Result<()> {
    let table = postprocess_file(input, &WEAPON_LAYOUT)
        .with_context(|| format!("Failed to postprocess {}", input.display()))?;

    println!(
        "Cleaned {}: {} rows, {} columns",
        input.display(),
        table.row_count(),
        table.column_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weapons.csv");
        std::fs::write(
            &path,
            "weapon_id,Empty,weapon_name,Zoom\n1,,Gun,1.5\n2,,Rifle,\n",
        )
        .unwrap();

        handle(&path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "weapon_name,Zoom\nGun,1.5\nRifle,\n"
        );
    }

    #[test]
    fn test_handle_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = handle(&dir.path().join("missing.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to postprocess"));
    }
}
