//! Export command handler
//!
//! Runs the whole pipeline: stat table, weapon table, cleanup.

use crate::cli::ExportArgs;
use crate::client::ApiClient;
use crate::config::{Config, Settings};
use anyhow::{Context, Result};
use std::path::Path;
use tfd_meta::{ExportSummary, MetadataSource, TracingDiagnostics};

/// Handle `tfd` / `tfd export`
pub fn handle(config_path: &Path, args: &ExportArgs) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let settings = Settings::resolve(&config, args)?;

    let client = ApiClient::new(&settings.base_url, settings.language, &settings.api_key);
    let summary = run(&client, &settings)?;

    print_summary(&summary);
    Ok(())
}

/// Run the export against any metadata source
pub fn run(source: &dyn MetadataSource, settings: &Settings) -> Result<ExportSummary> {
    tracing::info!(
        "Exporting {} metadata at level {} into {}",
        settings.language,
        settings.export.target_level,
        settings.export.output_dir.display()
    );

    let mut diagnostics = TracingDiagnostics;
    tfd_meta::export(source, &settings.export, &mut diagnostics).context("Export failed")
}

fn print_summary(summary: &ExportSummary) {
    println!("Export complete:");
    println!(
        "  Stats:   {} -> {}",
        summary.stats,
        summary.stat_table.display()
    );
    println!(
        "  Weapons: {} ({} columns) -> {}",
        summary.weapons,
        summary.columns,
        summary.weapon_table.display()
    );
    if summary.unresolved_stats > 0 {
        println!(
            "  Unresolved stats dropped: {} (run with -v for details)",
            summary.unresolved_stats
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tfd_meta::source::MockSource;
    use tfd_meta::{ExportSettings, Language};

    fn settings(dir: &Path) -> Settings {
        Settings {
            api_key: "key".to_string(),
            language: Language::English,
            base_url: tfd_meta::DEFAULT_BASE_URL.to_string(),
            export: ExportSettings::new(dir, 100),
        }
    }

    #[test]
    fn test_run_writes_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockSource::new()
            .with_document("stat.json", json!([{"stat_id": "1", "stat_name": "HP"}]))
            .with_document(
                "weapon.json",
                json!([{
                    "weapon_name": "Gun",
                    "base_stat": [{"stat_id": "1", "stat_value": "50"}],
                    "firearm_atk": [{"level": 100, "firearm": [{"firearm_atk_value": "200"}]}]
                }]),
            );

        let summary = run(&source, &settings(dir.path())).unwrap();

        assert_eq!(summary.weapons, 1);
        assert_eq!(
            std::fs::read_to_string(&summary.weapon_table).unwrap(),
            "weapon_name,firearm_atk,HP\nGun,200,50\n"
        );
        assert!(summary.stat_table.exists());
    }

    #[test]
    fn test_run_reports_status_body() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockSource::new().with_failure("stat.json", 403, "forbidden key");

        let err = run(&source, &settings(dir.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("forbidden key"));
    }

    #[test]
    fn test_handle_requires_api_key_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        Config::default().save_to(&config_path).unwrap();

        let err = handle(&config_path, &ExportArgs::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }
}
