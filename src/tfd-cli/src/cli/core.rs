//! Core CLI definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tfd_meta::Language;

#[derive(Parser)]
#[command(name = "tfd")]
#[command(about = "The First Descendant metadata exporter", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Config file (defaults to <config dir>/tfd/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug output, including stats that could not be resolved
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options for the default export run
    #[command(flatten)]
    pub export: ExportArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch metadata and write the stat and weapon tables (default)
    #[command(visible_alias = "e")]
    Export(ExportArgs),

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure(ConfigureArgs),

    /// Re-run column cleanup on a written weapon table
    #[command(visible_alias = "p")]
    Postprocess {
        /// Weapon table CSV to clean up in place
        input: PathBuf,
    },
}

/// Per-run overrides; anything unset falls back to the config file
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// API key for the metadata endpoint
    #[arg(long, env = "TFD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Level at which firearm attack is read
    #[arg(short, long)]
    pub level: Option<i64>,

    /// Metadata language (e.g. en, ko, zh-CN)
    #[arg(long)]
    pub language: Option<Language>,

    /// Directory the CSV tables are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override the metadata endpoint base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigureArgs {
    /// Set the API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set the default metadata language
    #[arg(long)]
    pub language: Option<Language>,

    /// Set the default target level
    #[arg(long)]
    pub level: Option<i64>,

    /// Set the default output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Show current configuration
    #[arg(long)]
    pub show: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_runs_export() {
        let cli = Cli::try_parse_from(["tfd"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_top_level_export_overrides() {
        let cli = Cli::try_parse_from(["tfd", "--level", "90", "--language", "ko", "-v"]).unwrap();
        assert_eq!(cli.export.level, Some(90));
        assert_eq!(cli.export.language, Some(Language::Korean));
        assert!(cli.verbose);
    }

    #[test]
    fn test_export_subcommand() {
        let cli = Cli::try_parse_from(["tfd", "export", "-o", "out"]).unwrap();
        match cli.command {
            Some(Commands::Export(args)) => {
                assert_eq!(args.output_dir, Some(PathBuf::from("out")));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_configure_subcommand() {
        let cli = Cli::try_parse_from(["tfd", "configure", "--api-key", "abc", "--level", "100"])
            .unwrap();
        match cli.command {
            Some(Commands::Configure(args)) => {
                assert_eq!(args.api_key.as_deref(), Some("abc"));
                assert_eq!(args.level, Some(100));
                assert!(!args.show);
            }
            _ => panic!("expected configure"),
        }
    }

    #[test]
    fn test_top_level_export_args_conflict_with_subcommand() {
        assert!(Cli::try_parse_from(["tfd", "--level", "90", "export"]).is_err());
        assert!(Cli::try_parse_from(["tfd", "-o", "out", "configure", "--show"]).is_err());

        let cli = Cli::try_parse_from(["tfd", "export", "-v", "--level", "90"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Export(ref args)) if args.level == Some(90)));
    }

    #[test]
    fn test_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["tfd", "--language", "klingon"]).is_err());
    }
}
