//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up tfd defaults.

use crate::cli::ConfigureArgs;
use crate::config::Config;
use anyhow::Result;
use std::path::Path;

/// Handle the configure command
pub fn handle(config_path: &Path, args: ConfigureArgs) -> Result<()> {
    let mut config = Config::load_from(config_path)?;

    if args.show {
        show_config(&config, config_path);
        return Ok(());
    }

    if !apply(&mut config, args) {
        show_usage();
        return Ok(());
    }

    config.save_to(config_path)?;
    println!("Config saved to: {}", config_path.display());
    Ok(())
}

/// Apply the given settings; returns false if nothing was set
fn apply(config: &mut Config, args: ConfigureArgs) -> bool {
    let mut changed = false;

    if let Some(key) = args.api_key {
        config.api_key = Some(key);
        println!("API key configured");
        changed = true;
    }
    if let Some(language) = args.language {
        config.language = Some(language);
        println!("Language: {}", language);
        changed = true;
    }
    if let Some(level) = args.level {
        config.target_level = Some(level);
        println!("Target level: {}", level);
        changed = true;
    }
    if let Some(dir) = args.output_dir {
        println!("Output directory: {}", dir.display());
        config.output_dir = Some(dir);
        changed = true;
    }

    changed
}

/// Display current configuration
fn show_config(config: &Config, config_path: &Path) {
    match &config.api_key {
        Some(key) => println!("API key: {}", mask_key(key)),
        None => println!("No API key configured"),
    }
    if let Some(language) = config.language {
        println!("Language: {}", language);
    }
    if let Some(level) = config.target_level {
        println!("Target level: {}", level);
    }
    if let Some(dir) = &config.output_dir {
        println!("Output directory: {}", dir.display());
    }
    if let Some(url) = &config.base_url {
        println!("Base URL: {}", url);
    }
    println!("Config file: {}", config_path.display());
}

/// Keep only the last four characters of a key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: tfd configure --api-key YOUR_API_KEY");
    println!("   or: tfd configure --language ko --level 100 --output-dir data");
    println!("   or: tfd configure --show");
    println!();
    println!("Note: API keys are issued from the Nexon Open API developer console.");
}
