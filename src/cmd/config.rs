//! Configuration view and validation commands: `iconify-preload config`.

use anyhow::{Context, Result};

use iconify_preload::config::{CONFIG_FILE, PreloadToml};
use iconify_preload::iconset::IconSetSource;
use iconify_preload::ui::{self, icons::FILE_NEW};

use super::super::{Cli, ConfigCommands};
use super::load_config;

pub fn cmd_config(
    project_dir: &std::path::Path,
    cli: &Cli,
    command: Option<ConfigCommands>,
) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            let config = load_config(project_dir, cli)?;
            let file = cli.config.clone().unwrap_or_else(|| config.config_path());

            println!();
            println!("iconify-preload configuration");
            println!("=============================");
            println!();
            if file.exists() {
                println!("Config file: {}", file.display());
            } else {
                println!("No {} found, using defaults.", CONFIG_FILE);
            }
            println!();

            let rendered = toml::to_string_pretty(&config.toml)
                .context("Failed to render configuration")?;
            println!("{}", rendered.trim_end());
            println!();

            println!("Effective values (with env/CLI overrides):");
            println!("  output = {}", config.output_path().display());
            println!("  icon sets = {}", config.icon_source().describe());
            println!();
        }
        Some(ConfigCommands::Validate) => {
            let config = load_config(project_dir, cli)?;
            let warnings = config.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                ui::print_warnings(&warnings);
            }
        }
        Some(ConfigCommands::Init) => {
            let config_path = project_dir.join(CONFIG_FILE);
            if config_path.exists() {
                println!("{} already exists at {}", CONFIG_FILE, config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            PreloadToml::default().save(&config_path)?;
            println!("{}Created {}", FILE_NEW, config_path.display());
        }
    }

    Ok(())
}
