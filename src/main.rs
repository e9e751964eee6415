use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "iconify-preload")]
#[command(version, about = "Generate a preloaded Iconify icon-subset module from source references")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Config file to use instead of <project>/iconify-preload.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan, extract and write the preload module (the default)
    Generate {
        /// Print the rendered module instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// List icon references found in the source tree
    Scan {
        /// Emit references and counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// View, validate or create the configuration file
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Write a default iconify-preload.toml
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = iconify_preload::logging::init_logging(cli.verbose)?;

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        None => cmd::cmd_generate(&project_dir, &cli, false)?,
        Some(Commands::Generate { dry_run }) => cmd::cmd_generate(&project_dir, &cli, *dry_run)?,
        Some(Commands::Scan { json }) => cmd::cmd_scan(&project_dir, &cli, *json)?,
        Some(Commands::Config { command }) => {
            cmd::cmd_config(&project_dir, &cli, command.clone())?
        }
    }

    Ok(())
}
