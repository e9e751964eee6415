//! Module generation: `iconify-preload [generate]`.

use anyhow::{Context, Result};
use std::path::Path;

use iconify_preload::pipeline::{self, Mode};
use iconify_preload::ui;

use super::super::Cli;
use super::load_config;

pub fn cmd_generate(project_dir: &Path, cli: &Cli, dry_run: bool) -> Result<()> {
    let config = load_config(project_dir, cli)?;
    ui::print_warnings(&config.validate());

    let source = config.icon_source();
    let mode = if dry_run { Mode::DryRun } else { Mode::Write };
    let outcome = pipeline::generate(&config, &source, mode).with_context(|| {
        format!(
            "Failed to generate {}",
            ui::display_path(&config.output_path(), &config.project_dir)
        )
    })?;

    if dry_run {
        print!("{}", outcome.rendered);
        eprintln!(
            "prefixes={}, icons={}",
            outcome.prefixes, outcome.icons
        );
    } else {
        ui::print_summary(&outcome, &config.project_dir);
    }

    Ok(())
}
