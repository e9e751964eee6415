//! Reference listing: `iconify-preload scan`.

use anyhow::{Context, Result};
use console::style;
use std::collections::BTreeMap;
use std::path::Path;

use iconify_preload::ui::icons::SEARCH;

use super::super::Cli;
use super::load_config;

pub fn cmd_scan(project_dir: &Path, cli: &Cli, json: bool) -> Result<()> {
    let config = load_config(project_dir, cli)?;
    let report = config
        .scanner()?
        .scan()
        .context("Failed to scan source tree")?;

    if json {
        let counts: BTreeMap<String, usize> = report
            .references
            .iter()
            .map(|(icon, count)| (icon.to_string(), *count))
            .collect();
        let out = serde_json::json!({
            "files_scanned": report.files_scanned,
            "prefixes": report.prefix_count(),
            "icons": counts,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{}Scanned {} files",
        SEARCH,
        style(report.files_scanned).bold()
    );
    for (icon, count) in &report.references {
        println!("  {} {}", icon, style(count).dim());
    }
    println!(
        "prefixes={}, icons={}",
        report.prefix_count(),
        report.references.len()
    );

    Ok(())
}
