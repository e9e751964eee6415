//! Terminal output for command results.

pub mod icons;

use console::style;
use std::path::Path;

use crate::pipeline::GenerateOutcome;
use icons::{CHECK, UNCHANGED, WARN};

/// `path` relative to `root` when possible, for display.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// The one-line summary printed after a successful run.
pub fn summary_line(outcome: &GenerateOutcome, project_dir: &Path) -> String {
    format!(
        "Generated {} (prefixes={}, icons={})",
        display_path(&outcome.output, project_dir),
        outcome.prefixes,
        outcome.icons
    )
}

/// Digest of the written file, noting when it matches the previous run.
pub fn detail_line(outcome: &GenerateOutcome) -> String {
    if outcome.changed {
        format!("sha256 {}", outcome.digest)
    } else {
        format!("sha256 {}, output unchanged", outcome.digest)
    }
}

pub fn print_summary(outcome: &GenerateOutcome, project_dir: &Path) {
    let glyph = if outcome.changed { &CHECK } else { &UNCHANGED };
    println!("{}{}", glyph, summary_line(outcome, project_dir));
    println!("  {}", style(detail_line(outcome)).dim());
}

pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{}{}", WARN, style(warning).yellow());
    }
}
