//! Scanner → resolver → extractor → emitter.
//!
//! One linear run per invocation. Every prefix must resolve and extract
//! before anything is written, so a failure leaves the previous output in
//! place.

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::config::PreloadConfig;
use crate::emit::{render_module, write_atomic};
use crate::errors::PreloadError;
use crate::format::run_formatters;
use crate::iconset::{IconSetSource, IconifyJson};
use crate::scan::IconRef;
use crate::subset::extract_subset;

/// Whether the rendered module is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    DryRun,
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Absolute path of the generated module
    pub output: PathBuf,
    /// Number of prefixes emitted
    pub prefixes: usize,
    /// Number of distinct icon references
    pub icons: usize,
    /// Truncated SHA-256 of the final file (or rendered text in dry-run mode)
    pub digest: String,
    /// Whether the output bytes differ from what was on disk before
    pub changed: bool,
    /// Module text as rendered, before any formatter ran
    pub rendered: String,
}

/// Group references by prefix; both levels are sorted.
pub fn group_by_prefix<'a, I>(references: I) -> BTreeMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = &'a IconRef>,
{
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for icon in references {
        groups
            .entry(icon.prefix.clone())
            .or_default()
            .insert(icon.name.clone());
    }
    groups
}

/// Load and extract one subset per prefix, in prefix order.
pub fn build_subsets(
    groups: &BTreeMap<String, BTreeSet<String>>,
    source: &dyn IconSetSource,
) -> Result<Vec<IconifyJson>, PreloadError> {
    let mut collections = Vec::with_capacity(groups.len());
    for (prefix, names) in groups {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let set = source.load(prefix)?;
        collections.push(extract_subset(&set, &names)?);
    }
    Ok(collections)
}

/// Short hex digest of `bytes`.
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())[..12].to_string()
}

/// Run the whole pipeline for `config`.
pub fn generate(
    config: &PreloadConfig,
    source: &dyn IconSetSource,
    mode: Mode,
) -> Result<GenerateOutcome, PreloadError> {
    let output = config.output_path();

    let report = config.scanner()?.scan()?;
    let groups = group_by_prefix(report.references.keys());
    tracing::info!(
        prefixes = groups.len(),
        icons = report.references.len(),
        source = %source.describe(),
        "resolving icon sets"
    );

    let collections = build_subsets(&groups, source)?;
    let rendered = render_module(&collections, &config.emit_options())?;

    let (digest, changed) = match mode {
        Mode::DryRun => {
            let previous = std::fs::read(&output).ok();
            (
                content_digest(rendered.as_bytes()),
                previous.as_deref() != Some(rendered.as_bytes()),
            )
        }
        Mode::Write => {
            let previous = std::fs::read(&output).ok();
            write_atomic(&output, &rendered)?;
            run_formatters(&config.toml.format.commands, &config.project_dir, &output)?;

            let written = std::fs::read(&output).map_err(|source| {
                PreloadError::OutputWriteFailed {
                    path: output.clone(),
                    source,
                }
            })?;
            (
                content_digest(&written),
                previous.as_deref() != Some(written.as_slice()),
            )
        }
    };

    tracing::info!(
        output = %output.display(),
        digest = %digest,
        changed,
        "generated module"
    );

    Ok(GenerateOutcome {
        output,
        prefixes: collections.len(),
        icons: report.references.len(),
        digest,
        changed,
        rendered,
    })
}
