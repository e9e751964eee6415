//! Reference scanner.
//!
//! Walks the configured source roots and collects every `prefix:name` icon
//! reference found by the [`ReferencePattern`] set. Matching is line-oriented
//! text search, so string literals that merely look like references are
//! collected too. The walk honours `.gitignore` and skips hidden entries.

mod patterns;

pub use patterns::{
    CONFIG_ICON_PATTERN, FACTORY_CALL_PATTERN, IconRef, ReferencePattern, extract_icon, scan_text,
};

use ignore::{DirEntry, WalkBuilder};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::PreloadError;

/// Prefix resolved from local static assets; never preloaded.
pub const SVG_PREFIX: &str = "svg";

/// Result of a scan over the source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Distinct references with their occurrence counts.
    pub references: BTreeMap<IconRef, usize>,
    pub files_scanned: usize,
}

impl ScanReport {
    /// Number of distinct prefixes referenced.
    pub fn prefix_count(&self) -> usize {
        self.references
            .keys()
            .map(|r| r.prefix.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    fn record(&mut self, icon: IconRef) {
        *self.references.entry(icon).or_insert(0) += 1;
    }
}

#[derive(Debug, Clone)]
pub struct Scanner {
    roots: Vec<PathBuf>,
    extensions: BTreeSet<String>,
    ignore_dirs: BTreeSet<String>,
    excluded: Vec<PathBuf>,
    patterns: Vec<ReferencePattern>,
    skip_prefixes: BTreeSet<String>,
}

impl Scanner {
    pub fn new(roots: Vec<PathBuf>, patterns: Vec<ReferencePattern>) -> Self {
        let mut skip_prefixes = BTreeSet::new();
        skip_prefixes.insert(SVG_PREFIX.to_string());
        Self {
            roots,
            extensions: BTreeSet::new(),
            ignore_dirs: BTreeSet::new(),
            excluded: Vec::new(),
            patterns,
            skip_prefixes,
        }
    }

    /// Only files with these extensions are read. Empty means every file.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Directory names never descended into.
    pub fn with_ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Exclude a file from the input set, typically the generator's own output.
    pub fn exclude(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.excluded.push(path.to_path_buf());
        if let Ok(canonical) = path.canonicalize() {
            self.excluded.push(canonical);
        }
        self
    }

    /// Prefixes dropped in addition to `svg`.
    pub fn skip_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Scan a single text buffer, applying prefix filtering.
    pub fn scan_source(&self, text: &str) -> Vec<IconRef> {
        scan_text(text, &self.patterns)
            .into_iter()
            .filter(|icon| !self.skip_prefixes.contains(&icon.prefix))
            .collect()
    }

    /// Walk every root and collect references.
    pub fn scan(&self) -> Result<ScanReport, PreloadError> {
        let mut report = ScanReport::default();

        for root in &self.roots {
            if !root.exists() {
                tracing::warn!(root = %root.display(), "scan root does not exist, skipping");
                continue;
            }

            let ignore_dirs = self.ignore_dirs.clone();
            let walker = WalkBuilder::new(root)
                .hidden(true)
                .git_ignore(true)
                .git_exclude(true)
                .git_global(false)
                .require_git(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .filter_entry(move |entry| !is_ignored_dir(entry, &ignore_dirs))
                .build();

            for entry in walker {
                let entry = entry.map_err(|err| {
                    let message = err.to_string();
                    PreloadError::ScanFailed {
                        path: root.clone(),
                        source: err
                            .into_io_error()
                            .unwrap_or_else(|| io::Error::other(message)),
                    }
                })?;

                let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                if !is_file || !self.wants_file(entry.path()) {
                    continue;
                }

                let bytes =
                    std::fs::read(entry.path()).map_err(|source| PreloadError::ScanFailed {
                        path: entry.path().to_path_buf(),
                        source,
                    })?;
                let text = String::from_utf8_lossy(&bytes);

                report.files_scanned += 1;
                let found = self.scan_source(&text);
                if !found.is_empty() {
                    tracing::debug!(
                        file = %entry.path().display(),
                        count = found.len(),
                        "found icon references"
                    );
                }
                for icon in found {
                    report.record(icon);
                }
            }
        }

        tracing::info!(
            files = report.files_scanned,
            icons = report.references.len(),
            prefixes = report.prefix_count(),
            "scan complete"
        );
        Ok(report)
    }

    fn wants_file(&self, path: &Path) -> bool {
        if self.is_excluded(path) {
            tracing::debug!(file = %path.display(), "skipping excluded file");
            return false;
        }
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(e))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.excluded.iter().any(|e| e == path) {
            return true;
        }
        match path.canonicalize() {
            Ok(canonical) => self.excluded.iter().any(|e| *e == canonical),
            Err(_) => false,
        }
    }
}

/// Directories named in `ignore_dirs`, below the walk root.
fn is_ignored_dir(entry: &DirEntry, ignore_dirs: &BTreeSet<String>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_some_and(|ft| ft.is_dir())
        && ignore_dirs.contains(entry.file_name().to_string_lossy().as_ref())
}
