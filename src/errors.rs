//! Typed error hierarchy for the preload pipeline.
//!
//! Every variant is fatal for the run: nothing here is retried and nothing
//! downgrades to a warning. Command code wraps these in `anyhow` with context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreloadError {
    #[error("Invalid reference pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to scan {path}: {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No installed icon-set data found for prefix '{prefix}' (searched: {searched}). Install @iconify/json or set ICONIFY_JSON_DIR")]
    MissingIconSetSource { prefix: String, searched: String },

    #[error("Icon set file for prefix '{prefix}' not found (looked for {tried})")]
    MissingIconSetFile { prefix: String, tried: String },

    #[error("Failed to read icon set at {path}: {source}")]
    IconSetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse icon set at {path}: {source}")]
    IconSetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Icon set at {path} declares prefix '{found}', expected '{expected}'")]
    PrefixMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Icon set '{prefix}' has no icons named: {}", names.join(", "))]
    IconsNotFound { prefix: String, names: Vec<String> },

    #[error("Failed to extract subset from icon set: prefix={prefix}")]
    EmptySubset { prefix: String },

    #[error("Failed to write generated module at {path}: {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn formatter `{command}`: {source}")]
    FormatterSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Formatter `{command}` exited with {status}")]
    FormatterFailed { command: String, status: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
