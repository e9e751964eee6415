//! Configuration for the preload generator.
//!
//! Settings are read from `iconify-preload.toml` at the project root and
//! layered file → environment → CLI. Every key is optional; an absent file
//! yields the defaults below.
//!
//! # Configuration File Format
//!
//! ```toml
//! [scan]
//! roots = ["apps", "packages", "internal", "playground"]
//! extensions = ["ts", "tsx", "js", "jsx", "mts", "mjs", "vue"]
//! ignore_dirs = ["node_modules", "dist", ".git"]
//! patterns = []
//! skip_prefixes = []
//!
//! [iconsets]
//! dirs = []
//! discover = true
//!
//! [output]
//! path = "packages/icons/src/iconify/preload-config-icons.ts"
//! import_module = "@vben-core/icons"
//! register_fn = "addCollection"
//! function_name = "preloadIconifyConfigIcons"
//! pretty = true
//!
//! [format]
//! commands = [["pnpm", "prettier", "--write", "{file}"]]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::emit::EmitOptions;
use crate::iconset::{DirectorySource, ICONIFY_JSON_DIR_ENV};
use crate::scan::{ReferencePattern, Scanner};

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "iconify-preload.toml";

/// Environment override for `output.path`.
pub const OUTPUT_ENV: &str = "ICONIFY_PRELOAD_OUTPUT";

/// Where and how to look for icon references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSection {
    /// Source roots, relative to the project directory
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,
    /// File extensions to read (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory names never descended into
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    /// Reference patterns; empty means the built-in set
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Prefixes dropped in addition to `svg`
    #[serde(default)]
    pub skip_prefixes: Vec<String>,
}

fn default_roots() -> Vec<String> {
    ["apps", "packages", "internal", "playground"]
        .map(String::from)
        .to_vec()
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx", "mts", "mjs", "vue"]
        .map(String::from)
        .to_vec()
}

fn default_ignore_dirs() -> Vec<String> {
    ["node_modules", "dist", ".git"].map(String::from).to_vec()
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            extensions: default_extensions(),
            ignore_dirs: default_ignore_dirs(),
            patterns: Vec::new(),
            skip_prefixes: Vec::new(),
        }
    }
}

/// Where installed icon-set data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSetsSection {
    /// Extra collection directories holding `<prefix>.json`, searched first
    #[serde(default)]
    pub dirs: Vec<PathBuf>,
    /// Probe the usual node_modules install locations
    #[serde(default = "default_discover")]
    pub discover: bool,
}

fn default_discover() -> bool {
    true
}

impl Default for IconSetsSection {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            discover: default_discover(),
        }
    }
}

/// The generated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_import_module")]
    pub import_module: String,
    #[serde(default = "default_register_fn")]
    pub register_fn: String,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("packages/icons/src/iconify/preload-config-icons.ts")
}

fn default_import_module() -> String {
    EmitOptions::default().import_module
}

fn default_register_fn() -> String {
    EmitOptions::default().register_fn
}

fn default_function_name() -> String {
    EmitOptions::default().function_name
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            import_module: default_import_module(),
            register_fn: default_register_fn(),
            function_name: default_function_name(),
            pretty: default_pretty(),
        }
    }
}

/// Formatters applied to the written module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSection {
    /// argv arrays; `{file}` is replaced with the output path
    #[serde(default)]
    pub commands: Vec<Vec<String>>,
}

/// The complete iconify-preload.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadToml {
    #[serde(default)]
    pub scan: ScanSection,
    #[serde(default)]
    pub iconsets: IconSetsSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub format: FormatSection,
}

impl PreloadToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid iconify-preload configuration")
    }

    /// Load `iconify-preload.toml` from the project root, or defaults when absent.
    pub fn load_or_default(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize iconify-preload.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.scan.roots.is_empty() {
            warnings.push("scan.roots is empty: no source files will be scanned".to_string());
        }
        if self.scan.extensions.is_empty() {
            warnings.push("scan.extensions is empty: every file under the roots is read".to_string());
        }
        if let Err(err) = ReferencePattern::from_config(&self.scan.patterns) {
            warnings.push(err.to_string());
        }
        for (name, value) in [
            ("output.function_name", &self.output.function_name),
            ("output.register_fn", &self.output.register_fn),
        ] {
            if !is_js_identifier(value) {
                warnings.push(format!("{} '{}' is not a valid identifier", name, value));
            }
        }
        if escapes_project(&self.output.path) {
            warnings.push(format!(
                "output.path '{}' points outside the project directory",
                self.output.path.display()
            ));
        }
        for (i, argv) in self.format.commands.iter().enumerate() {
            if argv.is_empty() {
                warnings.push(format!("format.commands[{}] is empty and will be skipped", i));
            }
        }

        warnings
    }
}

fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn escapes_project(path: &Path) -> bool {
    path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
}

/// Effective configuration: file settings plus environment and CLI overrides.
#[derive(Debug, Clone)]
pub struct PreloadConfig {
    /// Canonical project root
    pub project_dir: PathBuf,
    /// Parsed configuration file (or defaults)
    pub toml: PreloadToml,
    /// Collection directory from ICONIFY_JSON_DIR, if set
    pub env_iconset_dir: Option<PathBuf>,
}

impl PreloadConfig {
    /// Load configuration for a project directory.
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        Self::with_config_file(project_dir, None)
    }

    /// Load configuration, optionally from an explicit config file.
    pub fn with_config_file(project_dir: PathBuf, config_file: Option<&Path>) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve project directory: {}", project_dir.display()))?;
        let mut toml = match config_file {
            Some(path) => PreloadToml::load(path)?,
            None => PreloadToml::load_or_default(&project_dir)?,
        };

        if let Ok(output) = std::env::var(OUTPUT_ENV)
            && !output.is_empty()
        {
            toml.output.path = PathBuf::from(output);
        }
        let env_iconset_dir = std::env::var_os(ICONIFY_JSON_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            project_dir,
            toml,
            env_iconset_dir,
        })
    }

    /// Path to the config file in the project root.
    pub fn config_path(&self) -> PathBuf {
        self.project_dir.join(CONFIG_FILE)
    }

    /// Absolute path of the generated module.
    pub fn output_path(&self) -> PathBuf {
        self.project_dir.join(&self.toml.output.path)
    }

    /// Absolute scan roots.
    pub fn scan_roots(&self) -> Vec<PathBuf> {
        self.toml
            .scan
            .roots
            .iter()
            .map(|r| self.project_dir.join(r))
            .collect()
    }

    /// Build the scanner, excluding the generated module from its inputs.
    pub fn scanner(&self) -> Result<Scanner, crate::errors::PreloadError> {
        let patterns = ReferencePattern::from_config(&self.toml.scan.patterns)?;
        Ok(Scanner::new(self.scan_roots(), patterns)
            .with_extensions(self.toml.scan.extensions.iter().cloned())
            .with_ignore_dirs(self.toml.scan.ignore_dirs.iter().cloned())
            .skip_prefixes(self.toml.scan.skip_prefixes.iter().cloned())
            .exclude(self.output_path()))
    }

    /// Icon-set lookup: env dir, then configured dirs, then discovered installs.
    pub fn icon_source(&self) -> DirectorySource {
        let mut dirs: Vec<PathBuf> = self.env_iconset_dir.iter().cloned().collect();
        dirs.extend(self.toml.iconsets.dirs.iter().cloned());
        DirectorySource::discover(&self.project_dir, &dirs, self.toml.iconsets.discover)
    }

    pub fn emit_options(&self) -> EmitOptions {
        let output = &self.toml.output;
        EmitOptions {
            import_module: output.import_module.clone(),
            register_fn: output.register_fn.clone(),
            function_name: output.function_name.clone(),
            pretty: output.pretty,
        }
    }

    /// Validate configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
