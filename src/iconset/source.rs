//! Icon-set resolution by prefix.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::IconifyJson;
use crate::errors::PreloadError;

/// Environment variable naming an extra collection directory (`<dir>/<prefix>.json`).
pub const ICONIFY_JSON_DIR_ENV: &str = "ICONIFY_JSON_DIR";

/// Loads full icon-set documents by prefix.
pub trait IconSetSource {
    fn load(&self, prefix: &str) -> Result<IconifyJson, PreloadError>;

    /// Human-readable description of where sets are looked up.
    fn describe(&self) -> String;
}

/// Resolves prefixes against installed `@iconify/json` style directories.
///
/// Collection directories hold `<prefix>.json`; package roots hold
/// `<prefix>/icons.json` (the per-set `@iconify-json/*` packages).
#[derive(Debug, Clone, Default)]
pub struct DirectorySource {
    collection_dirs: Vec<PathBuf>,
    package_roots: Vec<PathBuf>,
}

impl DirectorySource {
    pub fn new(collection_dirs: Vec<PathBuf>) -> Self {
        Self {
            collection_dirs,
            package_roots: Vec::new(),
        }
    }

    /// Build the lookup list for a project.
    ///
    /// `extra_dirs` (relative to `project_dir` unless absolute) are searched
    /// first. With `probe` set, the usual `node_modules` locations are added
    /// when they exist, including the first sorted match in a pnpm virtual store.
    pub fn discover(project_dir: &Path, extra_dirs: &[PathBuf], probe: bool) -> Self {
        let mut collection_dirs: Vec<PathBuf> = extra_dirs
            .iter()
            .map(|d| {
                if d.is_absolute() {
                    d.clone()
                } else {
                    project_dir.join(d)
                }
            })
            .collect();
        let mut package_roots = Vec::new();

        if probe {
            let node_modules = project_dir.join("node_modules");

            let hoisted = node_modules.join("@iconify/json/json");
            if hoisted.is_dir() {
                collection_dirs.push(hoisted);
            }

            if let Some(store) = find_pnpm_store_dir(&node_modules, "@iconify+json") {
                let dir = store.join("node_modules/@iconify/json/json");
                if dir.is_dir() && !collection_dirs.contains(&dir) {
                    collection_dirs.push(dir);
                }
            }

            let per_set = node_modules.join("@iconify-json");
            if per_set.is_dir() {
                package_roots.push(per_set);
            }
        }

        tracing::debug!(
            collections = ?collection_dirs,
            packages = ?package_roots,
            "icon-set lookup locations"
        );

        Self {
            collection_dirs,
            package_roots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.collection_dirs.is_empty() && self.package_roots.is_empty()
    }

    fn candidates(&self, prefix: &str) -> Vec<PathBuf> {
        let file_name = format!("{}.json", prefix);
        self.collection_dirs
            .iter()
            .map(|d| d.join(&file_name))
            .chain(
                self.package_roots
                    .iter()
                    .map(|r| r.join(prefix).join("icons.json")),
            )
            .collect()
    }
}

impl IconSetSource for DirectorySource {
    fn load(&self, prefix: &str) -> Result<IconifyJson, PreloadError> {
        if self.is_empty() {
            return Err(PreloadError::MissingIconSetSource {
                prefix: prefix.to_string(),
                searched: "node_modules/@iconify/json, node_modules/.pnpm/@iconify+json@*, node_modules/@iconify-json".to_string(),
            });
        }

        let candidates = self.candidates(prefix);
        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            return Err(PreloadError::MissingIconSetFile {
                prefix: prefix.to_string(),
                tried: join_paths(&candidates),
            });
        };

        tracing::debug!(prefix, path = %path.display(), "loading icon set");
        load_file(path, prefix)
    }

    fn describe(&self) -> String {
        let all: Vec<PathBuf> = self
            .collection_dirs
            .iter()
            .chain(self.package_roots.iter())
            .cloned()
            .collect();
        if all.is_empty() {
            "no icon-set directories".to_string()
        } else {
            join_paths(&all)
        }
    }
}

/// In-memory sets keyed by prefix, for callers that already hold the data.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sets: HashMap<String, IconifyJson>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, set: IconifyJson) {
        self.sets.insert(set.prefix.clone(), set);
    }
}

impl IconSetSource for MemorySource {
    fn load(&self, prefix: &str) -> Result<IconifyJson, PreloadError> {
        self.sets
            .get(prefix)
            .cloned()
            .ok_or_else(|| PreloadError::MissingIconSetFile {
                prefix: prefix.to_string(),
                tried: "in-memory sets".to_string(),
            })
    }

    fn describe(&self) -> String {
        let mut prefixes: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        prefixes.sort_unstable();
        format!("in-memory sets: {}", prefixes.join(", "))
    }
}

fn load_file(path: &Path, prefix: &str) -> Result<IconifyJson, PreloadError> {
    let content = std::fs::read_to_string(path).map_err(|source| PreloadError::IconSetRead {
        path: path.to_path_buf(),
        source,
    })?;
    let set: IconifyJson =
        serde_json::from_str(&content).map_err(|source| PreloadError::IconSetParse {
            path: path.to_path_buf(),
            source,
        })?;
    if set.prefix != prefix {
        return Err(PreloadError::PrefixMismatch {
            path: path.to_path_buf(),
            expected: prefix.to_string(),
            found: set.prefix,
        });
    }
    Ok(set)
}

/// First sorted `<name>@<version>` directory in `node_modules/.pnpm`.
fn find_pnpm_store_dir(node_modules: &Path, name: &str) -> Option<PathBuf> {
    let store = node_modules.join(".pnpm");
    if !store.is_dir() {
        return None;
    }
    let pattern = format!(
        "{}/{}@*",
        glob::Pattern::escape(&store.to_string_lossy()),
        name
    );
    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .ok()?
        .filter_map(Result::ok)
        .filter(|p| p.is_dir())
        .collect();
    matches.sort();
    matches.into_iter().next()
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
