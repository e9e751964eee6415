//! Generated module rendering and atomic output.

use anyhow::Context;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use crate::errors::PreloadError;
use crate::iconset::IconifyJson;

/// Knobs for the generated TypeScript module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Package exporting the registration function.
    pub import_module: String,
    /// Registration function, called once per collection.
    pub register_fn: String,
    /// Name of the exported preload function.
    pub function_name: String,
    /// Pretty-print the collections literal.
    pub pretty: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            import_module: "@vben-core/icons".to_string(),
            register_fn: "addCollection".to_string(),
            function_name: "preloadIconifyConfigIcons".to_string(),
            pretty: true,
        }
    }
}

const HEADER: &str = "/*
 * This file is generated by iconify-preload. Do not edit it by hand.
 * It preregisters the Iconify icon subsets referenced from configuration and code
 * (the `svg` prefix is excluded).
 */
";

/// Render the module embedding `collections`.
pub fn render_module(
    collections: &[IconifyJson],
    options: &EmitOptions,
) -> Result<String, PreloadError> {
    let literal = if options.pretty {
        serde_json::to_string_pretty(collections)
    } else {
        serde_json::to_string(collections)
    }
    .context("Failed to serialize icon collections")?;

    let EmitOptions {
        import_module,
        register_fn,
        function_name,
        ..
    } = options;

    let mut out = String::with_capacity(literal.len() + 1024);
    out.push_str(HEADER);
    out.push('\n');
    let _ = writeln!(out, "import {{ {register_fn} }} from '{import_module}';\n");
    let _ = writeln!(out, "type IconifyJSON = Parameters<typeof {register_fn}>[0];\n");
    let _ = writeln!(out, "const collections = {literal} as unknown as IconifyJSON[];\n");
    out.push_str("let preloaded = false;\n\n");
    out.push_str(
        "/**
 * Preregister the Iconify icons referenced from configuration and code
 * (`icon`/`activeIcon` fields, `icon=\"\"` attributes and `createIconifyIcon('prefix:name')`
 * calls) so the first screens do not wait on Iconify network requests.
 * Network loading is not disabled: icons outside these collections are still fetched on demand.
 */
",
    );
    let _ = writeln!(out, "export function {function_name}() {{");
    out.push_str("  if (preloaded) return;\n");
    out.push_str("  preloaded = true;\n");
    out.push_str("  for (const collection of collections) {\n");
    let _ = writeln!(out, "    {register_fn}(collection);");
    out.push_str("  }\n");
    out.push_str("}\n");
    Ok(out)
}

/// Write `content` to `path` through a temporary file in the same directory.
///
/// Readers see either the previous file or the complete new one.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), PreloadError> {
    let write_err = |source: std::io::Error| PreloadError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".iconify-preload")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(write_err)?;
    temp.write_all(content.as_bytes()).map_err(write_err)?;
    temp.flush().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote generated module");
    Ok(())
}
