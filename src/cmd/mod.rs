//! CLI command implementations.
//!
//! | Module     | Commands handled            |
//! |------------|-----------------------------|
//! | `generate` | `Generate` (and no command) |
//! | `scan`     | `Scan`                      |
//! | `config`   | `Config`                    |

pub mod config;
pub mod generate;
pub mod scan;

pub use config::cmd_config;
pub use generate::cmd_generate;
pub use scan::cmd_scan;

use anyhow::Result;
use iconify_preload::config::PreloadConfig;
use std::path::Path;

use super::Cli;

/// Effective configuration for the project, honouring `--config`.
fn load_config(project_dir: &Path, cli: &Cli) -> Result<PreloadConfig> {
    PreloadConfig::with_config_file(project_dir.to_path_buf(), cli.config.as_deref())
}
