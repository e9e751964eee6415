//! External formatters run over the generated module after it is written.

use std::path::Path;
use std::process::Command;

use crate::errors::PreloadError;

/// Placeholder replaced by the output path in formatter arguments.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Run each `argv` in `commands` sequentially from `project_dir`.
///
/// Stdio is inherited. The first failing command aborts the run.
pub fn run_formatters(
    commands: &[Vec<String>],
    project_dir: &Path,
    file: &Path,
) -> Result<(), PreloadError> {
    for argv in commands {
        let Some((program, args)) = argv.split_first() else {
            continue;
        };
        let file_arg = file.to_string_lossy();
        let args: Vec<String> = args
            .iter()
            .map(|a| a.replace(FILE_PLACEHOLDER, &file_arg))
            .collect();
        let command_line = std::iter::once(program.clone())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::info!(command = %command_line, "running formatter");
        let status = Command::new(program)
            .args(&args)
            .current_dir(project_dir)
            .status()
            .map_err(|source| PreloadError::FormatterSpawn {
                command: command_line.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PreloadError::FormatterFailed {
                command: command_line,
                status: status.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_substitutes_file_placeholder() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("out.ts");
        std::fs::write(&file, "x").unwrap();
        let marker = dir.path().join("marker");

        let commands = vec![argv(&[
            "sh",
            "-c",
            &format!("cp \"$0\" {}", marker.display()),
            "{file}",
        ])];
        run_formatters(&commands, dir.path(), &file).unwrap();
        assert_eq!(std::fs::read_to_string(marker).unwrap(), "x");
    }

    #[test]
    fn test_failing_formatter_is_fatal() {
        let dir = tempdir().unwrap();
        let commands = vec![argv(&["sh", "-c", "exit 3"]), argv(&["sh", "-c", "exit 0"])];
        let err = run_formatters(&commands, dir.path(), &dir.path().join("f")).unwrap_err();
        assert!(matches!(err, PreloadError::FormatterFailed { .. }));
    }

    #[test]
    fn test_failure_reports_substituted_command_line() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("out.ts");
        let commands = vec![argv(&["sh", "-c", "exit 1", "{file}"])];
        match run_formatters(&commands, dir.path(), &file).unwrap_err() {
            PreloadError::FormatterFailed { command, .. } => {
                assert_eq!(command, format!("sh -c exit 1 {}", file.display()));
            }
            other => panic!("Expected FormatterFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempdir().unwrap();
        let commands = vec![argv(&["definitely-not-a-real-formatter-binary"])];
        let err = run_formatters(&commands, dir.path(), &dir.path().join("f")).unwrap_err();
        assert!(matches!(err, PreloadError::FormatterSpawn { .. }));
    }

    #[test]
    fn test_empty_argv_is_skipped() {
        let dir = tempdir().unwrap();
        run_formatters(&[Vec::new()], dir.path(), &dir.path().join("f")).unwrap();
    }
}
