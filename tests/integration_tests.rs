//! Integration tests for iconify-preload
//!
//! These tests run the binary against small fixture projects on disk.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const OUTPUT: &str = "packages/icons/src/iconify/preload-config-icons.ts";

/// Helper to create an iconify-preload Command with a clean environment
fn preload() -> Command {
    let mut cmd = cargo_bin_cmd!("iconify-preload");
    cmd.env_remove("ICONIFY_JSON_DIR")
        .env_remove("ICONIFY_PRELOAD_OUTPUT")
        .env_remove("RUST_LOG")
        .env_remove("LOG_FORMAT");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Fixture project referencing mdi:home twice and carbon:workspace once.
fn create_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "apps/web-antd/src/router/routes/modules/dashboard.ts",
        "export default [{ meta: { icon: 'mdi:home', title: 'Dashboard' } }];\n",
    );
    write(
        dir.path(),
        "apps/web-antd/src/layouts/basic.vue",
        "<template><VbenIcon icon=\"carbon:workspace\" /><VbenIcon icon=\"svg:avatar-1\" /></template>\n",
    );
    write(
        dir.path(),
        "packages/icons/src/iconify/index.ts",
        "export const Home = createIconifyIcon('mdi:home');\n",
    );
    write(
        dir.path(),
        "node_modules/@iconify/json/json/mdi.json",
        r#"{"prefix":"mdi","info":{"name":"Material Design Icons"},"icons":{"home":{"body":"<path fill=\"currentColor\" d=\"M10 20v-6h4v6h5v-8h3L12 3L2 12h3v8z\"/>"},"account":{"body":"<path/>"}},"width":24,"height":24}"#,
    );
    write(
        dir.path(),
        "node_modules/@iconify/json/json/carbon.json",
        r#"{"prefix":"carbon","icons":{"workspace":{"body":"<path d=\"M16 4\"/>"}},"width":32,"height":32}"#,
    );
    dir
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        preload().arg("--help").assert().success();
    }

    #[test]
    fn test_version() {
        preload().arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_command_fails() {
        preload().arg("frobnicate").assert().failure();
    }
}

// =============================================================================
// Generation Tests
// =============================================================================

mod generate {
    use super::*;

    #[test]
    fn test_generate_without_command() {
        let dir = create_project();

        preload()
            .current_dir(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "Generated {} (prefixes=2, icons=2)",
                OUTPUT
            )))
            .stdout(predicate::str::contains("sha256 "));

        let content = fs::read_to_string(dir.path().join(OUTPUT)).unwrap();
        assert!(content.contains("import { addCollection } from '@vben-core/icons';"));
        assert!(content.contains("\"prefix\": \"carbon\""));
        assert!(content.contains("\"prefix\": \"mdi\""));
        assert!(content.contains("\"home\": {"));
        assert!(content.contains("\"workspace\": {"));
        assert!(!content.contains("\"account\""));
        assert!(!content.contains("\"prefix\": \"svg\""));
        assert!(!content.contains("Material Design Icons"));
        assert!(content.contains("export function preloadIconifyConfigIcons() {"));
    }

    #[test]
    fn test_generate_twice_is_byte_identical() {
        let dir = create_project();

        preload()
            .current_dir(dir.path())
            .arg("generate")
            .assert()
            .success();
        let first = fs::read(dir.path().join(OUTPUT)).unwrap();

        preload()
            .current_dir(dir.path())
            .arg("generate")
            .assert()
            .success()
            .stdout(predicate::str::contains("output unchanged"));
        let second = fs::read(dir.path().join(OUTPUT)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_with_project_dir_flag() {
        let dir = create_project();
        let elsewhere = TempDir::new().unwrap();

        preload()
            .current_dir(elsewhere.path())
            .arg("--project-dir")
            .arg(dir.path())
            .assert()
            .success();

        assert!(dir.path().join(OUTPUT).exists());
    }

    #[test]
    fn test_missing_iconset_file_fails_without_output() {
        let dir = create_project();
        fs::remove_file(dir.path().join("node_modules/@iconify/json/json/carbon.json")).unwrap();

        preload()
            .current_dir(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("carbon"));

        assert!(!dir.path().join(OUTPUT).exists());
    }

    #[test]
    fn test_missing_install_fails() {
        let dir = create_project();
        fs::remove_dir_all(dir.path().join("node_modules")).unwrap();

        preload()
            .current_dir(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("No installed icon-set data"));
    }

    #[test]
    fn test_unknown_icon_fails_and_keeps_previous_output() {
        let dir = create_project();
        preload().current_dir(dir.path()).assert().success();
        let before = fs::read(dir.path().join(OUTPUT)).unwrap();

        write(
            dir.path(),
            "playground/src/views/demo.ts",
            "const menu = { icon: 'mdi:does-not-exist' };\n",
        );
        preload()
            .current_dir(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("does-not-exist"));

        assert_eq!(fs::read(dir.path().join(OUTPUT)).unwrap(), before);
    }

    #[test]
    fn test_dry_run_prints_module() {
        let dir = create_project();

        preload()
            .current_dir(dir.path())
            .args(["generate", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("let preloaded = false;"))
            .stderr(predicate::str::contains("prefixes=2, icons=2"));

        assert!(!dir.path().join(OUTPUT).exists());
    }

    #[test]
    fn test_iconset_dir_from_env() {
        let dir = create_project();
        let vendored = TempDir::new().unwrap();
        fs::rename(
            dir.path().join("node_modules/@iconify/json/json/carbon.json"),
            vendored.path().join("carbon.json"),
        )
        .unwrap();

        preload()
            .current_dir(dir.path())
            .env("ICONIFY_JSON_DIR", vendored.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("prefixes=2, icons=2"));
    }

    #[test]
    fn test_config_file_controls_output() {
        let dir = create_project();
        write(
            dir.path(),
            "iconify-preload.toml",
            "[output]\npath = \"src/icons.generated.ts\"\nfunction_name = \"preloadIcons\"\npretty = false\n",
        );

        preload()
            .current_dir(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("src/icons.generated.ts"));

        let content = fs::read_to_string(dir.path().join("src/icons.generated.ts")).unwrap();
        assert!(content.contains("export function preloadIcons() {"));
        assert!(content.contains(r#"const collections = [{"prefix":"carbon""#));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_formatter_fails_run() {
        let dir = create_project();
        write(
            dir.path(),
            "iconify-preload.toml",
            "[format]\ncommands = [[\"sh\", \"-c\", \"exit 1\"]]\n",
        );

        preload()
            .current_dir(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Formatter"));
    }
}

// =============================================================================
// Scan Tests
// =============================================================================

mod scan {
    use super::*;

    #[test]
    fn test_scan_lists_counts() {
        let dir = create_project();

        preload()
            .current_dir(dir.path())
            .arg("scan")
            .assert()
            .success()
            .stdout(predicate::str::contains("mdi:home 2"))
            .stdout(predicate::str::contains("carbon:workspace 1"))
            .stdout(predicate::str::contains("svg:").not())
            .stdout(predicate::str::contains("prefixes=2, icons=2"));
    }

    #[test]
    fn test_scan_json() {
        let dir = create_project();

        let output = preload()
            .current_dir(dir.path())
            .args(["scan", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["icons"]["mdi:home"], 2);
        assert_eq!(value["icons"]["carbon:workspace"], 1);
        assert_eq!(value["prefixes"], 2);
        assert_eq!(value["files_scanned"], 3);
    }

    #[test]
    fn test_gitignored_build_output_is_not_scanned() {
        let dir = create_project();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        write(dir.path(), ".gitignore", "node_modules\ndev-dist\n");
        write(
            dir.path(),
            "apps/web-antd/dev-dist/sw.ts",
            "const menu = { icon: 'mdi:ghost' };\n",
        );

        preload()
            .current_dir(dir.path())
            .arg("scan")
            .assert()
            .success()
            .stdout(predicate::str::contains("mdi:ghost").not());

        preload()
            .current_dir(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("prefixes=2, icons=2"));
    }

    #[test]
    fn test_scan_does_not_need_iconsets() {
        let dir = create_project();
        fs::remove_dir_all(dir.path().join("node_modules")).unwrap();

        preload()
            .current_dir(dir.path())
            .arg("scan")
            .assert()
            .success();
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_init_then_validate() {
        let dir = TempDir::new().unwrap();

        preload()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));
        assert!(dir.path().join("iconify-preload.toml").exists());

        preload()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));

        preload()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid."));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "iconify-preload.toml",
            "[output]\nfunction_name = \"not-an-identifier\"\n",
        );

        preload()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration warnings:"))
            .stderr(predicate::str::contains("not-an-identifier"));
    }

    #[test]
    fn test_config_show_defaults() {
        let dir = TempDir::new().unwrap();

        preload()
            .current_dir(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("using defaults"))
            .stdout(predicate::str::contains("preload-config-icons.ts"))
            .stdout(predicate::str::contains("icon sets = "));
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = create_project();
        write(dir.path(), "iconify-preload.toml", "[scan\nroots = ");

        preload()
            .current_dir(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("iconify-preload.toml"));
    }
}
