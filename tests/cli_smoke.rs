use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_cli(cwd: &Path, args: &[&str]) -> Output {
    let bin_path = std::env::var("CARGO_BIN_EXE_plugin-validate")
        .unwrap_or_else(|_| "target/debug/plugin-validate".to_string());

    Command::new(bin_path)
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        // Keep a developer's own config file out of the run
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .output()
        .expect("Failed to run plugin-validate")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn markdown_pass_exits_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("README.md"), "# Readme\n\n```bash\nls\n```\n").expect("write");

    let output = run_cli(dir.path(), &["markdown", "README.md"]);
    assert_eq!(output.status.code(), Some(0));

    let text = stdout(&output);
    assert!(text.starts_with("Validating: README.md (markdown)\n  OK\n"));
    assert!(text.contains("Validation PASSED: 0 error(s), 0 warning(s) in 1 document(s)"));
}

#[test]
fn markdown_errors_exit_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("guide.md"), "# Guide\n### Deep\n").expect("write");

    let output = run_cli(dir.path(), &["markdown", "guide.md"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("  ERROR [HEADING_SKIP] guide.md:2: "));
}

#[test]
fn default_manifest_location() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join(".claude-plugin")).expect("mkdir");
    fs::create_dir_all(dir.path().join("plugins/formatter")).expect("mkdir");
    fs::write(
        dir.path().join(".claude-plugin/marketplace.json"),
        r#"{ "plugins": [{ "name": "formatter", "source": "./plugins/formatter" }] }"#,
    )
    .expect("write");

    let output = run_cli(dir.path(), &["manifest"]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
}

#[test]
fn missing_path_is_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = run_cli(dir.path(), &["markdown", "nowhere.md"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path does not exist"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_cli(dir.path(), &["lint"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn invalid_config_is_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(".plugin-validate.toml"), "java_version = \"eleven\"\n").expect("write");
    fs::write(dir.path().join("A.java"), "class A {}\n").expect("write");

    let output = run_cli(dir.path(), &["compat", "A.java"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse config file"));
}

#[test]
fn quiet_lists_only_failing_documents() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("docs")).expect("mkdir");
    fs::write(dir.path().join("docs/warned.md"), "# Doc\n\n```\nls\n```\n").expect("write");
    fs::write(dir.path().join("docs/broken.md"), "no heading\n").expect("write");

    let output = run_cli(dir.path(), &["--quiet", "markdown", "docs"]);
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.contains("broken.md"));
    assert!(!text.contains("warned.md"));
    assert!(text.contains("Validation FAILED: 1 error(s), 1 warning(s) in 2 document(s)"));
}

#[test]
fn recipe_without_compile() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("rewrite.yml"),
        "type: specs.openrewrite.org/v1beta/recipe\nname: org.acme.Tidy\ndisplayName: Tidy\ndescription: Tidies.\nrecipeList:\n  - org.acme.Step\n",
    )
    .expect("write");

    let output = run_cli(dir.path(), &["recipe", "rewrite.yml", "--no-compile"]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
}
