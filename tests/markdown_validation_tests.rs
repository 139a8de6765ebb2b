use std::fs;

use clap::Parser;
use plugin_validate::config::{Args, Config};
use plugin_validate::rules::markdown::default_non_descriptive_links;
use plugin_validate::rules::registry::markdown_rules;
use plugin_validate::{report, runner, validate_file, Document, DocumentKind, Severity};

const GUIDE: &str = "\
# Plugin guide

Install the plugin before use.

### Configuration

```
cache = true
```

Read the [docs](https://example.com/docs) or [click here](https://example.com).

```toml
# Not A Heading Inside A Fence
[link](
";

fn rules() -> plugin_validate::validation::RuleSet {
    markdown_rules(3, default_non_descriptive_links())
}

#[test]
fn test_guide_findings_by_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("guide.md");
    fs::write(&path, GUIDE).expect("write");

    let run = validate_file(&path, None, &rules());
    let findings: Vec<_> = run
        .sorted()
        .into_iter()
        .map(|d| (d.severity, d.code, d.location.line))
        .collect();

    assert_eq!(
        findings,
        [
            (Severity::Error, "HEADING_SKIP", Some(5)),
            (Severity::Error, "CODE_BLOCK_UNCLOSED", Some(13)),
            (Severity::Warning, "CODE_BLOCK_LANG", Some(7)),
            (Severity::Warning, "LINK_TEXT", Some(11)),
        ]
    );
    assert!(!run.passed());
}

#[test]
fn test_clean_document_passes() {
    let doc = Document::from_text(
        "README.md",
        DocumentKind::Markdown,
        "# Overview\n\n## Getting started\n\nSee the [installation guide](install.md).\n\n```bash\nmake\n```\n",
    );
    let run = plugin_validate::validate_document(&doc, &rules());
    assert!(run.diagnostics().is_empty(), "{:?}", run.diagnostics());
}

#[test]
fn test_document_without_h1() {
    let doc = Document::from_text("notes.md", DocumentKind::Markdown, "Just text.\n");
    let run = plugin_validate::validate_document(&doc, &rules());
    assert_eq!(run.error_count(), 1);
    assert_eq!(run.diagnostics()[0].code, "NO_H1");
}

#[test]
fn test_directory_is_validated_in_path_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("docs/nested")).expect("mkdir");
    fs::create_dir_all(dir.path().join("docs/node_modules")).expect("mkdir");
    fs::write(dir.path().join("docs/b.md"), "# B\n").expect("write");
    fs::write(dir.path().join("docs/a.md"), "# A\n\n### Deep\n").expect("write");
    fs::write(dir.path().join("docs/nested/c.md"), "# C\n").expect("write");
    fs::write(dir.path().join("docs/node_modules/skip.md"), "no heading\n").expect("write");
    fs::write(dir.path().join("docs/notes.txt"), "ignored\n").expect("write");

    let args = Args::try_parse_from([
        "plugin-validate",
        "markdown",
        dir.path().join("docs").to_str().expect("utf-8 path"),
    ])
    .expect("args");
    let config = Config::from_args_in(args, dir.path()).expect("config");
    let runs = runner::run(&config).expect("run");

    let names: Vec<_> = runs
        .iter()
        .map(|run| {
            run.source()
                .strip_prefix(dir.path().join("docs"))
                .expect("under docs")
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, ["a.md", "b.md", "nested/c.md"]);

    let output = report::render(&runs, true);
    assert!(output.contains("[HEADING_SKIP]"));
    assert!(!output.contains("b.md"));
    assert!(output.ends_with("Validation FAILED: 1 error(s), 0 warning(s) in 3 document(s)\n"));
}

#[test]
fn test_empty_directory_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let args = Args::try_parse_from([
        "plugin-validate",
        "markdown",
        dir.path().to_str().expect("utf-8 path"),
    ])
    .expect("args");
    let config = Config::from_args_in(args, dir.path()).expect("config");
    let runs = runner::run(&config).expect("run");

    assert!(runs.is_empty());
    assert!(report::render(&runs, false).contains("Validation PASSED: 0 error(s), 0 warning(s) in 0 document(s)"));
}

#[test]
fn test_configured_link_texts() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(".plugin-validate.toml"),
        "[markdown]\nnon_descriptive_link_texts = [\"this page\"]\n",
    )
    .expect("write");
    let path = dir.path().join("doc.md");
    fs::write(&path, "# Doc\n\nSee [this page](a.md) or [here](b.md).\n").expect("write");

    let args = Args::try_parse_from(["plugin-validate", "markdown", path.to_str().expect("utf-8 path")])
        .expect("args");
    let config = Config::from_args_in(args, dir.path()).expect("config");
    let runs = runner::run(&config).expect("run");

    let messages: Vec<_> = runs[0].diagnostics().iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("this page"));
}
