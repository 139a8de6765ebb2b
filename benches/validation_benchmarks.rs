use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plugin_validate::rules::java::default_placeholder_packages;
use plugin_validate::rules::markdown::default_non_descriptive_links;
use plugin_validate::rules::registry::{java_recipe_rules, java_source_rules, markdown_rules, manifest_rules};
use plugin_validate::{validate_document, Document, DocumentKind};

/// Generate Markdown with a given mix of findings
fn generate_markdown(sections: usize, scenario: &str) -> String {
    let mut content = vec!["# Plugin reference".to_string(), String::new()];

    for i in 0..sections {
        match scenario {
            "clean" => {
                content.push(format!("## Section {}", i));
                content.push(format!("See the [section {} notes](notes/{}.md).", i, i));
                content.push("```bash".to_string());
                content.push(format!("run --step {}", i));
                content.push("```".to_string());
            }
            _ => match i % 5 {
                0 => content.push(format!("#### Skipped Level Heading Number {}", i)),
                1 => content.push(format!("[click here](page{}.md) and [](empty.md)", i)),
                2 => {
                    content.push("```".to_string());
                    content.push("# not a heading".to_string());
                    content.push("```".to_string());
                }
                3 => content.push(format!("## Getting Started With Section {}", i)),
                4 => content.push(format!("Plain paragraph {} with [a link]()", i)),
                _ => unreachable!(),
            },
        }
        content.push(String::new());
    }

    content.join("\n")
}

fn generate_java(lines: usize) -> String {
    let mut content = vec![
        "package org.acme.rewrite;".to_string(),
        "public class Generated {".to_string(),
    ];

    for i in 0..lines {
        match i % 6 {
            0 => content.push(format!("    var value{} = compute({});", i, i)),
            1 => content.push(format!("    // record Old{}(int x) {{}}", i)),
            2 => content.push(format!("    if (obj instanceof String s{}) {{ use(s{}); }}", i, i)),
            3 => content.push(format!("    int plain{} = {};", i, i)),
            4 => content.push(format!("    record Point{}(int x, int y) {{}}", i)),
            5 => content.push(format!("    String s{} = \"literal\";", i)),
            _ => unreachable!(),
        }
    }

    content.push("}".to_string());
    content.join("\n")
}

fn generate_manifest(plugins: usize) -> serde_json::Map<String, serde_json::Value> {
    let entries: Vec<_> = (0..plugins)
        .map(|i| {
            let name = if i % 7 == 0 {
                "duplicate".to_string()
            } else {
                format!("plugin-{}", i)
            };
            serde_json::json!({
                "name": name,
                "source": format!("./plugins/plugin-{}", i),
                "version": "1.0.0",
                "agents": [{ "path": "agents/main.md" }]
            })
        })
        .collect();

    let mut map = serde_json::Map::new();
    map.insert("plugins".to_string(), serde_json::Value::Array(entries));
    map
}

/// Markdown rules at different sizes and finding densities
fn bench_markdown_validation(c: &mut Criterion) {
    let rules = markdown_rules(3, default_non_descriptive_links());
    let mut group = c.benchmark_group("markdown_validation");

    for scenario in ["clean", "mixed_findings"] {
        for &sections in &[10, 100, 1_000] {
            let content = generate_markdown(sections, scenario);
            let doc = Document::from_text("guide.md", DocumentKind::Markdown, &content);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(scenario, sections),
                &doc,
                |b, doc| b.iter(|| black_box(validate_document(black_box(doc), &rules))),
            );
        }
    }

    group.finish();
}

/// Language level checks scale with line count
fn bench_language_level(c: &mut Criterion) {
    let strict = java_source_rules(8).expect("rules");
    let relaxed = java_source_rules(21).expect("rules");
    let mut group = c.benchmark_group("language_level");

    for &lines in &[100, 1_000, 10_000] {
        let content = generate_java(lines);
        let doc = Document::from_text("Generated.java", DocumentKind::JavaSource, &content);

        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::new("java_8", lines), &doc, |b, doc| {
            b.iter(|| black_box(validate_document(black_box(doc), &strict)))
        });
        group.bench_with_input(BenchmarkId::new("java_21", lines), &doc, |b, doc| {
            b.iter(|| black_box(validate_document(black_box(doc), &relaxed)))
        });
    }

    group.finish();
}

/// Recipe structure heuristics without the compiler
fn bench_recipe_rules(c: &mut Criterion) {
    let rules = java_recipe_rules(8, default_placeholder_packages(), None).expect("rules");
    let content = format!(
        "package com.yourorg;\n\n@Value\npublic class ChangeThing extends Recipe {{\n{}\n    public String getDisplayName() {{ return \"Change thing\"; }}\n    public String getDescription() {{ return \"Changes.\"; }}\n    public TreeVisitor<?, ExecutionContext> getVisitor() {{ return VISITOR; }}\n}}\n",
        "    @Option(displayName = \"Opt\", description = \"An option.\")\n    String opt;\n".repeat(50)
    );
    let doc = Document::from_text("ChangeThing.java", DocumentKind::JavaRecipe, &content);

    c.bench_function("recipe_rules", |b| {
        b.iter(|| black_box(validate_document(black_box(&doc), &rules)))
    });
}

/// Manifest rules, dominated by path existence checks
fn bench_manifest_validation(c: &mut Criterion) {
    let rules = manifest_rules();
    let dir = tempfile::tempdir().expect("tempdir");
    let mut group = c.benchmark_group("manifest_validation");

    for &plugins in &[10, 100, 500] {
        let doc = Document::from_json(
            dir.path().join("marketplace.json"),
            dir.path(),
            generate_manifest(plugins),
        );

        group.throughput(Throughput::Elements(plugins as u64));
        group.bench_with_input(BenchmarkId::new("plugins", plugins), &doc, |b, doc| {
            b.iter(|| black_box(validate_document(black_box(doc), &rules)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_markdown_validation,
    bench_language_level,
    bench_recipe_rules,
    bench_manifest_validation
);
criterion_main!(benches);
