//! Marketplace manifest rules
//!
//! The manifest is a JSON object with a `plugins` array. Each plugin names a
//! `source` directory and may list `agents`, `commands` and `skills`, each
//! pointing at a file inside that directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::core::{Diagnostic, Document, Location};
use crate::validation::{Rule, RuleError};

/// Component arrays a plugin entry may carry
pub const COMPONENT_TYPES: [&str; 3] = ["agents", "commands", "skills"];

const ROOT: &str = "marketplace.json";

fn manifest(doc: &Document) -> Result<&Map<String, Value>, RuleError> {
    doc.json().ok_or(RuleError::WrongContent { expected: "JSON" })
}

/// Plugin entries that are objects, with their index.
/// Missing or malformed `plugins` yields nothing; `structure` reports that.
fn plugin_entries(root: &Map<String, Value>) -> impl Iterator<Item = (usize, &Map<String, Value>)> {
    root.get("plugins")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(idx, plugin)| plugin.as_object().map(|obj| (idx, obj)))
}

fn plugin_prefix(idx: usize) -> String {
    format!("plugins[{}]", idx)
}

/// Resolve a `./relative` manifest path against a base directory
fn resolve(base: &Path, relative: &str) -> PathBuf {
    base.join(relative.strip_prefix("./").unwrap_or(relative))
}

/// Lowercase ASCII letters and digits separated by single hyphens
pub fn is_kebab_case(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}

/// Top-level shape: `plugins` array and optional `pluginRoot`
#[derive(Debug, Default)]
pub struct Structure;

impl Rule for Structure {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let root = manifest(doc)?;
        let mut diagnostics = Vec::new();

        match root.get("plugins") {
            None => diagnostics.push(Diagnostic::error(
                "MISSING_FIELD",
                Location::path(ROOT),
                "Missing required field 'plugins'",
            )),
            Some(plugins) if !plugins.is_array() => diagnostics.push(Diagnostic::error(
                "INVALID_TYPE",
                Location::path(ROOT),
                "'plugins' must be an array",
            )),
            Some(_) => {}
        }

        match root.get("pluginRoot") {
            Some(Value::String(plugin_root)) if !plugin_root.starts_with("./") => {
                diagnostics.push(Diagnostic::warning(
                    "RELATIVE_PATH",
                    Location::path("pluginRoot"),
                    "Should start with './' for relative paths",
                ))
            }
            Some(Value::String(_)) | None => {}
            Some(_) => diagnostics.push(Diagnostic::error(
                "INVALID_TYPE",
                Location::path("pluginRoot"),
                "Must be a string",
            )),
        }

        Ok(diagnostics)
    }
}

/// Required fields and scalar field types of each plugin entry
#[derive(Debug, Default)]
pub struct PluginFields;

impl Rule for PluginFields {
    fn name(&self) -> &'static str {
        "plugin-fields"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let root = manifest(doc)?;
        let mut diagnostics = Vec::new();

        let Some(plugins) = root.get("plugins").and_then(Value::as_array) else {
            return Ok(diagnostics);
        };

        for (idx, plugin) in plugins.iter().enumerate() {
            let prefix = plugin_prefix(idx);

            let Some(plugin) = plugin.as_object() else {
                diagnostics.push(Diagnostic::error(
                    "INVALID_TYPE",
                    Location::path(prefix),
                    "Plugin entry must be an object",
                ));
                continue;
            };

            for field in ["name", "source"] {
                if !plugin.contains_key(field) {
                    diagnostics.push(Diagnostic::error(
                        "MISSING_FIELD",
                        Location::path(prefix.clone()),
                        format!("Missing required field '{}'", field),
                    ));
                }
            }

            for (field, label) in [
                ("name", "Name"),
                ("version", "Version"),
                ("description", "Description"),
            ] {
                if plugin.get(field).is_some_and(|value| !value.is_string()) {
                    diagnostics.push(Diagnostic::error(
                        "INVALID_TYPE",
                        Location::path(format!("{}.{}", prefix, field)),
                        format!("{} must be a string", label),
                    ));
                }
            }
        }

        Ok(diagnostics)
    }
}

/// Plugin names must be unique; every repeat after the first is reported
#[derive(Debug, Default)]
pub struct UniqueNames;

impl Rule for UniqueNames {
    fn name(&self) -> &'static str {
        "unique-names"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let root = manifest(doc)?;
        let mut seen = HashSet::new();
        let mut diagnostics = Vec::new();

        for (idx, plugin) in plugin_entries(root) {
            let Some(name) = plugin.get("name").and_then(Value::as_str) else {
                continue;
            };
            if !seen.insert(name) {
                diagnostics.push(Diagnostic::error(
                    "DUPLICATE_NAME",
                    Location::path(format!("{}.name", plugin_prefix(idx))),
                    format!("Duplicate plugin name '{}'", name),
                ));
            }
        }

        Ok(diagnostics)
    }
}

/// Plugin names should be kebab-case
#[derive(Debug, Default)]
pub struct NamingConvention;

impl Rule for NamingConvention {
    fn name(&self) -> &'static str {
        "naming-convention"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let root = manifest(doc)?;

        Ok(plugin_entries(root)
            .filter_map(|(idx, plugin)| {
                let name = plugin.get("name")?.as_str()?;
                (!is_kebab_case(name)).then(|| {
                    Diagnostic::warning(
                        "NAMING_CONVENTION",
                        Location::path(format!("{}.name", plugin_prefix(idx))),
                        format!("Plugin name '{}' should use kebab-case", name),
                    )
                })
            })
            .collect())
    }
}

/// `source` is a `./`-relative path to an existing directory
#[derive(Debug, Default)]
pub struct SourcePath;

impl Rule for SourcePath {
    fn name(&self) -> &'static str {
        "source-path"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let root = manifest(doc)?;
        let mut diagnostics = Vec::new();

        for (idx, plugin) in plugin_entries(root) {
            let Some(source) = plugin.get("source") else {
                continue;
            };
            let location = Location::path(format!("{}.source", plugin_prefix(idx)));

            let Some(source) = source.as_str() else {
                diagnostics.push(Diagnostic::error(
                    "INVALID_TYPE",
                    location,
                    "Source must be a string",
                ));
                continue;
            };

            if !source.starts_with("./") {
                diagnostics.push(Diagnostic::error(
                    "RELATIVE_PATH",
                    location.clone(),
                    format!("Source path '{}' must start with './'", source),
                ));
            }

            let resolved = resolve(&doc.base_dir, source);
            if !resolved.exists() {
                diagnostics.push(Diagnostic::error(
                    "PATH_NOT_FOUND",
                    location,
                    format!("Source directory '{}' does not exist", source),
                ));
            } else if !resolved.is_dir() {
                diagnostics.push(Diagnostic::error(
                    "PATH_KIND",
                    location,
                    format!("Source path '{}' is not a directory", source),
                ));
            }
        }

        Ok(diagnostics)
    }
}

/// Component entries point at existing files inside the plugin directory
#[derive(Debug, Default)]
pub struct ComponentPaths;

impl ComponentPaths {
    fn check_components(
        &self,
        components: &Value,
        prefix: &str,
        plugin_dir: Option<&Path>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(components) = components.as_array() else {
            diagnostics.push(Diagnostic::error(
                "INVALID_TYPE",
                Location::path(prefix),
                "Component array must be an array",
            ));
            return;
        };

        for (idx, component) in components.iter().enumerate() {
            let comp_prefix = format!("{}[{}]", prefix, idx);

            let Some(component) = component.as_object() else {
                diagnostics.push(Diagnostic::error(
                    "INVALID_TYPE",
                    Location::path(comp_prefix),
                    "Component entry must be an object",
                ));
                continue;
            };

            let Some(path) = component.get("path") else {
                diagnostics.push(Diagnostic::error(
                    "MISSING_FIELD",
                    Location::path(comp_prefix),
                    "Missing required field 'path'",
                ));
                continue;
            };

            let location = Location::path(format!("{}.path", comp_prefix));
            let Some(path) = path.as_str() else {
                diagnostics.push(Diagnostic::error(
                    "INVALID_TYPE",
                    location,
                    "Path must be a string",
                ));
                continue;
            };

            // Without a usable source directory there is nothing to resolve against
            let Some(plugin_dir) = plugin_dir else {
                continue;
            };

            let full_path = resolve(plugin_dir, path);
            if !full_path.exists() {
                diagnostics.push(Diagnostic::error(
                    "PATH_NOT_FOUND",
                    location,
                    format!(
                        "Component file '{}' does not exist at '{}'",
                        path,
                        full_path.display()
                    ),
                ));
            } else if !full_path.is_file() {
                diagnostics.push(Diagnostic::error(
                    "PATH_KIND",
                    location,
                    format!("Component path '{}' is not a file", path),
                ));
            }
        }
    }
}

impl Rule for ComponentPaths {
    fn name(&self) -> &'static str {
        "component-paths"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let root = manifest(doc)?;
        let mut diagnostics = Vec::new();

        for (idx, plugin) in plugin_entries(root) {
            let plugin_dir = plugin
                .get("source")
                .and_then(Value::as_str)
                .filter(|source| !source.is_empty())
                .map(|source| resolve(&doc.base_dir, source));

            for component_type in COMPONENT_TYPES {
                if let Some(components) = plugin.get(component_type) {
                    let prefix = format!("{}.{}", plugin_prefix(idx), component_type);
                    self.check_components(
                        components,
                        &prefix,
                        plugin_dir.as_deref(),
                        &mut diagnostics,
                    );
                }
            }
        }

        Ok(diagnostics)
    }
}
