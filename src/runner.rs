//! Command execution
//!
//! Maps a [`Config`] onto documents and rule sets and validates each one.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::config::{Config, Mode};
use crate::core::DocumentKind;
use crate::discovery::resolve_targets;
use crate::rules::RuleRegistry;
use crate::validation::{validate_file, ValidationRun};

/// Files to validate together with the kind each is validated as
pub fn plan(config: &Config) -> Result<Vec<(PathBuf, DocumentKind)>> {
    let (extensions, allow_dir): (&[&str], bool) = match config.mode {
        Mode::Manifest => (&["json"], false),
        Mode::Recipe => (&["java", "yml", "yaml"], false),
        Mode::Compat => (&["java"], true),
        Mode::Markdown => (&["md"], true),
    };

    let targets = resolve_targets(&config.path, extensions, allow_dir)?;
    if targets.is_empty() {
        log::warn!(
            "No matching files found under {}",
            config.path.display()
        );
    }

    targets
        .into_iter()
        .map(|path| {
            let kind = match config.mode {
                Mode::Manifest => DocumentKind::Manifest,
                Mode::Compat => DocumentKind::JavaSource,
                Mode::Markdown => DocumentKind::Markdown,
                Mode::Recipe => DocumentKind::from_path(&path)
                    .ok_or_else(|| anyhow!("Unsupported file type: {}", path.display()))?,
            };
            Ok((path, kind))
        })
        .collect()
}

/// Validate everything the configuration points at.
///
/// Errors are usage or environment problems; findings are in the runs.
pub fn run(config: &Config) -> Result<Vec<ValidationRun>> {
    let registry = RuleRegistry::from_config(config)?;
    let targets = plan(config)?;

    targets
        .iter()
        .map(|(path, kind)| {
            let rules = registry
                .get(*kind)
                .with_context(|| format!("No rules registered for {}", kind))?;
            Ok(validate_file(path, config.base_dir.as_deref(), rules))
        })
        .collect()
}
