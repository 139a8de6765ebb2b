//! Validation Engine
//!
//! Runs an ordered set of independent rules against one document and
//! collects what they report. Rule failures are contained: a rule that
//! errors or panics turns into a single diagnostic and the others still run.

use std::any::Any;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::{Diagnostic, Document, DocumentKind, Location, Severity};

/// A rule could not complete its check
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("expected {expected} content")]
    WrongContent { expected: &'static str },

    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Failed(String),

    #[error("panicked: {0}")]
    Panicked(String),
}

/// An independent check over a document
pub trait Rule: Send + Sync {
    /// Stable rule name, used when the rule itself fails
    fn name(&self) -> &'static str;

    /// Inspect the document and report zero or more findings
    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError>;
}

/// The fixed, ordered rules for one kind of document
pub struct RuleSet {
    kind: DocumentKind,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
        }
    }

    /// Append a rule; rules run in insertion order
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("kind", &self.kind)
            .field("rules", &self.rule_names())
            .finish()
    }
}

/// Result of validating one document. Read-only once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRun {
    source: PathBuf,
    kind: DocumentKind,
    diagnostics: Vec<Diagnostic>,
}

impl ValidationRun {
    fn new(source: &Path, kind: DocumentKind) -> Self {
        Self {
            source: source.to_path_buf(),
            kind,
            diagnostics: Vec::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Diagnostics in the order rules produced them
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Errors fail a run; warnings never do
    pub fn passed(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Diagnostics sorted for display: errors first, then by location.
    /// The sort is stable, so equal locations keep rule order.
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by(|a, b| {
            a.severity
                .cmp(&b.severity)
                .then_with(|| a.location.cmp(&b.location))
        });
        sorted
    }
}

/// Apply every rule in `rules` to an already loaded document
pub fn validate_document(doc: &Document, rules: &RuleSet) -> ValidationRun {
    let mut run = ValidationRun::new(&doc.path, doc.kind);

    for rule in &rules.rules {
        log::debug!("Running rule '{}' on {}", rule.name(), doc.path.display());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.check(doc)))
            .unwrap_or_else(|payload| Err(RuleError::Panicked(panic_message(payload))));

        match outcome {
            Ok(diagnostics) => run.diagnostics.extend(diagnostics),
            Err(e) => {
                log::warn!("Rule '{}' failed on {}: {}", rule.name(), doc.path.display(), e);
                run.diagnostics.push(Diagnostic::error(
                    "RULE_ERROR",
                    Location::path(doc.display_path()),
                    format!("Rule '{}' could not complete: {}", rule.name(), e),
                ));
            }
        }
    }

    run
}

/// Load `path` and validate it. A load failure ends the run with a single
/// `LOAD_ERROR` diagnostic.
pub fn validate_file(path: &Path, base_dir: Option<&Path>, rules: &RuleSet) -> ValidationRun {
    match Document::load_with_base(path, rules.kind(), base_dir) {
        Ok(doc) => validate_document(&doc, rules),
        Err(e) => {
            log::info!("Could not load {}: {}", path.display(), e);
            let mut run = ValidationRun::new(path, rules.kind());
            run.diagnostics.push(Diagnostic::error(
                "LOAD_ERROR",
                Location::path(path.display().to_string()),
                e.to_string(),
            ));
            run
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
