//! Reporter
//!
//! Deterministic text rendering of finished validation runs. Rendering is
//! kept separate from printing so the output can be tested as a string.

use std::fmt::Write;

use crate::validation::ValidationRun;

const RULE: &str = "============================================================";

/// Totals across all rendered runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub documents: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn from_runs(runs: &[ValidationRun]) -> Self {
        runs.iter().fold(Self::default(), |mut summary, run| {
            summary.documents += 1;
            summary.errors += run.error_count();
            summary.warnings += run.warning_count();
            summary
        })
    }

    pub fn passed(&self) -> bool {
        self.errors == 0
    }
}

/// Render one run: a header, then errors before warnings, each sorted by
/// location
pub fn render_run(run: &ValidationRun, out: &mut String) {
    let _ = writeln!(out, "Validating: {} ({})", run.source().display(), run.kind());

    if run.diagnostics().is_empty() {
        let _ = writeln!(out, "  OK");
        return;
    }

    for diagnostic in run.sorted() {
        // Multi-line messages (compiler output) stay indented under their line
        let message = diagnostic.message.replace('\n', "\n      ");
        let _ = writeln!(
            out,
            "  {} [{}] {}: {}",
            diagnostic.severity, diagnostic.code, diagnostic.location, message
        );
    }
}

/// Render every run followed by a summary line.
///
/// With `quiet`, only failing documents are listed.
pub fn render(runs: &[ValidationRun], quiet: bool) -> String {
    let mut out = String::new();

    for run in runs {
        if quiet && run.passed() {
            continue;
        }
        render_run(run, &mut out);
    }

    let summary = Summary::from_runs(runs);
    let verdict = if summary.passed() { "PASSED" } else { "FAILED" };
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "Validation {}: {} error(s), {} warning(s) in {} document(s)",
        verdict, summary.errors, summary.warnings, summary.documents
    );

    out
}

/// Print the report for `runs` to stdout
pub fn print(runs: &[ValidationRun], quiet: bool) {
    print!("{}", render(runs, quiet));
}
