//! Compilation rule
//!
//! Hands the document to the external compiler. Compiler trouble never
//! aborts validation: a timeout or a missing compiler is only a warning.

use crate::compiler::{CompileOutcome, JavaCompiler};
use crate::core::{Diagnostic, Document, Location};
use crate::validation::{Rule, RuleError};

#[derive(Debug, Clone)]
pub struct Compile {
    compiler: JavaCompiler,
    java_version: u32,
}

impl Compile {
    pub fn new(compiler: JavaCompiler, java_version: u32) -> Self {
        Self {
            compiler,
            java_version,
        }
    }
}

impl Rule for Compile {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let location = Location::path(doc.display_path());

        let diagnostic = match self.compiler.compile(&doc.path, self.java_version)? {
            CompileOutcome::Success => return Ok(Vec::new()),
            CompileOutcome::Failed(stderr) => Diagnostic::error(
                "COMPILE_FAILED",
                location,
                format!("Compilation failed:\n{}", stderr),
            ),
            CompileOutcome::TimedOut(limit) => Diagnostic::warning(
                "COMPILE_TIMEOUT",
                location,
                format!("Compilation timed out after {}s", limit.as_secs_f32()),
            ),
            CompileOutcome::Unavailable(reason) => Diagnostic::warning(
                "COMPILER_UNAVAILABLE",
                location,
                format!("{} - skipping compilation check", reason),
            ),
        };

        Ok(vec![diagnostic])
    }
}
