//! Validation Engine
//!
//! Rule execution separated from rule definitions and reporting.

pub mod engine;

pub use engine::{validate_document, validate_file, Rule, RuleError, RuleSet, ValidationRun};
