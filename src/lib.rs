//! Plugin Validator
//!
//! Structural validation for plugin marketplace artifacts.
//!
//! This library provides:
//! - A rule engine that collects typed diagnostics per document
//! - Rule sets for marketplace manifests, recipe sources and Markdown docs
//! - A deterministic text reporter
//! - Configuration from the command line and TOML files

pub mod compiler;
pub mod config;
pub mod core;
pub mod discovery;
pub mod parser;
pub mod report;
pub mod rules;
pub mod runner;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use crate::core::{Diagnostic, Document, DocumentKind, Location, Severity};
pub use rules::RuleRegistry;
pub use validation::{validate_document, validate_file, ValidationRun};
