//! Core Types
//!
//! Documents and the diagnostics produced about them.

pub mod diagnostics;
pub mod document;

pub use diagnostics::{Diagnostic, Location, Severity};
pub use document::{Content, Document, DocumentKind, LoadError};
