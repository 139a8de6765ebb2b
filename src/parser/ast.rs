//! Line Model
//!
//! Minimal types describing what a single line of a text document is.
//! No validation logic here - pure data representation.

/// A classified line of Markdown
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// An ATX heading like "## Usage"
    Heading(Heading),
    /// A fence that opens a code block, with its info string (may be empty)
    FenceOpen { info: String },
    /// A fence that closes the current code block
    FenceClose,
    /// A line inside a fenced code block
    Code,
    /// Any other line, including blank ones
    Text,
}

/// An ATX heading
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Number of leading `#` characters (1-6)
    pub level: usize,
    /// Heading text with surrounding whitespace removed
    pub text: String,
}

/// An inline link `[text](url)`
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// A line together with its 1-based position in the document
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedLine<'a> {
    pub number: usize,
    pub raw: &'a str,
    pub parsed: ParsedLine,
}
