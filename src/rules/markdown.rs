//! Markdown documentation rules
//!
//! Line-scanning checks over headings, fenced code blocks and inline links.
//! Every finding carries the 1-based line it was detected on.

use crate::core::{Diagnostic, Document, Location};
use crate::parser::{self, ParsedLine};
use crate::validation::{Rule, RuleError};

/// Words that stay lowercase in sentence case and are ignored by the
/// title-case heuristic
const SMALL_WORDS: [&str; 14] = [
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "from", "by", "with",
];

fn text(doc: &Document) -> Result<&str, RuleError> {
    doc.text().ok_or(RuleError::WrongContent { expected: "text" })
}

/// Heading levels may only step down one at a time (h1 -> h2 -> h3)
#[derive(Debug, Default)]
pub struct HeadingHierarchy;

impl Rule for HeadingHierarchy {
    fn name(&self) -> &'static str {
        "heading-hierarchy"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let path = doc.display_path();
        let mut previous = 0;
        let mut diagnostics = Vec::new();

        for line in parser::parse_markdown(text(doc)?) {
            let ParsedLine::Heading(heading) = line.parsed else {
                continue;
            };

            if heading.level > previous + 1 {
                diagnostics.push(Diagnostic::error(
                    "HEADING_SKIP",
                    Location::line(path.clone(), line.number),
                    format!(
                        "Heading level skipped (h{} -> h{}). Use h{} instead.",
                        previous,
                        heading.level,
                        previous + 1
                    ),
                ));
            }
            previous = heading.level;
        }

        Ok(diagnostics)
    }
}

/// Headings should use sentence case. Heuristic, so warning only.
#[derive(Debug)]
pub struct TitleCase {
    /// Deepest heading level the check applies to
    pub max_level: usize,
}

impl Default for TitleCase {
    fn default() -> Self {
        Self { max_level: 3 }
    }
}

/// More than half of the words after the first are capitalised and not
/// small words. Short headings and headings starting with code are ignored.
pub fn is_title_case(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 3 || text.starts_with('`') {
        return false;
    }

    let rest = &words[1..];
    let capitalized = rest
        .iter()
        .filter(|word| {
            word.chars().next().is_some_and(char::is_uppercase)
                && !SMALL_WORDS.contains(&word.to_lowercase().as_str())
        })
        .count();

    capitalized * 2 > rest.len()
}

impl Rule for TitleCase {
    fn name(&self) -> &'static str {
        "title-case"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let path = doc.display_path();

        Ok(parser::parse_markdown(text(doc)?)
            .into_iter()
            .filter_map(|line| match line.parsed {
                ParsedLine::Heading(heading)
                    if heading.level <= self.max_level && is_title_case(&heading.text) =>
                {
                    Some(Diagnostic::warning(
                        "TITLE_CASE",
                        Location::line(path.clone(), line.number),
                        format!(
                            "Heading appears to use title case. Use sentence case instead: '{}'",
                            heading.text
                        ),
                    ))
                }
                _ => None,
            })
            .collect())
    }
}

/// Fenced code blocks carry a language tag and are closed
#[derive(Debug, Default)]
pub struct CodeBlocks;

impl Rule for CodeBlocks {
    fn name(&self) -> &'static str {
        "code-blocks"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let path = doc.display_path();
        let mut open_at = None;
        let mut diagnostics = Vec::new();

        for line in parser::parse_markdown(text(doc)?) {
            match line.parsed {
                ParsedLine::FenceOpen { info } => {
                    open_at = Some(line.number);
                    if info.is_empty() {
                        diagnostics.push(Diagnostic::warning(
                            "CODE_BLOCK_LANG",
                            Location::line(path.clone(), line.number),
                            "Code block missing language identifier (e.g., ```python, ```bash, ```markdown)",
                        ));
                    }
                }
                ParsedLine::FenceClose => open_at = None,
                _ => {}
            }
        }

        if let Some(start) = open_at {
            diagnostics.push(Diagnostic::error(
                "CODE_BLOCK_UNCLOSED",
                Location::line(path, start),
                "Code block opened but never closed",
            ));
        }

        Ok(diagnostics)
    }
}

/// Inline links have descriptive text and a target
#[derive(Debug)]
pub struct Links {
    /// Link texts that say nothing about the destination (compared lowercase)
    pub non_descriptive: Vec<String>,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            non_descriptive: default_non_descriptive_links(),
        }
    }
}

pub fn default_non_descriptive_links() -> Vec<String> {
    ["click here", "here", "read more", "more"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Rule for Links {
    fn name(&self) -> &'static str {
        "links"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let path = doc.display_path();
        let mut diagnostics = Vec::new();

        for line in parser::parse_markdown(text(doc)?) {
            if matches!(
                line.parsed,
                ParsedLine::Code | ParsedLine::FenceOpen { .. } | ParsedLine::FenceClose
            ) {
                continue;
            }

            for link in parser::links(line.raw) {
                let location = Location::line(path.clone(), line.number);
                let lowered = link.text.to_lowercase();

                if self.non_descriptive.iter().any(|t| *t == lowered) {
                    diagnostics.push(Diagnostic::warning(
                        "LINK_TEXT",
                        location.clone(),
                        format!(
                            "Non-descriptive link text: '{}'. Use descriptive text that tells where the link goes.",
                            link.text
                        ),
                    ));
                }

                if link.text.trim().is_empty() {
                    diagnostics.push(Diagnostic::error(
                        "LINK_EMPTY",
                        location.clone(),
                        "Link has empty text",
                    ));
                }

                if link.url.trim().is_empty() {
                    diagnostics.push(Diagnostic::error(
                        "LINK_EMPTY_URL",
                        location,
                        format!("Link '{}' has empty URL", link.text),
                    ));
                }
            }
        }

        Ok(diagnostics)
    }
}

/// A document has exactly one top-level heading
#[derive(Debug, Default)]
pub struct DocumentStructure;

impl Rule for DocumentStructure {
    fn name(&self) -> &'static str {
        "document-structure"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let path = doc.display_path();
        let h1_lines: Vec<usize> = parser::parse_markdown(text(doc)?)
            .into_iter()
            .filter(|line| matches!(&line.parsed, ParsedLine::Heading(h) if h.level == 1))
            .map(|line| line.number)
            .collect();

        let diagnostics = match h1_lines.as_slice() {
            [] => vec![Diagnostic::error(
                "NO_H1",
                Location::line(path, 1),
                "Document should have at least one top-level heading (# Title)",
            )],
            [_] => Vec::new(),
            [_, second, ..] => vec![Diagnostic::warning(
                "MULTIPLE_H1",
                Location::line(path, *second),
                format!(
                    "Document has {} top-level headings. Consider using only one H1 as the document title.",
                    h1_lines.len()
                ),
            )],
        };

        Ok(diagnostics)
    }
}
