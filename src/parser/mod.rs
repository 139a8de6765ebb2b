//! Text Parser
//!
//! Line-oriented classification of Markdown documents. Each line is looked
//! at once, with a single piece of running state: whether we are inside a
//! fenced code block.

pub mod ast;
pub mod lexer;

pub use ast::{Heading, Link, NumberedLine, ParsedLine};
pub use lexer::{fence_info, heading, is_java_comment, links};

/// Classify every line of a Markdown document.
///
/// Lines inside fenced code blocks come back as [`ParsedLine::Code`], so a
/// `# comment` in a shell snippet is never mistaken for a heading.
pub fn parse_markdown(content: &str) -> Vec<NumberedLine<'_>> {
    let mut in_code_block = false;

    content
        .lines()
        .enumerate()
        .map(|(idx, raw)| {
            let parsed = match fence_info(raw) {
                Some(info) if !in_code_block => {
                    in_code_block = true;
                    ParsedLine::FenceOpen {
                        info: info.to_string(),
                    }
                }
                Some(_) => {
                    in_code_block = false;
                    ParsedLine::FenceClose
                }
                None if in_code_block => ParsedLine::Code,
                None => match heading(raw) {
                    Some(h) => ParsedLine::Heading(h),
                    None => ParsedLine::Text,
                },
            };

            NumberedLine {
                number: idx + 1,
                raw,
                parsed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headings_and_text() {
        let lines = parse_markdown("# Title\n\nSome text\n## Section");
        assert_eq!(lines.len(), 4);
        assert!(matches!(&lines[0].parsed, ParsedLine::Heading(h) if h.level == 1));
        assert_eq!(lines[1].parsed, ParsedLine::Text);
        assert_eq!(lines[2].parsed, ParsedLine::Text);
        assert!(matches!(&lines[3].parsed, ParsedLine::Heading(h) if h.level == 2));
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_parse_code_block() {
        let lines = parse_markdown("```bash\n# not a heading\n```\n# Heading");
        assert_eq!(
            lines[0].parsed,
            ParsedLine::FenceOpen {
                info: "bash".to_string()
            }
        );
        assert_eq!(lines[1].parsed, ParsedLine::Code);
        assert_eq!(lines[2].parsed, ParsedLine::FenceClose);
        assert!(matches!(lines[3].parsed, ParsedLine::Heading(_)));
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_markdown("").is_empty());
    }
}
