//! Line Lexer
//!
//! Character-level helpers that recognise headings, fences, links and
//! comment lines. Intentionally approximate: these are heuristics over
//! single lines, not grammars.

use crate::parser::ast::{Heading, Link};

const FENCE: &str = "```";

/// Recognise an ATX heading (`#` to `######` followed by whitespace and text)
pub fn heading(line: &str) -> Option<Heading> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &line[level..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }

    let text = rest.trim();
    if text.is_empty() {
        return None;
    }

    Some(Heading {
        level,
        text: text.to_string(),
    })
}

/// If the line is a code fence, return its info string
pub fn fence_info(line: &str) -> Option<&str> {
    line.trim().strip_prefix(FENCE).map(str::trim)
}

/// Find every inline `[text](url)` link on a line, left to right
pub fn links(line: &str) -> Vec<Link> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find('[') {
        let open = cursor + offset;
        match link_at(line, open) {
            Some((link, end)) => {
                found.push(link);
                cursor = end;
            }
            None => cursor = open + 1,
        }
    }

    found
}

/// Try to read a link whose `[` sits at byte offset `open`.
/// Returns the link and the offset just past its closing `)`.
fn link_at(line: &str, open: usize) -> Option<(Link, usize)> {
    let text_start = open + 1;
    let close_bracket = text_start + line[text_start..].find(']')?;

    let url_start = close_bracket + 1;
    if !line[url_start..].starts_with('(') {
        return None;
    }

    let url_start = url_start + 1;
    let close_paren = url_start + line[url_start..].find(')')?;

    Some((
        Link {
            text: line[text_start..close_bracket].to_string(),
            url: line[url_start..close_paren].to_string(),
        },
        close_paren + 1,
    ))
}

/// Whether a Java source line is a comment line that pattern checks skip
pub fn is_java_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_basic() {
        let h = heading("## Install the tool").expect("heading");
        assert_eq!(h.level, 2);
        assert_eq!(h.text, "Install the tool");
    }

    #[test]
    fn heading_requires_space_and_text() {
        assert!(heading("#hashtag").is_none());
        assert!(heading("#   ").is_none());
        assert!(heading("####### too deep").is_none());
        assert!(heading("plain text").is_none());
    }

    #[test]
    fn fence_info_strings() {
        assert_eq!(fence_info("```rust"), Some("rust"));
        assert_eq!(fence_info("  ```  "), Some(""));
        assert_eq!(fence_info("`inline`"), None);
    }

    #[test]
    fn links_on_one_line() {
        let found = links("See [the guide](docs/guide.md) or [here](https://x.y).");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "the guide");
        assert_eq!(found[0].url, "docs/guide.md");
        assert_eq!(found[1].text, "here");
    }

    #[test]
    fn links_with_empty_parts() {
        let found = links("[](a) and [b]()");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "");
        assert_eq!(found[1].url, "");
    }

    #[test]
    fn brackets_without_url_are_not_links() {
        assert!(links("array[0] and [note] (later)").is_empty());
    }

    #[test]
    fn java_comment_lines() {
        assert!(is_java_comment("    // var x = 1;"));
        assert!(is_java_comment("/* sealed class Old */"));
        assert!(!is_java_comment(" * record Foo(int a)"));
        assert!(!is_java_comment("var x = 1; // trailing"));
    }
}
