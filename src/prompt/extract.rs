//! Quoted prompt block extraction from source-like files.
//!
//! Recognised blocks: backtick template literals, `"""` and `'''` strings,
//! and Rust raw strings `r#"..."#`. A block assigned to one of the hint
//! names wins over the first block in the file.

use regex::Regex;
use std::sync::OnceLock;

/// (opener, closer) pairs, in the order the opener regex lists them
const MARKERS: &[(&str, &str)] = &[("r#\"", "\"#"), ("\"\"\"", "\"\"\""), ("'''", "'''"), ("`", "`")];

const OPENER_PATTERN: &str = r#"(r#"|"""|'''|`)"#;

fn opener_regex() -> Option<&'static Regex> {
    static OPENER: OnceLock<Option<Regex>> = OnceLock::new();
    OPENER.get_or_init(|| Regex::new(OPENER_PATTERN).ok()).as_ref()
}

fn closer_for(opener: &str) -> Option<&'static str> {
    MARKERS
        .iter()
        .find(|(open, _)| *open == opener)
        .map(|(_, close)| *close)
}

/// Body of the block whose opener ends at `body_start`, if it is closed.
fn block_body<'a>(content: &'a str, opener: &str, body_start: usize) -> Option<&'a str> {
    let closer = closer_for(opener)?;
    let rest = content.get(body_start..)?;
    rest.find(closer).map(|end| &rest[..end])
}

/// Extract the prompt block from `content`.
///
/// Hints are tried in order; `NAME = <block>`, `NAME: <block>` and typed
/// assignments such as `const NAME: &str = r#"..."#` all match. Without a
/// hinted block, the first closed multi-line block is used. Returns the
/// de-indented text, or `None` when nothing non-empty is found.
pub fn extract_block(content: &str, hints: &[String]) -> Option<String> {
    for hint in hints {
        if hint.trim().is_empty() {
            continue;
        }
        let pattern = format!(r"\b{}\b[^\n]*?[:=]\s*{}", regex::escape(hint.trim()), OPENER_PATTERN);
        let Ok(assignment) = Regex::new(&pattern) else {
            continue;
        };
        for caps in assignment.captures_iter(content) {
            let (Some(whole), Some(opener)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Some(body) = block_body(content, opener.as_str(), whole.end()) {
                let text = dedent(body);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    first_block(content)
}

fn first_block(content: &str) -> Option<String> {
    let openers = opener_regex()?;
    let mut search_from = 0;
    while let Some(opener) = openers.find_at(content, search_from) {
        match block_body(content, opener.as_str(), opener.end()) {
            Some(body) => {
                // Single-line blocks are usually identifiers or inline code.
                if body.contains('\n') {
                    let text = dedent(body);
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
                search_from = opener.end() + body.len() + closer_len(opener.as_str());
            }
            None => search_from = opener.end(),
        }
        if search_from >= content.len() {
            break;
        }
    }
    None
}

fn closer_len(opener: &str) -> usize {
    closer_for(opener).map(str::len).unwrap_or(0)
}

/// Remove the common leading whitespace of non-blank lines and drop
/// leading/trailing blank lines. Trailing whitespace on each line is removed.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(start);
    let body = &lines[start..=end];

    let indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    body.iter()
        .map(|l| l.get(indent..).unwrap_or_else(|| l.trim_start()).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
