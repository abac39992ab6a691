//! Brace-depth scanner for virtual server blocks.
//!
//! Unlike the single-level pattern, this keeps nested sub-blocks such as
//! `profiles { ... }` inside the virtual server they belong to.

use std::collections::BTreeMap;

use super::parser::HEADER_RE;

/// A virtual server block located in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Object name.
    pub name: &'a str,
    /// Text between the opening brace and its matching closing brace.
    pub body: &'a str,
}

/// Finds every balanced `ltm virtual <name> { ... }` block in order.
///
/// A header without a matching closing brace is skipped and scanning
/// resumes right after it.
pub fn balanced_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(caps) = HEADER_RE.captures_at(text, pos) {
        let (Some(header), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let body_start = header.end();

        match matching_brace(&text[body_start..]) {
            Some(len) => {
                blocks.push(Block {
                    name: name.as_str(),
                    body: &text[body_start..body_start + len],
                });
                pos = body_start + len + 1;
            }
            None => pos = body_start,
        }
    }

    blocks
}

/// Returns the byte offset of the brace closing an already-open block.
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits a block body into top-level attributes.
///
/// Each top-level line is one attribute. A nested sub-block is folded into
/// the line that opens it, and whitespace in the value is collapsed to
/// single spaces. A line holding a single word maps to an empty value.
pub fn nested_attributes(body: &str) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();

    for line in logical_lines(body) {
        let (key, value) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        attributes.insert(key.to_string(), value.to_string());
    }

    attributes
}

fn logical_lines(body: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in body.chars() {
        match ch {
            '{' => {
                depth += 1;
                current.push(ch);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            '\n' if depth == 0 => lines.push(std::mem::take(&mut current)),
            '\n' => current.push(' '),
            _ => current.push(ch),
        }
    }
    lines.push(current);

    lines
        .iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}
