//! Positional field selection over raw directory markup.
//!
//! Both upstream pages are server-rendered with a fixed structure, so a
//! field is addressed the same way the pages address it with CSS: a class
//! marker narrowing to a section of the record block, plus the element's
//! position among its siblings. No DOM is built; blocks are sliced on the
//! marker and elements matched with `regex`, the same approach the rest of
//! the pipeline uses for markup.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]*>").expect("valid regex"));

/// Position of an element among its matches within one record block.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Position {
    Nth(usize),
    Last,
}

/// Addresses one logical field inside every record block of a document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldRule {
    /// Class marker of the section holding the field.
    pub section: &'static str,
    /// Pattern matching one element; capture 1 is its content. Compiled
    /// once per source module.
    pub item: &'static LazyLock<Regex>,
    pub position: Position,
    /// The raw text carries a label prefix ending in a colon.
    pub strip_label: bool,
}

/// Splits a document into record blocks: one slice per occurrence of the
/// block marker, running to the next occurrence or the end of the document.
pub(crate) fn record_blocks<'a>(document: &'a str, marker: &str) -> Vec<&'a str> {
    let starts: Vec<usize> = document.match_indices(marker).map(|(i, _)| i).collect();
    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(document.len());
            &document[start..end]
        })
        .collect()
}

/// Resolves a field rule against one record block, returning the text
/// content of the addressed element, or `None` when the block lacks it.
pub(crate) fn select_text(block: &str, rule: &FieldRule) -> Option<String> {
    let section = &block[block.find(rule.section)?..];
    // Bound the slice at the section's closing tag, so an element of the
    // same kind later in the block never shadows a `Last` position.
    // Sections are flat `div` containers in both sources.
    let section = section
        .find("</div>")
        .map_or(section, |end| &section[..end]);
    let captures = match rule.position {
        Position::Nth(index) => rule.item.captures_iter(section).nth(index),
        Position::Last => rule.item.captures_iter(section).last(),
    }?;
    Some(text_content(captures.get(1)?.as_str()))
}

/// Strips markup and decodes the handful of entities the sources emit.
/// Leftover whitespace is collapsed later by `clean`.
fn text_content(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, " ");
    decode_entities(&stripped)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
