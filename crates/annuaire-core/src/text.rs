//! Free-text canonicalization.
//!
//! `clean` tidies text pulled from a source document before display or
//! further parsing; `normalize` reduces text to a comparison key and is
//! never used for output.

use unicode_normalization::UnicodeNormalization;

/// Trims, collapses internal whitespace runs to a single space, and removes
/// whitespace separating adjacent digit characters, so a digit run broken
/// by formatting ("04 50 34 63 54") becomes contiguous.
#[must_use]
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            let digit_gap = ch.is_numeric() && out.chars().last().is_some_and(char::is_numeric);
            if !digit_gap {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Reduces text to its comparison form: Unicode canonical decomposition,
/// every character that is not a letter or digit stripped, lowercased.
///
/// Two strings differing only in accents, case, or punctuation normalize
/// identically.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|ch| ch.is_alphabetic() || ch.is_numeric())
        .flat_map(char::to_lowercase)
        .collect()
}
