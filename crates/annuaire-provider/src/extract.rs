//! Candidate extraction: every field rule resolved across all record
//! blocks, zipped into index-aligned candidate rows.

use annuaire_core::text::clean;

use crate::error::ProviderError;
use crate::select::{record_blocks, select_text, FieldRule};

/// Resolves the field rules of one source against a document.
///
/// Each rule yields one ordered text sequence; row `i` of the result is
/// built from node `i` of every sequence, so document order is preserved
/// and becomes the tie-break order for matching.
///
/// # Errors
///
/// Returns [`ProviderError::Candidates`] when any sequence is empty or the
/// sequences disagree on length; a malformed page must surface as an error,
/// never as an empty result.
pub(crate) fn extract_candidates<const N: usize>(
    document: &str,
    kind: &'static str,
    block_marker: &str,
    rules: &[FieldRule; N],
) -> Result<Vec<[String; N]>, ProviderError> {
    let blocks = record_blocks(document, block_marker);

    let mut columns: Vec<Vec<String>> = Vec::with_capacity(N);
    for rule in rules {
        let column: Vec<String> = blocks
            .iter()
            .filter_map(|block| select_text(block, rule))
            .map(|text| field_text(&text, rule.strip_label))
            .collect();
        columns.push(column);
    }

    let length = columns.first().map_or(0, Vec::len);
    if length == 0 || columns.iter().any(|column| column.len() != length) {
        return Err(ProviderError::Candidates(kind));
    }

    Ok((0..length)
        .map(|index| std::array::from_fn(|field| columns[field][index].clone()))
        .collect())
}

/// A field's raw text may carry a label prefix ("Adresse : ..."); everything
/// up to and including the first colon goes, then the text is cleaned.
fn field_text(raw: &str, strip_label: bool) -> String {
    let text = if strip_label {
        raw.split_once(':').map_or(raw, |(_, rest)| rest)
    } else {
        raw
    };
    clean(text)
}
