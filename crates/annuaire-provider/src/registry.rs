//! Business registry (source A): a single form-encoded search endpoint
//! returning repeated accordion result groups. Each group exposes four
//! fields in fixed positions; the street and town lines carry a label
//! prefix that is stripped before cleaning.

use std::sync::LazyLock;

use regex::Regex;

use annuaire_core::{matcher, Business, Query};

use crate::error::ProviderError;
use crate::extract::extract_candidates;
use crate::select::{FieldRule, Position};

const BLOCK_MARKER: &str = "accordion-group";

static HEADING_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<span\b[^>]*>(.*?)</span>").expect("valid regex"));
static BODY_PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("valid regex"));

static FIELD_RULES: [FieldRule; 4] = [
    // identifier: third heading span
    FieldRule {
        section: "accordion-heading",
        item: &HEADING_SPAN_RE,
        position: Position::Nth(2),
        strip_label: false,
    },
    // name: first heading span
    FieldRule {
        section: "accordion-heading",
        item: &HEADING_SPAN_RE,
        position: Position::Nth(0),
        strip_label: false,
    },
    // street line: fourth paragraph of the result body
    FieldRule {
        section: "result-left",
        item: &BODY_PARAGRAPH_RE,
        position: Position::Nth(3),
        strip_label: true,
    },
    // town line: fifth paragraph of the result body
    FieldRule {
        section: "result-left",
        item: &BODY_PARAGRAPH_RE,
        position: Position::Nth(4),
        strip_label: true,
    },
];

/// Form parameters for the registry search endpoint. Closed establishments
/// are always excluded.
pub(crate) fn search_form(query: &Query) -> Vec<(&'static str, String)> {
    vec![
        ("recherche.sirenSiret", query.id.clone()),
        ("recherche.raisonSociale", query.name.clone()),
        ("recherche.adresse", query.street.clone()),
        ("recherche.commune", query.town.clone()),
        ("recherche.excludeClosed", "true".to_owned()),
    ]
}

/// Extracts every registry candidate matching the cleaned query, preserving
/// document order.
///
/// # Errors
///
/// - [`ProviderError::Candidates`] when the page structure is inconsistent.
/// - [`ProviderError::NoBusiness`] when no candidate passes the matcher.
pub(crate) fn extract_businesses(
    page: &str,
    query: &Query,
) -> Result<Vec<Business>, ProviderError> {
    let rows = extract_candidates(page, "business", BLOCK_MARKER, &FIELD_RULES)?;
    let extended_query =
        matcher::Extended::new(&query.id, &query.name, &query.street, &query.town);

    let mut businesses = Vec::new();
    for [id, name, street, town] in rows {
        let candidate = matcher::Extended::new(&id, &name, &street, &town);
        if matcher::matches_business(&candidate, &extended_query) {
            businesses.push(Business {
                id,
                name,
                street,
                town,
                phone: None,
            });
        }
    }

    if businesses.is_empty() {
        return Err(ProviderError::NoBusiness);
    }
    Ok(businesses)
}
