//! Phone directory (source B): path-keyed lookup returning repeated record
//! entries, each exposing a name, a street line, a town line, and a phone
//! text field.

use std::sync::LazyLock;

use regex::Regex;

use annuaire_core::{matcher, Business};

use crate::error::ProviderError;
use crate::extract::extract_candidates;
use crate::select::{FieldRule, Position};

const BLOCK_MARKER: &str = "bi_denomination";

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h2\b[^>]*>(.*?)</h2>").expect("valid regex"));
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("valid regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("valid regex"));

static FIELD_RULES: [FieldRule; 4] = [
    // name: the entry heading
    FieldRule {
        section: "bi_denomination",
        item: &HEADING_RE,
        position: Position::Nth(0),
        strip_label: false,
    },
    // street: first address paragraph
    FieldRule {
        section: "bi_adress",
        item: &PARAGRAPH_RE,
        position: Position::Nth(0),
        strip_label: false,
    },
    // town: last address paragraph
    FieldRule {
        section: "bi_adress",
        item: &PARAGRAPH_RE,
        position: Position::Last,
        strip_label: false,
    },
    // phone: text of the last call-to-action link
    FieldRule {
        section: "bi_cta",
        item: &LINK_RE,
        position: Position::Last,
        strip_label: false,
    },
];

/// Scans directory candidates in document order and returns the formatted
/// phone number of the first one matching the resolved business.
///
/// # Errors
///
/// - [`ProviderError::Candidates`] when the page structure is inconsistent.
/// - [`ProviderError::NoPhone`] when no candidate passes the matcher, or
///   the matching entry's phone text has no digits.
pub(crate) fn extract_phone(page: &str, business: &Business) -> Result<String, ProviderError> {
    let rows = extract_candidates(page, "phone", BLOCK_MARKER, &FIELD_RULES)?;
    let extended_business = matcher::Extended::new(
        &business.id,
        &business.name,
        &business.street,
        &business.town,
    );

    for [name, street, town, phone] in rows {
        let candidate = matcher::Extended::new("", &name, &street, &town);
        if matcher::matches_phone(&extended_business, &candidate) {
            return format_phone(&phone).ok_or(ProviderError::NoPhone);
        }
    }
    Err(ProviderError::NoPhone)
}

/// Renders an already-cleaned phone text as `+33 <subscriber number>`.
///
/// The leading digit run is parsed as an integer, which drops the national
/// trunk-prefix zero ("0450346354" renders as "+33 450346354"). The drop is
/// deliberate and kept as-is for every input.
fn format_phone(text: &str) -> Option<String> {
    let digits: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .take_while(char::is_ascii_digit)
        .collect();
    let subscriber: u64 = digits.parse().ok()?;
    Some(format!("+33 {subscriber}"))
}
