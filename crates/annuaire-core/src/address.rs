//! Decomposition of street and town lines into comparable components.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Nd}+").expect("valid regex"));
static TRAILING_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\s\p{Pd}]+$").expect("valid regex"));
static TOWN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\s\p{Nd}].*$").expect("valid regex"));

/// Components derived from a street line and a town line at match time.
/// Never persisted; the records themselves keep the raw lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressComponents {
    pub street_number: String,
    pub street_name: String,
    pub town_postcode: String,
    pub town_name: String,
}

impl AddressComponents {
    /// Decomposes already-cleaned street and town lines. Number and name are
    /// extracted independently; there is no cross-validation between them.
    #[must_use]
    pub fn of(street: &str, town: &str) -> Self {
        Self {
            street_number: street_number(street),
            street_name: street_name(street),
            town_postcode: town_postcode(town),
            town_name: town_name(town),
        }
    }
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default()
}

/// Longest leading digit run, or empty when the street does not start with
/// digits.
#[must_use]
pub fn street_number(text: &str) -> String {
    first_match(&LEADING_DIGITS_RE, text)
}

/// Longest trailing run of non-whitespace, non-hyphen characters.
#[must_use]
pub fn street_name(text: &str) -> String {
    first_match(&TRAILING_WORD_RE, text)
}

/// Longest leading digit run, or empty when the town does not start with a
/// postcode.
#[must_use]
pub fn town_postcode(text: &str) -> String {
    first_match(&LEADING_DIGITS_RE, text)
}

/// Substring from the first non-digit, non-whitespace character to the end.
#[must_use]
pub fn town_name(text: &str) -> String {
    first_match(&TOWN_NAME_RE, text)
}
