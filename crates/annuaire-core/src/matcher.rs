//! Field-by-field comparison of extended records.
//!
//! Both comparisons take the more complete record as the reference: when
//! matching registry candidates against a query the candidate is the
//! reference, and when matching directory candidates against a resolved
//! business the business is the reference.

use crate::address::AddressComponents;
use crate::text::normalize;

/// A record augmented with its derived address components; exists only
/// while matching and is never mutated after construction.
#[derive(Debug, Clone)]
pub struct Extended {
    pub id: String,
    pub name: String,
    pub address: AddressComponents,
}

impl Extended {
    #[must_use]
    pub fn new(id: &str, name: &str, street: &str, town: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            address: AddressComponents::of(street, town),
        }
    }
}

/// Containment comparator: the reference string must contain the
/// approximation as a substring after normalization. An empty approximation
/// always passes.
#[must_use]
pub fn contains(reference: &str, approximation: &str) -> bool {
    normalize(reference).contains(&normalize(approximation))
}

/// Exact-or-absent comparator for street numbers and postcodes: passes when
/// either value is empty or both are equal. Absence is never disqualifying.
#[must_use]
pub fn exact_or_absent(reference: &str, approximation: &str) -> bool {
    reference.is_empty() || approximation.is_empty() || reference == approximation
}

fn matches_address(reference: &AddressComponents, approximation: &AddressComponents) -> bool {
    exact_or_absent(&reference.street_number, &approximation.street_number)
        && contains(&reference.street_name, &approximation.street_name)
        && exact_or_absent(&reference.town_postcode, &approximation.town_postcode)
        && contains(&reference.town_name, &approximation.town_name)
}

/// A registry candidate matches when every field the query specifies is
/// contained in it.
#[must_use]
pub fn matches_business(candidate: &Extended, query: &Extended) -> bool {
    contains(&candidate.id, &query.id)
        && contains(&candidate.name, &query.name)
        && matches_address(&candidate.address, &query.address)
}

/// A directory candidate matches when it is contained in the resolved
/// business. Directory entries carry no identifier, so the id comparator is
/// skipped.
#[must_use]
pub fn matches_phone(business: &Extended, candidate: &Extended) -> bool {
    contains(&business.name, &candidate.name)
        && matches_address(&business.address, &candidate.address)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experdeco() -> Extended {
        Extended::new(
            "30383024400024",
            "EXPERDECO",
            "70 RTE GIFFRE",
            "74970 MARIGNIER",
        )
    }

    #[test]
    fn exact_or_absent_passes_when_either_side_is_empty() {
        assert!(exact_or_absent("74970", ""));
        assert!(exact_or_absent("", "74970"));
        assert!(exact_or_absent("", ""));
    }

    #[test]
    fn exact_or_absent_requires_equality_when_both_present() {
        assert!(exact_or_absent("74970", "74970"));
        assert!(!exact_or_absent("74970", "74300"));
    }

    #[test]
    fn contains_ignores_case_accents_and_punctuation() {
        assert!(contains("EXPERDECO", "Experdéco"));
        assert!(contains("70 RTE GIFFRE", "rte-giffre"));
    }

    #[test]
    fn empty_query_matches_any_candidate() {
        let query = Extended::new("", "", "", "");
        assert!(matches_business(&experdeco(), &query));
    }

    #[test]
    fn id_only_query_matches() {
        let query = Extended::new("30383024400024", "", "", "");
        assert!(matches_business(&experdeco(), &query));
    }

    #[test]
    fn wrong_postcode_rejects_candidate() {
        let query = Extended::new("", "experdeco", "", "74300 CLUSES");
        assert!(!matches_business(&experdeco(), &query));
    }

    #[test]
    fn partial_name_matches_fuller_candidate() {
        let query = Extended::new("", "experdeco", "", "marignier");
        assert!(matches_business(&experdeco(), &query));
    }

    #[test]
    fn phone_match_is_keyed_on_the_business_as_reference() {
        let candidate = Extended::new("", "Experdéco", "70 rte Giffre", "74970 Marignier");
        assert!(matches_phone(&experdeco(), &candidate));

        // A candidate more specific than the business fails containment.
        let wider = Extended::new("", "EXPERDECO BATIMENT SAS", "70 rte Giffre", "74970 Marignier");
        assert!(!matches_phone(&experdeco(), &wider));
    }

    #[test]
    fn phone_match_skips_the_identifier() {
        let candidate = Extended::new(
            "unrelated-id",
            "EXPERDECO",
            "70 RTE GIFFRE",
            "74970 MARIGNIER",
        );
        assert!(matches_phone(&experdeco(), &candidate));
    }

    #[test]
    fn candidate_without_street_number_still_matches() {
        let candidate = Extended::new("", "EXPERDECO", "rte Giffre", "74970 Marignier");
        assert!(matches_phone(&experdeco(), &candidate));
    }
}
