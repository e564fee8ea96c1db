//! EU destination membership and CBAM applicability.

use crate::types::ProductCategory;

/// Destinations subject to the EU Carbon Border Adjustment Mechanism.
pub const EU_ZONE: [&str; 6] = ["Germany", "France", "Italy", "Spain", "Netherlands", "Belgium"];

/// True when `destination` names a country in [`EU_ZONE`].
///
/// Matching ignores surrounding whitespace and ASCII case.
pub fn is_eu_destination(destination: &str) -> bool {
    let name = destination.trim();
    EU_ZONE.iter().any(|c| c.eq_ignore_ascii_case(name))
}

/// CBAM is charged only on carbon-intensive goods shipped into the EU zone.
pub fn cbam_applies(destination: &str, category: ProductCategory) -> bool {
    category == ProductCategory::CarbonIntensive && is_eu_destination(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zone_members_match() {
        for country in EU_ZONE {
            assert!(is_eu_destination(country), "{country} should be EU");
        }
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert!(is_eu_destination("  germany "));
        assert!(is_eu_destination("NETHERLANDS"));
    }

    #[test]
    fn test_non_members() {
        assert!(!is_eu_destination("USA"));
        assert!(!is_eu_destination("United Kingdom"));
        assert!(!is_eu_destination(""));
    }

    #[test]
    fn test_cbam_requires_both_conditions() {
        assert!(cbam_applies("France", ProductCategory::CarbonIntensive));
        assert!(!cbam_applies("France", ProductCategory::GeneralGoods));
        assert!(!cbam_applies("UAE", ProductCategory::CarbonIntensive));
    }
}
