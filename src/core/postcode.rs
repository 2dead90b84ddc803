use regex::Regex;
use std::sync::LazyLock;

static UK_POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]?\s?[0-9][A-Z]{2}$").expect("valid postcode pattern")
});

/// Strips all whitespace and upper-cases. Used as the cache key and lookup parameter.
pub fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn is_valid_uk_postcode(postcode: &str) -> bool {
    UK_POSTCODE.is_match(postcode.trim())
}

/// Normalizes and puts a single space before the inward code (last three characters).
///
/// Inputs of three characters or fewer have no outward code and come back
/// normalized without a space.
pub fn format_postcode(postcode: &str) -> String {
    let normalized = normalize_postcode(postcode);
    let Some((split_at, _)) = normalized.char_indices().rev().nth(2) else {
        return normalized;
    };
    if split_at == 0 {
        return normalized;
    }

    let (outward, inward) = normalized.split_at(split_at);
    format!("{} {}", outward, inward)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_postcodes() {
        assert!(is_valid_uk_postcode("SW1A 1AA"));
        assert!(is_valid_uk_postcode("sw1a1aa"));
        assert!(is_valid_uk_postcode("M1 1AE"));
        assert!(is_valid_uk_postcode("B33 8TH"));
        assert!(is_valid_uk_postcode("CR2 6XH"));
        assert!(is_valid_uk_postcode("DN55 1PT"));
        assert!(is_valid_uk_postcode("  EC1A 1BB  "));
    }

    #[test]
    fn test_invalid_postcodes() {
        assert!(!is_valid_uk_postcode("12345"));
        assert!(!is_valid_uk_postcode(""));
        assert!(!is_valid_uk_postcode("   "));
        assert!(!is_valid_uk_postcode("SW1A  1AA"));
        assert!(!is_valid_uk_postcode("SW1A 1A"));
        assert!(!is_valid_uk_postcode("ABC1 1AA"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_postcode(" sw1a\t1aa\n"), "SW1A1AA");
        assert_eq!(normalize_postcode(""), "");
    }

    #[test]
    fn test_format_postcode() {
        assert_eq!(format_postcode("sw1a1aa"), "SW1A 1AA");
        assert_eq!(format_postcode("m1 1ae"), "M1 1AE");
        assert_eq!(format_postcode("SW1A 1AA"), "SW1A 1AA");
    }

    #[test]
    fn test_format_short_input() {
        assert_eq!(format_postcode("1aa"), "1AA");
        assert_eq!(format_postcode("a"), "A");
        assert_eq!(format_postcode(""), "");
        assert_eq!(format_postcode("x1aa"), "X 1AA");
    }

    #[test]
    fn test_format_non_ascii_does_not_panic() {
        assert_eq!(format_postcode("é1aa"), "É 1AA");
    }
}
