//! Phone cleaning and normalization.
//!
//! Two distinct forms are used:
//! - the *cleaned* form (separators stripped, leading `+` kept) is what
//!   gets persisted and displayed;
//! - the *normalized* form (last 10 digits) is used only for per-salon
//!   duplicate detection, so `+380 50 123-45-67` and `0501234567` map to
//!   the same client record.

/// Strip spaces, dashes and parentheses, keeping digits and a leading `+`.
pub fn clean_phone(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// True if `cleaned` matches the national format `+380XXXXXXXXX`
/// (9 digits after the country code).
pub fn is_valid_public_phone(cleaned: &str) -> bool {
    let Some(rest) = cleaned.strip_prefix("+380") else {
        return false;
    };
    rest.len() == 9 && rest.bytes().all(|b| b.is_ascii_digit())
}

/// Last 10 digits of the number, for dedup comparison only.
pub fn normalize_phone(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    let start = digits.len().saturating_sub(10);
    digits[start..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_separators() {
        assert_eq!(clean_phone("+380 50 123-45-67"), "+380501234567");
        assert_eq!(clean_phone("(050) 123 45 67"), "0501234567");
        assert_eq!(clean_phone("  +380501234567  "), "+380501234567");
    }

    #[test]
    fn validates_national_format() {
        assert!(is_valid_public_phone("+380501234567"));
        assert!(!is_valid_public_phone("380501234567"));
        assert!(!is_valid_public_phone("+38050123456"));
        assert!(!is_valid_public_phone("+3805012345678"));
        assert!(!is_valid_public_phone("+38050123456a"));
        assert!(!is_valid_public_phone(""));
    }

    #[test]
    fn normalizes_to_last_ten_digits() {
        assert_eq!(normalize_phone("+380501234567"), "0501234567");
        assert_eq!(normalize_phone("0501234567"), "0501234567");
        assert_eq!(normalize_phone("+380 50 123-45-67"), "0501234567");
    }

    #[test]
    fn formatting_variants_normalize_identically() {
        assert_eq!(
            normalize_phone("+380 (50) 123-45-67"),
            normalize_phone("+380501234567")
        );
    }

    #[test]
    fn short_numbers_keep_all_digits() {
        assert_eq!(normalize_phone("12345"), "12345");
    }
}
