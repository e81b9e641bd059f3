//! Structural detection of canonical UUID text.

/// Length of the hyphenated UUID text form, measured in UTF-16 code units.
pub const CANONICAL_LEN: usize = 36;

/// Returns `true` when `id` already looks like a canonical UUID.
///
/// This is a structural check only: 36 UTF-16 code units with at least one
/// hyphen. Strings such as `"------------------------------------"` pass, and
/// that is accepted. Length is counted the way browser strings count it so
/// ids that round-trip through the web client classify identically.
#[must_use]
pub fn is_canonical(id: &str) -> bool {
    id.contains('-') && id.encode_utf16().count() == CANONICAL_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_text_is_canonical() {
        assert!(is_canonical("2eb511a1-5f38-41a7-8e75-3f4e65f4942e"));
    }

    #[test]
    fn test_object_id_is_not_canonical() {
        assert!(!is_canonical("507f1f77bcf86cd799439011"));
    }

    #[test]
    fn test_36_chars_without_hyphen_is_not_canonical() {
        let id = "a".repeat(CANONICAL_LEN);
        assert!(!is_canonical(&id));
    }

    #[test]
    fn test_hyphenated_but_wrong_length_is_not_canonical() {
        assert!(!is_canonical("2eb511a1-5f38-41a7-8e75"));
        assert!(!is_canonical("2eb511a1-5f38-41a7-8e75-3f4e65f4942e0"));
    }

    #[test]
    fn test_check_is_structural_not_a_validator() {
        let id = format!("{}-", "z".repeat(CANONICAL_LEN - 1));
        assert!(is_canonical(&id));
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // 'é' is two bytes in UTF-8 but a single UTF-16 unit.
        let id = format!("{}-{}", "é".repeat(10), "a".repeat(25));
        assert_eq!(id.len(), 46);
        assert!(is_canonical(&id));
    }
}
