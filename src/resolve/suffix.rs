//! Descending two-digit suffixes for duplicated names.
//!
//! The first occurrence of a name becomes `name.99`, the second `name.98`,
//! and so on down to `name.01`.

/// Number of occurrences a single name can be marked with
pub const MAX_OCCURRENCES: usize = 99;

/// Suffix value for a 1-based ordinal, `None` once the two-digit range is spent
pub fn abnormal_number(ordinal: usize) -> Option<usize> {
    if (1..=MAX_OCCURRENCES).contains(&ordinal) {
        Some(100 - ordinal)
    } else {
        None
    }
}

pub fn marked_name(name: &str, ordinal: usize) -> Option<String> {
    abnormal_number(ordinal).map(|number| format!("{}.{:02}", name, number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, Some(99))]
    #[case(2, Some(98))]
    #[case(99, Some(1))]
    #[case(0, None)]
    #[case(100, None)]
    fn test_abnormal_number(#[case] ordinal: usize, #[case] expected: Option<usize>) {
        assert_eq!(abnormal_number(ordinal), expected);
    }

    #[test]
    fn test_marked_name_is_zero_padded() {
        assert_eq!(marked_name("Alpha", 1).as_deref(), Some("Alpha.99"));
        assert_eq!(marked_name("Alpha", 95).as_deref(), Some("Alpha.05"));
        assert_eq!(marked_name("Alpha", 120), None);
    }

    #[test]
    fn test_names_with_dots_keep_their_text() {
        assert_eq!(marked_name("Mr. Mime", 2).as_deref(), Some("Mr. Mime.98"));
    }
}
