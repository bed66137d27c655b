//! Requisition UID generation.
//!
//! Requisitions carry a human-readable UID of the form
//! `REQ-<department initial>-<year>-<sequence>`. The sequence is scoped
//! per department per calendar year, starts at 1, and is allocated from
//! a persistent counter so numbers are never reused even after
//! requisitions are deleted.

/// Returns the department initial used in requisition UIDs.
///
/// The first alphanumeric character of the name, uppercased. Falls back
/// to `X` for names without one.
#[must_use]
pub fn department_initial(name: &str) -> char {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .map_or('X', |c| c.to_ascii_uppercase())
}

/// Formats a requisition UID.
///
/// Sequence numbers are zero-padded to three digits and grow beyond
/// that without truncation.
#[must_use]
pub fn requisition_uid(department_name: &str, year: i32, sequence: u32) -> String {
    format!(
        "REQ-{}-{}-{:03}",
        department_initial(department_name),
        year,
        sequence
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_format() {
        assert_eq!(requisition_uid("Operations", 2026, 1), "REQ-O-2026-001");
        assert_eq!(requisition_uid("Finance", 2026, 42), "REQ-F-2026-042");
    }

    #[test]
    fn test_sequence_grows_beyond_three_digits() {
        assert_eq!(requisition_uid("Finance", 2026, 1234), "REQ-F-2026-1234");
    }

    #[test]
    fn test_initial_is_uppercased() {
        assert_eq!(department_initial("marketing"), 'M');
    }

    #[test]
    fn test_initial_skips_punctuation() {
        assert_eq!(department_initial("  - IT Support"), 'I');
    }

    #[test]
    fn test_initial_fallback() {
        assert_eq!(department_initial("***"), 'X');
        assert_eq!(department_initial(""), 'X');
    }
}
