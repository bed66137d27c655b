//! Input sanitization helpers.
//!
//! Free-text fields (request descriptions, justifications) are stored
//! without markup. Stripping happens before length validation so tag
//! padding cannot satisfy minimum-length rules.

/// Removes markup tags from free text.
///
/// Everything between `<` and the matching `>` is dropped; an unclosed
/// `<` drops the rest of the string. Surrounding whitespace is trimmed.
#[must_use]
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("new office chairs", "new office chairs")]
    #[case("<b>new</b> office <i>chairs</i>", "new office chairs")]
    #[case("<script>alert('x')</script>budget for Q3", "alert('x')budget for Q3")]
    #[case("before <img src=", "before")]
    #[case("  padded  ", "padded")]
    #[case("", "")]
    fn test_strip_markup(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_markup(input), expected);
    }
}
