//! HTML escaping for contact fields bound for a third party.

/// Escape `<`, `>`, `"`, `'` and `/` as character references, then trim.
///
/// Ampersands pass through untouched, so the function is not idempotent on
/// its own output; apply it exactly once, right before delivery.
///
/// # Examples
/// ```
/// use site_backend::domain::contact::sanitize_input;
///
/// assert_eq!(sanitize_input("<script>"), "&lt;script&gt;");
/// assert_eq!(sanitize_input("  plain text  "), "plain text");
/// ```
pub fn sanitize_input(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            other => escaped.push(other),
        }
    }
    escaped.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::tag("<script>", "&lt;script&gt;")]
    #[case::closing_tag("</p>", "&lt;&#x2F;p&gt;")]
    #[case::quotes(r#"say "hi" it's"#, "say &quot;hi&quot; it&#x27;s")]
    #[case::ampersand_untouched("Fish & Chips", "Fish & Chips")]
    #[case::trims("\n\t padded \r\n", "padded")]
    fn escapes_markup(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_input(input), expected);
    }

    #[test]
    fn output_never_contains_angle_brackets() {
        let out = sanitize_input("<img src=x onerror=alert(1)>");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
    }

    #[test]
    fn safe_input_is_unchanged() {
        let input = "Need help with a bridge project in Coomera, QLD.";
        assert_eq!(sanitize_input(input), input);
        assert_eq!(sanitize_input(&sanitize_input(input)), input);
    }
}
