//! Numeric parsing for columns that arrive as dirty strings.
//!
//! Source exports carry stray characters (`?` in card numbers, `£` on prices,
//! letters in staff counts). Callers strip those first and then parse.

/// Remove every occurrence of the given characters.
pub fn strip_chars(value: &str, chars: &[char]) -> String {
    value.chars().filter(|c| !chars.contains(c)).collect()
}

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Parse an integer, accepting whole floats such as `"7.0"`.
///
/// Returns None for empty or non-numeric input.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let float: f64 = trimmed.parse().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

/// Parse a floating point number after trimming whitespace.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_chars() {
        assert_eq!(strip_chars("??4971858637664481", &['?']), "4971858637664481");
        assert_eq!(strip_chars("£39.99", &['£']), "39.99");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("J78"), "78");
        assert_eq!(digits_only("3n9"), "39");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn test_parse_i64() {
        assert_eq!(parse_i64("12"), Some(12));
        assert_eq!(parse_i64(" 7.0 "), Some(7));
        assert_eq!(parse_i64("-3"), Some(-3));
        assert_eq!(parse_i64("7.5"), None);
        assert_eq!(parse_i64(""), None);
        assert_eq!(parse_i64("seven"), None);
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("39.99"), Some(39.99));
        assert_eq!(parse_f64("  1.5 "), Some(1.5));
        assert_eq!(parse_f64("1.5a"), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.453_592_4, 3), 0.454);
        assert_eq!(round_to(1.0, 3), 1.0);
    }
}
