//! CLI argument validators.

/// Parse a confidence threshold.
///
/// Only the number format is checked; the value is passed to the model as-is.
pub fn parse_threshold(s: &str) -> Result<f32, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold_valid() {
        assert_eq!(parse_threshold("0.25").ok(), Some(0.25));
        assert_eq!(parse_threshold(" 0.5 ").ok(), Some(0.5));
        assert_eq!(parse_threshold("1").ok(), Some(1.0));
    }

    #[test]
    fn test_parse_threshold_out_of_range_is_accepted() {
        assert_eq!(parse_threshold("1.5").ok(), Some(1.5));
        assert_eq!(parse_threshold("-0.1").ok(), Some(-0.1));
    }

    #[test]
    fn test_parse_threshold_invalid() {
        let err = parse_threshold("abc").unwrap_err();
        assert!(err.contains("not a valid number"));
        assert!(parse_threshold("").is_err());
    }
}
