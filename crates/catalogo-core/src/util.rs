const BOM: char = '\u{feff}';

pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(BOM).unwrap_or(s)
}

/// Case folding used by every string filter.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Strict decimal parse; rejects empty input, NaN and infinities.
pub fn parse_number(s: &str) -> Option<f64> {
    let n = s.trim().parse::<f64>().ok()?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_only_stripped_at_start() {
        assert_eq!(strip_bom("\u{feff}Language"), "Language");
        assert_eq!(strip_bom("Lang\u{feff}uage"), "Lang\u{feff}uage");
        assert_eq!(strip_bom("Language"), "Language");
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number(" 1500.5 "), Some(1500.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
