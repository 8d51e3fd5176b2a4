use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Fallible field parsers
// ---------------------------------------------------------------------------
//
// Every helper returns `None` instead of an error: a malformed cell only
// loses that one value, the owning row is always kept.

static FIRST_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("static regex is valid"));

/// Parse a float, rejecting empty input, text without any digit and
/// non-finite results (`"inf"`, `"NaN"`).
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `"$350,000"` → `350000.0`.
pub fn parse_currency(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    parse_number(&cleaned)
}

/// First run of ASCII digits: `"3 bd"` → `3.0`, `"N/A"` → `None`.
pub fn parse_count(s: &str) -> Option<f64> {
    FIRST_DIGITS
        .find(s)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// `"1,800 sqft"` → `1800.0`.
pub fn parse_area(s: &str) -> Option<f64> {
    parse_number(&s.replace("sqft", "").replace(',', ""))
}

/// Whole number such as a year. Accepts `"1998"` and `"1998.0"`.
pub fn parse_int(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i32>() {
        return Some(i);
    }
    parse_number(s)
        .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
        .map(|v| v as i32)
}

/// Split `"Name - Company"` once on `" - "`.
pub fn split_agent(s: &str) -> (String, Option<String>) {
    match s.split_once(" - ") {
        Some((name, company)) => (name.to_string(), Some(company.to_string())),
        None => (s.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_strips_dollar_and_commas() {
        assert_eq!(parse_currency("$350,000"), Some(350_000.0));
        assert_eq!(parse_currency("$1,250,000"), Some(1_250_000.0));
        assert_eq!(parse_currency("$99"), Some(99.0));
        assert_eq!(parse_currency("  $4,500.50 "), Some(4_500.5));
    }

    #[test]
    fn currency_without_digits_is_missing() {
        assert_eq!(parse_currency("N/A"), None);
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("$inf"), None);
        assert_eq!(parse_currency("NaN"), None);
    }

    #[test]
    fn currency_with_trailing_garbage_is_missing() {
        assert_eq!(parse_currency("$350,000 (est)"), None);
    }

    #[test]
    fn count_takes_first_digit_run() {
        assert_eq!(parse_count("3 bd"), Some(3.0));
        assert_eq!(parse_count("12 ba"), Some(12.0));
        assert_eq!(parse_count("about 2 or 3"), Some(2.0));
        assert_eq!(parse_count("N/A"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn count_ignores_non_ascii_digits() {
        // Arabic-Indic three followed by an ASCII four.
        assert_eq!(parse_count("\u{0663} or 4 bd"), Some(4.0));
    }

    #[test]
    fn area_strips_unit_and_commas() {
        assert_eq!(parse_area("1,800 sqft"), Some(1_800.0));
        assert_eq!(parse_area("12,345sqft"), Some(12_345.0));
        assert_eq!(parse_area("950"), Some(950.0));
        assert_eq!(parse_area("unknown sqft"), None);
    }

    #[test]
    fn int_accepts_plain_and_float_years() {
        assert_eq!(parse_int("1998"), Some(1998));
        assert_eq!(parse_int(" 2005 "), Some(2005));
        assert_eq!(parse_int("1998.0"), Some(1998));
        assert_eq!(parse_int("1998.5"), None);
        assert_eq!(parse_int("old"), None);
    }

    #[test]
    fn agent_split_with_and_without_company() {
        assert_eq!(
            split_agent("Jane Doe - ABC Realty"),
            ("Jane Doe".to_string(), Some("ABC Realty".to_string()))
        );
        assert_eq!(split_agent("Jane Doe"), ("Jane Doe".to_string(), None));
    }

    #[test]
    fn agent_split_only_once() {
        assert_eq!(
            split_agent("Jane Doe - Smith - Jones Realty"),
            ("Jane Doe".to_string(), Some("Smith - Jones Realty".to_string()))
        );
        // A bare hyphen is not the separator.
        assert_eq!(split_agent("Mary-Ann Lee"), ("Mary-Ann Lee".to_string(), None));
    }
}
