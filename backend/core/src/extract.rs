//! Numeric extraction from raw OCR text.
//!
//! Receipt screenshots produce noisy text in mixed locale formats:
//! `1.234,56`, `1,234.56`, and `1.234.567` must all resolve to the value a
//! human would read. Tokens that survive the pattern but fail to parse are
//! dropped silently — OCR noise is expected, not an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional sign, digits, then any number of `.`/`,` groups each followed by
/// at least one digit. A trailing separator with no digits never matches.
static AMOUNT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?[0-9]+(?:[.,][0-9]+)*").unwrap());

/// Extract every numeric value found in `text`, in order of first appearance.
///
/// Never fails; an empty result means "no numeric content found" and the
/// caller decides how to react.
pub fn extract_amounts(text: &str) -> Vec<f64> {
    let mut amounts = Vec::new();

    for token in AMOUNT_TOKEN.find_iter(text) {
        let mut t = token.as_str().replace(' ', "");

        let dots = t.matches('.').count();
        let commas = t.matches(',').count();

        if dots > 1 || commas > 1 {
            // Repeated separators can only be thousands groupings.
            t = t.replace('.', "").replace(',', "");
        } else if dots == 1 && commas == 1 {
            // The later separator is the decimal point.
            let dot_at = t.rfind('.').unwrap_or(0);
            let comma_at = t.rfind(',').unwrap_or(0);
            if dot_at > comma_at {
                t = t.replace(',', "");
            } else {
                t = t.replace('.', "").replace(',', ".");
            }
        }

        let t = t.replace(',', ".");

        if let Ok(value) = t.parse::<f64>() {
            amounts.push(value);
        }
    }

    amounts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_formats_in_one_line() {
        assert_eq!(
            extract_amounts("12.50 and 1.234,56 and -3"),
            vec![12.50, 1234.56, -3.0]
        );
    }

    #[test]
    fn repeated_separator_is_thousands() {
        assert_eq!(extract_amounts("1.234.567"), vec![1_234_567.0]);
        assert_eq!(extract_amounts("1,234,567"), vec![1_234_567.0]);
    }

    #[test]
    fn us_style_grouping() {
        assert_eq!(extract_amounts("1,234.56"), vec![1234.56]);
    }

    #[test]
    fn comma_decimal_normalized() {
        assert_eq!(extract_amounts("7,5"), vec![7.5]);
    }

    #[test]
    fn no_numbers_yields_empty() {
        assert_eq!(extract_amounts("abc"), Vec::<f64>::new());
        assert_eq!(extract_amounts(""), Vec::<f64>::new());
    }

    #[test]
    fn lone_sign_never_matches() {
        assert_eq!(extract_amounts("- + -."), Vec::<f64>::new());
    }

    #[test]
    fn trailing_separator_excluded_at_pattern_stage() {
        // "12." matches only up to the digits; the dangling dot is ignored.
        assert_eq!(extract_amounts("12."), vec![12.0]);
    }

    #[test]
    fn signed_amounts() {
        assert_eq!(extract_amounts("+4,20 -1.00"), vec![4.20, -1.0]);
    }

    #[test]
    fn order_of_appearance_preserved() {
        assert_eq!(
            extract_amounts("total 9.99 tax 0.70 tip 2"),
            vec![9.99, 0.70, 2.0]
        );
    }

    #[test]
    fn ocr_noise_around_numbers() {
        assert_eq!(
            extract_amounts("TOTAL:~~ 45,90EUR *%!"),
            vec![45.90]
        );
    }
}
