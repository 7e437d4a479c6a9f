//! The canonical country table for phone validation and dial codes.
//!
//! One table serves both the pre-flight widget data and the authoritative
//! server checks; the old site carried two slightly different copies.

/// Validation and display data for one supported country.
///
/// Digit bounds are length-exact acceptance windows for the national number
/// with the dial prefix stripped, not prefix or checksum validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryPhoneRule {
    pub code: &'static str,
    pub name: &'static str,
    pub dial_code: &'static str,
    pub min_digits: usize,
    pub max_digits: usize,
}

impl CountryPhoneRule {
    /// Whether `phone` is all ASCII digits with a length this country accepts.
    pub fn matches(&self, phone: &str) -> bool {
        digits_only(phone) && (self.min_digits..=self.max_digits).contains(&phone.len())
    }
}

pub(crate) fn digits_only(phone: &str) -> bool {
    !phone.is_empty() && phone.bytes().all(|b| b.is_ascii_digit())
}

/// The closed set of countries the inquiry form supports.
pub const SUPPORTED_COUNTRIES: [CountryPhoneRule; 16] = [
    rule("AU", "Australia", "+61", 9, 9),
    rule("CN", "China", "+86", 11, 11),
    rule("HK", "Hong Kong", "+852", 8, 8),
    rule("US", "United States", "+1", 10, 10),
    rule("GB", "United Kingdom", "+44", 10, 10),
    rule("NZ", "New Zealand", "+64", 9, 9),
    rule("SG", "Singapore", "+65", 8, 8),
    rule("MY", "Malaysia", "+60", 9, 10),
    rule("IN", "India", "+91", 10, 10),
    rule("JP", "Japan", "+81", 10, 10),
    rule("KR", "South Korea", "+82", 9, 10),
    rule("TW", "Taiwan", "+886", 9, 9),
    rule("PH", "Philippines", "+63", 10, 10),
    rule("ID", "Indonesia", "+62", 9, 12),
    rule("TH", "Thailand", "+66", 9, 9),
    rule("VN", "Vietnam", "+84", 9, 10),
];

pub const DEFAULT_COUNTRY: &str = "AU";
pub const DEFAULT_DIAL_CODE: &str = "+61";

const fn rule(
    code: &'static str,
    name: &'static str,
    dial_code: &'static str,
    min_digits: usize,
    max_digits: usize,
) -> CountryPhoneRule {
    CountryPhoneRule {
        code,
        name,
        dial_code,
        min_digits,
        max_digits,
    }
}

/// Look up the rule for a country code, case-insensitively.
pub fn rule_for(code: &str) -> Option<&'static CountryPhoneRule> {
    let code = code.trim();
    SUPPORTED_COUNTRIES
        .iter()
        .find(|rule| rule.code.eq_ignore_ascii_case(code))
}

/// Dial code for a country, falling back to Australia for anything unknown.
pub fn dial_code_for(code: &str) -> &'static str {
    rule_for(code).map_or(DEFAULT_DIAL_CODE, |rule| rule.dial_code)
}

/// Map an IETF locale tag such as `en-AU` or `zh-Hans-CN` to a supported
/// country code. Unknown or missing regions resolve to Australia.
pub fn detect_country(locale: &str) -> &'static str {
    locale
        .split('-')
        .skip(1)
        .find_map(|subtag| {
            // Region subtags are exactly two letters; skip script subtags.
            if subtag.len() == 2 {
                rule_for(subtag).map(|rule| rule.code)
            } else {
                None
            }
        })
        .unwrap_or(DEFAULT_COUNTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_sixteen_countries_with_unique_codes() {
        let mut codes: Vec<&str> = SUPPORTED_COUNTRIES.iter().map(|rule| rule.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(rule_for("au").map(|r| r.dial_code), Some("+61"));
        assert_eq!(rule_for(" TW ").map(|r| r.dial_code), Some("+886"));
        assert!(rule_for("ZZ").is_none());
    }

    #[test]
    fn dial_code_falls_back_to_australia() {
        assert_eq!(dial_code_for("CN"), "+86");
        assert_eq!(dial_code_for("XX"), "+61");
        assert_eq!(dial_code_for(""), "+61");
    }

    #[test]
    fn exact_length_windows() {
        let au = rule_for("AU").expect("AU supported");
        assert!(au.matches("412345678"));
        assert!(!au.matches("41234567"));
        assert!(!au.matches("4123456789"));
        assert!(!au.matches("41234567a"));

        let my = rule_for("MY").expect("MY supported");
        assert!(my.matches("123456789"));
        assert!(my.matches("1234567890"));
        assert!(!my.matches("12345678"));
    }

    #[test]
    fn locale_detection_reads_the_region_subtag() {
        assert_eq!(detect_country("en-AU"), "AU");
        assert_eq!(detect_country("zh-Hans-CN"), "CN");
        assert_eq!(detect_country("en"), "AU");
        assert_eq!(detect_country("fr-FR"), "AU");
    }
}
