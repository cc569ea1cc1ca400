//! ddMMM travel-date handling
//!
//! Reservation commands address dates in the compact `26DEC` form. Parsing
//! resolves them against the clock's current year and rejects impossible
//! combinations (`31FEB`), which the command layer reports as a format error.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Parse a `ddMMM` token against the given year.
///
/// Returns `None` for malformed tokens and for day/month combinations that
/// do not exist in that year.
///
/// # Example
/// ```
/// use pnr_simulator_core::dates::parse_ddmmm;
///
/// assert!(parse_ddmmm("26DEC", 2030).is_some());
/// assert!(parse_ddmmm("31FEB", 2030).is_none());
/// ```
pub fn parse_ddmmm(token: &str, year: i32) -> Option<NaiveDate> {
    let token = token.as_bytes();
    if token.len() < 4 || token.len() > 5 {
        return None;
    }
    let split = token.len() - 3;
    let (day_part, mon_part) = token.split_at(split);
    let day: u32 = std::str::from_utf8(day_part).ok()?.parse().ok()?;
    let mon_part = std::str::from_utf8(mon_part).ok()?;
    let month = MONTHS.iter().position(|m| *m == mon_part)? as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date back to its `ddMMM` display form, e.g. `26DEC`.
pub fn format_ddmmm(date: NaiveDate) -> String {
    format!("{:02}{}", date.day(), MONTHS[date.month0() as usize])
}

/// Two-letter weekday code used by availability headers.
pub fn dow2(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}

/// `DOW MON DD YYYY` date banner printed by JD, e.g. `SUN DEC 01 2030`.
pub fn jd_banner(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_dates() {
        assert_eq!(
            parse_ddmmm("26DEC", 2030),
            NaiveDate::from_ymd_opt(2030, 12, 26)
        );
        assert_eq!(
            parse_ddmmm("1JAN", 2031),
            NaiveDate::from_ymd_opt(2031, 1, 1)
        );
        assert_eq!(
            parse_ddmmm("29FEB", 2028),
            NaiveDate::from_ymd_opt(2028, 2, 29)
        );
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert_eq!(parse_ddmmm("31FEB", 2030), None);
        assert_eq!(parse_ddmmm("29FEB", 2030), None);
        assert_eq!(parse_ddmmm("00JAN", 2030), None);
        assert_eq!(parse_ddmmm("26XYZ", 2030), None);
        assert_eq!(parse_ddmmm("DEC", 2030), None);
    }

    #[test]
    fn test_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(2030, 12, 26).unwrap();
        assert_eq!(format_ddmmm(date), "26DEC");
        assert_eq!(parse_ddmmm(&format_ddmmm(date), 2030), Some(date));
    }

    #[test]
    fn test_jd_banner_shape() {
        let date = NaiveDate::from_ymd_opt(2030, 12, 1).unwrap();
        assert_eq!(jd_banner(date), "SUN DEC 01 2030");
    }
}
