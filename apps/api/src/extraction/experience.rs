//! Years-of-experience inference from free text.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static EXPLICIT_YEARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*\+?\s*years?").expect("valid explicit-years regex"));

static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})\s*[-–—]\s*(\d{4})").expect("valid year-range regex"));

static OPEN_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})\s*[-–—]\s*(present|current|now)").expect("valid open-range regex")
});

/// Infers years of experience using the current calendar year for open ranges.
pub fn extract_experience(text: &str) -> u32 {
    extract_experience_as_of(text, Utc::now().year())
}

/// Infers years of experience. Rules are tried in order and the first one that matches wins:
///
/// 1. `N years` / `N+ years` → N
/// 2. one or more `YYYY-YYYY` ranges → sum of (end − start), floored at 0
/// 3. `YYYY-present|current|now` → `current_year` − start, floored at 0
/// 4. otherwise 0
pub fn extract_experience_as_of(text: &str, current_year: i32) -> u32 {
    let lowered = text.to_lowercase();

    if let Some(caps) = EXPLICIT_YEARS.captures(&lowered) {
        // digits only, so parsing fails on overflow alone
        return caps[1].parse::<u32>().unwrap_or(u32::MAX);
    }

    let mut found_range = false;
    let mut total: i64 = 0;
    for caps in YEAR_RANGE.captures_iter(text) {
        if let (Ok(start), Ok(end)) = (caps[1].parse::<i64>(), caps[2].parse::<i64>()) {
            found_range = true;
            total += end - start;
        }
    }
    if found_range {
        return clamp_years(total);
    }

    if let Some(start) = OPEN_RANGE
        .captures(&lowered)
        .and_then(|caps| caps[1].parse::<i64>().ok())
    {
        return clamp_years(i64::from(current_year) - start);
    }

    0
}

fn clamp_years(years: i64) -> u32 {
    years.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_years_with_plus() {
        assert_eq!(extract_experience("5+ years of experience"), 5);
    }

    #[test]
    fn test_explicit_single_year() {
        assert_eq!(extract_experience("At least 1 year in production support"), 1);
    }

    #[test]
    fn test_oversized_year_count_saturates() {
        assert_eq!(extract_experience("99999999999 years, 2010-2020"), u32::MAX);
    }

    #[test]
    fn test_single_date_range() {
        assert_eq!(extract_experience("2018-2023"), 5);
    }

    #[test]
    fn test_multiple_ranges_are_summed() {
        let text = "Acme 2015 - 2018, Globex 2018–2020, Initech 2020—2021";
        assert_eq!(extract_experience(text), 6);
    }

    #[test]
    fn test_inverted_ranges_floor_at_zero() {
        assert_eq!(extract_experience("2023-2018"), 0);
    }

    #[test]
    fn test_open_range_uses_current_year() {
        assert_eq!(extract_experience_as_of("2020-present", 2026), 6);
        assert_eq!(extract_experience_as_of("2019 – Current", 2026), 7);
        assert_eq!(extract_experience_as_of("2021-now", 2026), 5);
    }

    #[test]
    fn test_open_range_against_wall_clock() {
        let expected = (Utc::now().year() - 2020) as u32;
        assert_eq!(extract_experience("2020-present"), expected);
    }

    #[test]
    fn test_future_start_floors_at_zero() {
        assert_eq!(extract_experience_as_of("2030-present", 2026), 0);
    }

    #[test]
    fn test_explicit_years_take_precedence_over_ranges() {
        assert_eq!(extract_experience("2010-2020, 3 years in Rust"), 3);
    }

    #[test]
    fn test_closed_ranges_take_precedence_over_open_ranges() {
        assert_eq!(extract_experience_as_of("2012-2014 then 2020-present", 2026), 2);
    }

    #[test]
    fn test_no_pattern_is_zero() {
        assert_eq!(extract_experience("no dates here"), 0);
    }
}
