use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;

const BUDDHIST_OFFSET: i32 = 543;
const BUDDHIST_ERA_FLOOR: i32 = 2500;

const THAI_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.",
    "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];

#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),
    #[error("วันที่เริ่มต้นต้องไม่เกินวันที่สิ้นสุด")]
    RangeReversed,
}

pub fn buddhist_year(year: i32) -> i32 {
    year + BUDDHIST_OFFSET
}

/// Year as shown in Thai date headers; values already in the Buddhist era pass through.
pub fn display_year(year: i32) -> i32 {
    if year < BUDDHIST_ERA_FLOOR {
        buddhist_year(year)
    } else {
        year
    }
}

pub fn thai_month(date: NaiveDate) -> &'static str {
    THAI_MONTHS[date.month0() as usize]
}

pub fn format_buddhist_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), thai_month(date), buddhist_year(date.year()))
}

/// Parses `YYYY-MM-DD`. Years from 2500 up are read as Buddhist era.
pub fn parse_report_date(text: &str) -> Result<NaiveDate, DateError> {
    let trimmed = text.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DateError::Invalid(trimmed.to_string()))?;
    if date.year() < BUDDHIST_ERA_FLOOR {
        return Ok(date);
    }
    date.with_year(date.year() - BUDDHIST_OFFSET)
        .ok_or_else(|| DateError::Invalid(trimmed.to_string()))
}

pub fn parse_or_today(text: Option<&str>) -> Result<NaiveDate, DateError> {
    match text.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_report_date(value),
        None => Ok(today()),
    }
}

pub fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), DateError> {
    if start > end {
        return Err(DateError::RangeReversed);
    }
    Ok(())
}

pub fn iso_compact(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_with_thai_month_and_buddhist_year() {
        assert_eq!(format_buddhist_date(ymd(2024, 5, 1)), "1 พ.ค. 2567");
        assert_eq!(format_buddhist_date(ymd(2025, 12, 31)), "31 ธ.ค. 2568");
        assert_eq!(format_buddhist_date(ymd(2023, 1, 9)), "9 ม.ค. 2566");
    }

    #[test]
    fn display_year_leaves_buddhist_years_alone() {
        assert_eq!(display_year(2024), 2567);
        assert_eq!(display_year(2567), 2567);
        assert_eq!(display_year(2499), 3042);
    }

    #[test]
    fn parses_gregorian_and_buddhist_input() {
        assert_eq!(parse_report_date("2024-05-01").unwrap(), ymd(2024, 5, 1));
        assert_eq!(parse_report_date(" 2567-05-01 ").unwrap(), ymd(2024, 5, 1));
        assert!(matches!(parse_report_date("01/05/2024"), Err(DateError::Invalid(_))));
        assert!(matches!(parse_report_date("2024-02-30"), Err(DateError::Invalid(_))));
    }

    #[test]
    fn buddhist_leap_day_without_gregorian_counterpart_is_rejected() {
        // 2568 BE is 2025 CE, which has no Feb 29
        assert!(parse_report_date("2568-02-29").is_err());
    }

    #[test]
    fn empty_input_defaults_to_today() {
        assert_eq!(parse_or_today(None).unwrap(), today());
        assert_eq!(parse_or_today(Some("  ")).unwrap(), today());
    }

    #[test]
    fn range_must_not_be_reversed() {
        assert!(check_range(ymd(2024, 1, 1), ymd(2024, 1, 1)).is_ok());
        assert!(matches!(
            check_range(ymd(2024, 2, 1), ymd(2024, 1, 1)),
            Err(DateError::RangeReversed)
        ));
    }

    #[test]
    fn compact_iso_for_file_names() {
        assert_eq!(iso_compact(ymd(2024, 5, 1)), "20240501");
    }
}
