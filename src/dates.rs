use chrono::{Datelike, Local, NaiveDate};

pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next.and_then(|d| d.pred_opt()).unwrap_or(date)
}

/// Compact "5 Jan - 31 Jan" range for the budget rows. Falls back to
/// the raw strings when a date does not parse.
pub fn short_range(start: &str, end: &str) -> String {
    match (parse_iso(start), parse_iso(end)) {
        (Some(s), Some(e)) => format!("{} - {}", s.format("%-d %b"), e.format("%-d %b")),
        _ => format!("{} - {}", start, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_end_handles_leap_february() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(iso(last_day_of_month(d)), "2024-02-29");
        let d = NaiveDate::from_ymd_opt(2023, 2, 10).unwrap();
        assert_eq!(iso(last_day_of_month(d)), "2023-02-28");
    }

    #[test]
    fn month_end_handles_december() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        assert_eq!(iso(last_day_of_month(d)), "2024-12-31");
    }

    #[test]
    fn range_formats_short_dates() {
        assert_eq!(short_range("2024-01-05", "2024-01-31"), "5 Jan - 31 Jan");
    }

    #[test]
    fn range_falls_back_on_bad_input() {
        assert_eq!(short_range("soon", "2024-01-31"), "soon - 2024-01-31");
    }
}
