use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Number of half-hour labels in the bookable day (09:00 up to 18:00).
const SLOT_COUNT: u32 = 18;
const START_HOUR: u32 = 9;

/// Monday of the ISO week containing `date`. Sunday counts as day 7 of the
/// prior week, so it rolls back to the *previous* Monday.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let days_back = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(days_back)
}

/// Shift a date by `n` calendar days; `n` may be negative.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// `YYYY-MM-DD` for the local calendar day. `NaiveDate` carries no timezone,
/// so the day can never shift through a UTC conversion.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The fixed ordered half-hour labels from 09:00 up to (not including)
/// 18:00. A configuration constant of the booking grid, never derived from
/// server data.
pub fn time_slots() -> Vec<String> {
    (0..SLOT_COUNT)
        .map(|i| format!("{:02}:{:02}", START_HOUR + i / 2, (i % 2) * 30))
        .collect()
}

/// Current date in the browser's local calendar. The only impure entry
/// point in this module; everything else is referentially transparent.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    let year = now.get_full_year() as i32;
    // JavaScript months are 0-indexed
    let month = now.get_month() + 1;
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Short uppercase weekday name for grid column headers.
pub fn weekday_abbrev(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

/// `M/D` display form for grid column headers.
pub fn display_month_day(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[wasm_bindgen_test]
    fn monday_of_lands_on_monday_for_every_weekday() {
        // 2025-03-10 is a Monday
        for offset in 0..7 {
            let monday = monday_of(date(2025, 3, 10) + Duration::days(offset));
            assert_eq!(monday.weekday(), Weekday::Mon);
            assert_eq!(monday, date(2025, 3, 10));
        }
    }

    #[wasm_bindgen_test]
    fn sunday_rolls_back_to_previous_monday() {
        // 2025-03-16 is a Sunday; its week started 2025-03-10
        assert_eq!(monday_of(date(2025, 3, 16)), date(2025, 3, 10));
    }

    #[wasm_bindgen_test]
    fn monday_of_is_idempotent() {
        let d = date(2025, 7, 31);
        assert_eq!(monday_of(monday_of(d)), monday_of(d));
    }

    #[wasm_bindgen_test]
    fn add_days_crosses_month_boundaries_both_ways() {
        assert_eq!(add_days(date(2025, 1, 30), 3), date(2025, 2, 2));
        assert_eq!(add_days(date(2025, 3, 2), -3), date(2025, 2, 27));
    }

    #[wasm_bindgen_test]
    fn iso_date_roundtrips() {
        let d = date(2025, 11, 3);
        let s = iso_date(d);
        assert_eq!(s, "2025-11-03");
        let parsed = NaiveDate::parse_from_str(&s, "%Y-%m-%d").unwrap();
        assert_eq!(iso_date(parsed), s);
    }

    #[wasm_bindgen_test]
    fn time_slots_are_eighteen_ascending_labels() {
        let slots = time_slots();
        assert_eq!(slots.len(), 18);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("17:30"));
        for pair in slots.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }
}
