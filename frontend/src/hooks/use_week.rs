use chrono::NaiveDate;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils::{
    add_days, display_month_day, iso_date, monday_of, today, weekday_abbrev,
};

/// One column of the booking grid.
#[derive(Clone, PartialEq)]
pub struct WeekDay {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`, the form appointment records carry
    pub date_str: String,
    pub day_name: &'static str,
    pub display: String,
}

/// The Monday-to-Friday window derived from an arbitrary reference date.
pub fn week_days(week_start: NaiveDate) -> Vec<WeekDay> {
    (0..5)
        .map(|i| {
            let date = add_days(week_start, i);
            WeekDay {
                date,
                date_str: iso_date(date),
                day_name: weekday_abbrev(date),
                display: display_month_day(date),
            }
        })
        .collect()
}

#[derive(Clone, PartialEq)]
pub struct WeekState {
    pub week_start: NaiveDate,
    pub week_days: Vec<WeekDay>,
}

#[derive(Clone, PartialEq)]
pub struct UseWeekActions {
    pub prev_week: Callback<MouseEvent>,
    pub next_week: Callback<MouseEvent>,
}

pub struct UseWeekResult {
    pub state: WeekState,
    pub actions: UseWeekActions,
}

/// Week-window navigation shared by the student and admin grids. The window
/// is always Monday-to-Friday, recomputed by rolling the reference date back
/// to the nearest Monday.
#[hook]
pub fn use_week() -> UseWeekResult {
    let current_date = use_state(today);

    let week_start = monday_of(*current_date);

    let prev_week = {
        let current_date = current_date.clone();
        Callback::from(move |_: MouseEvent| {
            current_date.set(add_days(monday_of(*current_date), -7));
        })
    };

    let next_week = {
        let current_date = current_date.clone();
        Callback::from(move |_: MouseEvent| {
            current_date.set(add_days(monday_of(*current_date), 7));
        })
    };

    UseWeekResult {
        state: WeekState {
            week_start,
            week_days: week_days(week_start),
        },
        actions: UseWeekActions {
            prev_week,
            next_week,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn week_days_are_five_consecutive_weekdays() {
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let days = week_days(monday);

        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date.weekday(), Weekday::Mon);
        assert_eq!(days[4].date.weekday(), Weekday::Fri);
        assert_eq!(days[0].date_str, "2025-03-10");
        assert_eq!(days[4].date_str, "2025-03-14");
        assert_eq!(days[2].day_name, "WED");
    }

    #[wasm_bindgen_test]
    fn display_forms_match_column_headers() {
        let monday = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let days = week_days(monday);
        assert_eq!(days[0].display, "11/3");
        assert_eq!(days[0].day_name, "MON");
    }
}
