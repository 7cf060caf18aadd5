//! Month grid for the calendar view.
//!
//! Weeks always start on Monday, whatever the host locale says, and every
//! comparison happens on calendar days so time-of-day and DST shifts never
//! move a climb to another cell.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use serde::Serialize;

pub const FIRST_WEEKDAY: Weekday = Weekday::Mon;
pub const MIN_ROWS: usize = 5;
pub const WEEKDAY_TITLES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Anything that falls on a single calendar day.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub day_number: Option<u32>,
    pub is_in_current_month: bool,
}

impl DayCell {
    fn day(date: Option<NaiveDate>, day_number: u32, is_in_current_month: bool) -> Self {
        Self {
            date,
            day_number: Some(day_number),
            is_in_current_month,
        }
    }

    fn filler() -> Self {
        Self {
            date: None,
            day_number: None,
            is_in_current_month: true,
        }
    }

    pub fn day_number_text(&self) -> String {
        self.day_number.map(|d| d.to_string()).unwrap_or_default()
    }

    /// Filler cells carry no date and cannot be picked.
    pub fn is_selectable(&self) -> bool {
        self.date.is_some()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cells: Vec<DayCell>,
    pub rows: usize,
}

impl MonthGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// Index of the cell holding `date`, if the grid shows that day.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.cells.iter().position(|c| c.date == Some(date))
    }
}

pub fn normalize(date: &impl CalendarDay) -> NaiveDate {
    date.calendar_day()
}

pub fn month_start(date: &impl CalendarDay) -> NaiveDate {
    let day = date.calendar_day();
    day.checked_sub_days(Days::new(day.day0() as u64)).unwrap_or(day)
}

/// Calendar month arithmetic; the day is clamped to the target month's
/// length. Dates outside chrono's range are returned unchanged.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => (add_months(first, 1) - first).num_days() as u32,
        None => 0,
    }
}

/// Number of previous-month cells shown before the 1st.
pub fn leading_days(first_day: NaiveDate) -> u32 {
    let weekday = first_day.weekday().num_days_from_monday();
    let first = FIRST_WEEKDAY.num_days_from_monday();
    (weekday + 7 - first) % 7
}

pub fn build_month_grid(month: &impl CalendarDay) -> MonthGrid {
    let first_day = month_start(month);
    let number_of_days = days_in_month(first_day.year(), first_day.month());

    let leading = leading_days(first_day);
    let used = leading + number_of_days;
    let trailing = (7 - used % 7) % 7;
    let total = (used + trailing) as usize;
    let rows = MIN_ROWS.max(total.div_ceil(7));
    let needed = rows * 7;

    let mut cells = Vec::with_capacity(needed);

    if leading > 0 {
        let prev_first = add_months(first_day, -1);
        let prev_count = days_in_month(prev_first.year(), prev_first.month());
        for day in (prev_count + 1 - leading)..=prev_count {
            cells.push(DayCell::day(prev_first.with_day(day), day, false));
        }
    }

    for day in 1..=number_of_days {
        cells.push(DayCell::day(first_day.with_day(day), day, true));
    }

    if trailing > 0 {
        let next_first = add_months(first_day, 1);
        for day in 1..=trailing {
            cells.push(DayCell::day(next_first.with_day(day), day, false));
        }
    }

    // Only reached when a four-week month is stretched to the minimum rows.
    cells.resize(needed, DayCell::filler());

    MonthGrid { cells, rows }
}

pub fn has_climbings<D: CalendarDay>(date: &impl CalendarDay, climb_dates: &[D]) -> bool {
    let target = normalize(date);
    climb_dates.iter().any(|d| normalize(d) == target)
}

/// A month grid together with which of its cells have at least one climb.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub first_day: NaiveDate,
    pub grid: MonthGrid,
    pub activity: Vec<bool>,
}

impl CalendarMonth {
    pub fn title(&self) -> String {
        month_title(&self.first_day)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&DayCell, bool)> {
        self.grid.cells.iter().zip(self.activity.iter().copied())
    }
}

pub fn build_calendar_month<D: CalendarDay>(month: &impl CalendarDay, climb_dates: &[D]) -> CalendarMonth {
    let days: HashSet<NaiveDate> = climb_dates.iter().map(|d| d.calendar_day()).collect();
    let grid = build_month_grid(month);
    let activity = grid
        .cells
        .iter()
        .map(|cell| cell.date.is_some_and(|d| days.contains(&d)))
        .collect();

    CalendarMonth {
        first_day: month_start(month),
        grid,
        activity,
    }
}

/// Full English month name, e.g. "March".
pub fn month_title(date: &impl CalendarDay) -> String {
    date.calendar_day().format("%B").to_string()
}

/// Day and month as "dd.MM", used in climb rows.
pub fn day_month_text(date: &impl CalendarDay) -> String {
    date.calendar_day().format("%d.%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveTime};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn in_month_numbers(grid: &MonthGrid) -> Vec<u32> {
        grid.cells
            .iter()
            .filter(|c| c.is_in_current_month)
            .filter_map(|c| c.day_number)
            .collect()
    }

    #[test]
    fn test_every_month_has_full_rows_and_contiguous_days() {
        for year in 1999..=2032 {
            for month in 1..=12 {
                let first = ymd(year, month, 1);
                let grid = build_month_grid(&first);
                assert!(grid.rows >= MIN_ROWS);
                assert_eq!(grid.cells.len(), grid.rows * 7);

                let expected: Vec<u32> = (1..=days_in_month(year, month)).collect();
                assert_eq!(in_month_numbers(&grid), expected, "{}-{}", year, month);

                let leading = leading_days(first) as usize;
                assert!(grid.cells[..leading].iter().all(|c| !c.is_in_current_month));
                assert_eq!(grid.cells[leading].date, Some(first));
            }
        }
    }

    #[test]
    fn test_month_starting_on_monday_has_no_leading_days() {
        // June 2026 starts on a Monday.
        let grid = build_month_grid(&ymd(2026, 6, 17));
        assert_eq!(leading_days(ymd(2026, 6, 1)), 0);
        assert_eq!(grid.cells[0].date, Some(ymd(2026, 6, 1)));
        assert_eq!(grid.rows, 5);

        let tail: Vec<_> = grid.cells[30..].iter().map(|c| c.date).collect();
        assert_eq!(tail, (1..=5).map(|d| Some(ymd(2026, 7, d))).collect::<Vec<_>>());
        assert!(grid.cells[30..].iter().all(|c| !c.is_in_current_month));
    }

    #[test]
    fn test_four_week_february_is_padded_to_five_rows() {
        // February 2027 starts on a Monday and spans exactly four weeks.
        let grid = build_month_grid(&ymd(2027, 2, 1));
        assert_eq!(grid.rows, 5);
        assert_eq!(grid.cells.len(), 35);
        for cell in &grid.cells[28..] {
            assert_eq!(*cell, DayCell { date: None, day_number: None, is_in_current_month: true });
            assert!(!cell.is_selectable());
            assert_eq!(cell.day_number_text(), "");
        }
    }

    #[test]
    fn test_leap_february() {
        // February 2024 starts on a Thursday.
        let grid = build_month_grid(&ymd(2024, 2, 10));
        assert_eq!(grid.rows, 5);
        let leading: Vec<_> = grid.cells[..3].iter().map(|c| c.date).collect();
        assert_eq!(leading, vec![Some(ymd(2024, 1, 29)), Some(ymd(2024, 1, 30)), Some(ymd(2024, 1, 31))]);
        assert_eq!(grid.cells[31].date, Some(ymd(2024, 2, 29)));
        assert_eq!(grid.cells[32].date, Some(ymd(2024, 3, 1)));
        assert_eq!(grid.cells[34].day_number, Some(3));
    }

    #[test]
    fn test_six_row_month() {
        // August 2026 starts on a Saturday: 5 leading + 31 days.
        let grid = build_month_grid(&ymd(2026, 8, 1));
        assert_eq!(grid.rows, 6);
        assert_eq!(grid.cells.len(), 42);
        assert_eq!(grid.cells[0].date, Some(ymd(2026, 7, 27)));
        assert_eq!(grid.cells[41].date, Some(ymd(2026, 9, 6)));
        assert!(grid.cells.iter().all(|c| c.date.is_some()));
    }

    #[test]
    fn test_adjacent_months_cross_year_boundaries() {
        let january = build_month_grid(&ymd(2026, 1, 20));
        assert_eq!(january.cells[0].date, Some(ymd(2025, 12, 29)));
        assert_eq!(january.cells[0].day_number, Some(29));

        let december = build_month_grid(&ymd(2025, 12, 31));
        let last = december.cells.iter().rev().find(|c| c.date.is_some()).unwrap();
        assert_eq!(last.date, Some(ymd(2026, 1, 4)));
    }

    #[test]
    fn test_grid_is_deterministic() {
        let month = ymd(2026, 3, 9);
        assert_eq!(build_month_grid(&month), build_month_grid(&month));

        let climbs = vec![ymd(2026, 3, 1), ymd(2026, 2, 27)];
        assert_eq!(build_calendar_month(&month, &climbs), build_calendar_month(&month, &climbs));
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(month_start(&ymd(2026, 3, 31)), ymd(2026, 3, 1));
        assert_eq!(add_months(ymd(2026, 1, 31), 1), ymd(2026, 2, 28));
        assert_eq!(add_months(ymd(2026, 1, 1), -1), ymd(2025, 12, 1));
        assert_eq!(add_months(add_months(ymd(2026, 3, 1), 1), -1), ymd(2026, 3, 1));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2026, 13), 0);
        assert_eq!(month_title(&ymd(2026, 3, 5)), "March");
        assert_eq!(day_month_text(&ymd(2026, 3, 5)), "05.03");
    }

    #[test]
    fn test_normalize_ignores_time_of_day() {
        let early = ymd(2026, 3, 5).and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap());
        let late = ymd(2026, 3, 5).and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert_eq!(normalize(&early), normalize(&late));
        assert!(has_climbings(&early, &[late]));
        assert!(!has_climbings(&ymd(2026, 3, 6), &[late]));

        let local = Local.with_ymd_and_hms(2026, 3, 5, 23, 59, 0).unwrap();
        assert_eq!(normalize(&local), ymd(2026, 3, 5));
    }

    #[test]
    fn test_activity_covers_adjacent_month_days() {
        // March 2026 starts on a Sunday, so Feb 23..28 lead the grid.
        let climbs = vec![ymd(2026, 2, 24), ymd(2026, 3, 5), ymd(2026, 3, 5), ymd(2026, 5, 1)];
        let month = build_calendar_month(&ymd(2026, 3, 1), &climbs);

        assert_eq!(month.title(), "March");
        let active: Vec<NaiveDate> = month
            .cells()
            .filter(|(_, active)| *active)
            .filter_map(|(cell, _)| cell.date)
            .collect();
        assert_eq!(active, vec![ymd(2026, 2, 24), ymd(2026, 3, 5)]);

        let idx = month.grid.position_of(ymd(2026, 2, 24)).unwrap();
        assert!(!month.grid.cells[idx].is_in_current_month);
    }
}
