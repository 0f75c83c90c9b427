use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Day-name row of a month block, Sunday-first like the grid itself.
pub const DAY_NAMES: [&str; 7] = ["Min", "Sen", "Sel", "Rab", "Kam", "Jum", "Sab"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),
    #[error("year {0} is outside the supported date range")]
    InvalidYear(i32),
}

/// One position in a week row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DaySlot {
    Day(u32),
    Empty,
}

impl DaySlot {
    pub fn day(self) -> Option<u32> {
        match self {
            DaySlot::Day(n) => Some(n),
            DaySlot::Empty => None,
        }
    }
}

pub type Week = [DaySlot; 7];

/// Week-major layout of one month, Sunday in slot 0 and Saturday in slot 6.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

impl CalendarGrid {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    /// The date a slot stands for, or `None` for padding.
    pub fn date_at(&self, slot: DaySlot) -> Option<NaiveDate> {
        slot.day()
            .and_then(|d| NaiveDate::from_ymd_opt(self.year, self.month, d))
    }
}

/// Lays out `month` of `year` into Sunday-first weeks.
pub fn build(year: i32, month: u32) -> Result<CalendarGrid, GridError> {
    if !(1..=12).contains(&month) {
        return Err(GridError::InvalidMonth(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(GridError::InvalidYear(year))?;
    let total = days_in_month(year, month)?;
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::with_capacity(6);
    let mut week = [DaySlot::Empty; 7];
    let mut col = lead;
    for day in 1..=total {
        week[col] = DaySlot::Day(day);
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [DaySlot::Empty; 7];
            col = 0;
        }
    }
    if col > 0 {
        weeks.push(week);
    }

    Ok(CalendarGrid { year, month, weeks })
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, GridError> {
    if !(1..=12).contains(&month) {
        return Err(GridError::InvalidMonth(month));
    }
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(GridError::InvalidYear(year))?;
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or(GridError::InvalidYear(next_year))?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Januari",
        2 => "Februari",
        3 => "Maret",
        4 => "April",
        5 => "Mei",
        6 => "Juni",
        7 => "Juli",
        8 => "Agustus",
        9 => "September",
        10 => "Oktober",
        11 => "November",
        12 => "Desember",
        _ => "Tidak diketahui",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(grid: &CalendarGrid) -> Vec<u32> {
        grid.weeks
            .iter()
            .flat_map(|w| w.iter().filter_map(|s| s.day()))
            .collect()
    }

    #[test]
    fn test_every_month_lays_out_each_day_once_in_order() {
        for year in [1999, 2000, 2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let grid = build(year, month).unwrap();
                let n = days_in_month(year, month).unwrap();
                assert_eq!(days(&grid), (1..=n).collect::<Vec<_>>(), "{year}-{month}");
                assert!(grid.weeks.iter().all(|w| w.len() == 7));
                assert!((4..=6).contains(&grid.weeks.len()));
            }
        }
    }

    #[test]
    fn test_first_day_sits_in_its_sunday_first_column() {
        for month in 1..=12 {
            let grid = build(2025, month).unwrap();
            let first = NaiveDate::from_ymd_opt(2025, month, 1).unwrap();
            let col = first.weekday().num_days_from_sunday() as usize;
            assert_eq!(grid.weeks[0][col], DaySlot::Day(1));
            assert!(grid.weeks[0][..col].iter().all(|s| *s == DaySlot::Empty));
        }
    }

    #[test]
    fn test_leap_february_has_29() {
        let grid = build(2024, 2).unwrap();
        assert!(days(&grid).contains(&29));
    }

    #[test]
    fn test_non_leap_february_ends_at_28_then_padding() {
        let grid = build(2023, 2).unwrap();
        assert!(!days(&grid).contains(&29));
        let last = grid.weeks.last().unwrap();
        // 2023-02-28 is a Tuesday
        assert_eq!(last[2], DaySlot::Day(28));
        assert!(last[3..].iter().all(|s| *s == DaySlot::Empty));
    }

    #[test]
    fn test_february_2015_fits_in_four_weeks() {
        // starts on Sunday, 28 days
        let grid = build(2015, 2).unwrap();
        assert_eq!(grid.weeks.len(), 4);
        assert_eq!(grid.weeks[0][0], DaySlot::Day(1));
        assert_eq!(grid.weeks[3][6], DaySlot::Day(28));
    }

    #[test]
    fn test_six_week_month() {
        // 2025-08-01 is a Friday, 31 days
        let grid = build(2025, 8).unwrap();
        assert_eq!(grid.weeks.len(), 6);
        assert_eq!(grid.weeks[0][5], DaySlot::Day(1));
        assert_eq!(grid.weeks[5][0], DaySlot::Day(31));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        assert_eq!(build(2025, 0), Err(GridError::InvalidMonth(0)));
        assert_eq!(build(2025, 13), Err(GridError::InvalidMonth(13)));
    }

    #[test]
    fn test_days_in_month_values() {
        assert_eq!(days_in_month(2025, 1).unwrap(), 31);
        assert_eq!(days_in_month(2025, 4).unwrap(), 30);
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
    }

    #[test]
    fn test_month_name_known_values() {
        assert_eq!(month_name(1), "Januari");
        assert_eq!(month_name(8), "Agustus");
        assert_eq!(month_name(12), "Desember");
    }

    #[test]
    fn test_month_name_unknown() {
        assert_eq!(month_name(0), "Tidak diketahui");
        assert_eq!(month_name(13), "Tidak diketahui");
    }

    #[test]
    fn test_date_at_maps_slots() {
        let grid = build(2025, 8).unwrap();
        assert_eq!(
            grid.date_at(DaySlot::Day(17)),
            NaiveDate::from_ymd_opt(2025, 8, 17)
        );
        assert_eq!(grid.date_at(DaySlot::Empty), None);
    }
}
