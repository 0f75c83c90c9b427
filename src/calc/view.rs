use chrono::{Datelike, NaiveDate};
use std::ops::RangeInclusive;

/// How many years before the current one the year selector offers.
pub const YEARS_BEFORE: i32 = 2;
/// How many years after the current one the year selector offers.
pub const YEARS_AFTER: i32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    CurrentMonth,
    SpecificMonth,
    FullYear,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [
        ViewMode::CurrentMonth,
        ViewMode::SpecificMonth,
        ViewMode::FullYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::CurrentMonth => "Bulan Ini",
            ViewMode::SpecificMonth => "Bulan Tertentu",
            ViewMode::FullYear => "Seluruh Tahun",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ViewMode::CurrentMonth => ViewMode::SpecificMonth,
            ViewMode::SpecificMonth => ViewMode::FullYear,
            ViewMode::FullYear => ViewMode::CurrentMonth,
        }
    }
}

/// Which part of the fetched year the holiday list covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Month(u32),
    Year,
}

/// Selector years around `today`: `[year - 2, year + 4]`.
pub fn year_window(today: NaiveDate) -> RangeInclusive<i32> {
    let y = today.year();
    (y - YEARS_BEFORE)..=(y + YEARS_AFTER)
}

/// User-chosen state for one render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSelection {
    pub year: i32,
    /// Month picked in the month selector; only read in `SpecificMonth`.
    pub month: u32,
    pub mode: ViewMode,
    today: NaiveDate,
}

impl ViewSelection {
    /// Defaults match the page on first load: current year, current month.
    pub fn new(today: NaiveDate) -> Self {
        ViewSelection {
            year: today.year(),
            month: today.month(),
            mode: ViewMode::CurrentMonth,
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Sets the year, clamped into the selector window.
    pub fn set_year(&mut self, year: i32) {
        let window = year_window(self.today);
        self.year = year.clamp(*window.start(), *window.end());
    }

    pub fn set_month(&mut self, month: u32) {
        self.month = month.clamp(1, 12);
    }

    pub fn shift_year(&mut self, delta: i32) {
        self.set_year(self.year + delta);
    }

    /// Steps the month selector, wrapping December to January and back.
    pub fn shift_month(&mut self, delta: i32) {
        let m = (self.month as i32 - 1 + delta).rem_euclid(12) + 1;
        self.month = m as u32;
    }

    /// Months whose grids are drawn, in display order.
    pub fn months(&self) -> Vec<u32> {
        match self.mode {
            ViewMode::CurrentMonth => vec![self.today.month()],
            ViewMode::SpecificMonth => vec![self.month],
            ViewMode::FullYear => (1..=12).collect(),
        }
    }

    pub fn scope(&self) -> Scope {
        match self.mode {
            ViewMode::CurrentMonth => Scope::Month(self.today.month()),
            ViewMode::SpecificMonth => Scope::Month(self.month),
            ViewMode::FullYear => Scope::Year,
        }
    }
}
