use crate::calc::grid::{self, CalendarGrid, DaySlot, DAY_NAMES};
use crate::calc::{Scope, ViewMode, ViewSelection};
use crate::data::{FetchOutcome, HolidayMap};
use chrono::{Datelike, NaiveDate};
use std::borrow::Cow;

pub const TITLE: &str = "Kalender Indonesia";
pub const SUBTITLE: &str = "Dengan Hari Libur Nasional";
pub const NO_DATA_WARNING: &str = "Tidak dapat memuat data hari libur. Silakan coba lagi nanti.";
pub const NO_HOLIDAY_IN_MONTH: &str = "Tidak ada hari libur nasional di bulan ini.";
pub const SOURCE_URL: &str = "https://api-harilibur.vercel.app/";

/// Legend entries: (colour name, meaning, style).
pub const LEGEND: [(&str, &str, CellStyle); 3] = [
    ("Ungu", "Hari ini", CellStyle::Today),
    ("Merah", "Hari libur nasional", CellStyle::Holiday),
    ("Kuning", "Akhir pekan", CellStyle::Weekend),
];

const NAME_LIMIT: usize = 20;
const NAME_KEEP: usize = 17;

/// Weekday names for the holiday list, Monday-first.
const WEEKDAY_NAMES: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellStyle {
    Today,
    Holiday,
    Weekend,
    Normal,
    Empty,
}

impl CellStyle {
    /// Extra CSS class on top of `day-cell`.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            CellStyle::Today => Some("today"),
            CellStyle::Holiday => Some("holiday"),
            CellStyle::Weekend => Some("weekend"),
            CellStyle::Normal => None,
            CellStyle::Empty => Some("empty-day"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub day: Option<u32>,
    pub style: CellStyle,
    pub label: Option<String>,
}

impl DayCell {
    fn empty() -> Self {
        DayCell {
            day: None,
            style: CellStyle::Empty,
            label: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthBlock {
    pub month: u32,
    pub header: String,
    pub day_names: [&'static str; 7],
    pub weeks: Vec<[DayCell; 7]>,
}

/// First match wins: today, holiday, weekend column, normal.
pub fn cell_style(
    date: NaiveDate,
    column: usize,
    holidays: &HolidayMap,
    today: NaiveDate,
) -> CellStyle {
    if date == today {
        CellStyle::Today
    } else if holidays.contains_key(&date) {
        CellStyle::Holiday
    } else if column == 0 || column == 6 {
        CellStyle::Weekend
    } else {
        CellStyle::Normal
    }
}

/// Names longer than 20 characters become their first 17 plus "...".
pub fn truncate_holiday_name(name: &str) -> Cow<'_, str> {
    if name.chars().count() > NAME_LIMIT {
        let kept: String = name.chars().take(NAME_KEEP).collect();
        Cow::Owned(format!("{kept}..."))
    } else {
        Cow::Borrowed(name)
    }
}

pub fn render_month(grid: &CalendarGrid, holidays: &HolidayMap, today: NaiveDate) -> MonthBlock {
    let weeks = grid
        .weeks
        .iter()
        .map(|week| {
            std::array::from_fn::<DayCell, 7, _>(|col| match (week[col], grid.date_at(week[col])) {
                (DaySlot::Day(day), Some(date)) => DayCell {
                    day: Some(day),
                    style: cell_style(date, col, holidays, today),
                    label: holidays
                        .get(&date)
                        .map(|name| truncate_holiday_name(name).into_owned()),
                },
                _ => DayCell::empty(),
            })
        })
        .collect();

    MonthBlock {
        month: grid.month,
        header: format!("{} {}", grid.month_name(), grid.year),
        day_names: DAY_NAMES,
        weeks,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayListEntry {
    pub date: NaiveDate,
    pub name: String,
    pub weekday: &'static str,
    pub date_text: String,
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// `17 Agustus 2025`, day zero-padded.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        grid::month_name(date.month()),
        date.year()
    )
}

pub fn render_holiday_list(holidays: &HolidayMap, scope: Scope) -> Vec<HolidayListEntry> {
    holidays
        .iter()
        .filter(|(date, _)| match scope {
            Scope::Month(m) => date.month() == m,
            Scope::Year => true,
        })
        .map(|(date, name)| HolidayListEntry {
            date: *date,
            name: name.clone(),
            weekday: weekday_name(*date),
            date_text: format_date(*date),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Info(String),
}

/// Everything a rendering layer needs for one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageModel {
    pub mode: ViewMode,
    pub section_title: Option<String>,
    pub months: Vec<MonthBlock>,
    pub list_title: String,
    pub holidays: Vec<HolidayListEntry>,
    pub notice: Option<Notice>,
}

impl PageModel {
    pub fn build(selection: &ViewSelection, outcome: &FetchOutcome) -> Result<Self, grid::GridError> {
        let today = selection.today();
        let months = selection
            .months()
            .into_iter()
            .map(|m| {
                grid::build(selection.year, m).map(|g| render_month(&g, &outcome.holidays, today))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let holidays = render_holiday_list(&outcome.holidays, selection.scope());
        let notice = if outcome.holidays.is_empty() {
            let text = match &outcome.warning {
                Some(err) => format!("{NO_DATA_WARNING} ({err})"),
                None => NO_DATA_WARNING.to_string(),
            };
            Some(Notice::Warning(text))
        } else if holidays.is_empty() {
            Some(Notice::Info(NO_HOLIDAY_IN_MONTH.to_string()))
        } else {
            None
        };

        let section_title = match selection.mode {
            ViewMode::FullYear => Some(format!("Kalender Tahun {}", selection.year)),
            _ => None,
        };

        Ok(PageModel {
            mode: selection.mode,
            section_title,
            months,
            list_title: format!("Daftar Hari Libur Nasional {}", selection.year),
            holidays,
            notice,
        })
    }

    /// Month blocks grouped into display rows: 3 per row for a full year,
    /// a single row otherwise.
    pub fn month_rows(&self) -> Vec<&[MonthBlock]> {
        match self.mode {
            ViewMode::FullYear => self.months.chunks(3).collect(),
            _ => vec![self.months.as_slice()],
        }
    }
}
