use crate::calc::{ViewMode, ViewSelection};
use crate::data::{AppSettings, HolidayFetcher, HolidayTransport};
use crate::render::html::{render_page, write_page};
use crate::render::PageModel;
use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use std::io::Write;
use std::path::Path;

pub fn run(
    settings: &AppSettings,
    year: i32,
    mode: ViewMode,
    month: Option<u32>,
    out: Option<&Path>,
) -> Result<()> {
    let today = Local::now().date_naive();
    super::check_year(year, today)?;
    check_month_flag(mode, month)?;
    let fetcher = super::make_fetcher(settings)?;
    let page = build_page(&fetcher, year, mode, month, today)?;

    match out {
        Some(path) => {
            write_page(&page, path)?;
            println!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{}", render_page(&page).into_string())?;
        }
    }
    Ok(())
}

/// `--month` only picks the month of the `month` view.
pub(crate) fn check_month_flag(mode: ViewMode, month: Option<u32>) -> Result<()> {
    if month.is_some() && mode != ViewMode::SpecificMonth {
        bail!("--month only applies to --view month, not \"{}\"", mode.label());
    }
    Ok(())
}

/// One render pass: a single fetch for the year, then grids and list.
pub(crate) fn build_page<T: HolidayTransport>(
    fetcher: &HolidayFetcher<T>,
    year: i32,
    mode: ViewMode,
    month: Option<u32>,
    today: NaiveDate,
) -> Result<PageModel> {
    let mut selection = ViewSelection::new(today);
    selection.set_year(year);
    selection.mode = mode;
    if let Some(m) = month {
        selection.set_month(m);
    }
    let outcome = fetcher.fetch(selection.year);
    Ok(PageModel::build(&selection, &outcome)?)
}
