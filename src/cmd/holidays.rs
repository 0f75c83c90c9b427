use crate::calc::Scope;
use crate::data::{AppSettings, FetchOutcome};
use crate::render::view_model::{render_holiday_list, NO_DATA_WARNING, NO_HOLIDAY_IN_MONTH};
use anyhow::Result;
use chrono::Local;

pub fn run(settings: &AppSettings, year: i32, month: Option<u32>) -> Result<()> {
    super::check_year(year, Local::now().date_naive())?;
    let fetcher = super::make_fetcher(settings)?;
    let outcome = fetcher.fetch(year);
    let scope = month.map_or(Scope::Year, |m| Scope::Month(m.clamp(1, 12)));
    write_holidays(year, &outcome, scope, &mut std::io::stdout())
}

pub(crate) fn write_holidays<W: std::io::Write>(
    year: i32,
    outcome: &FetchOutcome,
    scope: Scope,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Daftar Hari Libur Nasional {year}")?;
    writeln!(out, "---")?;
    if outcome.holidays.is_empty() {
        writeln!(out, "{NO_DATA_WARNING}")?;
        if let Some(err) = &outcome.warning {
            writeln!(out, "  ({err})")?;
        }
        return Ok(());
    }

    let entries = render_holiday_list(&outcome.holidays, scope);
    if entries.is_empty() {
        writeln!(out, "{NO_HOLIDAY_IN_MONTH}")?;
        return Ok(());
    }
    writeln!(out, "  {:<8} {:<20} {}", "Hari", "Tanggal", "Nama")?;
    for e in &entries {
        writeln!(out, "  {:<8} {:<20} {}", e.weekday, e.date_text, e.name)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} hari libur", entries.len())?;
    Ok(())
}
