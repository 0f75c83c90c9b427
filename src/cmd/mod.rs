pub mod holidays;
pub mod html;
pub mod init;
pub mod root;

use crate::calc::view::year_window;
use crate::data::{AppSettings, HolidayCache, HolidayFetcher, ReqwestTransport};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

/// Builds the live fetcher from the loaded settings.
pub(crate) fn make_fetcher(settings: &AppSettings) -> Result<HolidayFetcher<ReqwestTransport>> {
    let transport =
        ReqwestTransport::new(settings.timeout()).context("failed to build HTTP client")?;
    Ok(HolidayFetcher::new(settings.api_url.clone(), transport))
}

pub(crate) fn make_cache(settings: &AppSettings) -> HolidayCache {
    HolidayCache::new(settings.cache_ttl())
}

/// Rejects years outside the selector window around `today`.
pub(crate) fn check_year(year: i32, today: NaiveDate) -> Result<()> {
    let window = year_window(today);
    if !window.contains(&year) {
        bail!(
            "year {} is outside the supported range {}..={}",
            year,
            window.start(),
            window.end()
        );
    }
    Ok(())
}
