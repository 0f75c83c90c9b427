use crate::data::fetcher::FetchError;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Holiday name keyed by date, for one fetched year.
pub type HolidayMap = BTreeMap<NaiveDate, String>;

/// One record of the holiday API response. Fields the API adds beyond these
/// (e.g. `is_national_holiday`) are ignored.
#[derive(Deserialize, Clone, Debug)]
pub struct Holiday {
    pub holiday_date: String,
    pub holiday_name: String,
}

impl Holiday {
    pub fn new(name: &str, date: &str) -> Self {
        Holiday {
            holiday_name: name.to_string(),
            holiday_date: date.to_string(),
        }
    }

    pub fn parse_date(&self) -> Result<NaiveDate, FetchError> {
        NaiveDate::parse_from_str(&self.holiday_date, "%Y-%m-%d").map_err(|e| {
            FetchError::Parse(format!("invalid holiday_date '{}': {e}", self.holiday_date))
        })
    }
}

/// Parses a JSON response body into a `HolidayMap` for `year`.
///
/// One unparseable date fails the whole body. Records dated outside `year`
/// are dropped so every key belongs to the fetched year.
pub fn parse_holidays(body: &str, year: i32) -> Result<HolidayMap, FetchError> {
    let records: Vec<Holiday> =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let mut map = HolidayMap::new();
    for h in &records {
        let date = h.parse_date()?;
        if date.year() != year {
            log::warn!(
                "dropping holiday '{}' dated {date}, outside requested year {year}",
                h.holiday_name
            );
            continue;
        }
        map.insert(date, h.holiday_name.clone());
    }
    Ok(map)
}
