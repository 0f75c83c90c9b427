use crate::data::holiday::{parse_holidays, HolidayMap};
use std::time::Duration;
use thiserror::Error;

/// Why a fetch produced no holidays. Never escapes `HolidayFetcher::fetch`;
/// it only travels along as a warning.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },
    #[error("could not parse holiday data: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The single outbound call the fetcher makes.
pub trait HolidayTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kalender/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ReqwestTransport { client })
    }
}

impl HolidayTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Result of one fetch: the holidays (possibly empty) and, when the fetch
/// failed, the reason to surface as a warning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    pub holidays: HolidayMap,
    pub warning: Option<FetchError>,
}

impl FetchOutcome {
    pub fn ok(holidays: HolidayMap) -> Self {
        FetchOutcome {
            holidays,
            warning: None,
        }
    }

    pub fn failed(err: FetchError) -> Self {
        FetchOutcome {
            holidays: HolidayMap::new(),
            warning: Some(err),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.warning.is_none()
    }
}

pub struct HolidayFetcher<T: HolidayTransport> {
    api_url: String,
    transport: T,
}

impl<T: HolidayTransport> HolidayFetcher<T> {
    pub fn new(api_url: impl Into<String>, transport: T) -> Self {
        HolidayFetcher {
            api_url: api_url.into(),
            transport,
        }
    }

    pub fn url_for(&self, year: i32) -> String {
        format!("{}?year={}", self.api_url, year)
    }

    /// Fetches the holidays of `year`. Failures degrade to an empty map.
    pub fn fetch(&self, year: i32) -> FetchOutcome {
        let url = self.url_for(year);
        log::debug!("GET {url}");
        match self.try_fetch(&url, year) {
            Ok(holidays) => {
                log::info!("loaded {} holiday(s) for {year}", holidays.len());
                FetchOutcome::ok(holidays)
            }
            Err(e) => {
                log::warn!("holiday fetch for {year} failed: {e}");
                FetchOutcome::failed(e)
            }
        }
    }

    fn try_fetch(&self, url: &str, year: i32) -> Result<HolidayMap, FetchError> {
        let response = self.transport.get(url)?;
        if response.status != 200 {
            return Err(FetchError::Http {
                status: response.status,
            });
        }
        parse_holidays(&response.body, year)
    }
}
