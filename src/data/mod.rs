pub mod app_settings;
pub mod cache;
pub mod fetcher;
pub mod holiday;
pub mod persistence;

pub use app_settings::AppSettings;
pub use cache::HolidayCache;
pub use fetcher::{FetchError, FetchOutcome, HolidayFetcher, HolidayTransport, ReqwestTransport};
pub use holiday::HolidayMap;
pub use persistence::Persistable;
