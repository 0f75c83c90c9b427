use crate::data::persistence::Persistable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api-harilibur.vercel.app/api";

/// Contents of `settings.yaml`. Missing keys take their defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub api_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 60 * 60,
        }
    }
}

impl Persistable for AppSettings {
    fn filename() -> &'static str {
        "settings.yaml"
    }
}

impl AppSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
