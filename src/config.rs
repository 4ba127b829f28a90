// src/config.rs

use std::{path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://www.epexspot.com/en/market-results";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Plain client identification used by default.
pub const DEFAULT_USER_AGENT: &str = concat!("epexscraper/", env!("CARGO_PKG_VERSION"));

/// Desktop browser identification sent in headed mode.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Everything a run needs apart from the delivery date.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub market_area: String,
    pub modality: String,
    pub sub_modality: String,
    pub data_mode: String,
    pub product: String,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    /// Present as a desktop browser. Workaround for access-denied pages.
    pub headed: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            market_area: "GB".to_string(),
            modality: "Continuous".to_string(),
            sub_modality: "Continuous".to_string(),
            data_mode: "table".to_string(),
            product: "30".to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(30),
            headed: false,
        }
    }
}

impl ScraperConfig {
    pub fn user_agent(&self) -> &'static str {
        if self.headed {
            BROWSER_USER_AGENT
        } else {
            DEFAULT_USER_AGENT
        }
    }
}
