pub mod config;
pub mod date;
pub mod error;
pub mod fetch;
pub mod output;
pub mod run;
pub mod table;

pub use config::ScraperConfig;
pub use error::{ScrapeError, ScrapeResult};
pub use table::{ColumnIndexSet, ExtractedRecord, RawTable, ResultSet, Role};
