// src/fetch/mod.rs

pub mod page;
pub mod table;
pub mod urls;

pub use page::{build_client, fetch_market_page, is_access_denied, load_page_file, Page};
pub use table::locate_results_table;
pub use urls::{market_results_request, MarketQuery};
