// src/run.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::config::ScraperConfig;
use crate::date;
use crate::error::ScrapeResult;
use crate::fetch::{self, Page};
use crate::output;
use crate::table::{self, ResultSet};

/// Per-invocation inputs that are not part of the site configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Defaults to yesterday.
    pub delivery_date: Option<NaiveDate>,
    /// Parse this saved page instead of fetching.
    pub html_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub delivery_date: NaiveDate,
    pub path: PathBuf,
    pub records: usize,
}

/// Locate the results table in a page and extract its records.
pub fn scrape_page(page: &Page) -> ScrapeResult<ResultSet> {
    let raw = fetch::locate_results_table(&page.html, &page.source)?;
    table::extract_table(&raw)
}

/// One full scrape: page → table → records → CSV on disk.
#[instrument(level = "info", skip_all)]
pub async fn run(config: &ScraperConfig, opts: &RunOptions) -> Result<RunSummary> {
    let delivery_date = opts.delivery_date.unwrap_or_else(date::yesterday);
    info!(delivery_date = %date::format_delivery_date(delivery_date), "starting scrape");

    let page = match &opts.html_file {
        Some(path) => fetch::load_page_file(path)
            .await
            .with_context(|| format!("loading saved page {}", path.display()))?,
        None => {
            let client = fetch::build_client(config).context("building HTTP client")?;
            fetch::fetch_market_page(&client, config, delivery_date)
                .await
                .context("fetching market results page")?
        }
    };

    let records = scrape_page(&page)
        .with_context(|| format!("extracting results table from {}", page.source))?;

    let csv = output::encode_records(&records);
    let path = output::output_path(&config.output_dir, delivery_date);
    output::write_csv(&path, &csv).with_context(|| format!("writing {}", path.display()))?;

    info!(records = records.len(), path = %path.display(), "scrape complete");
    Ok(RunSummary {
        delivery_date,
        path,
        records: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use std::fs;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,epexscraper=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    const RESULTS_PAGE: &str = r#"<html><head><title>Market Results</title></head><body>
<table>
  <thead><tr><th>Hour</th><th>Low</th><th>High</th><th>Last</th><th>Weighted Avg</th></tr></thead>
  <tbody>
    <tr><td>1</td><td>10</td><td>20</td><td>15</td><td>17.5</td></tr>
    <tr><td>2</td><td>"q"</td></tr>
    <tr><td>3</td><td>1,000</td><td>2</td><td>3</td><td>4</td></tr>
  </tbody>
</table></body></html>"#;

    fn opts_for(dir: &std::path::Path, html: &str) -> Result<(ScraperConfig, RunOptions)> {
        let page = dir.join("page.html");
        fs::write(&page, html)?;
        let config = ScraperConfig {
            output_dir: dir.join("output"),
            ..ScraperConfig::default()
        };
        let opts = RunOptions {
            delivery_date: NaiveDate::from_ymd_opt(2024, 5, 20),
            html_file: Some(page),
        };
        Ok((config, opts))
    }

    #[tokio::test]
    async fn test_run_from_saved_page() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let (config, opts) = opts_for(tmp.path(), RESULTS_PAGE)?;

        let summary = run(&config, &opts).await?;

        assert_eq!(summary.records, 2);
        assert_eq!(
            summary.path,
            tmp.path()
                .join("output")
                .join("epex_market_results_2024-05-20.csv")
        );
        assert_eq!(
            fs::read_to_string(&summary.path)?,
            "Low,High,Last,Weight Avg\n10,20,15,17.5\n\"1,000\",2,3,4\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_run_writes_nothing() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let page = "<table><tr><th>Low</th><th>High</th><th>Last</th></tr>\
                    <tr><td>1</td><td>2</td><td>3</td></tr></table>";
        let (config, opts) = opts_for(tmp.path(), page)?;

        let err = run(&config, &opts).await.unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<ScrapeError>(),
                Some(ScrapeError::ColumnNotFound { .. })
            ),
            "{err:?}"
        );
        assert!(!config.output_dir.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_denied_page_aborts_run() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let (config, opts) =
            opts_for(tmp.path(), "<html><head><title>403 Forbidden</title></head></html>")?;

        let err = run(&config, &opts).await.unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<ScrapeError>(),
                Some(ScrapeError::Forbidden { .. })
            ),
            "{err:?}"
        );
        assert!(!config.output_dir.exists());
        Ok(())
    }

    #[test]
    fn test_scrape_page_all_rows_short() {
        let page = Page {
            source: "mem".into(),
            html: "<table><tr><th>Low</th><th>High</th><th>Last</th><th>Weight Avg</th></tr>\
                   <tr><td>1</td></tr><tr><td>1</td><td>2</td></tr></table>"
                .into(),
        };
        assert!(matches!(
            scrape_page(&page),
            Err(ScrapeError::NoValidRows { total_rows: 2 })
        ));
    }
}
