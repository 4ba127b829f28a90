use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use epexscraper::{
    config::{ScraperConfig, DEFAULT_OUTPUT_DIR},
    date,
    run::{run, RunOptions},
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Scrape yesterday's EPEX SPOT GB continuous results table into a CSV file.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Present as a desktop browser; use this when the site denies access
    #[arg(long)]
    headed: bool,

    /// Delivery date to scrape (YYYY-MM-DD) instead of yesterday
    #[arg(long, value_parser = parse_date)]
    date: Option<chrono::NaiveDate>,

    /// Directory the CSV is written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,

    /// Parse a page saved from a browser instead of fetching it
    #[arg(long)]
    html: Option<PathBuf>,

    /// Network timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

fn parse_date(s: &str) -> Result<chrono::NaiveDate, String> {
    date::parse_delivery_date(s).map_err(|e| e.to_string())
}

impl Args {
    fn into_parts(self) -> (ScraperConfig, RunOptions) {
        let config = ScraperConfig {
            output_dir: self.out_dir,
            timeout: Duration::from_secs(self.timeout_secs),
            headed: self.headed,
            ..ScraperConfig::default()
        };
        let opts = RunOptions {
            delivery_date: self.date,
            html_file: self.html,
        };
        (config, opts)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    // ─── 2) config ───────────────────────────────────────────────────
    let (config, opts) = Args::parse().into_parts();
    info!(
        output_dir = %config.output_dir.display(),
        headed = config.headed,
        html = ?opts.html_file,
        "startup"
    );

    // ─── 3) scrape ───────────────────────────────────────────────────
    match run(&config, &opts).await {
        Ok(summary) => {
            info!(
                records = summary.records,
                path = %summary.path.display(),
                "all done"
            );
            println!("Wrote {} rows to {}", summary.records, summary.path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_flags_required() {
        let (config, opts) = Args::try_parse_from(["epexscraper"]).unwrap().into_parts();
        assert!(!config.headed);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(opts.delivery_date.is_none());
        assert!(opts.html_file.is_none());
    }

    #[test]
    fn test_flags() {
        let (config, opts) = Args::try_parse_from([
            "epexscraper",
            "--headed",
            "--date",
            "2024-07-01",
            "--out-dir",
            "/tmp/x",
            "--html",
            "saved.html",
            "--timeout-secs",
            "5",
        ])
        .unwrap()
        .into_parts();
        assert!(config.headed);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/x"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(opts.delivery_date, chrono::NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(opts.html_file, Some(PathBuf::from("saved.html")));
    }

    #[test]
    fn test_bad_date_rejected() {
        assert!(Args::try_parse_from(["epexscraper", "--date", "01/07/2024"]).is_err());
    }
}
