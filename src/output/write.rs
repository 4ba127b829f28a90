// src/output/write.rs

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::error::{ScrapeError, ScrapeResult};

/// `<dir>/epex_market_results_<YYYY-MM-DD>.csv`
pub fn output_path<P: AsRef<Path>>(dir: P, delivery_date: NaiveDate) -> PathBuf {
    dir.as_ref().join(format!(
        "epex_market_results_{}.csv",
        delivery_date.format("%Y-%m-%d")
    ))
}

/// Write `contents` to `path`, creating parent directories.
///
/// The data goes to a hidden temp file next to `path` which is then renamed
/// over it, so an interrupted run never leaves a half-written CSV behind.
#[instrument(level = "info", skip(contents), fields(bytes = contents.len()))]
pub fn write_csv(path: &Path, contents: &str) -> ScrapeResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::io(dir, e))?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.csv".to_string());
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    debug!(tmp = %tmp_path.display(), "writing temp file");
    let result = write_temp(&tmp_path, contents)
        .and_then(|_| fs::rename(&tmp_path, path).map_err(|e| ScrapeError::io(path, e)));
    if let Err(e) = result {
        if let Err(rm) = fs::remove_file(&tmp_path) {
            debug!(tmp = %tmp_path.display(), error = %rm, "temp file not removed");
        }
        return Err(e);
    }

    info!(path = %path.display(), "wrote CSV");
    Ok(())
}

fn write_temp(tmp_path: &Path, contents: &str) -> ScrapeResult<()> {
    let mut tmp = fs::File::create(tmp_path).map_err(|e| ScrapeError::io(tmp_path, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.sync_all())
        .map_err(|e| ScrapeError::io(tmp_path, e))
}
