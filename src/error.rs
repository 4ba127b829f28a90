// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

use crate::table::Role;

pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Everything that can abort a scrape run. None of these are recovered from.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(
        "access denied by {url}; re-run with --headed, or save the page from a visible browser and pass it with --html"
    )]
    Forbidden { url: String },

    #[error("no results table with a \"Low\" column found at {url}")]
    TableNotFound { url: String },

    #[error("required column \"{role}\" not found; headers were {headers:?}")]
    ColumnNotFound { role: Role, headers: Vec<String> },

    #[error("results table has no body rows")]
    EmptyTable,

    #[error("none of the {total_rows} table rows had enough cells for the resolved columns")]
    NoValidRows { total_rows: usize },

    #[error("HTTP {status} from {url}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid delivery date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}
