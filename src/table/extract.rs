// src/table/extract.rs

use tracing::{debug, info, instrument};

use super::{columns, ExtractedRecord, RawTable, ResultSet};
use crate::error::{ScrapeError, ScrapeResult};

/// Pull the Low/High/Last/Weight Avg cells out of every body row.
///
/// Rows too short to reach every resolved column are skipped. Cell text is
/// trimmed but otherwise kept exactly as rendered; nothing is parsed as a
/// number.
#[instrument(level = "debug", skip_all, fields(columns = headers.len(), rows = rows.len()))]
pub fn extract(headers: &[String], rows: &[Vec<String>]) -> ScrapeResult<ResultSet> {
    if rows.is_empty() {
        return Err(ScrapeError::EmptyTable);
    }

    let idx = columns::resolve(headers)?;
    let min_cells = idx.min_required_cells();

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for (n, row) in rows.iter().enumerate() {
        if row.len() < min_cells {
            debug!(row = n, cells = row.len(), needed = min_cells, "skipping short row");
            skipped += 1;
            continue;
        }
        records.push(ExtractedRecord {
            low: row[idx.low].trim().to_string(),
            high: row[idx.high].trim().to_string(),
            last: row[idx.last].trim().to_string(),
            weight_avg: row[idx.weight_avg].trim().to_string(),
        });
    }

    info!(kept = records.len(), skipped, "extracted table rows");
    ResultSet::new(records).ok_or(ScrapeError::NoValidRows {
        total_rows: rows.len(),
    })
}

pub fn extract_table(table: &RawTable) -> ScrapeResult<ResultSet> {
    extract(&table.headers, &table.rows)
}
