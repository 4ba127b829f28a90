// src/fetch/table.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, trace, warn};

use crate::error::{ScrapeError, ScrapeResult};
use crate::table::{DataRow, HeaderRow, RawTable, Role};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());

/// Visible text of an element with runs of whitespace collapsed. Header labels only.
fn cell_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Visible text exactly as rendered; data cells keep inner spacing.
fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

fn row_cells(tr: ElementRef<'_>, text: fn(ElementRef<'_>) -> String) -> Vec<String> {
    tr.select(&CELL).map(text).collect()
}

fn within(tr: ElementRef<'_>, section: &str) -> bool {
    tr.ancestors()
        .filter_map(|n| n.value().as_element())
        .take_while(|e| e.name() != "table")
        .any(|e| e.name() == section)
}

/// First `tr` carrying a `th` labelled like the Low column.
fn is_header_row(tr: ElementRef<'_>) -> bool {
    tr.select(&HEADER_CELL)
        .any(|th| Role::Low.matches(&cell_text(th)))
}

fn read_table(table: ElementRef<'_>) -> Option<RawTable> {
    let rows: Vec<ElementRef<'_>> = table.select(&ROW).collect();
    let header_pos = rows.iter().position(|tr| is_header_row(*tr))?;

    let headers: HeaderRow = row_cells(rows[header_pos], cell_text);
    let body: Vec<DataRow> = rows[header_pos + 1..]
        .iter()
        .filter(|tr| !within(**tr, "thead") && !within(**tr, "tfoot"))
        .map(|tr| row_cells(*tr, raw_text))
        .collect();

    Some(RawTable {
        headers,
        rows: body,
    })
}

/// Find the results table in a market-results page.
///
/// Tables are tried in document order; the first one with a header row that
/// has a "Low" column wins. `source` is only used in the error.
#[instrument(level = "debug", skip(html), fields(html_len = html.len()))]
pub fn locate_results_table(html: &str, source: &str) -> ScrapeResult<RawTable> {
    let doc = Html::parse_document(html);

    let mut seen = 0usize;
    for table in doc.select(&TABLE) {
        seen += 1;
        match read_table(table) {
            Some(raw) => {
                debug!(
                    table = seen,
                    headers = ?raw.headers,
                    rows = raw.rows.len(),
                    "located results table"
                );
                return Ok(raw);
            }
            None => trace!(table = seen, "no Low header, skipping table"),
        }
    }

    warn!(tables = seen, "no results table in page");
    Err(ScrapeError::TableNotFound {
        url: source.to_string(),
    })
}
