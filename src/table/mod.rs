// src/table/mod.rs

pub mod columns;
pub mod extract;

use std::fmt;

pub use columns::{resolve, ColumnIndexSet};
pub use extract::{extract, extract_table};

/// Ordered header labels of a results table, one per column.
pub type HeaderRow = Vec<String>;

/// Cell texts of a single body row.
pub type DataRow = Vec<String>;

/// A results table as located in the page: header labels plus body rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub headers: HeaderRow,
    pub rows: Vec<DataRow>,
}

/// The four columns we scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Low,
    High,
    Last,
    WeightAvg,
}

impl Role {
    /// In output column order.
    pub const ALL: [Role; 4] = [Role::Low, Role::High, Role::Last, Role::WeightAvg];

    /// Label used for this role in the CSV header.
    pub fn label(self) -> &'static str {
        match self {
            Role::Low => "Low",
            Role::High => "High",
            Role::Last => "Last",
            Role::WeightAvg => "Weight Avg",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scraped row, always in (low, high, last, weight_avg) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub low: String,
    pub high: String,
    pub last: String,
    pub weight_avg: String,
}

impl ExtractedRecord {
    pub fn fields(&self) -> [&str; 4] {
        [&self.low, &self.high, &self.last, &self.weight_avg]
    }
}

/// Non-empty, source-ordered list of records. Only built by [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<ExtractedRecord>,
}

impl ResultSet {
    pub(crate) fn new(records: Vec<ExtractedRecord>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ExtractedRecord;
    type IntoIter = std::slice::Iter<'a, ExtractedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
