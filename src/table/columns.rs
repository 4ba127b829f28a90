// src/table/columns.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::Role;
use crate::error::{ScrapeError, ScrapeResult};

static LOW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)low").unwrap());
static HIGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)high").unwrap());
static LAST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)last").unwrap());
// "Weight Avg" and "Weighted Avg"
static WEIGHT_AVG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)weight(ed)?\s+avg").unwrap());

impl Role {
    fn pattern(self) -> &'static Regex {
        match self {
            Role::Low => &LOW,
            Role::High => &HIGH,
            Role::Last => &LAST,
            Role::WeightAvg => &WEIGHT_AVG,
        }
    }

    /// Whether a header label belongs to this role.
    pub fn matches(self, header: &str) -> bool {
        self.pattern().is_match(header)
    }
}

/// Zero-based column positions of each role within a header row.
///
/// Every index is valid for the header it was resolved from. Two roles may
/// share an index when one label matches both patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndexSet {
    pub low: usize,
    pub high: usize,
    pub last: usize,
    pub weight_avg: usize,
}

impl ColumnIndexSet {
    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::Low => self.low,
            Role::High => self.high,
            Role::Last => self.last,
            Role::WeightAvg => self.weight_avg,
        }
    }

    /// Cell count a body row needs before every resolved index can be read.
    pub fn min_required_cells(&self) -> usize {
        self.low
            .max(self.high)
            .max(self.last)
            .max(self.weight_avg)
            + 1
    }
}

fn find_first(headers: &[String], role: Role) -> ScrapeResult<usize> {
    headers
        .iter()
        .position(|h| role.matches(h))
        .ok_or_else(|| ScrapeError::ColumnNotFound {
            role,
            headers: headers.to_vec(),
        })
}

/// Resolve the position of each role, first match wins per role.
pub fn resolve(headers: &[String]) -> ScrapeResult<ColumnIndexSet> {
    let indices = ColumnIndexSet {
        low: find_first(headers, Role::Low)?,
        high: find_first(headers, Role::High)?,
        last: find_first(headers, Role::Last)?,
        weight_avg: find_first(headers, Role::WeightAvg)?,
    };
    for role in Role::ALL {
        trace!(%role, index = indices.get(role), header = %headers[indices.get(role)], "resolved column");
    }
    debug!(?indices, "resolved columns");
    Ok(indices)
}
