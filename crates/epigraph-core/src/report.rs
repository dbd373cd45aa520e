//! Association report assembly.
//!
//! Both association queries produce `ProcessedRow`s; this module reorders
//! them into the fixed report column layout with 1-based row numbering.
//! A row that lacks a required column key is a hard error naming the
//! missing columns, never a silent drop.

use std::collections::BTreeMap;

use crate::error::{EpigraphError, EpigraphResult};

/// Fixed report column order.
pub const COLUMN_ORDER: [&str; 6] = [
    "CpG ID",
    "Association",
    "Occurrences",
    "Direction",
    "Beta Baseline",
    "M-Value Baseline",
];

/// One processed CpG row keyed by report column name. A key must be present
/// for every required column; the cell value itself may be empty.
pub type ProcessedRow = BTreeMap<String, Option<String>>;

/// A numbered row of the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// 1-based row number.
    pub index: usize,
    /// Cell values in `COLUMN_ORDER`.
    pub cells: Vec<String>,
}

/// The assembled tabular report.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Assemble a report from processed rows.
    ///
    /// Fails with `MissingColumns` if any row lacks a required column key;
    /// the error lists the missing columns in canonical order.
    pub fn from_rows(processed: &[ProcessedRow]) -> EpigraphResult<Self> {
        let missing: Vec<String> = COLUMN_ORDER
            .iter()
            .filter(|col| processed.iter().any(|row| !row.contains_key(**col)))
            .map(|col| col.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(EpigraphError::MissingColumns(missing));
        }

        let rows = processed
            .iter()
            .enumerate()
            .map(|(i, row)| ReportRow {
                index: i + 1,
                cells: COLUMN_ORDER
                    .iter()
                    .map(|col| row[*col].clone().unwrap_or_default())
                    .collect(),
            })
            .collect();

        Ok(Self {
            columns: COLUMN_ORDER.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Build a `ProcessedRow` from column/value pairs. Test and query-engine
/// convenience.
pub fn processed_row<I>(pairs: I) -> ProcessedRow
where
    I: IntoIterator<Item = (&'static str, Option<String>)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
