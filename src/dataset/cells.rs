//! Header matching and typed cell access over parsed CSV records

use crate::types::Column;
use csv::StringRecord;
use std::collections::HashMap;

// ============================================================================
// Column Mapping
// ============================================================================

/// Maps known columns to their position in a header row.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: HashMap<Column, usize>,
}

impl ColumnMap {
    /// Build from a header record, recognising only `candidates`. The first
    /// header matching a column wins.
    pub fn from_header(header: &StringRecord, candidates: &[Column]) -> Self {
        let mut indices = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            // A UTF-8 BOM sticks to the first header cell.
            let name = name.trim_start_matches('\u{feff}').trim();
            if let Some(&column) = candidates.iter().find(|c| c.matches_header(name)) {
                indices.entry(column).or_insert(idx);
            }
        }
        Self { indices }
    }

    pub fn index(&self, column: Column) -> Option<usize> {
        self.indices.get(&column).copied()
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.indices.keys().copied()
    }
}

// ============================================================================
// Cell Parsing
// ============================================================================

/// Markers that mean "no value" in the source exports.
const NULL_MARKERS: &[&str] = &["", "nan", "na", "n/a", "null", "none", "nat"];

pub fn is_null(cell: &str) -> bool {
    let cell = cell.trim();
    NULL_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m))
}

/// True for a record with no non-blank cell.
pub fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// One data record, with typed accessors keyed by column.
///
/// Cells that are present but unparsable count as invalid and read as `None`.
pub struct Row<'a> {
    record: &'a StringRecord,
    map: &'a ColumnMap,
    invalid_cells: usize,
}

impl<'a> Row<'a> {
    pub fn new(record: &'a StringRecord, map: &'a ColumnMap) -> Self {
        Self {
            record,
            map,
            invalid_cells: 0,
        }
    }

    fn raw(&self, column: Column) -> Option<&'a str> {
        self.map
            .index(column)
            .and_then(|idx| self.record.get(idx))
            .map(str::trim)
            .filter(|s| !is_null(s))
    }

    pub fn text(&self, column: Column) -> Option<String> {
        self.raw(column).map(str::to_string)
    }

    /// Text for an identity column; blank reads as an empty string.
    pub fn text_or_empty(&self, column: Column) -> String {
        self.text(column).unwrap_or_default()
    }

    pub fn f64(&mut self, column: Column) -> Option<f64> {
        let raw = self.raw(column)?;
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                self.invalid_cells += 1;
                None
            }
        }
    }

    /// Integer cell. Whole floats such as `2019.0` are accepted since pandas
    /// writes integer columns that way once they contain a blank.
    pub fn i64(&mut self, column: Column) -> Option<i64> {
        let raw = self.raw(column)?;
        if let Ok(v) = raw.parse::<i64>() {
            return Some(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
            _ => {
                self.invalid_cells += 1;
                None
            }
        }
    }

    pub fn i32(&mut self, column: Column) -> Option<i32> {
        let value = self.i64(column)?;
        match i32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                self.invalid_cells += 1;
                None
            }
        }
    }

    pub fn u32(&mut self, column: Column) -> Option<u32> {
        let value = self.i64(column)?;
        match u32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                self.invalid_cells += 1;
                None
            }
        }
    }

    pub fn invalid_cells(&self) -> usize {
        self.invalid_cells
    }
}
