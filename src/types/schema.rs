//! Column model and typed tables
//!
//! Every base table is a `Vec` of statically typed records plus the set of
//! columns the source file actually carried. Optional columns that were not
//! present in the file are absent from the [`Schema`], which lets the engine
//! tell "column missing" apart from "value missing in this row".

use crate::error::SchemaError;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Columns
// ============================================================================

/// Every column the loader knows about, across all four datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    WellId,
    WellName,
    Company,
    Field,
    WellType,
    Year,
    Month,
    DepthM,
    OilProdM3,
    GasProdKm3,
    WaterProdM3,
    OilCumM3,
    GasCumKm3,
    WaterProdCumM3,
    XCoor,
    YCoor,
    MonthCount,
    LateralLengthFt,
    NumberStages,
    ProppantPumpedLb,
    FluidPumpedBbl,
    Wells,
    Meters,
    Completion,
    // Computed frac columns
    ProppantIntensityLbft,
    FluidIntensityBblft,
    OilCumKm3,
    GasCumMm3,
    WaterCumKm3,
}

impl Column {
    /// Canonical header name, as written by the exporter.
    pub fn name(self) -> &'static str {
        match self {
            Column::WellId => "well_id",
            Column::WellName => "well_name",
            Column::Company => "company",
            Column::Field => "field",
            Column::WellType => "well_type",
            Column::Year => "year",
            Column::Month => "month",
            Column::DepthM => "depth_m",
            Column::OilProdM3 => "oil_prod_m3",
            Column::GasProdKm3 => "gas_prod_km3",
            Column::WaterProdM3 => "water_prod_m3",
            Column::OilCumM3 => "oil_cum_m3",
            Column::GasCumKm3 => "gas_cum_km3",
            Column::WaterProdCumM3 => "water_prod_cum_m3",
            Column::XCoor => "Xcoor",
            Column::YCoor => "Ycoor",
            Column::MonthCount => "month_count",
            Column::LateralLengthFt => "lateral_length_ft",
            Column::NumberStages => "number_stages",
            Column::ProppantPumpedLb => "proppant_pumped_lb",
            Column::FluidPumpedBbl => "fluid_pumped_bbl",
            Column::Wells => "wells",
            Column::Meters => "meters",
            Column::Completion => "completion",
            Column::ProppantIntensityLbft => "proppant_intensity_lbft",
            Column::FluidIntensityBblft => "fluid_intensity_bblft",
            Column::OilCumKm3 => "oil_cum_km3",
            Column::GasCumMm3 => "gas_cum_Mm3",
            Column::WaterCumKm3 => "water_cum_km3",
        }
    }

    /// Alternative header spellings found in the source files.
    ///
    /// The frac file is the output of a production/frac merge, so its year
    /// column arrives as `year_x`; raw production exports use `idpozo`.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::WellId => &["idpozo"],
            Column::Year => &["year_x"],
            Column::XCoor => &["xcoor", "x_coor"],
            Column::YCoor => &["ycoor", "y_coor"],
            _ => &[],
        }
    }

    /// Whether `header` names this column (case-insensitive, trimmed).
    pub fn matches_header(self, header: &str) -> bool {
        let header = header.trim();
        header.eq_ignore_ascii_case(self.name())
            || self.aliases().iter().any(|a| header.eq_ignore_ascii_case(a))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// The set of columns present on a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    columns: BTreeSet<Column>,
}

impl Schema {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Fail with a [`SchemaError`] naming `operation` if `column` is absent.
    pub fn require(&self, column: Column, operation: &'static str) -> Result<(), SchemaError> {
        if self.contains(column) {
            Ok(())
        } else {
            Err(SchemaError { column, operation })
        }
    }

    /// Require every column in `columns`, reporting the first one missing.
    pub fn require_all(
        &self,
        columns: &[Column],
        operation: &'static str,
    ) -> Result<(), SchemaError> {
        columns
            .iter()
            .try_for_each(|&column| self.require(column, operation))
    }

    /// This schema plus `extra`.
    pub fn extended(&self, extra: &[Column]) -> Self {
        let mut columns = self.columns.clone();
        columns.extend(extra.iter().copied());
        Self { columns }
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ============================================================================
// Table
// ============================================================================

/// Rows of one record type plus the schema they were loaded with.
///
/// Tables are never edited in place: every engine operation builds a new
/// table from an existing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table<R> {
    schema: Schema,
    rows: Vec<R>,
}

impl<R> Table<R> {
    pub fn new(schema: Schema, rows: Vec<R>) -> Self {
        Self { schema, rows }
    }

    /// A table with the same schema and the given rows.
    pub fn with_rows(&self, rows: Vec<R>) -> Self {
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Zero rows, same columns.
    pub fn empty_like(&self) -> Self {
        self.with_rows(Vec::new())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_aliases() {
        assert!(Column::Year.matches_header("year_x"));
        assert!(Column::Year.matches_header(" Year "));
        assert!(Column::WellId.matches_header("idpozo"));
        assert!(Column::XCoor.matches_header("Xcoor"));
        assert!(!Column::Year.matches_header("year_y"));
    }

    #[test]
    fn test_require_reports_column_and_operation() {
        let schema = Schema::new([Column::WellId, Column::Year]);
        assert!(schema.require(Column::Year, "test").is_ok());

        let err = schema
            .require_all(&[Column::WellId, Column::MonthCount], "latest_per_well")
            .unwrap_err();
        assert_eq!(err.column, Column::MonthCount);
        assert_eq!(err.operation, "latest_per_well");
    }

    #[test]
    fn test_empty_like_keeps_schema() {
        let table = Table::new(Schema::new([Column::Company]), vec![1, 2, 3]);
        let empty = table.empty_like();
        assert!(empty.is_empty());
        assert_eq!(empty.schema(), table.schema());
    }
}
