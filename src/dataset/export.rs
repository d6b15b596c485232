//! CSV export of filtered tables
//!
//! Writes exactly the columns on the table's schema, in the dataset's column
//! order, with the same header names the loader accepts. Fields are quoted
//! only when needed. Floats use Rust's shortest round-trip formatting, so
//! loading an exported file gives back the same rows.

use super::Dataset;
use crate::error::{EngineError, Result};
use crate::types::{Column, FracRecord, ProductionRecord, Table};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// A record that can render any of its columns as a CSV cell.
pub trait CsvRow {
    const DATASET: Dataset;

    /// Unquoted cell text for `column`; empty for a missing value.
    fn cell(&self, column: Column) -> String;
}

fn opt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn opt_text(value: Option<&str>) -> String {
    value.map(str::to_string).unwrap_or_default()
}

impl CsvRow for ProductionRecord {
    const DATASET: Dataset = Dataset::Production;

    fn cell(&self, column: Column) -> String {
        match column {
            Column::WellId => self.well_id.clone(),
            Column::WellName => self.well_name.clone(),
            Column::Company => self.company.clone(),
            Column::Field => self.field.clone(),
            Column::WellType => opt_text(self.well_type.as_deref()),
            Column::Year => self.year.to_string(),
            Column::Month => self.month.map(|m| m.to_string()).unwrap_or_default(),
            Column::DepthM => opt_f64(self.depth_m),
            Column::OilProdM3 => opt_f64(self.oil_prod_m3),
            Column::GasProdKm3 => opt_f64(self.gas_prod_km3),
            Column::WaterProdM3 => opt_f64(self.water_prod_m3),
            Column::OilCumM3 => opt_f64(self.oil_cum_m3),
            Column::GasCumKm3 => opt_f64(self.gas_cum_km3),
            Column::WaterProdCumM3 => opt_f64(self.water_prod_cum_m3),
            Column::XCoor => opt_f64(self.x_coor),
            Column::YCoor => opt_f64(self.y_coor),
            Column::MonthCount => self.month_count.map(|c| c.to_string()).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl CsvRow for FracRecord {
    const DATASET: Dataset = Dataset::Frac;

    fn cell(&self, column: Column) -> String {
        match column {
            Column::WellId => self.well_id.clone(),
            Column::WellName => self.well_name.clone(),
            Column::Company => self.company.clone(),
            Column::Field => self.field.clone(),
            Column::WellType => opt_text(self.well_type.as_deref()),
            Column::Year => self.year.to_string(),
            Column::LateralLengthFt => opt_f64(self.lateral_length_ft),
            Column::NumberStages => opt_f64(self.number_stages),
            Column::ProppantPumpedLb => opt_f64(self.proppant_pumped_lb),
            Column::FluidPumpedBbl => opt_f64(self.fluid_pumped_bbl),
            Column::ProppantIntensityLbft => opt_f64(self.proppant_intensity_lbft),
            Column::FluidIntensityBblft => opt_f64(self.fluid_intensity_bblft),
            Column::OilCumKm3 => opt_f64(self.oil_cum_km3),
            Column::GasCumMm3 => opt_f64(self.gas_cum_mm3),
            Column::WaterCumKm3 => opt_f64(self.water_cum_km3),
            _ => String::new(),
        }
    }
}

fn export_error(e: csv::Error) -> EngineError {
    EngineError::Export(e.into())
}

/// Write `table` as CSV to any writer.
pub fn write_csv<R: CsvRow, W: Write>(table: &Table<R>, writer: W) -> Result<()> {
    let columns: Vec<Column> = R::DATASET
        .columns()
        .iter()
        .copied()
        .filter(|&c| table.schema().contains(c))
        .collect();

    let mut out = csv::WriterBuilder::new().from_writer(writer);
    out.write_record(columns.iter().map(|c| c.name()))
        .map_err(export_error)?;

    for record in table {
        out.write_record(columns.iter().map(|&c| record.cell(c)))
            .map_err(export_error)?;
    }
    out.flush().map_err(EngineError::Export)
}

/// Write `table` as CSV to `path`, replacing any existing file.
pub fn export_to_path<R: CsvRow>(table: &Table<R>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(EngineError::Export)?;
    write_csv(table, file)?;
    info!(
        file = %path.display(),
        dataset = R::DATASET.name(),
        rows = table.len(),
        "Exported filtered table"
    );
    Ok(())
}

pub fn write_production_csv<W: Write>(table: &Table<ProductionRecord>, writer: W) -> Result<()> {
    write_csv(table, writer)
}

pub fn write_frac_csv<W: Write>(table: &Table<FracRecord>, writer: W) -> Result<()> {
    write_csv(table, writer)
}
