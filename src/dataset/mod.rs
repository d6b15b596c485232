//! Flat-File Dataset Loader
//!
//! Reads the comma-delimited exports (production, frac, drilling, completion)
//! into typed [`Table`]s. The header row is matched against the known
//! [`Column`]s, including the aliases the upstream files use (`year_x`,
//! `idpozo`). Identity columns are mandatory; measure columns are optional and
//! simply absent from the resulting [`Schema`] when the file lacks them.
//!
//! Loading happens once at startup. Nothing here is called during a
//! recomputation.
//!
//! # Usage
//!
//! ```ignore
//! use vm_explorer::dataset;
//!
//! let prod = dataset::load_production("data/well_prod_data.csv")?;
//! let frac = dataset::load_frac("data/well_frac_prod_data_VM.csv")?;
//! ```

pub mod cells;
pub mod export;

use crate::error::{EngineError, Result, SchemaError};
use crate::types::{
    Column, CompletionRecord, DrillRecord, FracRecord, ProductionRecord, Schema, Table,
};
use self::cells::{is_blank, ColumnMap, Row};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

// ============================================================================
// Dataset Descriptions
// ============================================================================

/// The four source datasets and their column contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Production,
    Frac,
    Drilling,
    Completion,
}

impl Dataset {
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Production => "production",
            Dataset::Frac => "frac",
            Dataset::Drilling => "drilling",
            Dataset::Completion => "completion",
        }
    }

    fn load_operation(self) -> &'static str {
        match self {
            Dataset::Production => "load production",
            Dataset::Frac => "load frac",
            Dataset::Drilling => "load drilling",
            Dataset::Completion => "load completion",
        }
    }

    /// Columns that must be in the header.
    pub fn required_columns(self) -> &'static [Column] {
        match self {
            Dataset::Production | Dataset::Frac => &[
                Column::WellId,
                Column::WellName,
                Column::Company,
                Column::Field,
                Column::Year,
            ],
            Dataset::Drilling | Dataset::Completion => {
                &[Column::Company, Column::Field, Column::Year]
            }
        }
    }

    /// Every column this dataset may carry, in export order.
    pub fn columns(self) -> &'static [Column] {
        match self {
            Dataset::Production => &[
                Column::WellId,
                Column::WellName,
                Column::Company,
                Column::Field,
                Column::WellType,
                Column::Year,
                Column::Month,
                Column::DepthM,
                Column::OilProdM3,
                Column::GasProdKm3,
                Column::WaterProdM3,
                Column::OilCumM3,
                Column::GasCumKm3,
                Column::WaterProdCumM3,
                Column::XCoor,
                Column::YCoor,
                Column::MonthCount,
            ],
            Dataset::Frac => &[
                Column::WellId,
                Column::WellName,
                Column::Company,
                Column::Field,
                Column::WellType,
                Column::Year,
                Column::LateralLengthFt,
                Column::NumberStages,
                Column::ProppantPumpedLb,
                Column::FluidPumpedBbl,
                Column::ProppantIntensityLbft,
                Column::FluidIntensityBblft,
                Column::OilCumKm3,
                Column::GasCumMm3,
                Column::WaterCumKm3,
            ],
            Dataset::Drilling => &[
                Column::Company,
                Column::Field,
                Column::Year,
                Column::Wells,
                Column::Meters,
            ],
            Dataset::Completion => &[
                Column::Company,
                Column::Field,
                Column::Year,
                Column::Completion,
            ],
        }
    }
}

// ============================================================================
// Row Parsers
// ============================================================================

fn parse_production(row: &mut Row<'_>) -> Option<ProductionRecord> {
    let year = row.i32(Column::Year)?;
    let month = row.u32(Column::Month);
    Some(ProductionRecord {
        well_id: row.text_or_empty(Column::WellId),
        well_name: row.text_or_empty(Column::WellName),
        company: row.text_or_empty(Column::Company),
        field: row.text_or_empty(Column::Field),
        well_type: row.text(Column::WellType),
        year,
        month,
        date: ProductionRecord::reporting_date(year, month),
        depth_m: row.f64(Column::DepthM),
        oil_prod_m3: row.f64(Column::OilProdM3),
        gas_prod_km3: row.f64(Column::GasProdKm3),
        water_prod_m3: row.f64(Column::WaterProdM3),
        oil_cum_m3: row.f64(Column::OilCumM3),
        gas_cum_km3: row.f64(Column::GasCumKm3),
        water_prod_cum_m3: row.f64(Column::WaterProdCumM3),
        x_coor: row.f64(Column::XCoor),
        y_coor: row.f64(Column::YCoor),
        month_count: row.i64(Column::MonthCount),
    })
}

fn parse_frac(row: &mut Row<'_>) -> Option<FracRecord> {
    Some(FracRecord {
        year: row.i32(Column::Year)?,
        well_id: row.text_or_empty(Column::WellId),
        well_name: row.text_or_empty(Column::WellName),
        company: row.text_or_empty(Column::Company),
        field: row.text_or_empty(Column::Field),
        well_type: row.text(Column::WellType),
        lateral_length_ft: row.f64(Column::LateralLengthFt),
        number_stages: row.f64(Column::NumberStages),
        proppant_pumped_lb: row.f64(Column::ProppantPumpedLb),
        fluid_pumped_bbl: row.f64(Column::FluidPumpedBbl),
        proppant_intensity_lbft: row.f64(Column::ProppantIntensityLbft),
        fluid_intensity_bblft: row.f64(Column::FluidIntensityBblft),
        oil_cum_km3: row.f64(Column::OilCumKm3),
        gas_cum_mm3: row.f64(Column::GasCumMm3),
        water_cum_km3: row.f64(Column::WaterCumKm3),
    })
}

fn parse_drilling(row: &mut Row<'_>) -> Option<DrillRecord> {
    Some(DrillRecord {
        year: row.i32(Column::Year)?,
        company: row.text_or_empty(Column::Company),
        field: row.text_or_empty(Column::Field),
        wells: row.f64(Column::Wells),
        meters: row.f64(Column::Meters),
    })
}

fn parse_completion(row: &mut Row<'_>) -> Option<CompletionRecord> {
    Some(CompletionRecord {
        year: row.i32(Column::Year)?,
        company: row.text_or_empty(Column::Company),
        field: row.text_or_empty(Column::Field),
        completion: row.f64(Column::Completion),
    })
}

// ============================================================================
// Loading
// ============================================================================

/// Row-level outcome of one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    /// Rows dropped because the year was blank or unparsable.
    pub skipped_rows: usize,
    /// Non-empty cells that could not be parsed (read as missing).
    pub invalid_cells: usize,
}

/// Read any comma-delimited source into a typed table.
///
/// Quoted fields may span lines. Blank records are ignored. A row whose year
/// cannot be read is skipped with a warning, since it cannot take part in
/// any year-range filter.
pub fn read_table<R, I, F>(
    input: I,
    source: &Path,
    dataset: Dataset,
    mut parse: F,
) -> Result<(Table<R>, LoadReport)>
where
    I: Read,
    F: FnMut(&mut Row<'_>) -> Option<R>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut records = reader.records();

    let header = loop {
        match records.next() {
            Some(Ok(record)) if is_blank(&record) => continue,
            Some(Ok(record)) => break record,
            Some(Err(e)) => {
                return Err(EngineError::Parse {
                    path: source.to_path_buf(),
                    line: e.position().map_or(1, |p| p.line() as usize),
                    message: e.to_string(),
                })
            }
            None => {
                // No header at all: report the first required column.
                let column = dataset.required_columns()[0];
                return Err(SchemaError {
                    column,
                    operation: dataset.load_operation(),
                }
                .into());
            }
        }
    };

    let col_map = ColumnMap::from_header(&header, dataset.columns());
    let schema = Schema::new(col_map.columns());
    schema.require_all(dataset.required_columns(), dataset.load_operation())?;

    let mut rows = Vec::new();
    let mut report = LoadReport::default();

    for result in records {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line = ?e.position().map(|p| p.line()), error = %e, "Error reading record");
                report.skipped_rows += 1;
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }

        let mut row = Row::new(&record, &col_map);
        let parsed = parse(&mut row);
        report.invalid_cells += row.invalid_cells();
        match parsed {
            Some(parsed) => rows.push(parsed),
            None => {
                debug!(
                    line = ?record.position().map(|p| p.line()),
                    dataset = dataset.name(),
                    "Skipping row without a year"
                );
                report.skipped_rows += 1;
            }
        }
    }

    report.rows = rows.len();
    if report.skipped_rows > 0 || report.invalid_cells > 0 {
        warn!(
            file = %source.display(),
            skipped = report.skipped_rows,
            invalid_cells = report.invalid_cells,
            "Some {} rows or cells could not be parsed",
            dataset.name()
        );
    }

    Ok((Table::new(schema, rows), report))
}

fn load_file<R, F>(path: &Path, dataset: Dataset, parse: F) -> Result<Table<R>>
where
    F: FnMut(&mut Row<'_>) -> Option<R>,
{
    let file = File::open(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (table, report) = read_table(file, path, dataset, parse)?;
    info!(
        file = %path.display(),
        dataset = dataset.name(),
        rows = report.rows,
        columns = table.schema().len(),
        "Loaded dataset"
    );
    Ok(table)
}

pub fn load_production(path: impl AsRef<Path>) -> Result<Table<ProductionRecord>> {
    load_file(path.as_ref(), Dataset::Production, parse_production)
}

pub fn load_frac(path: impl AsRef<Path>) -> Result<Table<FracRecord>> {
    load_file(path.as_ref(), Dataset::Frac, parse_frac)
}

pub fn load_drilling(path: impl AsRef<Path>) -> Result<Table<DrillRecord>> {
    load_file(path.as_ref(), Dataset::Drilling, parse_drilling)
}

pub fn load_completion(path: impl AsRef<Path>) -> Result<Table<CompletionRecord>> {
    load_file(path.as_ref(), Dataset::Completion, parse_completion)
}

/// Parse production rows from an in-memory string (tests, fixtures).
pub fn production_from_str(text: &str) -> Result<Table<ProductionRecord>> {
    read_table(text.as_bytes(), Path::new("<memory>"), Dataset::Production, parse_production)
        .map(|(table, _)| table)
}

/// Parse frac rows from an in-memory string (tests, fixtures).
pub fn frac_from_str(text: &str) -> Result<Table<FracRecord>> {
    read_table(text.as_bytes(), Path::new("<memory>"), Dataset::Frac, parse_frac)
        .map(|(table, _)| table)
}

/// Parse drilling rows from an in-memory string (tests, fixtures).
pub fn drilling_from_str(text: &str) -> Result<Table<DrillRecord>> {
    read_table(text.as_bytes(), Path::new("<memory>"), Dataset::Drilling, parse_drilling)
        .map(|(table, _)| table)
}

/// Parse completion rows from an in-memory string (tests, fixtures).
pub fn completion_from_str(text: &str) -> Result<Table<CompletionRecord>> {
    read_table(text.as_bytes(), Path::new("<memory>"), Dataset::Completion, parse_completion)
        .map(|(table, _)| table)
}
