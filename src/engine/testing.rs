//! Row builders shared by the engine unit tests

use crate::dataset::Dataset;
use crate::types::{DrillRecord, FracRecord, ProductionRecord, Schema, Table};

pub fn prod(well_id: &str, year: i32, month_count: i64) -> ProductionRecord {
    ProductionRecord {
        well_id: well_id.to_string(),
        well_name: format!("{well_id}-name"),
        company: "YPF".to_string(),
        field: "Loma Campana".to_string(),
        well_type: Some("Petrolifero".to_string()),
        year,
        month: Some(1),
        date: ProductionRecord::reporting_date(year, Some(1)),
        depth_m: Some(3_000.0),
        oil_prod_m3: Some(10.0),
        gas_prod_km3: Some(1.0),
        water_prod_m3: Some(2.0),
        oil_cum_m3: Some(100.0),
        gas_cum_km3: Some(10.0),
        water_prod_cum_m3: Some(20.0),
        x_coor: Some(1.0),
        y_coor: Some(2.0),
        month_count: Some(month_count),
    }
}

pub fn prod_table(rows: Vec<ProductionRecord>) -> Table<ProductionRecord> {
    Table::new(Schema::new(Dataset::Production.columns().iter().copied()), rows)
}

pub fn frac(well_id: &str, lateral: Option<f64>, proppant: Option<f64>) -> FracRecord {
    FracRecord {
        well_id: well_id.to_string(),
        well_name: format!("{well_id}-name"),
        company: "YPF".to_string(),
        field: "Loma Campana".to_string(),
        well_type: Some("Petrolifero".to_string()),
        year: 2019,
        lateral_length_ft: lateral,
        number_stages: Some(30.0),
        proppant_pumped_lb: proppant,
        fluid_pumped_bbl: Some(100.0),
        proppant_intensity_lbft: None,
        fluid_intensity_bblft: None,
        oil_cum_km3: None,
        gas_cum_mm3: None,
        water_cum_km3: None,
    }
}

/// Frac table carrying only the columns a raw frac file has.
pub fn frac_table(rows: Vec<FracRecord>) -> Table<FracRecord> {
    Table::new(
        Schema::new(Dataset::Frac.columns().iter().copied().take(10)),
        rows,
    )
}

pub fn drill(company: &str, year: i32) -> DrillRecord {
    DrillRecord {
        company: company.to_string(),
        field: "Loma Campana".to_string(),
        year,
        wells: Some(1.0),
        meters: Some(4_000.0),
    }
}
