//! Frac treatment enrichment: per-foot intensities and cumulative production

use crate::config::UnitsConfig;
use crate::error::SchemaError;
use crate::types::{Column, FracRecord, ProductionRecord, Table};
use std::collections::HashMap;

/// `numerator / lateral`, with a zero or missing lateral treated as no denominator.
fn per_foot(numerator: Option<f64>, lateral: Option<f64>) -> Option<f64> {
    let lateral = lateral.filter(|l| *l != 0.0)?;
    let value = numerator? / lateral;
    value.is_finite().then_some(value)
}

/// Add proppant intensity (lb/ft) and fluid intensity (bbl/ft) to every row.
///
/// A lateral length of exactly zero yields `None`, never infinity.
pub fn compute_intensity(frac: &Table<FracRecord>) -> Result<Table<FracRecord>, SchemaError> {
    if frac.is_empty() {
        return Ok(frac.clone());
    }
    frac.schema().require_all(
        &[
            Column::LateralLengthFt,
            Column::ProppantPumpedLb,
            Column::FluidPumpedBbl,
        ],
        "compute_intensity",
    )?;

    let rows = frac
        .iter()
        .map(|r| FracRecord {
            proppant_intensity_lbft: per_foot(r.proppant_pumped_lb, r.lateral_length_ft),
            fluid_intensity_bblft: per_foot(r.fluid_pumped_bbl, r.lateral_length_ft),
            ..r.clone()
        })
        .collect();

    Ok(Table::new(
        frac.schema()
            .extended(&[Column::ProppantIntensityLbft, Column::FluidIntensityBblft]),
        rows,
    ))
}

/// Running sum that stays `None` until a value is seen.
#[derive(Debug, Clone, Copy, Default)]
struct Volumes {
    oil: Option<f64>,
    gas: Option<f64>,
    water: Option<f64>,
}

fn add(total: &mut Option<f64>, value: Option<f64>) {
    if let Some(v) = value {
        *total = Some(total.unwrap_or(0.0) + v);
    }
}

/// Left-join each well's summed production onto the frac rows.
///
/// Sums run over the filtered production rows. Oil m³ and water m³ become
/// thousand m³, gas km³ becomes million m³ (divisor from `units`). A frac
/// well without production rows keeps `None`, which is not the same as zero.
pub fn join_cumulative_production(
    frac: &Table<FracRecord>,
    production: &Table<ProductionRecord>,
    units: &UnitsConfig,
) -> Result<Table<FracRecord>, SchemaError> {
    if frac.is_empty() {
        return Ok(frac.clone());
    }
    production.schema().require_all(
        &[Column::OilProdM3, Column::GasProdKm3, Column::WaterProdM3],
        "join_cumulative_production",
    )?;

    let mut per_well: HashMap<&str, Volumes> = HashMap::new();
    for row in production {
        let v = per_well.entry(row.well_id.as_str()).or_default();
        add(&mut v.oil, row.oil_prod_m3);
        add(&mut v.gas, row.gas_prod_km3);
        add(&mut v.water, row.water_prod_m3);
    }

    let scale = |v: Option<f64>| v.map(|x| x / units.volume_divisor);
    let rows = frac
        .iter()
        .map(|r| {
            let v = per_well.get(r.well_id.as_str()).copied().unwrap_or_default();
            FracRecord {
                oil_cum_km3: scale(v.oil),
                gas_cum_mm3: scale(v.gas),
                water_cum_km3: scale(v.water),
                ..r.clone()
            }
        })
        .collect();

    Ok(Table::new(
        frac.schema()
            .extended(&[Column::OilCumKm3, Column::GasCumMm3, Column::WaterCumKm3]),
        rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{frac, frac_table, prod, prod_table};
    use crate::types::Schema;

    #[test]
    fn test_zero_lateral_is_null() {
        let table = frac_table(vec![
            frac("A", Some(1000.0), Some(2000.0)),
            frac("B", Some(0.0), Some(500.0)),
            frac("C", Some(500.0), Some(1000.0)),
        ]);
        let out = compute_intensity(&table).unwrap();
        let intensities: Vec<Option<f64>> =
            out.iter().map(|r| r.proppant_intensity_lbft).collect();
        assert_eq!(intensities, vec![Some(2.0), None, Some(2.0)]);
        assert!(out.schema().contains(Column::FluidIntensityBblft));
    }

    #[test]
    fn test_missing_operand_propagates() {
        let table = frac_table(vec![frac("A", None, Some(10.0)), frac("B", Some(10.0), None)]);
        let out = compute_intensity(&table).unwrap();
        assert!(out.iter().all(|r| r.proppant_intensity_lbft.is_none()));
        // Fluid is present on both rows but A has no lateral
        assert_eq!(out.rows()[0].fluid_intensity_bblft, None);
        assert_eq!(out.rows()[1].fluid_intensity_bblft, Some(10.0));
    }

    #[test]
    fn test_intensity_empty_is_noop() {
        let table = frac_table(Vec::new());
        assert_eq!(compute_intensity(&table).unwrap(), table);
    }

    #[test]
    fn test_intensity_requires_lateral_column() {
        let table = Table::new(
            Schema::new([Column::WellId, Column::ProppantPumpedLb, Column::FluidPumpedBbl]),
            vec![frac("A", Some(1.0), Some(1.0))],
        );
        let err = compute_intensity(&table).unwrap_err();
        assert_eq!(err.column, Column::LateralLengthFt);
        assert_eq!(err.operation, "compute_intensity");
    }

    #[test]
    fn test_join_sums_and_scales() {
        let production = prod_table(vec![prod("A", 2019, 1), prod("A", 2019, 2)]);
        let table = frac_table(vec![frac("A", Some(1.0), Some(1.0)), frac("Z", None, None)]);

        let out = join_cumulative_production(&table, &production, &UnitsConfig::default()).unwrap();
        // 2 rows x 10 m³ oil / 1000
        assert_eq!(out.rows()[0].oil_cum_km3, Some(0.02));
        assert_eq!(out.rows()[0].gas_cum_mm3, Some(0.002));
        assert_eq!(out.rows()[0].water_cum_km3, Some(0.004));
        // Unmatched well stays null, not zero
        assert_eq!(out.rows()[1].oil_cum_km3, None);
        assert!(out.schema().contains(Column::GasCumMm3));
    }

    #[test]
    fn test_join_all_blank_volumes_stay_null() {
        let mut row = prod("A", 2019, 1);
        row.gas_prod_km3 = None;
        let production = prod_table(vec![row]);
        let table = frac_table(vec![frac("A", None, None)]);

        let out = join_cumulative_production(&table, &production, &UnitsConfig::default()).unwrap();
        assert_eq!(out.rows()[0].gas_cum_mm3, None);
        assert_eq!(out.rows()[0].oil_cum_km3, Some(0.01));
    }
}
