//! Headline KPIs
//!
//! Every figure is zero when its input is empty or carries no value, so the
//! dashboard cards always have something to show.

use crate::config::UnitsConfig;
use crate::types::{
    ActivityKpis, CompletionRecord, DrillRecord, FracKpis, FracRecord, Kpis, ProductionKpis,
    ProductionRecord, Table,
};
use statrs::statistics::Statistics;
use std::collections::HashSet;

/// Round to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

fn sum_present(values: impl Iterator<Item = Option<f64>>) -> f64 {
    values.flatten().sum()
}

/// Mean over present values, 0 when there are none.
fn mean_present(values: impl Iterator<Item = Option<f64>>) -> f64 {
    let present: Vec<f64> = values.flatten().collect();
    if present.is_empty() {
        return 0.0;
    }
    present.mean()
}

fn distinct<'a>(ids: impl Iterator<Item = &'a str>) -> usize {
    ids.collect::<HashSet<_>>().len()
}

/// Well count and cumulative totals from the latest report of each well.
pub fn production_kpis(latest: &Table<ProductionRecord>, units: &UnitsConfig) -> ProductionKpis {
    let total = |f: fn(&ProductionRecord) -> Option<f64>| {
        round_to(sum_present(latest.iter().map(f)) / units.volume_divisor, 2)
    };
    ProductionKpis {
        n_wells: distinct(latest.iter().map(|r| r.well_id.as_str())),
        total_oil: total(|r| r.oil_cum_m3),
        total_gas: total(|r| r.gas_cum_km3),
        total_water: total(|r| r.water_prod_cum_m3),
    }
}

/// Treatment design KPIs from intensity-enriched frac rows.
pub fn frac_kpis(frac: &Table<FracRecord>, units: &UnitsConfig) -> FracKpis {
    FracKpis {
        n_frac_wells: distinct(frac.iter().map(|r| r.well_id.as_str())),
        avg_lateral_length: round_to(mean_present(frac.iter().map(|r| r.lateral_length_ft)), 0),
        avg_stages: round_to(mean_present(frac.iter().map(|r| r.number_stages)), 1),
        total_proppant_klb: round_to(
            sum_present(frac.iter().map(|r| r.proppant_pumped_lb)) / units.mass_divisor,
            2,
        ),
        total_fluid_kbbl: round_to(
            sum_present(frac.iter().map(|r| r.fluid_pumped_bbl)) / units.mass_divisor,
            2,
        ),
        avg_proppant_intensity: round_to(
            mean_present(frac.iter().map(|r| r.proppant_intensity_lbft)),
            1,
        ),
        avg_fluid_intensity: round_to(
            mean_present(frac.iter().map(|r| r.fluid_intensity_bblft)),
            2,
        ),
    }
}

/// Drilling and completion totals. Absent datasets contribute zero.
pub fn activity_kpis(
    drilling: Option<&Table<DrillRecord>>,
    completion: Option<&Table<CompletionRecord>>,
    units: &UnitsConfig,
) -> ActivityKpis {
    let mut kpis = ActivityKpis::default();
    if let Some(drilling) = drilling {
        kpis.total_wells_drilled = sum_present(drilling.iter().map(|r| r.wells));
        kpis.total_meters_drilled_km = round_to(
            sum_present(drilling.iter().map(|r| r.meters)) / units.length_divisor,
            2,
        );
    }
    if let Some(completion) = completion {
        kpis.total_completions = sum_present(completion.iter().map(|r| r.completion));
    }
    kpis
}

pub fn compute_kpis(
    latest: &Table<ProductionRecord>,
    frac: &Table<FracRecord>,
    drilling: Option<&Table<DrillRecord>>,
    completion: Option<&Table<CompletionRecord>>,
    units: &UnitsConfig,
) -> Kpis {
    Kpis {
        production: production_kpis(latest, units),
        frac: frac_kpis(frac, units),
        activity: activity_kpis(drilling, completion, units),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{drill, frac, frac_table, prod, prod_table};
    use crate::types::{Column, Schema};

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(8_500.5, 0), 8_500.0);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(1.2345, 2), 1.23);
        assert_eq!(round_to(1234.0, 0), 1234.0);
    }

    #[test]
    fn test_production_totals_scaled() {
        let mut a = prod("A", 2020, 3);
        a.oil_cum_m3 = Some(1_500.0);
        let mut b = prod("B", 2020, 1);
        b.oil_cum_m3 = Some(2_500.0);
        b.gas_cum_km3 = None;

        let kpis = production_kpis(&prod_table(vec![a, b]), &UnitsConfig::default());
        assert_eq!(kpis.n_wells, 2);
        assert_eq!(kpis.total_oil, 4.0);
        assert_eq!(kpis.total_gas, 0.01);
        assert_eq!(kpis.total_water, 0.04);
    }

    #[test]
    fn test_frac_means_skip_missing() {
        let mut rows = vec![
            frac("A", Some(8_000.0), Some(16_000_000.0)),
            frac("B", Some(9_000.0), None),
            frac("C", None, Some(4_000_000.0)),
        ];
        rows[0].proppant_intensity_lbft = Some(2_000.0);
        rows[1].proppant_intensity_lbft = None;
        rows[2].number_stages = None;

        let kpis = frac_kpis(&frac_table(rows), &UnitsConfig::default());
        assert_eq!(kpis.n_frac_wells, 3);
        assert_eq!(kpis.avg_lateral_length, 8_500.0);
        assert_eq!(kpis.avg_stages, 30.0);
        assert_eq!(kpis.total_proppant_klb, 20_000.0);
        assert_eq!(kpis.total_fluid_kbbl, 0.3);
        assert_eq!(kpis.avg_proppant_intensity, 2_000.0);
        assert_eq!(kpis.avg_fluid_intensity, 0.0);
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        let units = UnitsConfig::default();
        let drilling = Table::new(Schema::new([Column::Company, Column::Year]), Vec::new());
        let kpis = compute_kpis(
            &prod_table(Vec::new()),
            &frac_table(Vec::new()),
            Some(&drilling),
            None,
            &units,
        );
        assert_eq!(kpis, Kpis::default());
    }

    #[test]
    fn test_activity_totals() {
        let table = Table::new(
            Schema::new([Column::Company, Column::Year, Column::Wells, Column::Meters]),
            vec![drill("YPF", 2019), drill("Vista", 2020)],
        );
        let kpis = activity_kpis(Some(&table), None, &UnitsConfig::default());
        assert_eq!(kpis.total_wells_drilled, 2.0);
        assert_eq!(kpis.total_meters_drilled_km, 8.0);
        assert_eq!(kpis.total_completions, 0.0);
    }
}
