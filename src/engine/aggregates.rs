//! Grouped aggregate tables behind the dashboard charts

use crate::types::{
    CompletionRecord, CompletionTotals, DrillRecord, DrillingTotals, ProductionPoint,
    ProductionRecord, Table, WellTypeCount, WellTypeDepth,
};
use chrono::NaiveDate;
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct wells per well type, largest group first.
///
/// Rows without a well type are not counted. Equal counts keep the
/// alphabetical order of their types.
pub fn wells_by_type(latest: &Table<ProductionRecord>) -> Vec<WellTypeCount> {
    let mut groups: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for row in latest {
        if let Some(well_type) = row.well_type.as_deref() {
            groups.entry(well_type).or_default().insert(row.well_id.as_str());
        }
    }

    let mut out: Vec<WellTypeCount> = groups
        .into_iter()
        .map(|(well_type, wells)| WellTypeCount {
            well_type: well_type.to_string(),
            n_wells: wells.len(),
        })
        .collect();
    out.sort_by(|a, b| b.n_wells.cmp(&a.n_wells));
    out
}

/// Mean depth per well type, deepest first.
///
/// A type whose wells all lack a depth has no mean and is left out.
pub fn depth_by_type(latest: &Table<ProductionRecord>) -> Vec<WellTypeDepth> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in latest {
        if let (Some(well_type), Some(depth)) = (row.well_type.as_deref(), row.depth_m) {
            groups.entry(well_type).or_default().push(depth);
        }
    }

    let mut out: Vec<WellTypeDepth> = groups
        .into_iter()
        .map(|(well_type, depths)| WellTypeDepth {
            well_type: well_type.to_string(),
            avg_depth_m: depths.mean(),
        })
        .collect();
    out.sort_by(|a, b| b.avg_depth_m.total_cmp(&a.avg_depth_m));
    out
}

/// Monthly period volumes summed over all filtered wells, oldest first.
pub fn production_over_time(production: &Table<ProductionRecord>) -> Vec<ProductionPoint> {
    let mut months: BTreeMap<NaiveDate, [f64; 3]> = BTreeMap::new();
    for row in production {
        let Some(date) = row.date else { continue };
        let sums = months.entry(date).or_default();
        sums[0] += row.oil_prod_m3.unwrap_or(0.0);
        sums[1] += row.gas_prod_km3.unwrap_or(0.0);
        sums[2] += row.water_prod_m3.unwrap_or(0.0);
    }

    months
        .into_iter()
        .map(|(date, [oil, gas, water])| ProductionPoint {
            date,
            oil_prod_m3: oil,
            gas_prod_km3: gas,
            water_prod_m3: water,
        })
        .collect()
}

// ============================================================================
// Activity
// ============================================================================

fn drilling_by<K, F>(drilling: &Table<DrillRecord>, key: F) -> Vec<DrillingTotals<K>>
where
    K: Ord,
    F: Fn(&DrillRecord) -> K,
{
    let mut groups: BTreeMap<K, (f64, f64)> = BTreeMap::new();
    for row in drilling {
        let totals = groups.entry(key(row)).or_default();
        totals.0 += row.wells.unwrap_or(0.0);
        totals.1 += row.meters.unwrap_or(0.0);
    }
    groups
        .into_iter()
        .map(|(key, (wells, meters))| DrillingTotals { key, wells, meters })
        .collect()
}

fn completions_by<K, F>(completion: &Table<CompletionRecord>, key: F) -> Vec<CompletionTotals<K>>
where
    K: Ord,
    F: Fn(&CompletionRecord) -> K,
{
    let mut groups: BTreeMap<K, f64> = BTreeMap::new();
    for row in completion {
        *groups.entry(key(row)).or_default() += row.completion.unwrap_or(0.0);
    }
    groups
        .into_iter()
        .map(|(key, completions)| CompletionTotals { key, completions })
        .collect()
}

pub fn drilling_by_year(drilling: &Table<DrillRecord>) -> Vec<DrillingTotals<i32>> {
    drilling_by(drilling, |r| r.year)
}

pub fn drilling_by_company(drilling: &Table<DrillRecord>) -> Vec<DrillingTotals<String>> {
    drilling_by(drilling, |r| r.company.clone())
}

pub fn completions_by_year(completion: &Table<CompletionRecord>) -> Vec<CompletionTotals<i32>> {
    completions_by(completion, |r| r.year)
}

pub fn completions_by_company(
    completion: &Table<CompletionRecord>,
) -> Vec<CompletionTotals<String>> {
    completions_by(completion, |r| r.company.clone())
}
