//! Top-N well rankings

use crate::error::SchemaError;
use crate::types::{Column, ProductionRecord, RankedWell, RankingMetric, Table};
use std::collections::HashMap;

impl RankingMetric {
    pub fn column(self) -> Column {
        match self {
            RankingMetric::OilCum => Column::OilCumM3,
            RankingMetric::GasCum => Column::GasCumKm3,
            RankingMetric::WaterCum => Column::WaterProdCumM3,
        }
    }
}

/// The `n` wells with the highest `metric`, descending.
///
/// Rows without a value are dropped. Rows sharing a well name collapse to
/// their maximum. Ties keep the order in which the names first appear.
pub fn top_n_by_metric(
    latest: &Table<ProductionRecord>,
    metric: RankingMetric,
    n: usize,
) -> Result<Vec<RankedWell>, SchemaError> {
    if latest.is_empty() {
        return Ok(Vec::new());
    }
    latest.schema().require(metric.column(), "top_n_by_metric")?;

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<RankedWell> = Vec::new();
    for row in latest {
        let Some(value) = metric.value(row) else { continue };
        match index.get(row.well_name.as_str()) {
            Some(&i) => ranked[i].value = ranked[i].value.max(value),
            None => {
                index.insert(row.well_name.as_str(), ranked.len());
                ranked.push(RankedWell {
                    well_name: row.well_name.clone(),
                    value,
                });
            }
        }
    }

    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.truncate(n);
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{prod, prod_table};
    use crate::types::Schema;

    fn well(name: &str, oil: Option<f64>) -> ProductionRecord {
        let mut r = prod(name, 2020, 1);
        r.well_name = name.to_string();
        r.oil_cum_m3 = oil;
        r
    }

    #[test]
    fn test_descending_with_stable_ties() {
        let latest = prod_table(vec![
            well("A", Some(5.0)),
            well("B", Some(9.0)),
            well("C", Some(5.0)),
            well("D", None),
            well("E", Some(1.0)),
        ]);
        let top = top_n_by_metric(&latest, RankingMetric::OilCum, 3).unwrap();
        let names: Vec<&str> = top.iter().map(|w| w.well_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_duplicate_names_take_max() {
        let latest = prod_table(vec![well("A", Some(5.0)), well("A", Some(7.0))]);
        let top = top_n_by_metric(&latest, RankingMetric::OilCum, 20).unwrap();
        assert_eq!(top, vec![RankedWell { well_name: "A".into(), value: 7.0 }]);
    }

    #[test]
    fn test_empty_and_missing_column() {
        let empty = prod_table(Vec::new());
        assert!(top_n_by_metric(&empty, RankingMetric::GasCum, 5).unwrap().is_empty());

        let table = Table::new(Schema::new([Column::WellName]), vec![well("A", Some(1.0))]);
        let err = top_n_by_metric(&table, RankingMetric::WaterCum, 5).unwrap_err();
        assert_eq!(err.column, Column::WaterProdCumM3);
    }
}
