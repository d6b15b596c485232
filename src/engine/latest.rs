//! Latest report per well
//!
//! Cumulative columns only make sense on a well's most recent report, so
//! every per-well KPI, ranking and the map start from this table.

use crate::error::SchemaError;
use crate::types::{Column, ProductionRecord, Table};
use std::collections::HashMap;

/// One row per `well_id`: the row with the highest `month_count`.
///
/// Ties go to the first maximal row in input order. A row without a counter
/// only wins when none of its well's rows has one. Wells appear in order of
/// their first row in the input.
pub fn latest_per_well(
    production: &Table<ProductionRecord>,
) -> Result<Table<ProductionRecord>, SchemaError> {
    if production.is_empty() {
        return Ok(production.empty_like());
    }
    production
        .schema()
        .require(Column::MonthCount, "latest_per_well")?;

    let mut winner: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for (idx, row) in production.iter().enumerate() {
        match winner.get_mut(row.well_id.as_str()) {
            Some(best) => {
                // Option ordering puts None below every Some
                if row.month_count > production.rows()[*best].month_count {
                    *best = idx;
                }
            }
            None => {
                winner.insert(&row.well_id, idx);
                order.push(&row.well_id);
            }
        }
    }

    let rows = order
        .iter()
        .map(|id| production.rows()[winner[id]].clone())
        .collect();
    Ok(production.with_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{prod, prod_table};
    use crate::types::Schema;

    #[test]
    fn test_picks_max_month_count() {
        let table = prod_table(vec![
            prod("A", 2019, 1),
            prod("B", 2019, 1),
            prod("A", 2019, 3),
            prod("A", 2019, 2),
        ]);
        let latest = latest_per_well(&table).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest.rows()[0].well_id, "A");
        assert_eq!(latest.rows()[0].month_count, Some(3));
        assert_eq!(latest.rows()[1].well_id, "B");
    }

    #[test]
    fn test_tie_keeps_first_row() {
        let mut first = prod("A", 2019, 5);
        first.oil_cum_m3 = Some(1.0);
        let mut second = prod("A", 2020, 5);
        second.oil_cum_m3 = Some(2.0);

        let latest = latest_per_well(&prod_table(vec![first, second])).unwrap();
        assert_eq!(latest.rows()[0].oil_cum_m3, Some(1.0));
    }

    #[test]
    fn test_missing_counter_loses() {
        let mut blank = prod("A", 2021, 0);
        blank.month_count = None;
        let latest = latest_per_well(&prod_table(vec![blank, prod("A", 2019, 1)])).unwrap();
        assert_eq!(latest.rows()[0].month_count, Some(1));
    }

    #[test]
    fn test_empty_input_keeps_shape() {
        let table = prod_table(Vec::new());
        let latest = latest_per_well(&table).unwrap();
        assert!(latest.is_empty());
        assert_eq!(latest.schema(), table.schema());
    }

    #[test]
    fn test_requires_month_count() {
        let table = Table::new(
            Schema::new([Column::WellId, Column::Year]),
            vec![prod("A", 2019, 1)],
        );
        let err = latest_per_well(&table).unwrap_err();
        assert_eq!(err.column, Column::MonthCount);
    }
}
