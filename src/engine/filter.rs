//! Multi-criteria row filtering
//!
//! One generic pass serves all four datasets. A categorical dimension is
//! only applied when the table actually carries that column, so a well-type
//! selection narrows production rows but leaves drilling activity alone.

use crate::types::{Dimension, FilterCriteria, Filterable, Selection, Table};

/// Keep the rows of `table` that satisfy `criteria`, in their original order.
///
/// - `Unrestricted` dimensions exclude nothing.
/// - `Selected` dimensions keep rows whose value is in the set; a blank
///   value never matches a restricted dimension.
/// - The inclusive year range is always applied.
///
/// An empty result is a normal outcome.
pub fn apply_filters<R>(table: &Table<R>, criteria: &FilterCriteria) -> Table<R>
where
    R: Filterable + Clone,
{
    let active: Vec<(Dimension, &Selection)> = Dimension::ALL
        .iter()
        .map(|&d| (d, criteria.selection(d)))
        .filter(|(d, sel)| !sel.is_unrestricted() && table.schema().contains(d.column()))
        .collect();

    let rows = table
        .iter()
        .filter(|row| criteria.year_range.contains(row.year()))
        .filter(|row| active.iter().all(|(d, sel)| sel.admits(row.dimension(*d))))
        .cloned()
        .collect();

    table.with_rows(rows)
}

impl FilterCriteria {
    /// The selection for one dimension.
    pub fn selection(&self, dimension: Dimension) -> &Selection {
        match dimension {
            Dimension::Company => &self.company,
            Dimension::Field => &self.field,
            Dimension::WellType => &self.well_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{drill, prod, prod_table};
    use crate::types::{Column, Schema, YearRange};

    #[test]
    fn test_unrestricted_is_identity() {
        let table = prod_table(vec![
            prod("A", 2018, 1),
            prod("B", 2019, 1),
            prod("A", 2020, 2),
        ]);
        let criteria = FilterCriteria::unrestricted(YearRange::new(2018, 2020));
        assert_eq!(apply_filters(&table, &criteria), table);
    }

    #[test]
    fn test_company_and_year_preserve_order() {
        let mut rows = vec![
            prod("A", 2018, 1),
            prod("B", 2019, 1),
            prod("A", 2019, 2),
            prod("C", 2019, 1),
        ];
        rows[1].company = "Vista".into();
        let table = prod_table(rows);

        let criteria = FilterCriteria {
            company: Selection::single("YPF"),
            year_range: YearRange::new(2019, 2019),
            ..FilterCriteria::default()
        };
        let out = apply_filters(&table, &criteria);
        let ids: Vec<&str> = out.iter().map(|r| r.well_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn test_blank_value_fails_restricted_dimension() {
        let mut rows = vec![prod("A", 2019, 1), prod("B", 2019, 1)];
        rows[1].well_type = None;
        let table = prod_table(rows);

        let criteria = FilterCriteria {
            well_type: Selection::single("Petrolifero"),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&table, &criteria).len(), 1);
    }

    #[test]
    fn test_dimension_skipped_when_column_absent() {
        let table = Table::new(
            Schema::new([Column::Company, Column::Field, Column::Year]),
            vec![drill("YPF", 2019), drill("Vista", 2020)],
        );
        let criteria = FilterCriteria {
            well_type: Selection::single("Gasifero"),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&table, &criteria).len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let table = prod_table(vec![prod("A", 2018, 1), prod("B", 2021, 1)]);
        let criteria = FilterCriteria {
            field: Selection::from_values(["Loma Campana", "Bajada del Palo"]),
            year_range: YearRange::new(2019, 2022),
            ..FilterCriteria::default()
        };
        let once = apply_filters(&table, &criteria);
        assert_eq!(apply_filters(&table, &criteria), once);
        assert_eq!(apply_filters(&once, &criteria), once);
    }

    #[test]
    fn test_inverted_year_range_is_empty() {
        let table = prod_table(vec![prod("A", 2019, 1)]);
        let criteria = FilterCriteria::unrestricted(YearRange::new(2020, 2018));
        let out = apply_filters(&table, &criteria);
        assert!(out.is_empty());
        assert_eq!(out.schema(), table.schema());
    }
}
