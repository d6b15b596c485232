//! Single-well drill-down

use crate::types::{FracRecord, ProductionRecord, Table};

/// Filtered production reports of one well in date order.
///
/// Undated rows go last, in input order.
pub fn well_history(
    production: &Table<ProductionRecord>,
    well_name: &str,
) -> Table<ProductionRecord> {
    let mut rows: Vec<ProductionRecord> = production
        .iter()
        .filter(|r| r.well_name == well_name)
        .cloned()
        .collect();
    rows.sort_by_key(|r| (r.date.is_none(), r.date));
    production.with_rows(rows)
}

/// Frac treatments recorded for one well.
pub fn well_treatments(frac: &Table<FracRecord>, well_name: &str) -> Table<FracRecord> {
    let rows = frac
        .iter()
        .filter(|r| r.well_name == well_name)
        .cloned()
        .collect();
    frac.with_rows(rows)
}

/// Distinct well names in first-appearance order, for a well picker.
pub fn well_names(production: &Table<ProductionRecord>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    production
        .iter()
        .filter(|r| seen.insert(r.well_name.as_str()))
        .map(|r| r.well_name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{frac, frac_table, prod, prod_table};

    #[test]
    fn test_history_sorted_with_undated_last() {
        let mut late = prod("A", 2021, 3);
        late.oil_prod_m3 = Some(3.0);
        let mut undated = prod("A", 2020, 9);
        undated.date = None;
        let early = prod("A", 2019, 1);

        let table = prod_table(vec![late, prod("B", 2018, 1), undated, early]);
        let history = well_history(&table, "A-name");
        let years: Vec<i32> = history.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2021, 2020]);
    }

    #[test]
    fn test_unknown_well_is_empty() {
        let table = prod_table(vec![prod("A", 2019, 1)]);
        assert!(well_history(&table, "nope").is_empty());
        assert!(well_treatments(&frac_table(vec![frac("A", None, None)]), "nope").is_empty());
    }

    #[test]
    fn test_well_names_first_appearance() {
        let table = prod_table(vec![prod("B", 2019, 1), prod("A", 2019, 1), prod("B", 2019, 2)]);
        assert_eq!(well_names(&table), vec!["B-name", "A-name"]);
    }
}
