//! Intensity-response correlations
//!
//! Pearson correlation between treatment design (proppant and fluid
//! intensity, stage count) and the cumulative production joined onto each
//! frac well. p-values come from Student's t-distribution via statrs.

use crate::types::{Column, FracRecord, ResponseCorrelation, Table};
use statrs::distribution::{ContinuousCDF, StudentsT};

type Extract = fn(&FracRecord) -> Option<f64>;

const TREATMENTS: [(Column, Extract); 3] = [
    (Column::ProppantIntensityLbft, |r: &FracRecord| r.proppant_intensity_lbft),
    (Column::FluidIntensityBblft, |r: &FracRecord| r.fluid_intensity_bblft),
    (Column::NumberStages, |r: &FracRecord| r.number_stages),
];

const RESPONSES: [(Column, Extract); 2] = [
    (Column::OilCumKm3, |r: &FracRecord| r.oil_cum_km3),
    (Column::GasCumMm3, |r: &FracRecord| r.gas_cum_mm3),
];

/// Pearson r over paired samples. Zero when either side has no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    if x.is_empty() || x.len() != y.len() {
        return 0.0;
    }
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        (sxy / denominator).clamp(-1.0, 1.0)
    }
}

/// Two-tailed p-value for `r` with `n` samples (t-test on n-2 df).
pub fn p_value_for_r(r: f64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }
    // Near-perfect correlation
    if r.abs() >= 0.9999 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t_stat = r * df.sqrt() / (1.0 - r * r).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => 2.0 * (1.0 - t_dist.cdf(t_stat.abs())),
        Err(_) => 1.0,
    }
}

/// Correlate every treatment variable with every production response.
///
/// Only rows where both values are present form a pair. Combinations with
/// fewer than `min_samples` pairs are left out, so an empty or unjoined frac
/// table simply yields no rows.
pub fn intensity_response(frac: &Table<FracRecord>, min_samples: usize) -> Vec<ResponseCorrelation> {
    let min_samples = min_samples.max(3);
    let mut out = Vec::new();

    for (treatment, tx) in TREATMENTS {
        for (response, ry) in RESPONSES {
            let (x, y): (Vec<f64>, Vec<f64>) = frac
                .iter()
                .filter_map(|r| Some((tx(r)?, ry(r)?)))
                .unzip();
            if x.len() < min_samples {
                continue;
            }

            let r = pearson(&x, &y);
            out.push(ResponseCorrelation {
                treatment: treatment.name(),
                response: response.name(),
                r_value: r,
                r_squared: r * r,
                p_value: p_value_for_r(r, x.len()),
                sample_count: x.len(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{frac, frac_table};

    fn treated(id: &str, intensity: f64, oil: Option<f64>) -> FracRecord {
        let mut r = frac(id, Some(1_000.0), Some(intensity * 1_000.0));
        r.proppant_intensity_lbft = Some(intensity);
        r.oil_cum_km3 = oil;
        r
    }

    #[test]
    fn test_pearson_perfect_and_flat() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&x, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&x, &[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_p_value_bounds() {
        assert_eq!(p_value_for_r(0.5, 2), 1.0);
        assert_eq!(p_value_for_r(1.0, 10), 0.0);
        let weak = p_value_for_r(0.1, 10);
        let strong = p_value_for_r(0.8, 10);
        assert!(strong < weak);
        assert!((0.0..=1.0).contains(&weak));
        // r = 0 gives t = 0 and the full two-tailed mass
        assert!((p_value_for_r(0.0, 10) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pairs_need_both_values() {
        let table = frac_table(vec![
            treated("A", 1_000.0, Some(10.0)),
            treated("B", 2_000.0, Some(20.0)),
            treated("C", 3_000.0, None),
            treated("D", 4_000.0, Some(41.0)),
        ]);
        let rows = intensity_response(&table, 3);
        let oil = rows
            .iter()
            .find(|c| c.treatment == "proppant_intensity_lbft" && c.response == "oil_cum_km3")
            .unwrap();
        assert_eq!(oil.sample_count, 3);
        assert!(oil.r_value > 0.99);
        // No gas was joined, so nothing is reported for gas
        assert!(rows.iter().all(|c| c.response != "gas_cum_Mm3"));
    }

    #[test]
    fn test_too_few_samples_is_empty() {
        let table = frac_table(vec![treated("A", 1.0, Some(1.0)), treated("B", 2.0, Some(3.0))]);
        assert!(intensity_response(&table, 3).is_empty());
        assert!(intensity_response(&frac_table(Vec::new()), 3).is_empty());
    }
}
