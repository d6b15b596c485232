//! Bubble map of wells scaled by cumulative production
//!
//! Marker sizes saturate at a high quantile of the metric so one prolific
//! well does not flatten every other bubble to the minimum size.

use crate::config::MapConfig;
use crate::error::SchemaError;
use crate::types::{Column, MapLayer, MapMetric, MapPoint, MapSettings, ProductionRecord, Table};

/// Quantile with linear interpolation between the closest ranks.
///
/// Position `q * (n - 1)` in the sorted values, the same definition pandas
/// uses by default. `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn metric_column(metric: MapMetric) -> Column {
    match metric {
        MapMetric::Oil => Column::OilCumM3,
        MapMetric::Gas => Column::GasCumKm3,
    }
}

fn metric_value(metric: MapMetric, row: &ProductionRecord) -> Option<f64> {
    match metric {
        MapMetric::Oil => row.oil_cum_m3,
        MapMetric::Gas => row.gas_cum_km3,
    }
}

fn max_present(values: impl Iterator<Item = Option<f64>>) -> f64 {
    values
        .flatten()
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .unwrap_or(0.0)
}

/// Build the map layer from the latest report of each well.
///
/// Missing metric values count as zero for sizing and for the percentile
/// cutoff. `min_percentile` outside `0..=100` disables the cutoff. The layer
/// maxima cover every input well, including those below the cutoff.
pub fn build_map_layer(
    latest: &Table<ProductionRecord>,
    settings: MapSettings,
    config: &MapConfig,
) -> Result<MapLayer, SchemaError> {
    let metric = settings.metric;
    if latest.is_empty() {
        return Ok(MapLayer {
            metric,
            ..MapLayer::default()
        });
    }
    latest
        .schema()
        .require(metric_column(metric), "build_map_layer")?;

    let values: Vec<f64> = latest
        .iter()
        .map(|r| metric_value(metric, r).unwrap_or(0.0))
        .collect();

    let clip = match quantile(&values, config.clip_quantile) {
        Some(q) if q > 0.0 => q,
        _ => 1.0,
    };
    let cutoff = if (0..=100).contains(&settings.min_percentile) {
        quantile(&values, f64::from(settings.min_percentile) / 100.0).unwrap_or(0.0)
    } else {
        0.0
    };
    let span = config.max_marker_size - config.min_marker_size;
    let label = metric.label();

    let points = latest
        .iter()
        .zip(&values)
        .filter(|(_, v)| **v >= cutoff)
        .map(|(row, &v)| MapPoint {
            well_id: row.well_id.clone(),
            well_name: row.well_name.clone(),
            x: row.x_coor,
            y: row.y_coor,
            oil_cum_m3: row.oil_cum_m3,
            gas_cum_km3: row.gas_cum_km3,
            metric_value: v,
            size: config.min_marker_size + span * v.min(clip) / clip,
            hover_text: format!(
                "Well: {}<br>Company: {}<br>Field: {}<br>{}: {:.1}",
                row.well_name, row.company, row.field, label, v
            ),
        })
        .collect();

    Ok(MapLayer {
        metric,
        metric_label: label.to_string(),
        fill_color: metric.fill_color().to_string(),
        border_color: metric.border_color().to_string(),
        max_oil: max_present(latest.iter().map(|r| r.oil_cum_m3)),
        max_gas: max_present(latest.iter().map(|r| r.gas_cum_km3)),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{prod, prod_table};
    use crate::types::Schema;

    fn latest_with_oil(values: &[Option<f64>]) -> Table<ProductionRecord> {
        let rows = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut r = prod(&format!("W{i}"), 2020, 1);
                r.oil_cum_m3 = *v;
                r
            })
            .collect();
        prod_table(rows)
    }

    fn settings(metric: MapMetric, min_percentile: i32) -> MapSettings {
        MapSettings {
            metric,
            min_percentile,
        }
    }

    #[test]
    fn test_quantile_linear() {
        assert_eq!(quantile(&[10.0, 20.0, 30.0, 1000.0], 0.5), Some(25.0));
        let q95 = quantile(&[1000.0, 10.0, 30.0, 20.0], 0.95).unwrap();
        assert!((q95 - 854.5).abs() < 1e-9);
        assert_eq!(quantile(&[7.0], 0.3), Some(7.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_sizes_clip_at_q95() {
        let latest = latest_with_oil(&[Some(10.0), Some(20.0), Some(30.0), Some(1000.0)]);
        let layer =
            build_map_layer(&latest, settings(MapMetric::Oil, 0), &MapConfig::default()).unwrap();

        assert_eq!(layer.points.len(), 4);
        let big = &layer.points[3];
        assert_eq!(big.size, 40.0);
        let small = &layer.points[0];
        assert!((small.size - (4.0 + 36.0 * 10.0 / 854.5)).abs() < 1e-9);
        assert_eq!(layer.max_oil, 1000.0);
        assert_eq!(layer.metric_label, "Oil (m³)");
    }

    #[test]
    fn test_size_is_monotonic_and_bounded() {
        let latest = latest_with_oil(&[Some(5.0), None, Some(50.0), Some(500.0), Some(5.0)]);
        let layer =
            build_map_layer(&latest, settings(MapMetric::Oil, -1), &MapConfig::default()).unwrap();

        for a in &layer.points {
            assert!((4.0..=40.0).contains(&a.size));
            for b in &layer.points {
                if a.metric_value <= b.metric_value {
                    assert!(a.size <= b.size);
                }
            }
        }
        // Missing oil reads as zero and gets the minimum size
        assert_eq!(layer.points[1].metric_value, 0.0);
        assert_eq!(layer.points[1].size, 4.0);
    }

    #[test]
    fn test_percentile_cutoff() {
        let latest = latest_with_oil(&[Some(10.0), Some(20.0), Some(30.0), Some(1000.0)]);
        let layer =
            build_map_layer(&latest, settings(MapMetric::Oil, 50), &MapConfig::default()).unwrap();
        let ids: Vec<&str> = layer.points.iter().map(|p| p.well_id.as_str()).collect();
        assert_eq!(ids, vec!["W2", "W3"]);
        // Maxima still cover the wells below the cutoff
        assert_eq!(layer.max_oil, 1000.0);

        let all =
            build_map_layer(&latest, settings(MapMetric::Oil, 150), &MapConfig::default()).unwrap();
        assert_eq!(all.points.len(), 4);
    }

    #[test]
    fn test_all_zero_metric_uses_unit_clip() {
        let latest = latest_with_oil(&[None, Some(0.0)]);
        let layer =
            build_map_layer(&latest, settings(MapMetric::Oil, 0), &MapConfig::default()).unwrap();
        assert!(layer.points.iter().all(|p| p.size == 4.0));
        assert_eq!(layer.max_oil, 0.0);
    }

    #[test]
    fn test_hover_text_and_gas_styling() {
        let mut row = prod("W1", 2020, 1);
        row.gas_cum_km3 = Some(1234.56);
        let layer = build_map_layer(
            &prod_table(vec![row]),
            settings(MapMetric::Gas, 0),
            &MapConfig::default(),
        )
        .unwrap();
        assert_eq!(
            layer.points[0].hover_text,
            "Well: W1-name<br>Company: YPF<br>Field: Loma Campana<br>Gas (km³): 1234.6"
        );
        assert_eq!(layer.fill_color, MapMetric::Gas.fill_color());
        assert_eq!(layer.max_gas, 1234.56);
    }

    #[test]
    fn test_empty_input() {
        let layer = build_map_layer(
            &prod_table(Vec::new()),
            settings(MapMetric::Gas, 0),
            &MapConfig::default(),
        )
        .unwrap();
        assert!(layer.points.is_empty());
        assert_eq!(layer.metric, MapMetric::Gas);
        assert_eq!(layer.metric_label, "");
        assert_eq!((layer.max_oil, layer.max_gas), (0.0, 0.0));
    }

    #[test]
    fn test_missing_metric_column() {
        let table = Table::new(Schema::new([Column::WellId]), vec![prod("W1", 2020, 1)]);
        let err = build_map_layer(&table, settings(MapMetric::Gas, 0), &MapConfig::default())
            .unwrap_err();
        assert_eq!(err.column, Column::GasCumKm3);
    }
}
