//! Derived views produced by one recomputation

use super::criteria::MapMetric;
use super::records::{CompletionRecord, DrillRecord, FracRecord, ProductionRecord};
use super::schema::Table;
use chrono::NaiveDate;
use serde::Serialize;

// ============================================================================
// KPIs
// ============================================================================

/// Headline numbers from the latest report of each well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProductionKpis {
    pub n_wells: usize,
    /// Cumulative oil, thousands of m³.
    pub total_oil: f64,
    /// Cumulative gas, millions of m³.
    pub total_gas: f64,
    /// Cumulative water, thousands of m³.
    pub total_water: f64,
}

/// Treatment design averages over the filtered frac table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FracKpis {
    pub n_frac_wells: usize,
    pub avg_lateral_length: f64,
    pub avg_stages: f64,
    pub total_proppant_klb: f64,
    pub total_fluid_kbbl: f64,
    /// lb/ft
    pub avg_proppant_intensity: f64,
    /// bbl/ft
    pub avg_fluid_intensity: f64,
}

/// Drilling and completion activity totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActivityKpis {
    pub total_wells_drilled: f64,
    pub total_meters_drilled_km: f64,
    pub total_completions: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub production: ProductionKpis,
    pub frac: FracKpis,
    pub activity: ActivityKpis,
}

// ============================================================================
// Aggregate tables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellTypeCount {
    pub well_type: String,
    pub n_wells: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellTypeDepth {
    pub well_type: String,
    pub avg_depth_m: f64,
}

/// Field-wide production for one reporting month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionPoint {
    pub date: NaiveDate,
    pub oil_prod_m3: f64,
    pub gas_prod_km3: f64,
    pub water_prod_m3: f64,
}

/// Drilling totals for one grouping key (a year or a company).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrillingTotals<K> {
    pub key: K,
    pub wells: f64,
    pub meters: f64,
}

/// Completion totals for one grouping key (a year or a company).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionTotals<K> {
    pub key: K,
    pub completions: f64,
}

/// One entry of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedWell {
    pub well_name: String,
    pub value: f64,
}

/// Metric used by [`crate::engine::ranking::top_n_by_metric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankingMetric {
    OilCum,
    GasCum,
    WaterCum,
}

impl RankingMetric {
    pub fn value(self, record: &ProductionRecord) -> Option<f64> {
        match self {
            RankingMetric::OilCum => record.oil_cum_m3,
            RankingMetric::GasCum => record.gas_cum_km3,
            RankingMetric::WaterCum => record.water_prod_cum_m3,
        }
    }
}

// ============================================================================
// Map
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub well_id: String,
    pub well_name: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub oil_cum_m3: Option<f64>,
    pub gas_cum_km3: Option<f64>,
    /// Chosen metric with blanks read as zero.
    pub metric_value: f64,
    pub size: f64,
    pub hover_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapLayer {
    pub metric: MapMetric,
    /// Empty when there is nothing to draw.
    pub metric_label: String,
    pub fill_color: String,
    pub border_color: String,
    pub max_oil: f64,
    pub max_gas: f64,
    pub points: Vec<MapPoint>,
}

// ============================================================================
// Intensity response
// ============================================================================

/// Pearson correlation between a treatment variable and a production response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseCorrelation {
    pub treatment: &'static str,
    pub response: &'static str,
    pub r_value: f64,
    pub r_squared: f64,
    pub p_value: f64,
    pub sample_count: usize,
}

// ============================================================================
// Bundle
// ============================================================================

/// Every view the dashboard renders, computed from one set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOutputs {
    pub filtered_production: Table<ProductionRecord>,
    pub filtered_frac: Table<FracRecord>,
    pub filtered_drilling: Option<Table<DrillRecord>>,
    pub filtered_completion: Option<Table<CompletionRecord>>,
    pub latest_per_well: Table<ProductionRecord>,
    pub kpis: Kpis,
    pub wells_by_type: Vec<WellTypeCount>,
    pub depth_by_type: Vec<WellTypeDepth>,
    pub production_over_time: Vec<ProductionPoint>,
    pub drilling_by_year: Vec<DrillingTotals<i32>>,
    pub drilling_by_company: Vec<DrillingTotals<String>>,
    pub completions_by_year: Vec<CompletionTotals<i32>>,
    pub completions_by_company: Vec<CompletionTotals<String>>,
    pub top_oil_wells: Vec<RankedWell>,
    pub top_gas_wells: Vec<RankedWell>,
    pub map: MapLayer,
    pub intensity_response: Vec<ResponseCorrelation>,
}
