//! Filter-and-Aggregate Engine
//!
//! Owns the immutable base tables and turns one set of [`FilterCriteria`]
//! plus [`MapSettings`] into a complete, mutually consistent
//! [`DashboardOutputs`]. Every recomputation starts from the base tables;
//! nothing is updated incrementally, so results never depend on the order in
//! which controls were changed.
//!
//! ```text
//! base tables ──▶ apply_filters ──┬─▶ latest_per_well ─┬─▶ KPIs / by-type / top-N
//!                                 │                    └─▶ map layer
//!                                 ├─▶ compute_intensity ─▶ join_cumulative_production
//!                                 │                          └─▶ frac KPIs / intensity response
//!                                 └─▶ production over time, activity aggregates
//! ```
//!
//! The caller owns the resulting [`EngineState`]. When recomputations race,
//! [`EngineState::supersede`] keeps the newest one.

pub mod aggregates;
pub mod correlations;
pub mod explorer;
pub mod filter;
pub mod frac;
pub mod kpis;
pub mod latest;
pub mod map_layer;
pub mod ranking;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregates::{
    completions_by_company, completions_by_year, depth_by_type, drilling_by_company,
    drilling_by_year, production_over_time, wells_by_type,
};
pub use correlations::intensity_response;
pub use explorer::{well_history, well_names, well_treatments};
pub use filter::apply_filters;
pub use frac::{compute_intensity, join_cumulative_production};
pub use kpis::compute_kpis;
pub use latest::latest_per_well;
pub use map_layer::build_map_layer;
pub use ranking::top_n_by_metric;

use crate::config::{DashboardConfig, DataConfig, MapConfig, RankingConfig, UnitsConfig};
use crate::dataset;
use crate::error::Result;
use crate::types::{
    CompletionRecord, DashboardOutputs, DrillRecord, FilterCriteria, FracRecord, MapSettings,
    ProductionRecord, RankingMetric, Table, YearRange, ALL_SENTINEL,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// Base Tables
// ============================================================================

/// Datasets as loaded. Never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTables {
    pub production: Table<ProductionRecord>,
    pub frac: Table<FracRecord>,
    pub drilling: Option<Table<DrillRecord>>,
    pub completion: Option<Table<CompletionRecord>>,
}

fn resolve(path: &Path, data_dir: Option<&Path>) -> PathBuf {
    match data_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

impl BaseTables {
    /// Load every configured dataset. Relative paths resolve against `data_dir`.
    pub fn load(data: &DataConfig, data_dir: Option<&Path>) -> Result<Self> {
        let production = dataset::load_production(resolve(&data.production, data_dir))?;
        let frac = dataset::load_frac(resolve(&data.frac, data_dir))?;
        let drilling = data
            .drilling
            .as_deref()
            .map(|p| dataset::load_drilling(resolve(p, data_dir)))
            .transpose()?;
        let completion = data
            .completion
            .as_deref()
            .map(|p| dataset::load_completion(resolve(p, data_dir)))
            .transpose()?;

        info!(
            production_rows = production.len(),
            frac_rows = frac.len(),
            drilling = drilling.is_some(),
            completion = completion.is_some(),
            "Base tables ready"
        );
        Ok(Self {
            production,
            frac,
            drilling,
            completion,
        })
    }
}

// ============================================================================
// Engine State
// ============================================================================

/// One filter change coming from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
pub struct RecomputeRequest {
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub map: MapSettings,
}

/// Current criteria and the outputs derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineState {
    /// Increases by one per recomputation.
    pub generation: u64,
    pub criteria: FilterCriteria,
    pub map: MapSettings,
    /// `None` until the first recomputation.
    pub outputs: Option<DashboardOutputs>,
}

impl EngineState {
    /// State before anything has been computed.
    pub fn initial(criteria: FilterCriteria, map: MapSettings) -> Self {
        Self {
            generation: 0,
            criteria,
            map,
            outputs: None,
        }
    }

    /// Last write wins: keep whichever state was produced later.
    pub fn supersede(self, newer: EngineState) -> EngineState {
        if newer.generation >= self.generation {
            newer
        } else {
            debug!(
                stale = newer.generation,
                current = self.generation,
                "Discarding stale recomputation"
            );
            self
        }
    }
}

/// Choices offered by the filter controls, each led by [`ALL_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub companies: Vec<String>,
    pub fields: Vec<String>,
    pub well_types: Vec<String>,
}

fn options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    std::iter::once(ALL_SENTINEL)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Engine
// ============================================================================

/// Shared, read-only engine. Cheap to clone and safe to use from any thread.
#[derive(Debug, Clone)]
pub struct Engine {
    tables: Arc<BaseTables>,
    units: UnitsConfig,
    map: MapConfig,
    ranking: RankingConfig,
}

impl Engine {
    pub fn new(tables: Arc<BaseTables>, config: &DashboardConfig) -> Self {
        Self {
            tables,
            units: config.units.clone(),
            map: config.map.clone(),
            ranking: config.ranking.clone(),
        }
    }

    pub fn tables(&self) -> &BaseTables {
        &self.tables
    }

    /// Year span of the production data, for the slider. Frac years outside
    /// it are only reachable by widening the range by hand.
    pub fn year_bounds(&self) -> Option<YearRange> {
        let years = self.tables.production.iter().map(|r| r.year);
        let (min, max) = years.fold(None, |acc: Option<(i32, i32)>, y| match acc {
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            None => Some((y, y)),
        })?;
        Some(YearRange::new(min, max))
    }

    /// Companies and fields as listed in the frac data; well types from production.
    pub fn filter_options(&self) -> FilterOptions {
        let frac = &self.tables.frac;
        FilterOptions {
            companies: options(frac.iter().map(|r| r.company.as_str())),
            fields: options(frac.iter().map(|r| r.field.as_str())),
            well_types: options(
                self.tables
                    .production
                    .iter()
                    .filter_map(|r| r.well_type.as_deref()),
            ),
        }
    }

    /// Derive every output for one set of criteria.
    pub fn compute(&self, criteria: &FilterCriteria, map: MapSettings) -> Result<DashboardOutputs> {
        let t = &self.tables;

        let production = apply_filters(&t.production, criteria);
        let drilling = t.drilling.as_ref().map(|d| apply_filters(d, criteria));
        let completion = t.completion.as_ref().map(|c| apply_filters(c, criteria));

        let latest = latest_per_well(&production)?;
        let frac = compute_intensity(&apply_filters(&t.frac, criteria))?;
        let frac = join_cumulative_production(&frac, &production, &self.units)?;

        let kpis = compute_kpis(
            &latest,
            &frac,
            drilling.as_ref(),
            completion.as_ref(),
            &self.units,
        );
        let top_n = self.ranking.top_n;

        Ok(DashboardOutputs {
            kpis,
            wells_by_type: wells_by_type(&latest),
            depth_by_type: depth_by_type(&latest),
            production_over_time: production_over_time(&production),
            drilling_by_year: drilling.as_ref().map(drilling_by_year).unwrap_or_default(),
            drilling_by_company: drilling.as_ref().map(drilling_by_company).unwrap_or_default(),
            completions_by_year: completion.as_ref().map(completions_by_year).unwrap_or_default(),
            completions_by_company: completion
                .as_ref()
                .map(completions_by_company)
                .unwrap_or_default(),
            top_oil_wells: top_n_by_metric(&latest, RankingMetric::OilCum, top_n)?,
            top_gas_wells: top_n_by_metric(&latest, RankingMetric::GasCum, top_n)?,
            map: build_map_layer(&latest, map, &self.map)?,
            intensity_response: intensity_response(&frac, self.ranking.min_correlation_samples),
            filtered_production: production,
            filtered_frac: frac,
            filtered_drilling: drilling,
            filtered_completion: completion,
            latest_per_well: latest,
        })
    }

    /// Full recomputation for a filter change.
    ///
    /// The result is a new state one generation after `prior`. `prior` is
    /// left untouched, so a failed recomputation keeps the last good outputs.
    pub fn recompute(&self, prior: &EngineState, request: RecomputeRequest) -> Result<EngineState> {
        let outputs = self.compute(&request.criteria, request.map)?;
        let generation = prior.generation + 1;

        debug!(
            generation,
            production_rows = outputs.filtered_production.len(),
            frac_rows = outputs.filtered_frac.len(),
            wells = outputs.latest_per_well.len(),
            map_points = outputs.map.points.len(),
            "Recomputed dashboard outputs"
        );

        Ok(EngineState {
            generation,
            criteria: request.criteria,
            map: request.map,
            outputs: Some(outputs),
        })
    }
}
