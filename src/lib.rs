//! VM Explorer: Vaca Muerta Well Data Engine
//!
//! Filter-and-aggregate core for shale well data (production, frac
//! treatments, drilling and completion activity).
//!
//! ## Architecture
//!
//! - **Dataset**: flat-file loader and CSV exporter
//! - **Engine**: filtering, latest-per-well, intensities, KPIs, aggregates,
//!   rankings and the map layer, recomputed in full on every filter change
//! - **Config**: TOML configuration for data paths, units and view defaults

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod types;

// Re-export configuration
pub use config::DashboardConfig;

// Re-export the engine surface
pub use engine::{BaseTables, Engine, EngineState, FilterOptions, RecomputeRequest};

// Re-export errors
pub use error::{EngineError, SchemaError};

// Re-export commonly used types
pub use types::{
    Column, DashboardOutputs, FilterCriteria, FracRecord, MapMetric, MapSettings,
    ProductionRecord, Schema, Selection, Table, YearRange,
};
