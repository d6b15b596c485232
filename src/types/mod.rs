//! Data model: base records, schemas, filter criteria and derived outputs

pub mod criteria;
pub mod outputs;
pub mod records;
pub mod schema;

pub use criteria::{FilterCriteria, MapMetric, MapSettings, Selection, YearRange, ALL_SENTINEL};
pub use outputs::{
    ActivityKpis, CompletionTotals, DashboardOutputs, DrillingTotals, FracKpis, Kpis, MapLayer,
    MapPoint, ProductionKpis, ProductionPoint, RankedWell, RankingMetric, ResponseCorrelation,
    WellTypeCount, WellTypeDepth,
};
pub use records::{
    CompletionRecord, Dimension, DrillRecord, Filterable, FracRecord, ProductionRecord,
};
pub use schema::{Column, Schema, Table};
