//! Base record types for the four datasets
//!
//! Values that may be blank in the source files are `Option`s. Identity
//! columns (well id, company, field, year) are always present; the loader
//! rejects files without them.

use super::schema::Column;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filterable categorical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Company,
    Field,
    WellType,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Company, Dimension::Field, Dimension::WellType];

    /// The column that carries this dimension.
    pub fn column(self) -> Column {
        match self {
            Dimension::Company => Column::Company,
            Dimension::Field => Column::Field,
            Dimension::WellType => Column::WellType,
        }
    }
}

/// A record that can be narrowed by [`crate::engine::filter::apply_filters`].
pub trait Filterable {
    /// Value of a categorical dimension, `None` when blank or not carried.
    fn dimension(&self, dimension: Dimension) -> Option<&str>;

    fn year(&self) -> i32;
}

// ============================================================================
// Production
// ============================================================================

/// One monthly production report for one well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub well_id: String,
    pub well_name: String,
    pub company: String,
    pub field: String,
    pub well_type: Option<String>,
    pub year: i32,
    pub month: Option<u32>,
    /// First day of `year`/`month`; `None` when the pair is not a calendar date.
    pub date: Option<NaiveDate>,
    pub depth_m: Option<f64>,
    pub oil_prod_m3: Option<f64>,
    pub gas_prod_km3: Option<f64>,
    pub water_prod_m3: Option<f64>,
    pub oil_cum_m3: Option<f64>,
    pub gas_cum_km3: Option<f64>,
    pub water_prod_cum_m3: Option<f64>,
    pub x_coor: Option<f64>,
    pub y_coor: Option<f64>,
    /// Sequence index of this report within the well's history.
    pub month_count: Option<i64>,
}

impl ProductionRecord {
    pub fn reporting_date(year: i32, month: Option<u32>) -> Option<NaiveDate> {
        month.and_then(|m| NaiveDate::from_ymd_opt(year, m, 1))
    }
}

impl Filterable for ProductionRecord {
    fn dimension(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Company => Some(&self.company),
            Dimension::Field => Some(&self.field),
            Dimension::WellType => self.well_type.as_deref(),
        }
    }

    fn year(&self) -> i32 {
        self.year
    }
}

// ============================================================================
// Frac
// ============================================================================

/// A completed hydraulic-fracturing treatment.
///
/// The trailing fields are filled in by the engine (intensity and
/// cumulative-production join) and are `None` on freshly loaded rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FracRecord {
    pub well_id: String,
    pub well_name: String,
    pub company: String,
    pub field: String,
    pub well_type: Option<String>,
    pub year: i32,
    pub lateral_length_ft: Option<f64>,
    pub number_stages: Option<f64>,
    pub proppant_pumped_lb: Option<f64>,
    pub fluid_pumped_bbl: Option<f64>,

    // Derived
    pub proppant_intensity_lbft: Option<f64>,
    pub fluid_intensity_bblft: Option<f64>,
    pub oil_cum_km3: Option<f64>,
    pub gas_cum_mm3: Option<f64>,
    pub water_cum_km3: Option<f64>,
}

impl Filterable for FracRecord {
    fn dimension(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Company => Some(&self.company),
            Dimension::Field => Some(&self.field),
            Dimension::WellType => self.well_type.as_deref(),
        }
    }

    fn year(&self) -> i32 {
        self.year
    }
}

// ============================================================================
// Drilling & Completion
// ============================================================================

/// Yearly drilling activity per company and field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillRecord {
    pub company: String,
    pub field: String,
    pub year: i32,
    /// Wells spudded.
    pub wells: Option<f64>,
    /// Aggregate drilled length (m).
    pub meters: Option<f64>,
}

impl Filterable for DrillRecord {
    fn dimension(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Company => Some(&self.company),
            Dimension::Field => Some(&self.field),
            Dimension::WellType => None,
        }
    }

    fn year(&self) -> i32 {
        self.year
    }
}

/// Yearly completion activity per company and field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub company: String,
    pub field: String,
    pub year: i32,
    pub completion: Option<f64>,
}

impl Filterable for CompletionRecord {
    fn dimension(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Company => Some(&self.company),
            Dimension::Field => Some(&self.field),
            Dimension::WellType => None,
        }
    }

    fn year(&self) -> i32 {
        self.year
    }
}
