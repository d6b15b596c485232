//! System-wide default constants.
//!
//! Grouped by subsystem. Every value here can be overridden from
//! `explorer.toml`.

// ============================================================================
// Data files
// ============================================================================

/// Monthly production reports, one row per well per month.
pub const PRODUCTION_FILE: &str = "data/well_prod_data.csv";

/// Frac treatments merged with well metadata.
pub const FRAC_FILE: &str = "data/well_frac_prod_data_VM.csv";

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "VM_EXPLORER_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "explorer.toml";

// ============================================================================
// Display units
// ============================================================================

/// m³ → thousand m³, km³ → million m³.
pub const VOLUME_DIVISOR: f64 = 1_000.0;

/// lb → klb, bbl → kbbl.
pub const MASS_DIVISOR: f64 = 1_000.0;

/// m → km for drilled length.
pub const LENGTH_DIVISOR: f64 = 1_000.0;

// ============================================================================
// Map
// ============================================================================

/// Values above this quantile all get the largest marker.
pub const MAP_CLIP_QUANTILE: f64 = 0.95;

/// Marker size for a zero value.
pub const MAP_MIN_MARKER_SIZE: f64 = 4.0;

/// Marker size at and above the clip quantile.
pub const MAP_MAX_MARKER_SIZE: f64 = 40.0;

// ============================================================================
// Rankings
// ============================================================================

/// Wells shown in the top oil / top gas charts.
pub const TOP_N_WELLS: usize = 20;

/// Fewest paired samples for an intensity-response correlation.
pub const MIN_CORRELATION_SAMPLES: usize = 3;
