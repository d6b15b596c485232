//! Dashboard Configuration - data locations, display units and view defaults
//!
//! Each struct implements `Default` with the values in [`super::defaults`],
//! so the explorer runs unchanged when no config file is present.

use super::defaults;
use crate::types::{MapMetric, MapSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `DashboardConfig::load()` which searches:
/// 1. `$VM_EXPLORER_CONFIG` env var
/// 2. `./explorer.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Source file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Display-unit divisors
    #[serde(default)]
    pub units: UnitsConfig,

    /// Map bubble scaling and default controls
    #[serde(default)]
    pub map: MapConfig,

    /// Top-N chart sizes
    #[serde(default)]
    pub ranking: RankingConfig,
}

impl DashboardConfig {
    /// Load configuration using the standard search order:
    /// 1. `$VM_EXPLORER_CONFIG` environment variable
    /// 2. `./explorer.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded explorer config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded explorer config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No explorer.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged, not rejected.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Reject values that would make a division or scale meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let u = &self.units;
        Self::check_divisor(u.volume_divisor, "units.volume_divisor", &mut errors);
        Self::check_divisor(u.mass_divisor, "units.mass_divisor", &mut errors);
        Self::check_divisor(u.length_divisor, "units.length_divisor", &mut errors);

        let m = &self.map;
        if !(m.clip_quantile > 0.0 && m.clip_quantile <= 1.0) {
            errors.push(format!(
                "map.clip_quantile ({}) must be in (0, 1]",
                m.clip_quantile
            ));
        }
        if !m.min_marker_size.is_finite() || m.min_marker_size < 0.0 {
            errors.push(format!(
                "map.min_marker_size ({}) must be a finite value >= 0",
                m.min_marker_size
            ));
        }
        if !m.max_marker_size.is_finite() || m.max_marker_size <= m.min_marker_size {
            errors.push(format!(
                "map.max_marker_size ({}) must be > min_marker_size ({})",
                m.max_marker_size, m.min_marker_size
            ));
        }

        if self.ranking.top_n == 0 {
            errors.push("ranking.top_n must be > 0".to_string());
        }

        for w in super::validation::validate_ranges(self) {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_divisor(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} ({value}) must be a finite value > 0"));
        }
    }

    /// Default map controls for a fresh session.
    pub fn initial_map_settings(&self) -> MapSettings {
        MapSettings {
            metric: self.map.metric,
            min_percentile: self.map.min_percentile,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Data Config
// ============================================================================

/// Flat-file locations. Relative paths resolve against the data directory
/// passed on the command line, or the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_production_path")]
    pub production: PathBuf,

    #[serde(default = "default_frac_path")]
    pub frac: PathBuf,

    /// Yearly drilling activity (optional dataset).
    #[serde(default)]
    pub drilling: Option<PathBuf>,

    /// Yearly completion activity (optional dataset).
    #[serde(default)]
    pub completion: Option<PathBuf>,
}

fn default_production_path() -> PathBuf { PathBuf::from(defaults::PRODUCTION_FILE) }
fn default_frac_path() -> PathBuf { PathBuf::from(defaults::FRAC_FILE) }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            production: default_production_path(),
            frac: default_frac_path(),
            drilling: None,
            completion: None,
        }
    }
}

// ============================================================================
// Units Config
// ============================================================================

/// Divisors applied to KPI totals and to the cumulative-production join.
/// These only change display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitsConfig {
    /// Fluid volumes (m³ → km³, km³ → Mm³).
    #[serde(default = "default_volume_divisor")]
    pub volume_divisor: f64,

    /// Proppant mass and fluid pumped (lb → klb, bbl → kbbl).
    #[serde(default = "default_mass_divisor")]
    pub mass_divisor: f64,

    /// Drilled length (m → km).
    #[serde(default = "default_length_divisor")]
    pub length_divisor: f64,
}

fn default_volume_divisor() -> f64 { defaults::VOLUME_DIVISOR }
fn default_mass_divisor() -> f64 { defaults::MASS_DIVISOR }
fn default_length_divisor() -> f64 { defaults::LENGTH_DIVISOR }

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            volume_divisor: default_volume_divisor(),
            mass_divisor: default_mass_divisor(),
            length_divisor: default_length_divisor(),
        }
    }
}

// ============================================================================
// Map Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Metric selected when a session starts.
    #[serde(default)]
    pub metric: MapMetric,

    /// Percentile cutoff selected when a session starts.
    #[serde(default)]
    pub min_percentile: i32,

    /// Quantile at which marker sizes saturate.
    #[serde(default = "default_clip_quantile")]
    pub clip_quantile: f64,

    #[serde(default = "default_min_marker_size")]
    pub min_marker_size: f64,

    #[serde(default = "default_max_marker_size")]
    pub max_marker_size: f64,
}

fn default_clip_quantile() -> f64 { defaults::MAP_CLIP_QUANTILE }
fn default_min_marker_size() -> f64 { defaults::MAP_MIN_MARKER_SIZE }
fn default_max_marker_size() -> f64 { defaults::MAP_MAX_MARKER_SIZE }

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            metric: MapMetric::default(),
            min_percentile: 0,
            clip_quantile: default_clip_quantile(),
            min_marker_size: default_min_marker_size(),
            max_marker_size: default_max_marker_size(),
        }
    }
}

// ============================================================================
// Ranking Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Fewest paired samples before an intensity-response correlation is reported.
    #[serde(default = "default_min_correlation_samples")]
    pub min_correlation_samples: usize,
}

fn default_top_n() -> usize { defaults::TOP_N_WELLS }
fn default_min_correlation_samples() -> usize { defaults::MIN_CORRELATION_SAMPLES }

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            min_correlation_samples: default_min_correlation_samples(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
[map]
metric = "Gas"
min_percentile = 25

[ranking]
top_n = 10
"#,
        )
        .unwrap();
        assert_eq!(config.map.metric, MapMetric::Gas);
        assert_eq!(config.map.min_percentile, 25);
        assert_eq!(config.ranking.top_n, 10);
        assert_eq!(config.units.volume_divisor, 1_000.0);
        assert_eq!(config.data.production, PathBuf::from(defaults::PRODUCTION_FILE));
        assert!(config.data.drilling.is_none());
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let result = DashboardConfig::from_toml_str(
            r#"
[units]
volume_divisor = 0.0
"#,
        );
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("units.volume_divisor")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_marker_sizes_must_increase() {
        let mut config = DashboardConfig::default();
        config.map.max_marker_size = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = DashboardConfig::default();
        config.data.drilling = Some(PathBuf::from("data/drilling.csv"));
        let text = config.to_toml().unwrap();
        let back = DashboardConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
