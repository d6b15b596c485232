//! Filter criteria and map settings supplied by the caller

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The sentinel value meaning "no restriction on this dimension".
pub const ALL_SENTINEL: &str = "All";

// ============================================================================
// Selection
// ============================================================================

/// A selection on one categorical dimension.
///
/// A single value is a singleton set. `"All"` (alone or anywhere in a list)
/// and an empty list both collapse to [`Selection::Unrestricted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unrestricted,
    Selected(BTreeSet<String>),
}

impl Selection {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for value in values {
            let value: String = value.into();
            let value = value.trim();
            if value == ALL_SENTINEL {
                return Selection::Unrestricted;
            }
            if !value.is_empty() {
                set.insert(value.to_string());
            }
        }
        if set.is_empty() {
            Selection::Unrestricted
        } else {
            Selection::Selected(set)
        }
    }

    pub fn single(value: impl Into<String>) -> Self {
        Self::from_values([value.into()])
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Selection::Unrestricted)
    }

    /// Whether a row value passes this selection. A blank value only passes
    /// an unrestricted selection.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Selection::Unrestricted => true,
            Selection::Selected(set) => value.is_some_and(|v| set.contains(v)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SelectionRepr {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match SelectionRepr::deserialize(deserializer)? {
            SelectionRepr::One(value) => Selection::single(value),
            SelectionRepr::Many(values) => Selection::from_values(values),
        })
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::Unrestricted => serializer.serialize_str(ALL_SENTINEL),
            Selection::Selected(set) => set.serialize(serializer),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Unrestricted => f.write_str(ALL_SENTINEL),
            Selection::Selected(set) => {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

// ============================================================================
// Year range
// ============================================================================

/// Inclusive `[min, max]` year window. `min > max` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Matches every year.
    pub const ALL: YearRange = YearRange {
        min: i32::MIN,
        max: i32::MAX,
    };

    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::ALL
    }
}

// ============================================================================
// Filter criteria
// ============================================================================

/// Everything the user selected in the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub company: Selection,
    #[serde(default)]
    pub field: Selection,
    #[serde(default)]
    pub well_type: Selection,
    #[serde(default)]
    pub year_range: YearRange,
}

impl FilterCriteria {
    /// No restriction on any categorical dimension within `year_range`.
    pub fn unrestricted(year_range: YearRange) -> Self {
        Self {
            year_range,
            ..Self::default()
        }
    }
}

// ============================================================================
// Map settings
// ============================================================================

/// Cumulative metric driving the map bubbles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapMetric {
    #[default]
    Oil,
    Gas,
}

impl MapMetric {
    /// Axis / hover label including units.
    pub fn label(self) -> &'static str {
        match self {
            MapMetric::Oil => "Oil (m³)",
            MapMetric::Gas => "Gas (km³)",
        }
    }

    pub fn fill_color(self) -> &'static str {
        match self {
            MapMetric::Oil => "rgba(0,160,0,0.55)",
            MapMetric::Gas => "rgba(220,0,0,0.55)",
        }
    }

    pub fn border_color(self) -> &'static str {
        match self {
            MapMetric::Oil => "darkgreen",
            MapMetric::Gas => "darkred",
        }
    }
}

impl FromStr for MapMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oil" => Ok(MapMetric::Oil),
            "gas" => Ok(MapMetric::Gas),
            other => Err(format!("unknown map metric '{other}' (expected Oil or Gas)")),
        }
    }
}

/// Map page controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    pub metric: MapMetric,
    /// Wells below this percentile of the metric are hidden. Values outside
    /// `0..=100` disable the cutoff.
    pub min_percentile: i32,
}
