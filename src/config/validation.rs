//! Soft checks on `explorer.toml`
//!
//! Keys the dashboard does not read are reported with the nearest known key,
//! so a misspelt `[map]` or `[ranking]` setting is noticed instead of quietly
//! falling back to its default. Nothing here rejects a file.

use std::collections::HashSet;
use std::fmt;

/// One finding about a config file. Logged, never fatal.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Dotted path of the offending key, e.g. `map.clip_quantile`.
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suggestion {
            Some(key) => write!(f, "{} (did you mean '{key}'?)", self.message),
            None => f.write_str(&self.message),
        }
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

const SECTIONS: &[(&str, &[&str])] = &[
    ("data", &["production", "frac", "drilling", "completion"]),
    ("units", &["volume_divisor", "mass_divisor", "length_divisor"]),
    (
        "map",
        &["metric", "min_percentile", "clip_quantile", "min_marker_size", "max_marker_size"],
    ),
    ("ranking", &["top_n", "min_correlation_samples"]),
];

/// Every dotted path `DashboardConfig` reads, section names included.
pub fn known_config_keys() -> HashSet<String> {
    SECTIONS
        .iter()
        .flat_map(|(section, fields)| {
            std::iter::once((*section).to_string())
                .chain(fields.iter().map(move |f| format!("{section}.{f}")))
        })
        .collect()
}

/// Dotted paths of every key in a parsed file, depth first.
fn key_paths(value: &toml::Value, prefix: Option<&str>, out: &mut Vec<String>) {
    let Some(table) = value.as_table() else {
        return;
    };
    for (key, child) in table {
        let path = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        key_paths(child, Some(&path), out);
        out.push(path);
    }
}

// ============================================================================
// Suggestions
// ============================================================================

/// Single-row edit distance between two keys.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}

/// Nearest known key within three edits; the alphabetically first on a tie.
pub fn suggest_correction(unknown: &str, known: &HashSet<String>) -> Option<String> {
    known
        .iter()
        .map(|k| (edit_distance(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.clone())
}

// ============================================================================
// Unknown Keys
// ============================================================================

/// Warnings for keys in `raw_toml` that no setting reads. A file that does
/// not parse yields none; the typed load reports that error.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    let mut paths = Vec::new();
    key_paths(&value, None, &mut paths);
    paths.sort();

    paths
        .into_iter()
        .filter(|path| !known.contains(path))
        .map(|path| ValidationWarning {
            message: format!("'{path}' is not a dashboard setting"),
            suggestion: suggest_correction(&path, &known),
            field: path,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Flag settings that are legal but probably not what the operator meant.
pub fn validate_ranges(config: &super::DashboardConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let p = config.map.min_percentile;
    if !(0..=100).contains(&p) {
        warnings.push(ValidationWarning {
            field: "map.min_percentile".to_string(),
            message: format!("map.min_percentile = {p} is outside 0-100, the cutoff will be ignored"),
            suggestion: None,
        });
    }

    if config.map.clip_quantile < 0.5 {
        warnings.push(ValidationWarning {
            field: "map.clip_quantile".to_string(),
            message: format!(
                "map.clip_quantile = {:.2} saturates most markers at the maximum size",
                config.map.clip_quantile
            ),
            suggestion: None,
        });
    }

    if config.ranking.top_n > 500 {
        warnings.push(ValidationWarning {
            field: "ranking.top_n".to_string(),
            message: format!("ranking.top_n = {} is too many bars to read", config.ranking.top_n),
            suggestion: None,
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("top_n", "top_n"), 0);
        assert_eq!(edit_distance("volume_divisr", "volume_divisor"), 1);
        assert_eq!(edit_distance("metric", "metirc"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    #[test]
    fn test_key_paths_nested() {
        let toml: toml::Value = r#"
            [map]
            metric = "Oil"
        "#
        .parse()
        .unwrap();
        let mut keys = Vec::new();
        key_paths(&toml, None, &mut keys);
        keys.sort();
        assert_eq!(keys, vec!["map".to_string(), "map.metric".to_string()]);
    }

    #[test]
    fn test_known_keys_cover_sections() {
        let known = known_config_keys();
        assert!(known.contains("ranking"));
        assert!(known.contains("map.clip_quantile"));
        assert!(!known.contains("map.clip"));
    }

    #[test]
    fn test_typo_suggests_known_key() {
        let warnings = validate_unknown_keys(
            r#"
[ranking]
top_m = 5
"#,
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "ranking.top_m");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("ranking.top_n"));
        assert_eq!(
            warnings[0].to_string(),
            "'ranking.top_m' is not a dashboard setting (did you mean 'ranking.top_n'?)"
        );
    }

    #[test]
    fn test_out_of_range_percentile_warns() {
        let mut config = super::super::DashboardConfig::default();
        config.map.min_percentile = 150;
        let warnings = validate_ranges(&config);
        assert!(warnings.iter().any(|w| w.field == "map.min_percentile"));
    }
}
