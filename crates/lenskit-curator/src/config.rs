//! Configuration for curator jobs
//!
//! Scoring thresholds, the opposing-keyword table and the generic-concept
//! stoplist are data, loadable from the `[contrast]` section of the config file.

use crate::CuratorError;
use lenskit_domain::dialectic::{DEFAULT_CAP, DEFAULT_INCREMENT, STANDARD_PAIRS};
use lenskit_domain::insight::DEFAULT_EXCERPT_CHARS;
use lenskit_domain::{DialecticTable, WeightMapping};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Concepts too broad to count as a meaningful shared context
pub const GENERIC_CONCEPTS: [&str; 8] = [
    "core concepts",
    "systems thinking",
    "thinking",
    "concepts",
    "strategy",
    "management",
    "leadership",
    "organizational",
];

/// Parameters of contrast generation
///
/// # Examples
///
/// ```
/// use lenskit_curator::ContrastConfig;
///
/// let config = ContrastConfig::default();
/// assert_eq!(config.top_n, 3);
/// assert_eq!(config.min_distance, 0.65);
///
/// let config = ContrastConfig::from_toml("top_n = 5").unwrap();
/// assert_eq!(config.top_n, 5);
/// assert_eq!(config.max_distance, 0.92);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Candidates ranked per source (only the best is emitted)
    pub top_n: usize,

    /// Smallest admissible cosine distance (inclusive)
    pub min_distance: f64,

    /// Largest admissible cosine distance (inclusive)
    pub max_distance: f64,

    /// Non-generic shared concepts that admit a pair on their own
    pub min_specific_shared: usize,

    /// Total shared concepts that admit a pair on their own
    pub min_total_shared: usize,

    /// Weight of cosine distance in the combined score
    pub distance_weight: f64,

    /// Weight of the dialectic score in the combined score
    pub dialectic_weight: f64,

    /// Shared concepts that do not count as specific
    pub generic_concepts: Vec<String>,

    /// Opposing keyword pairs
    pub dialectic_pairs: Vec<(String, String)>,

    /// Score added per matching keyword pair
    pub dialectic_increment: f64,

    /// Upper bound of the dialectic score
    pub dialectic_cap: f64,

    /// Lowest emitted weight
    pub weight_floor: f64,

    /// Highest emitted weight
    pub weight_ceiling: f64,

    /// Combined score mapped onto `weight_floor`
    pub weight_origin: f64,

    /// Weight gained per unit of combined score
    pub weight_slope: f64,

    /// Definition characters quoted in the insight text
    pub excerpt_chars: usize,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        let weights = WeightMapping::default();
        Self {
            top_n: 3,
            min_distance: 0.65,
            max_distance: 0.92,
            min_specific_shared: 1,
            min_total_shared: 2,
            distance_weight: 0.7,
            dialectic_weight: 0.3,
            generic_concepts: GENERIC_CONCEPTS.iter().map(|c| c.to_string()).collect(),
            dialectic_pairs: STANDARD_PAIRS
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            dialectic_increment: DEFAULT_INCREMENT,
            dialectic_cap: DEFAULT_CAP,
            weight_floor: weights.floor,
            weight_ceiling: weights.ceiling,
            weight_origin: weights.origin,
            weight_slope: weights.slope,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl ContrastConfig {
    /// Parse from TOML; missing keys take their defaults
    pub fn from_toml(text: &str) -> Result<Self, CuratorError> {
        let config: Self = toml::from_str(text).map_err(|e| CuratorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, CuratorError> {
        toml::to_string_pretty(self).map_err(|e| CuratorError::Config(e.to_string()))
    }

    /// Check that the parameters describe a usable scorer
    pub fn validate(&self) -> Result<(), CuratorError> {
        if self.top_n == 0 {
            return Err(CuratorError::Config("top_n must be at least 1".to_string()));
        }
        if !(0.0..=2.0).contains(&self.min_distance) || !(0.0..=2.0).contains(&self.max_distance) {
            return Err(CuratorError::Config(
                "min_distance and max_distance must lie within [0, 2]".to_string(),
            ));
        }
        if self.min_distance > self.max_distance {
            return Err(CuratorError::Config(format!(
                "min_distance ({}) exceeds max_distance ({})",
                self.min_distance, self.max_distance
            )));
        }
        for (name, value) in [
            ("distance_weight", self.distance_weight),
            ("dialectic_weight", self.dialectic_weight),
            ("dialectic_increment", self.dialectic_increment),
            ("dialectic_cap", self.dialectic_cap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CuratorError::Config(format!("{} must be a non-negative number", name)));
            }
        }
        for (name, value) in [
            ("weight_floor", self.weight_floor),
            ("weight_ceiling", self.weight_ceiling),
            ("weight_origin", self.weight_origin),
            ("weight_slope", self.weight_slope),
        ] {
            if !value.is_finite() {
                return Err(CuratorError::Config(format!("{} must be a finite number", name)));
            }
        }
        if self.weight_floor > self.weight_ceiling {
            return Err(CuratorError::Config(format!(
                "weight_floor ({}) exceeds weight_ceiling ({})",
                self.weight_floor, self.weight_ceiling
            )));
        }
        if self
            .dialectic_pairs
            .iter()
            .any(|(a, b)| a.trim().is_empty() || b.trim().is_empty())
        {
            return Err(CuratorError::Config("dialectic keywords must not be empty".to_string()));
        }
        if self.excerpt_chars == 0 {
            return Err(CuratorError::Config("excerpt_chars must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Keyword table built from these parameters
    pub fn dialectic_table(&self) -> DialecticTable {
        DialecticTable::new(
            self.dialectic_pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())),
            self.dialectic_increment,
            self.dialectic_cap,
        )
    }

    /// Weight mapping built from these parameters
    pub fn weight_mapping(&self) -> WeightMapping {
        WeightMapping {
            floor: self.weight_floor,
            ceiling: self.weight_ceiling,
            origin: self.weight_origin,
            slope: self.weight_slope,
        }
    }

    /// Generic stoplist, case-folded
    pub fn generic_set(&self) -> BTreeSet<String> {
        self.generic_concepts
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect()
    }
}

/// Parameters of bulk re-embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReembedConfig {
    /// Log progress every this many lenses
    pub progress_every: usize,

    /// Pause between writes, in milliseconds (0 disables)
    pub throttle_ms: u64,
}

impl Default for ReembedConfig {
    fn default() -> Self {
        Self {
            progress_every: 10,
            throttle_ms: 10,
        }
    }
}

impl ReembedConfig {
    /// Pause between writes
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Check the parameters
    pub fn validate(&self) -> Result<(), CuratorError> {
        if self.progress_every == 0 {
            return Err(CuratorError::Config("progress_every must be at least 1".to_string()));
        }
        Ok(())
    }
}
