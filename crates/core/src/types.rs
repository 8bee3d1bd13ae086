use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder phrases used when a list attribute is shorter than the
/// position a template reads.
pub const PLACEHOLDER_STRENGTH: &str = "general-purpose tasks";
pub const PLACEHOLDER_WEAKNESS: &str = "platform-specific constraints";
pub const PLACEHOLDER_FEATURE: &str = "core platform capabilities";
pub const PLACEHOLDER_USE_CASE: &str = "general content workloads";

/// Ordinal optimization level, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Critical,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Low,
        Level::Medium,
        Level::High,
        Level::VeryHigh,
        Level::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::VeryHigh => "Very High",
            Level::Critical => "Critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed optimization axes every entity is rated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Citations,
    Statistics,
    Structure,
    Freshness,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Citations,
        Axis::Statistics,
        Axis::Structure,
        Axis::Freshness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Citations => "citations",
            Axis::Statistics => "statistics",
            Axis::Structure => "structure",
            Axis::Freshness => "freshness",
        }
    }

    /// Heading used in guidance sections
    pub fn label(&self) -> &'static str {
        match self {
            Axis::Citations => "Citation Strategy",
            Axis::Statistics => "Statistical Content",
            Axis::Structure => "Content Structure",
            Axis::Freshness => "Content Freshness",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-axis optimization levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizationWeights {
    pub citations: Level,
    pub statistics: Level,
    pub structure: Level,
    pub freshness: Level,
}

impl OptimizationWeights {
    pub fn get(&self, axis: Axis) -> Level {
        match axis {
            Axis::Citations => self.citations,
            Axis::Statistics => self.statistics,
            Axis::Structure => self.structure,
            Axis::Freshness => self.freshness,
        }
    }

    /// Iterate axes in their fixed order together with their levels
    pub fn iter(&self) -> impl Iterator<Item = (Axis, Level)> + '_ {
        Axis::ALL.into_iter().map(|axis| (axis, self.get(axis)))
    }
}

/// A comparable platform as authored in the catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub vendor: String,
    #[serde(rename = "type")]
    pub category: String,
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub context_size: String,
    pub training_cutoff: String,
    pub pricing: String,
    pub features: Vec<String>,
    pub best_for: Vec<String>,
    pub optimization_weights: OptimizationWeights,
}

impl Entity {
    pub fn strength(&self, index: usize) -> &str {
        nth_or(&self.strengths, index, PLACEHOLDER_STRENGTH)
    }

    pub fn weakness(&self, index: usize) -> &str {
        nth_or(&self.weaknesses, index, PLACEHOLDER_WEAKNESS)
    }

    pub fn feature(&self, index: usize) -> &str {
        nth_or(&self.features, index, PLACEHOLDER_FEATURE)
    }

    pub fn use_case(&self, index: usize) -> &str {
        nth_or(&self.best_for, index, PLACEHOLDER_USE_CASE)
    }

    pub fn weight(&self, axis: Axis) -> Level {
        self.optimization_weights.get(axis)
    }

    /// Training cutoff without the "Up to " prefix used in the catalog
    pub fn training_horizon(&self) -> &str {
        self.training_cutoff
            .strip_prefix("Up to ")
            .unwrap_or(&self.training_cutoff)
    }
}

/// Read a list position, falling back to a fixed phrase when it is absent
pub fn nth_or<'a>(list: &'a [String], index: usize, fallback: &'a str) -> &'a str {
    list.get(index).map(String::as_str).unwrap_or(fallback)
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
