use serde::{Deserialize, Serialize};

use crate::advisor::NextStep;
use crate::condition::{MedicalCondition, Urgency};
use crate::constants::{DEFAULT_HIGH_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD};

/// Three-level classification derived from a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Low,
    Medium,
    High,
}

impl Relevance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relevance::Low => "low",
            Relevance::Medium => "medium",
            Relevance::High => "high",
        }
    }
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score cut-offs for [`Relevance`].
///
/// `score > high` is high, `score >= medium` is medium, anything else is low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for RelevanceThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_THRESHOLD,
            medium: DEFAULT_MEDIUM_THRESHOLD,
        }
    }
}

impl RelevanceThresholds {
    pub fn classify(&self, score: f64) -> Relevance {
        if score > self.high {
            Relevance::High
        } else if score >= self.medium {
            Relevance::Medium
        } else {
            Relevance::Low
        }
    }
}

/// Unranked aggregator output for one condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub condition: MedicalCondition,
    /// Adjusted score; may exceed 1.0 until validation clamps it.
    pub score: f64,
    pub matching_factors: Vec<String>,
    pub reasoning_notes: Vec<String>,
}

/// A ranked, explained candidate condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialCondition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub relevance: Relevance,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub visual_cues: Vec<String>,
    pub score: f64,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub reasoning_notes: Vec<String>,
    #[serde(default)]
    pub matched_factors: Vec<String>,
}

impl PotentialCondition {
    #[inline]
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Ranked conditions plus next-step guidance for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub conditions: Vec<PotentialCondition>,
    pub next_steps: Vec<NextStep>,
}
