use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::condition::MedicalCondition;
use crate::constants::{
    CRITICAL_SYMPTOM_COUNT, MISSING_CRITICAL_FACTOR, NOISE_FLOOR, UNEXPLAINED_MIN_SCORE,
};
use crate::scoring::{IdentifiedFactors, factor_present};

use super::types::{Candidate, PotentialCondition, RelevanceThresholds};

/// The first few listed symptoms of a condition, treated as its hallmark set.
///
/// Reference data lists the most characteristic symptoms first.
pub fn critical_symptoms(condition: &MedicalCondition) -> &[String] {
    let n = condition.symptoms.len().min(CRITICAL_SYMPTOM_COUNT);
    &condition.symptoms[..n]
}

/// Filters, penalizes, classifies and ranks aggregator candidates.
#[derive(Debug, Clone, Default)]
pub struct PredictionValidator {
    thresholds: RelevanceThresholds,
}

impl PredictionValidator {
    pub fn new(thresholds: RelevanceThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RelevanceThresholds {
        &self.thresholds
    }

    pub fn validate(
        &self,
        candidates: Vec<Candidate>,
        factors: &IdentifiedFactors,
    ) -> Vec<PotentialCondition> {
        let total = candidates.len();
        let predictions: Vec<PotentialCondition> = candidates
            .into_iter()
            .filter_map(|candidate| self.screen(candidate, factors))
            .collect();

        debug!(candidates = total, kept = predictions.len(), "Validated candidates");
        self.rank(predictions)
    }

    /// Clamps, classifies, sorts by score descending and removes duplicate names.
    ///
    /// The sort is stable, so equal scores keep their incoming order.
    pub fn rank(&self, predictions: Vec<PotentialCondition>) -> Vec<PotentialCondition> {
        let mut ranked: Vec<PotentialCondition> = predictions
            .into_iter()
            .filter_map(|mut p| {
                if !p.score.is_finite() {
                    warn!(condition = %p.name, "Dropping prediction with non-finite score");
                    return None;
                }
                p.score = p.score.clamp(0.0, 1.0);
                p.relevance = self.thresholds.classify(p.score);
                Some(p)
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut seen = HashSet::with_capacity(ranked.len());
        ranked.retain(|p| seen.insert(p.key()));
        ranked
    }

    fn screen(&self, candidate: Candidate, factors: &IdentifiedFactors) -> Option<PotentialCondition> {
        let Candidate {
            condition,
            mut score,
            matching_factors,
            mut reasoning_notes,
        } = candidate;

        if score < NOISE_FLOOR {
            debug!(condition = %condition.name, score, "Dropped below noise floor");
            return None;
        }
        if matching_factors.is_empty() && score < UNEXPLAINED_MIN_SCORE {
            debug!(condition = %condition.name, score, "Dropped weak unexplained candidate");
            return None;
        }

        let missing: Vec<&str> = critical_symptoms(&condition)
            .iter()
            .filter(|s| !factor_present(s, factors))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            score *= MISSING_CRITICAL_FACTOR;
            reasoning_notes.push(format!(
                "Missing critical symptoms: {}; score x{:.1}",
                missing.join(", "),
                MISSING_CRITICAL_FACTOR
            ));
        }

        let clamped = score.clamp(0.0, 1.0);
        let relevance = self.thresholds.classify(clamped);
        reasoning_notes.push(format!("Final score: {:.2} ({} relevance)", clamped, relevance));

        let symptoms = merge_symptoms(&condition, &matching_factors);

        Some(PotentialCondition {
            name: condition.name,
            description: condition.description,
            relevance,
            symptoms,
            visual_cues: condition.visual_cues,
            score,
            urgency: condition.urgency,
            recommendation: condition.recommendation,
            reasoning_notes,
            matched_factors: matching_factors,
        })
    }
}

/// Reference symptoms followed by matched user factors not already in the profile.
fn merge_symptoms(condition: &MedicalCondition, matched: &[String]) -> Vec<String> {
    let known = condition.all_factors();
    let mut symptoms = condition.symptoms.clone();
    for factor in matched {
        if !known.contains(factor) && !symptoms.contains(factor) {
            symptoms.push(factor.clone());
        }
    }
    symptoms
}
