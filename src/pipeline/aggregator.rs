use tracing::{debug, warn};

use crate::condition::MedicalCondition;
use crate::constants::{
    CANDIDATE_MIN_SCORE, COMMONLY_TOGETHER_BOOST, RARELY_TOGETHER_FACTOR, REQUIRED_MISSING_FACTOR,
};
use crate::scoring::{AssociationScorer, IdentifiedFactors, factor_present};

use super::types::Candidate;

/// Scores every condition and applies symptom-relationship adjustments.
///
/// Output keeps repository order; ranking is the validator's job.
#[derive(Debug, Clone, Default)]
pub struct PredictionAggregator {
    scorer: AssociationScorer,
}

impl PredictionAggregator {
    pub fn new(scorer: AssociationScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &AssociationScorer {
        &self.scorer
    }

    pub fn aggregate(
        &self,
        conditions: &[MedicalCondition],
        factors: &IdentifiedFactors,
        body_location: Option<&str>,
    ) -> Vec<Candidate> {
        let candidates: Vec<Candidate> = conditions
            .iter()
            .filter(|condition| match condition.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed condition during aggregation");
                    false
                }
            })
            .filter_map(|condition| self.evaluate(condition, factors, body_location))
            .collect();

        debug!(
            conditions = conditions.len(),
            candidates = candidates.len(),
            "Aggregated candidates"
        );
        candidates
    }

    /// Scores one condition; `None` when there is neither evidence nor a plausible score.
    pub fn evaluate(
        &self,
        condition: &MedicalCondition,
        factors: &IdentifiedFactors,
        body_location: Option<&str>,
    ) -> Option<Candidate> {
        let association = self.scorer.assess(condition, factors, body_location);
        let mut score = association.score;

        let mut notes = vec![format!(
            "Association score: {:.2} (coverage {:.2}, specificity {:.2})",
            association.score, association.coverage, association.specificity
        )];
        notes.push(if association.matching_factors.is_empty() {
            "Matched factors: none".to_string()
        } else {
            format!("Matched factors: {}", association.matching_factors.join(", "))
        });
        if association.location_matched {
            notes.push(format!(
                "Body location matched (+{:.2})",
                self.scorer.config().location_bonus
            ));
        }

        if let Some(rel) = condition.relationships() {
            let missing_required: Vec<&str> = rel
                .required
                .iter()
                .filter(|term| !factor_present(term, factors))
                .map(String::as_str)
                .collect();
            if !missing_required.is_empty() {
                score *= REQUIRED_MISSING_FACTOR;
                notes.push(format!(
                    "Required symptoms missing ({}); score x{:.1}",
                    missing_required.join(", "),
                    REQUIRED_MISSING_FACTOR
                ));
            }

            if !rel.commonly_together.is_empty()
                && rel.commonly_together.iter().all(|term| factor_present(term, factors))
            {
                score *= COMMONLY_TOGETHER_BOOST;
                notes.push(format!(
                    "Commonly co-occurring symptoms all present ({}); score x{:.1}",
                    rel.commonly_together.join(", "),
                    COMMONLY_TOGETHER_BOOST
                ));
            }

            let rare_present: Vec<&str> = rel
                .rarely_together
                .iter()
                .filter(|term| factor_present(term, factors))
                .map(String::as_str)
                .collect();
            if !rare_present.is_empty() {
                score *= RARELY_TOGETHER_FACTOR;
                notes.push(format!(
                    "Rarely co-occurring symptoms present ({}); score x{:.1}",
                    rare_present.join(", "),
                    RARELY_TOGETHER_FACTOR
                ));
            }
        }

        if score != association.score {
            notes.push(format!("Adjusted score: {:.2}", score));
        }

        if !association.has_evidence() && score <= CANDIDATE_MIN_SCORE {
            return None;
        }

        debug!(condition = %condition.name, score, matched = association.matching_factors.len(), "Candidate admitted");

        Some(Candidate {
            condition: condition.clone(),
            score,
            matching_factors: association.matching_factors,
            reasoning_notes: notes,
        })
    }
}
