use tracing::trace;

use crate::condition::MedicalCondition;

use super::types::{Association, IdentifiedFactors, ScorerConfig};

/// Symmetric, case-insensitive term match: equal, or either contains the other.
///
/// "severe headache" matches "headache" and vice versa. Blank terms never match.
pub fn terms_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(&b) || b.contains(&a)
}

/// Lowercased alphanumeric words of a body-location phrase.
pub fn location_words(location: &str) -> Vec<String> {
    location
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whole-word location match: either phrase appears as a word run inside the other.
///
/// "upper throat" matches "throat", but "ear" does not match "heart".
pub fn locations_match(a: &str, b: &str) -> bool {
    let a = location_words(a);
    let b = location_words(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    contains_run(&a, &b) || contains_run(&b, &a)
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Returns `true` if any identified factor matches `term`.
pub fn factor_present(term: &str, factors: &IdentifiedFactors) -> bool {
    factors.iter().any(|f| terms_match(f, term))
}

/// Scores how well a condition's symptom and visual-cue profile explains a factor set.
#[derive(Debug, Clone, Default)]
pub struct AssociationScorer {
    config: ScorerConfig,
}

impl AssociationScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Association score in `[0, 1]`; always `0.0` for an empty factor set.
    pub fn score(
        &self,
        condition: &MedicalCondition,
        factors: &IdentifiedFactors,
        body_location: Option<&str>,
    ) -> f64 {
        self.assess(condition, factors, body_location).score
    }

    /// Identified factors that match any of the condition's symptoms or visual cues.
    pub fn matching_factors(
        &self,
        condition: &MedicalCondition,
        factors: &IdentifiedFactors,
    ) -> Vec<String> {
        let condition_factors = condition.all_factors();
        Self::collect_matches(&condition_factors, factors)
    }

    /// Full breakdown of the score, including the matched factors.
    pub fn assess(
        &self,
        condition: &MedicalCondition,
        factors: &IdentifiedFactors,
        body_location: Option<&str>,
    ) -> Association {
        if factors.is_empty() {
            return Association::none();
        }

        let condition_factors = condition.all_factors();
        let matching_factors = Self::collect_matches(&condition_factors, factors);
        let match_count = matching_factors.len() as f64;

        let coverage = match_count / factors.len() as f64;
        let specificity = if condition_factors.is_empty() {
            0.0
        } else {
            match_count / condition_factors.len() as f64
        };

        let mut score =
            self.config.coverage_weight * coverage + self.config.specificity_weight * specificity;

        let location_matched = body_location
            .map(|loc| {
                condition
                    .body_locations
                    .iter()
                    .any(|known| locations_match(known, loc))
            })
            .unwrap_or(false);
        if location_matched {
            score += self.config.location_bonus;
        }

        let score = score.clamp(0.0, 1.0);

        trace!(
            condition = %condition.name,
            coverage,
            specificity,
            location_matched,
            score,
            "Scored condition"
        );

        Association {
            score,
            coverage,
            specificity,
            location_matched,
            matching_factors,
        }
    }

    fn collect_matches(condition_factors: &[String], factors: &IdentifiedFactors) -> Vec<String> {
        factors
            .iter()
            .filter(|f| condition_factors.iter().any(|c| terms_match(f, c)))
            .map(str::to_string)
            .collect()
    }
}
