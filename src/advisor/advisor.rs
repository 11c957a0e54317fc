use tracing::debug;

use crate::condition::Urgency;
use crate::constants::MAX_SUGGESTIONS;
use crate::pipeline::{PotentialCondition, Relevance};

use super::rules::{
    GENERAL_CARE_SUGGESTIONS, URGENT_CARE_SUGGESTIONS, categorize, category_suggestions,
    is_urgent_condition, specialist_for,
};
use super::types::{CareCategory, NextStep};

/// Turns a ranked condition list into ordered next steps.
///
/// Output order: consult, specialist (if any), general care, condition-specific
/// care (if any). The specialist step is typed `general`, so exactly one
/// `consult` step is ever produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationAdvisor;

impl RecommendationAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn advise(
        &self,
        conditions: &[PotentialCondition],
        body_location: Option<&str>,
    ) -> Vec<NextStep> {
        let mut steps = Vec::with_capacity(4);
        steps.push(self.consult_step(conditions));

        if !conditions.is_empty()
            && let Some(step) = body_location.and_then(Self::specialist_step)
        {
            steps.push(step);
        }

        steps.push(
            NextStep::general(
                "General self-care",
                "While you monitor your symptoms, these measures usually help.",
            )
            .with_suggestions(GENERAL_CARE_SUGGESTIONS.iter().copied()),
        );

        if let Some(step) = self.condition_specific_care(conditions) {
            steps.push(step);
        }

        debug!(steps = steps.len(), "Next steps prepared");
        steps
    }

    /// True when a high-relevance condition is on the urgent list.
    pub fn needs_urgent_care(&self, conditions: &[PotentialCondition]) -> bool {
        high_relevance(conditions).any(|c| is_urgent_condition(&c.name))
    }

    /// Specialist for the body location, if the table knows it.
    pub fn specialist_suggestion(&self, body_location: Option<&str>) -> Option<&'static str> {
        body_location.and_then(specialist_for)
    }

    /// Unioned category advice for high-relevance conditions, capped.
    pub fn condition_specific_suggestions(&self, conditions: &[PotentialCondition]) -> Vec<String> {
        let mut categories: Vec<CareCategory> = Vec::new();
        for condition in high_relevance(conditions) {
            let category = categorize(&condition.name);
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        let mut suggestions: Vec<String> = Vec::new();
        for suggestion in categories
            .into_iter()
            .flat_map(|c| category_suggestions(c).iter())
        {
            if suggestions.len() == MAX_SUGGESTIONS {
                break;
            }
            if !suggestions.iter().any(|s| s == suggestion) {
                suggestions.push((*suggestion).to_string());
            }
        }
        suggestions
    }

    fn consult_step(&self, conditions: &[PotentialCondition]) -> NextStep {
        let highest = high_relevance(conditions).map(|c| c.urgency).max();

        if self.needs_urgent_care(conditions) {
            let names: Vec<&str> = high_relevance(conditions)
                .filter(|c| is_urgent_condition(&c.name))
                .map(|c| c.name.as_str())
                .collect();
            return NextStep::consult(
                "Seek urgent medical care",
                format!(
                    "Your symptoms may point to {}, which can need immediate treatment (urgency: {}). \
                     Contact emergency services or go to the nearest emergency department.",
                    names.join(", "),
                    highest.unwrap_or(Urgency::High)
                ),
            )
            .with_suggestions(URGENT_CARE_SUGGESTIONS.iter().copied());
        }

        let description = match highest {
            Some(urgency) => format!(
                "Schedule an appointment to discuss your symptoms. Highest urgency among likely conditions: {}.",
                urgency
            ),
            None => "A healthcare provider can examine you and give a proper diagnosis.".to_string(),
        };
        NextStep::consult("Consult a healthcare provider", description)
    }

    fn specialist_step(body_location: &str) -> Option<NextStep> {
        let specialist = specialist_for(body_location)?;
        Some(NextStep::general(
            format!("Consider seeing a {}", specialist),
            format!(
                "For symptoms affecting the {}, a {} can provide a focused evaluation.",
                body_location.trim(),
                specialist
            ),
        ))
    }

    fn condition_specific_care(&self, conditions: &[PotentialCondition]) -> Option<NextStep> {
        let suggestions = self.condition_specific_suggestions(conditions);
        if suggestions.is_empty() {
            return None;
        }
        let names: Vec<&str> = high_relevance(conditions).map(|c| c.name.as_str()).collect();
        Some(
            NextStep::general(
                "Care for likely conditions",
                format!("Suggestions related to {}.", names.join(", ")),
            )
            .with_suggestions(suggestions),
        )
    }
}

fn high_relevance(conditions: &[PotentialCondition]) -> impl Iterator<Item = &PotentialCondition> {
    conditions.iter().filter(|c| c.relevance == Relevance::High)
}
