//! Test fixtures for integration tests.

use std::sync::Arc;

use ailment::condition::{MedicalCondition, SymptomRelationships, Urgency};
use ailment::pipeline::{PipelineConfig, ScoringPipeline};
use ailment::repository::{ConditionRepository, ConditionStore, RepositoryConfig, StaticStore};

#[derive(Default)]
pub struct ConditionBuilder {
    name: String,
    symptoms: Vec<String>,
    visual_cues: Vec<String>,
    urgency: Option<Urgency>,
    required: Vec<String>,
    commonly_together: Vec<String>,
    rarely_together: Vec<String>,
    body_locations: Vec<String>,
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl ConditionBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn symptoms(mut self, terms: &[&str]) -> Self {
        self.symptoms = owned(terms);
        self
    }

    pub fn visual_cues(mut self, terms: &[&str]) -> Self {
        self.visual_cues = owned(terms);
        self
    }

    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    pub fn required(mut self, terms: &[&str]) -> Self {
        self.required = owned(terms);
        self
    }

    pub fn commonly_together(mut self, terms: &[&str]) -> Self {
        self.commonly_together = owned(terms);
        self
    }

    pub fn rarely_together(mut self, terms: &[&str]) -> Self {
        self.rarely_together = owned(terms);
        self
    }

    pub fn body_locations(mut self, terms: &[&str]) -> Self {
        self.body_locations = owned(terms);
        self
    }

    pub fn build(self) -> MedicalCondition {
        let relationships = SymptomRelationships {
            required: self.required,
            commonly_together: self.commonly_together,
            rarely_together: self.rarely_together,
        };
        MedicalCondition {
            description: format!("{} (fixture)", self.name),
            recommendation: "See a doctor if symptoms persist.".to_string(),
            name: self.name,
            symptoms: self.symptoms,
            visual_cues: self.visual_cues,
            urgency: self.urgency.unwrap_or_default(),
            symptom_relationships: (!relationships.is_empty()).then_some(relationships),
            body_locations: self.body_locations,
        }
    }
}

pub fn pipeline_with_store(store: Arc<dyn ConditionStore>) -> ScoringPipeline {
    let repository = ConditionRepository::new(store, RepositoryConfig::default());
    ScoringPipeline::new(Arc::new(repository), PipelineConfig::default())
}

pub fn pipeline_over(conditions: &[MedicalCondition]) -> ScoringPipeline {
    let records = conditions.iter().map(Into::into).collect();
    pipeline_with_store(Arc::new(StaticStore::new(records)))
}

pub fn builtin_pipeline() -> ScoringPipeline {
    pipeline_with_store(Arc::new(StaticStore::builtin()))
}

/// Symptom sets spanning several of the built-in conditions.
pub const SAMPLE_FACTOR_SETS: &[&[&str]] = &[
    &["fever", "cough", "sore throat"],
    &["headache", "nausea", "sensitivity to light"],
    &["rash", "itching", "redness"],
    &["abdominal pain", "nausea", "fever"],
    &["chest pain", "shortness of breath", "sweating"],
    &["ankle pain", "swelling"],
    &["red eyes", "discharge"],
    &["dizziness"],
    &["not a symptom"],
];
