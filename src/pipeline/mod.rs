//! The condition scoring pipeline.
//!
//! Stages, in order:
//!
//! 1. [`PredictionAggregator`] scores every reference condition and applies
//!    symptom-relationship adjustments (required, commonly and rarely together).
//! 2. [`PredictionValidator`] drops noise, penalizes missing hallmark symptoms,
//!    classifies relevance and produces a stable, de-duplicated ranking.
//! 3. Optional [`PredictionEnhancer`] output is merged by name ([`merge_predictions`]).
//! 4. [`crate::advisor::RecommendationAdvisor`] derives next steps.
//!
//! [`ScoringPipeline`] ties the stages to a [`crate::repository::ConditionRepository`]
//! and memoizes results per snapshot epoch.

pub mod aggregator;
pub mod engine;
pub mod enhancer;
pub mod merge;
pub mod types;
pub mod validator;


pub use aggregator::PredictionAggregator;
pub use engine::{PipelineConfig, ScoreOutcome, ScoringPipeline};
#[cfg(any(test, feature = "mock"))]
pub use enhancer::MockPredictionEnhancer;
pub use enhancer::{EnhancerError, PredictionEnhancer};
pub use merge::merge_predictions;
pub use types::{Candidate, PipelineResult, PotentialCondition, Relevance, RelevanceThresholds};
pub use validator::{PredictionValidator, critical_symptoms};
