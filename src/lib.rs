//! Ailment library crate (used by the server and integration tests).
//!
//! Given a set of identified symptom factors and an optional body location,
//! the pipeline scores every reference condition, adjusts for symptom
//! relationships, validates and ranks the candidates, and derives next-step
//! guidance.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`ScoringPipeline`], [`PipelineConfig`], [`PipelineResult`] - End-to-end scoring
//! - [`PredictionAggregator`], [`PredictionValidator`] - Individual stages
//! - [`PredictionEnhancer`], [`merge_predictions`] - External prediction merge
//! - [`RecommendationAdvisor`], [`NextStep`] - Next-step guidance
//!
//! ## Reference Data
//! - [`ConditionRepository`], [`ConditionSnapshot`] - TTL-cached condition set
//! - [`ConditionStore`], [`JsonFileStore`], [`StaticStore`] - Backing stores
//! - [`MedicalCondition`], [`Urgency`], [`default_conditions`] - Condition records
//!
//! ## Scoring
//! - [`AssociationScorer`], [`IdentifiedFactors`] - Association score
//!
//! ## Server
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`gateway`] - Axum router and handlers
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod advisor;
pub mod cache;
pub mod condition;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod hashing;
pub mod pipeline;
pub mod repository;
pub mod scoring;

pub use advisor::{CareCategory, NextStep, NextStepKind, RecommendationAdvisor};
pub use cache::{
    AILMENT_STATUS_ERROR, AILMENT_STATUS_HEADER, AILMENT_STATUS_HEALTHY, AILMENT_STATUS_NOT_READY,
    AILMENT_STATUS_READY, AILMENT_STATUS_RELOADED, ResultCache, ScoreStatus,
};
pub use condition::{
    ConditionError, ConditionRecord, MedicalCondition, SymptomRelationships, Urgency,
    default_conditions,
};
pub use config::{Config, ConfigError};
pub use hashing::{hash_conditions, hash_request};
#[cfg(any(test, feature = "mock"))]
pub use pipeline::MockPredictionEnhancer;
pub use pipeline::{
    EnhancerError, PipelineConfig, PipelineResult, PotentialCondition, PredictionAggregator,
    PredictionEnhancer, PredictionValidator, Relevance, RelevanceThresholds, ScoreOutcome,
    ScoringPipeline, critical_symptoms, merge_predictions,
};
#[cfg(any(test, feature = "mock"))]
pub use repository::MockConditionStore;
pub use repository::{
    ConditionRepository, ConditionSnapshot, ConditionStore, JsonFileStore, RepositoryConfig,
    SnapshotSource, StaticStore, StoreError,
};
pub use scoring::{AssociationScorer, IdentifiedFactors, ScorerConfig};
