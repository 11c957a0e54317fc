use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::advisor::RecommendationAdvisor;
use crate::cache::{ResultCache, ScoreStatus};
use crate::condition::MedicalCondition;
use crate::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_RESULT_CACHE_CAPACITY};
use crate::hashing::hash_request;
use crate::repository::ConditionRepository;
use crate::scoring::{AssociationScorer, IdentifiedFactors, ScorerConfig};

use super::aggregator::PredictionAggregator;
use super::enhancer::PredictionEnhancer;
use super::merge::merge_predictions;
use super::types::{PipelineResult, PotentialCondition, RelevanceThresholds};
use super::validator::PredictionValidator;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub scorer: ScorerConfig,
    pub thresholds: RelevanceThresholds,
    /// Zero disables result memoization.
    pub result_cache_capacity: u64,
    pub result_cache_ttl: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerConfig::default(),
            thresholds: RelevanceThresholds::default(),
            result_cache_capacity: DEFAULT_RESULT_CACHE_CAPACITY,
            result_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

/// A scored response plus where it came from.
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub result: Arc<PipelineResult>,
    pub status: ScoreStatus,
    /// Snapshot epoch the result was computed against.
    pub epoch: u64,
}

/// Repository → scorer → aggregator → validator → advisor.
///
/// Every stage after the repository read is pure; identical inputs against the
/// same snapshot epoch produce identical output, and repeats are served from
/// the result cache.
pub struct ScoringPipeline {
    repository: Arc<ConditionRepository>,
    aggregator: PredictionAggregator,
    validator: PredictionValidator,
    advisor: RecommendationAdvisor,
    results: ResultCache,
    enhancer: Option<Arc<dyn PredictionEnhancer>>,
}

impl std::fmt::Debug for ScoringPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringPipeline")
            .field("repository", &self.repository)
            .field("results", &self.results)
            .field("enhancer", &self.enhancer.is_some())
            .finish()
    }
}

impl ScoringPipeline {
    pub fn new(repository: Arc<ConditionRepository>, config: PipelineConfig) -> Self {
        Self {
            repository,
            aggregator: PredictionAggregator::new(AssociationScorer::new(config.scorer)),
            validator: PredictionValidator::new(config.thresholds),
            advisor: RecommendationAdvisor::new(),
            results: ResultCache::with_capacity(
                config.result_cache_capacity,
                config.result_cache_ttl,
            ),
            enhancer: None,
        }
    }

    pub fn with_enhancer(mut self, enhancer: Arc<dyn PredictionEnhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    pub fn repository(&self) -> &Arc<ConditionRepository> {
        &self.repository
    }

    pub fn result_cache(&self) -> &ResultCache {
        &self.results
    }

    /// Ranked conditions and next steps for the given factors.
    pub async fn score<I, S>(&self, factors: I, body_location: Option<&str>) -> PipelineResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let factors = IdentifiedFactors::new(factors);
        let outcome = self.run(&factors, body_location).await;
        (*outcome.result).clone()
    }

    /// Like [`Self::score`], reporting cache status and snapshot epoch.
    #[instrument(skip(self, factors), fields(factors = factors.len()))]
    pub async fn run(&self, factors: &IdentifiedFactors, body_location: Option<&str>) -> ScoreOutcome {
        let body_location = normalize_location(body_location);
        let snapshot = self.repository.get_all().await;
        let epoch = snapshot.epoch();
        let key = hash_request(factors, body_location.as_deref(), epoch);

        if let Some(result) = self.results.lookup(&key) {
            debug!(epoch, "Result cache hit");
            return ScoreOutcome {
                result,
                status: ScoreStatus::Hit,
                epoch,
            };
        }

        let mut cacheable = true;
        let mut conditions =
            self.rank(snapshot.conditions(), factors, body_location.as_deref());

        if let Some(enhancer) = &self.enhancer {
            match enhancer
                .enhance(factors, body_location.as_deref(), &conditions)
                .await
            {
                Ok(extra) => {
                    debug!(extra = extra.len(), "Merging enhancer predictions");
                    conditions = merge_predictions(conditions, extra, &self.validator);
                }
                Err(e) => {
                    warn!(error = %e, "Prediction enhancer failed, using pipeline results only");
                    cacheable = false;
                }
            }
        }

        let result = Arc::new(self.finish(conditions, body_location.as_deref()));
        if cacheable {
            self.results.insert(key, Arc::clone(&result));
        }

        info!(
            epoch,
            conditions = result.conditions.len(),
            next_steps = result.next_steps.len(),
            "Scored request"
        );

        ScoreOutcome {
            result,
            status: ScoreStatus::Miss,
            epoch,
        }
    }

    /// Scores and merges caller-supplied predictions; bypasses the result cache.
    #[instrument(skip(self, factors, external), fields(factors = factors.len(), external = external.len()))]
    pub async fn score_with_predictions(
        &self,
        factors: &IdentifiedFactors,
        body_location: Option<&str>,
        external: Vec<PotentialCondition>,
    ) -> PipelineResult {
        let body_location = normalize_location(body_location);
        let snapshot = self.repository.get_all().await;
        let conditions = self.rank(snapshot.conditions(), factors, body_location.as_deref());
        let merged = merge_predictions(conditions, external, &self.validator);
        self.finish(merged, body_location.as_deref())
    }

    /// Runs the pure stages against an explicit condition set.
    pub fn evaluate(
        &self,
        conditions: &[MedicalCondition],
        factors: &IdentifiedFactors,
        body_location: Option<&str>,
    ) -> PipelineResult {
        let body_location = normalize_location(body_location);
        let ranked = self.rank(conditions, factors, body_location.as_deref());
        self.finish(ranked, body_location.as_deref())
    }

    fn rank(
        &self,
        conditions: &[MedicalCondition],
        factors: &IdentifiedFactors,
        body_location: Option<&str>,
    ) -> Vec<PotentialCondition> {
        let candidates = self.aggregator.aggregate(conditions, factors, body_location);
        self.validator.validate(candidates, factors)
    }

    fn finish(&self, conditions: Vec<PotentialCondition>, body_location: Option<&str>) -> PipelineResult {
        let next_steps = self.advisor.advise(&conditions, body_location);
        PipelineResult {
            conditions,
            next_steps,
        }
    }
}

fn normalize_location(body_location: Option<&str>) -> Option<String> {
    body_location
        .map(|loc| loc.trim().to_lowercase())
        .filter(|loc| !loc.is_empty())
}
