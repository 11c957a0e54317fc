use serde::{Deserialize, Serialize};

use crate::pipeline::PotentialCondition;

/// Body of `POST /v1/score`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreRequest {
    pub factors: Vec<String>,
    #[serde(default, alias = "bodyLocation")]
    pub body_location: Option<String>,
    #[serde(default, alias = "externalPredictions")]
    pub external_predictions: Option<Vec<PotentialCondition>>,
}

/// Body returned by `POST /v1/conditions/reload`.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadResponse {
    pub status: &'static str,
    pub source: &'static str,
    pub epoch: u64,
    pub conditions: usize,
    pub digest: String,
}
