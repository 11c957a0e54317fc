use async_trait::async_trait;
use thiserror::Error;

use crate::scoring::IdentifiedFactors;

use super::types::PotentialCondition;

#[derive(Debug, Error)]
pub enum EnhancerError {
    #[error("enhancer unavailable: {0}")]
    Unavailable(String),
    #[error("enhancer returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Optional source of extra predictions, merged by condition name.
///
/// Failures never reach callers; the pipeline logs them and keeps its own list.
#[async_trait]
pub trait PredictionEnhancer: Send + Sync {
    async fn enhance(
        &self,
        factors: &IdentifiedFactors,
        body_location: Option<&str>,
        baseline: &[PotentialCondition],
    ) -> Result<Vec<PotentialCondition>, EnhancerError>;
}

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Returns fixed predictions, or fails every call.
    #[derive(Debug, Clone, Default)]
    pub struct MockPredictionEnhancer {
        predictions: Vec<PotentialCondition>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl MockPredictionEnhancer {
        pub fn new(predictions: Vec<PotentialCondition>) -> Self {
            Self {
                predictions,
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PredictionEnhancer for MockPredictionEnhancer {
        async fn enhance(
            &self,
            _factors: &IdentifiedFactors,
            _body_location: Option<&str>,
            _baseline: &[PotentialCondition],
        ) -> Result<Vec<PotentialCondition>, EnhancerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(EnhancerError::Unavailable("mock failure".to_string()));
            }
            Ok(self.predictions.clone())
        }
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockPredictionEnhancer;
