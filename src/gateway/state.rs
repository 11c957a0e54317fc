use std::sync::Arc;

use crate::pipeline::ScoringPipeline;

#[derive(Clone)]
pub struct HandlerState {
    pub pipeline: Arc<ScoringPipeline>,
}

impl HandlerState {
    pub fn new(pipeline: Arc<ScoringPipeline>) -> Self {
        Self { pipeline }
    }
}
