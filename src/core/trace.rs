use super::steps::GenerationStep;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Ordered record of the steps taken by one generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationTrace {
    steps: Vec<GenerationStep>,
}

impl GenerationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step and log it
    pub fn add_step(&mut self, step: GenerationStep) {
        let description = step.describe();
        info!(target: "tripify::steps", "{}", description);
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[GenerationStep] {
        &self.steps
    }

    pub fn last_step(&self) -> Option<&GenerationStep> {
        self.steps.last()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of requests sent to the generation endpoint
    pub fn count_requests(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, GenerationStep::RequestSent { .. }))
            .count()
    }

    pub fn into_steps(self) -> Vec<GenerationStep> {
        self.steps
    }
}
