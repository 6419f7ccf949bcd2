use crate::core::steps::GenerationStep;
use crate::types::itinerary::MealSlot;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// Why a generation call answered with the synthetic plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FallbackReason {
    MissingCredential,
    TransportFailure(String),
    MalformedResponse(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::MissingCredential => f.write_str("no API credential configured"),
            FallbackReason::TransportFailure(message) => write!(f, "transport failure: {message}"),
            FallbackReason::MalformedResponse(message) => {
                write!(f, "malformed response: {message}")
            }
        }
    }
}

/// Terminal state of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// First response parsed and stayed within budget
    Generated,
    /// First response ran over budget; the single retry's result was returned
    Regenerated,
    Synthetic { reason: FallbackReason },
}

impl fmt::Display for GenerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationOutcome::Generated => f.write_str("generated"),
            GenerationOutcome::Regenerated => f.write_str("regenerated after budget overrun"),
            GenerationOutcome::Synthetic { reason } => write!(f, "synthetic ({reason})"),
        }
    }
}

/// Total estimated cost of a plan compared with the request budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub total: i64,
    pub budget: u64,
    pub ceiling: u64,
    pub within: bool,
}

impl BudgetCheck {
    /// Total as a percentage of the budget.
    pub fn percent_of_budget(&self) -> f64 {
        if self.budget == 0 {
            return 0.0;
        }
        self.total as f64 / self.budget as f64 * 100.0
    }
}

/// Structural deviation of a parsed plan. Logged, never corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ConformanceIssue {
    DayCountMismatch { expected: u32, actual: usize },
    DayNumberOutOfOrder { position: usize, day_number: u32 },
    MissingMeals { day_number: u32, missing: Vec<MealSlot> },
}

impl fmt::Display for ConformanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConformanceIssue::DayCountMismatch { expected, actual } => {
                write!(f, "expected {expected} days, got {actual}")
            }
            ConformanceIssue::DayNumberOutOfOrder {
                position,
                day_number,
            } => write!(f, "entry {position} carries day_number {day_number}"),
            ConformanceIssue::MissingMeals {
                day_number,
                missing,
            } => {
                let keys: Vec<_> = missing.iter().map(MealSlot::key).collect();
                write!(f, "day {day_number} is missing meals {}", keys.join(", "))
            }
        }
    }
}

/// Everything observed while producing one itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub outcome: GenerationOutcome,
    /// Budget check of the returned plan; absent for synthetic plans
    pub budget: Option<BudgetCheck>,
    pub conformance: Vec<ConformanceIssue>,
    /// Generation requests issued, the budget retry included
    pub requests_sent: usize,
    pub steps: Vec<GenerationStep>,
    pub duration: Duration,
}

impl GenerationReport {
    pub fn is_synthetic(&self) -> bool {
        matches!(self.outcome, GenerationOutcome::Synthetic { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match &self.outcome {
            GenerationOutcome::Synthetic { reason } => Some(reason),
            _ => None,
        }
    }

    /// Human-readable trace of the call
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Itinerary Generation Trace ===".to_string());
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        lines.push(format!("Requests sent: {}", self.requests_sent));
        lines.push(format!("Outcome: {}", self.outcome));

        if let Some(budget) = &self.budget {
            lines.push(format!(
                "Budget: {} / {} KRW ({:.1}%, ceiling {})",
                budget.total,
                budget.budget,
                budget.percent_of_budget(),
                budget.ceiling
            ));
        }

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());
        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, step.describe()));
        }

        if !self.conformance.is_empty() {
            lines.push(String::new());
            lines.push("--- Conformance ---".to_string());
            for issue in &self.conformance {
                lines.push(format!("- {issue}"));
            }
        }

        lines.join("\n")
    }
}
