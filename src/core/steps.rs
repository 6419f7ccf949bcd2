use serde::{Deserialize, Serialize};

use crate::{
    services::prompt::PromptKind,
    types::{BudgetCheck, ConformanceIssue, FallbackReason, GenerationOutcome},
};

/// A single step of an itinerary generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationStep {
    /// Trip the call was made for
    Task { content: String },
    /// Catalog listing sizes handed to the prompt
    CatalogFetched {
        tourist_spots: usize,
        restaurants: usize,
        accommodations: usize,
        festivals: usize,
    },
    PromptRendered { kind: PromptKind, length: usize },
    /// Request sent to the generation endpoint, 1-based
    RequestSent { attempt: usize },
    ResponseParsed { days: usize },
    BudgetChecked { check: BudgetCheck },
    Nonconformance { issue: ConformanceIssue },
    /// The synthetic plan replaced the generated one
    Fallback { reason: FallbackReason },
    Completed {
        outcome: GenerationOutcome,
        days: usize,
    },
}

impl GenerationStep {
    /// Get a human-readable description of the step
    pub fn describe(&self) -> String {
        match self {
            GenerationStep::Task { content } => format!("🧭 Task: {}", content),
            GenerationStep::CatalogFetched {
                tourist_spots,
                restaurants,
                accommodations,
                festivals,
            } => format!(
                "📚 Catalog: {} spots, {} restaurants, {} lodgings, {} festivals",
                tourist_spots, restaurants, accommodations, festivals
            ),
            GenerationStep::PromptRendered { kind, length } => {
                format!("📝 Prompt ({:?}): {} chars", kind, length)
            }
            GenerationStep::RequestSent { attempt } => format!("📡 Request #{}", attempt),
            GenerationStep::ResponseParsed { days } => format!("👁 Parsed {} days", days),
            GenerationStep::BudgetChecked { check } => {
                let verdict = if check.within { "within" } else { "over" };
                format!(
                    "💰 Budget: {} of {} ({} ceiling {})",
                    check.total, check.budget, verdict, check.ceiling
                )
            }
            GenerationStep::Nonconformance { issue } => format!("⚠ Nonconformance: {}", issue),
            GenerationStep::Fallback { reason } => format!("❌ Fallback: {}", reason),
            GenerationStep::Completed { outcome, days } => {
                format!("✅ Completed: {} ({} days)", outcome, days)
            }
        }
    }
}
