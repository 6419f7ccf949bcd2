use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::PlanStore;
use crate::{
    core::ItineraryGenerator,
    error::{PlannerError, Result},
    types::{GenerationReport, MergeSummary, TravelPlan, TripRequest},
};

/// Result of regenerating part of a stored plan.
#[derive(Debug, Clone)]
pub struct PlanModification {
    pub plan: TravelPlan,
    pub merge: MergeSummary,
    pub report: GenerationReport,
}

/// Runs the generation workflow and persists its day rows.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    generator: ItineraryGenerator,
    store: Arc<dyn PlanStore>,
}

impl TripPlanner {
    pub fn new(generator: ItineraryGenerator, store: Arc<dyn PlanStore>) -> Self {
        Self { generator, store }
    }

    pub fn generator(&self) -> &ItineraryGenerator {
        &self.generator
    }

    /// Validate `trip`, generate its itinerary and store it as a new plan.
    pub async fn generate_plan(&self, trip: TripRequest) -> Result<(TravelPlan, GenerationReport)> {
        trip.validate()?;

        let (itinerary, report) = self.generator.generate_with_report(&trip).await;
        let plan = TravelPlan::new(trip, itinerary.days, true);
        self.store.insert_plan(plan.clone()).await?;

        info!(
            plan_id = %plan.id,
            days = plan.days.len(),
            outcome = %report.outcome,
            "plan created"
        );
        Ok((plan, report))
    }

    /// Regenerate a stored plan with `requirements` and merge the result by day number.
    pub async fn modify_plan(&self, id: Uuid, requirements: &str) -> Result<PlanModification> {
        if requirements.trim().is_empty() {
            return Err(PlannerError::InvalidRequest(
                "modification requirements must not be empty".to_string(),
            ));
        }

        let current = self.store.get_plan(id).await?;
        let (itinerary, report) = self
            .generator
            .modify_with_report(&current.generated_days(), requirements, &current.trip)
            .await;

        let merge = self.store.upsert_days(id, itinerary.days).await?;
        let plan = self.store.get_plan(id).await?;

        info!(
            plan_id = %id,
            updated = merge.updated,
            created = merge.created,
            outcome = %report.outcome,
            "plan modified"
        );
        Ok(PlanModification {
            plan,
            merge,
            report,
        })
    }

    pub async fn get_plan(&self, id: Uuid) -> Result<TravelPlan> {
        self.store.get_plan(id).await
    }

    pub async fn list_plans(&self) -> Result<Vec<TravelPlan>> {
        self.store.list_plans().await
    }
}
