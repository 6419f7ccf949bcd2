//! Trip persistence: the [`PlanStore`] collaborator and the planner service on top of it.

pub mod planner;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{PlannerError, Result},
    types::{GeneratedDay, MergeSummary, TravelPlan},
};

pub use planner::{PlanModification, TripPlanner};

/// Storage of travel plans and their day rows.
#[async_trait]
pub trait PlanStore: Send + Sync + std::fmt::Debug {
    async fn insert_plan(&self, plan: TravelPlan) -> Result<()>;

    async fn get_plan(&self, id: Uuid) -> Result<TravelPlan>;

    /// All plans, newest first.
    async fn list_plans(&self) -> Result<Vec<TravelPlan>>;

    /// Merge `days` into the plan by day number.
    async fn upsert_days(&self, id: Uuid, days: Vec<GeneratedDay>) -> Result<MergeSummary>;
}

/// Plans held in memory.
///
/// Safe to share behind an `Arc`; each write locks the map for one plan update.
#[derive(Debug, Default)]
pub struct InMemoryPlanStore {
    plans: RwLock<HashMap<Uuid, TravelPlan>>,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn insert_plan(&self, plan: TravelPlan) -> Result<()> {
        self.plans.write().await.insert(plan.id, plan);
        Ok(())
    }

    async fn get_plan(&self, id: Uuid) -> Result<TravelPlan> {
        self.plans
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(PlannerError::PlanNotFound(id))
    }

    async fn list_plans(&self) -> Result<Vec<TravelPlan>> {
        let mut plans: Vec<TravelPlan> = self.plans.read().await.values().cloned().collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn upsert_days(&self, id: Uuid, days: Vec<GeneratedDay>) -> Result<MergeSummary> {
        let mut plans = self.plans.write().await;
        let plan = plans.get_mut(&id).ok_or(PlannerError::PlanNotFound(id))?;
        Ok(plan.merge_days(days))
    }
}
