use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{itinerary::GeneratedDay, trip::TripRequest};

/// A persisted day row of a travel plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub day: GeneratedDay,
}

/// A persisted travel plan with its day rows ordered by day number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPlan {
    pub id: Uuid,
    pub title: String,
    #[serde(flatten)]
    pub trip: TripRequest,
    /// Whether the days came out of the generation workflow
    pub is_generated: bool,
    #[serde(default)]
    pub days: Vec<PlanDay>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row counts produced by merging regenerated days into a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub updated: usize,
    pub created: usize,
}

impl TravelPlan {
    pub fn new(trip: TripRequest, days: Vec<GeneratedDay>, is_generated: bool) -> Self {
        let now = Utc::now();
        let mut plan = Self {
            id: Uuid::new_v4(),
            title: trip.plan_title(),
            trip,
            is_generated,
            days: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        plan.merge_days(days);
        plan
    }

    /// Merge days by day number: existing rows are overwritten in place, unknown
    /// day numbers become new rows, rows absent from `days` are kept.
    pub fn merge_days(&mut self, days: Vec<GeneratedDay>) -> MergeSummary {
        let mut summary = MergeSummary::default();

        for day in days {
            let date = self.trip.date_for_day(day.day_number);
            match self
                .days
                .iter_mut()
                .find(|row| row.day.day_number == day.day_number)
            {
                Some(row) => {
                    row.date = date;
                    row.day = day;
                    summary.updated += 1;
                }
                None => {
                    self.days.push(PlanDay { date, day });
                    summary.created += 1;
                }
            }
        }

        self.days.sort_by_key(|row| row.day.day_number);
        self.updated_at = Utc::now();
        summary
    }

    /// Current day contents in day order.
    pub fn generated_days(&self) -> Vec<GeneratedDay> {
        self.days.iter().map(|row| row.day.clone()).collect()
    }

    pub fn total_estimated_cost(&self) -> i64 {
        self.days
            .iter()
            .map(|row| row.day.cost())
            .fold(0, i64::saturating_add)
    }
}
