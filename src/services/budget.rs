use tracing::{info, warn};

use crate::types::{BudgetCheck, ItineraryResponse, TripRequest};

/// Compare a plan's total estimated cost with the trip's budget ceiling.
pub fn check_budget(plan: &ItineraryResponse, trip: &TripRequest) -> BudgetCheck {
    let total = plan.total_estimated_cost();
    let ceiling = trip.budget_ceiling();
    let within = total <= i64::try_from(ceiling).unwrap_or(i64::MAX);

    let check = BudgetCheck {
        total,
        budget: trip.budget,
        ceiling,
        within,
    };

    if within {
        info!(total, budget = trip.budget, "plan within budget");
    } else {
        warn!(
            total,
            budget = trip.budget,
            ceiling,
            "plan exceeds budget ({:.1}%)",
            check.percent_of_budget()
        );
    }
    check
}
