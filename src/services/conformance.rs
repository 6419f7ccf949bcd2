use tracing::warn;

use crate::types::{ConformanceIssue, ItineraryResponse};

/// Structural deviations of `plan` from a trip of `expected_days` days.
///
/// Issues are logged and returned; the plan itself is left untouched.
pub fn check_conformance(plan: &ItineraryResponse, expected_days: u32) -> Vec<ConformanceIssue> {
    let mut issues = Vec::new();

    if plan.days.len() != expected_days as usize {
        issues.push(ConformanceIssue::DayCountMismatch {
            expected: expected_days,
            actual: plan.days.len(),
        });
    }

    for (position, day) in plan.days.iter().enumerate() {
        if day.day_number as usize != position + 1 {
            issues.push(ConformanceIssue::DayNumberOutOfOrder {
                position,
                day_number: day.day_number,
            });
        }

        let missing = day.missing_meals();
        if !missing.is_empty() {
            issues.push(ConformanceIssue::MissingMeals {
                day_number: day.day_number,
                missing,
            });
        }
    }

    for issue in &issues {
        warn!("itinerary nonconformance: {}", issue);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MealSlot;
    use serde_json::json;

    fn full_meals() -> serde_json::Value {
        json!({
            "아침": {"restaurant": "a", "cost": 1},
            "점심": {"restaurant": "b", "cost": 1},
            "저녁": {"restaurant": "c", "cost": 1}
        })
    }

    #[test]
    fn conforming_plan_has_no_issues() {
        let plan: ItineraryResponse = serde_json::from_value(json!({
            "days": [
                {"day_number": 1, "meals_info": full_meals()},
                {"day_number": 2, "meals_info": full_meals()}
            ]
        }))
        .unwrap();
        assert!(check_conformance(&plan, 2).is_empty());
    }

    #[test]
    fn short_plan_and_missing_meals_are_reported() {
        let plan: ItineraryResponse = serde_json::from_value(json!({
            "days": [{"day_number": 1, "meals_info": {"점심": {"restaurant": "b"}}}]
        }))
        .unwrap();

        let issues = check_conformance(&plan, 3);
        assert_eq!(
            issues,
            vec![
                ConformanceIssue::DayCountMismatch {
                    expected: 3,
                    actual: 1
                },
                ConformanceIssue::MissingMeals {
                    day_number: 1,
                    missing: vec![MealSlot::Breakfast, MealSlot::Dinner],
                },
            ]
        );
    }

    #[test]
    fn misnumbered_days_are_reported() {
        let plan: ItineraryResponse = serde_json::from_value(json!({
            "days": [
                {"day_number": 2, "meals_info": full_meals()},
                {"day_number": 1, "meals_info": full_meals()}
            ]
        }))
        .unwrap();

        let issues = check_conformance(&plan, 2);
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0],
            ConformanceIssue::DayNumberOutOfOrder {
                position: 0,
                day_number: 2
            }
        ));
    }
}
