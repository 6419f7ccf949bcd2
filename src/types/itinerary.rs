use crate::completion_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Period-of-day keys used by `transportation_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 3] = [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Evening];

    pub fn key(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "오전",
            DayPeriod::Afternoon => "오후",
            DayPeriod::Evening => "저녁",
        }
    }
}

/// Meal-slot keys used by `meals_info`. All three are mandatory per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn key(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "아침",
            MealSlot::Lunch => "점심",
            MealSlot::Dinner => "저녁",
        }
    }
}

/// Structured travel plan returned by the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[completion_schema(name = "itinerary")]
pub struct ItineraryResponse {
    /// One entry per trip day, day_number running from 1 to the trip duration
    pub days: Vec<GeneratedDay>,
}

impl ItineraryResponse {
    /// Sum of per-day estimated costs; days without an estimate count as zero.
    ///
    /// Saturates at `i64::MAX` instead of wrapping.
    pub fn total_estimated_cost(&self) -> i64 {
        self.days
            .iter()
            .map(GeneratedDay::cost)
            .fold(0, i64::saturating_add)
    }

    pub fn day(&self, day_number: u32) -> Option<&GeneratedDay> {
        self.days.iter().find(|day| day.day_number == day_number)
    }
}

/// A single day of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedDay {
    /// 1-based day counter within the trip
    pub day_number: u32,
    /// One-line summary of the day
    #[serde(default)]
    pub description: String,
    /// Attractions in visiting order
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    /// Transport per period of day, keyed by "오전", "오후" and "저녁"
    #[serde(default)]
    pub transportation_info: BTreeMap<String, String>,
    #[serde(default)]
    pub accommodation_info: AccommodationInfo,
    /// Meals keyed by "아침", "점심" and "저녁"
    #[serde(default)]
    pub meals_info: BTreeMap<String, MealInfo>,
    #[serde(default)]
    pub events_info: Vec<EventInfo>,
    /// Total spend for the day for the whole party, in KRW
    #[serde(default)]
    #[schemars(range(min = 0))]
    pub estimated_cost: Option<i64>,
}

impl GeneratedDay {
    pub fn cost(&self) -> i64 {
        self.estimated_cost.unwrap_or(0)
    }

    pub fn meal(&self, slot: MealSlot) -> Option<&MealInfo> {
        self.meals_info.get(slot.key())
    }

    pub fn transport(&self, period: DayPeriod) -> Option<&str> {
        self.transportation_info
            .get(period.key())
            .map(String::as_str)
    }

    /// Mandatory meal slots this day does not cover.
    pub fn missing_meals(&self) -> Vec<MealSlot> {
        MealSlot::ALL
            .into_iter()
            .filter(|slot| self.meal(*slot).is_none())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Attraction {
    pub name: String,
    /// Arrival time such as "09:00"
    #[serde(default)]
    pub time: String,
    /// Time spent such as "2시간"
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AccommodationInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[schemars(range(min = 0))]
    pub cost: Option<i64>,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MealInfo {
    /// Restaurant name or kind of food
    #[serde(default)]
    pub restaurant: String,
    #[serde(default)]
    #[schemars(range(min = 0))]
    pub cost: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EventInfo {
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CompletionSchema;
    use crate::types::deserialize_structured_response;
    use serde_json::json;

    #[test]
    fn schema_requires_days_and_day_number() {
        let handle = ItineraryResponse::schema();
        assert_eq!(handle.schema_name(), "itinerary");
        assert_eq!(handle.required_fields(), vec!["days"]);

        let day_required = &handle.schema_json()["definitions"]["GeneratedDay"]["required"];
        assert_eq!(day_required, &json!(["day_number"]));
    }

    #[test]
    fn missing_meals_reports_absent_slots() {
        let day: GeneratedDay = serde_json::from_value(json!({
            "day_number": 1,
            "meals_info": {
                "아침": {"restaurant": "호텔 조식", "cost": 10000},
                "저녁": {"restaurant": "횟집", "cost": 40000}
            }
        }))
        .unwrap();

        assert_eq!(day.missing_meals(), vec![MealSlot::Lunch]);
        assert_eq!(day.cost(), 0);
    }

    #[test]
    fn total_cost_skips_days_without_estimates() {
        let response: ItineraryResponse = serde_json::from_value(json!({
            "days": [
                {"day_number": 1, "estimated_cost": 120000},
                {"day_number": 2, "estimated_cost": null},
                {"day_number": 3, "estimated_cost": 95000}
            ]
        }))
        .unwrap();

        assert_eq!(response.total_estimated_cost(), 215_000);
        assert_eq!(response.day(3).and_then(|day| day.estimated_cost), Some(95_000));
    }

    #[test]
    fn total_cost_saturates_instead_of_overflowing() {
        let response: ItineraryResponse = serde_json::from_value(json!({
            "days": [
                {"day_number": 1, "estimated_cost": i64::MAX},
                {"day_number": 2, "estimated_cost": 10}
            ]
        }))
        .unwrap();

        assert_eq!(response.total_estimated_cost(), i64::MAX);
    }

    #[test]
    fn negative_costs_fail_schema_validation() {
        let payload = json!({
            "days": [
                {"day_number": 1, "estimated_cost": 900000},
                {"day_number": 2, "estimated_cost": -800000}
            ]
        });

        let err = deserialize_structured_response::<ItineraryResponse>(&payload).unwrap_err();
        assert!(matches!(err, crate::error::PlannerError::Validation(_)));
    }
}
