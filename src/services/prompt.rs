use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{
    AccommodationType, CatalogFestival, CatalogPlace, GeneratedDay, TripRequest,
};

/// Version tag of the bundled prompt templates.
pub const TEMPLATE_VERSION: &str = "v1";

const ITINERARY_TEMPLATE: &str = include_str!("../../templates/itinerary_v1.txt");
const BUDGET_RETRY_TEMPLATE: &str = include_str!("../../templates/budget_retry_v1.txt");
const MODIFY_SECTION_TEMPLATE: &str = include_str!("../../templates/modify_section_v1.txt");

pub const NO_PLACES_PLACEHOLDER: &str = "해당 지역의 데이터가 없습니다.";
pub const NO_FESTIVALS_PLACEHOLDER: &str = "해당 기간에 축제/행사가 없습니다.";

/// Which template a request was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Initial,
    BudgetRetry,
    Modify,
}

/// Catalog results already formatted as prompt listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListings {
    pub tourist_spots: String,
    pub restaurants: String,
    pub accommodations: String,
    pub festivals: String,
}

impl CatalogListings {
    pub fn new(
        tourist_spots: &[CatalogPlace],
        restaurants: &[CatalogPlace],
        accommodations: &[CatalogPlace],
        festivals: &[CatalogFestival],
    ) -> Self {
        Self {
            tourist_spots: format_places(tourist_spots),
            restaurants: format_places(restaurants),
            accommodations: format_places(accommodations),
            festivals: format_festivals(festivals),
        }
    }
}

/// `- title (category): address` per place, or the placeholder when empty.
pub fn format_places(places: &[CatalogPlace]) -> String {
    if places.is_empty() {
        return NO_PLACES_PLACEHOLDER.to_string();
    }

    places
        .iter()
        .map(|place| {
            let category = if place.category.is_empty() {
                String::new()
            } else {
                format!(" ({})", place.category)
            };
            format!("- {}{}: {}", place.title, category, place.address)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- title (category): period @ address` per festival, or the placeholder when empty.
pub fn format_festivals(festivals: &[CatalogFestival]) -> String {
    if festivals.is_empty() {
        return NO_FESTIVALS_PLACEHOLDER.to_string();
    }

    festivals
        .iter()
        .map(|festival| {
            format!(
                "- {} ({}): {} @ {}",
                festival.title,
                festival.category,
                festival.period(),
                festival.address
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Template data for one generation request.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub days: u32,
    pub budget: u64,
    pub people_count: u32,
    pub budget_per_person: u64,
    pub daily_budget: u64,
    pub budget_ceiling: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub departure_location: String,
    pub region: String,
    pub travel_style: String,
    pub accommodation_type: AccommodationType,
    pub listings: CatalogListings,
}

impl PromptContext {
    pub fn new(trip: &TripRequest, listings: CatalogListings) -> Self {
        Self {
            days: trip.duration_days(),
            budget: trip.budget,
            people_count: trip.people_count,
            budget_per_person: trip.budget_per_person(),
            daily_budget: trip.daily_budget(),
            budget_ceiling: trip.budget_ceiling(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            departure_location: trip.departure_location.clone(),
            region: trip.region.clone(),
            travel_style: trip.travel_style.clone(),
            accommodation_type: trip.accommodation_type,
            listings,
        }
    }

    /// First request of a generation call.
    pub fn render_initial(&self) -> String {
        render(ITINERARY_TEMPLATE, &self.variables(110_000))
    }

    /// Stricter request issued once after a budget overrun.
    pub fn render_budget_retry(&self) -> String {
        render(BUDGET_RETRY_TEMPLATE, &self.variables(self.daily_budget))
    }

    /// Initial request plus the current itinerary and the requested changes.
    pub fn render_modify(&self, current: &[GeneratedDay], requirements: &str) -> String {
        let mut prompt = self.render_initial();
        prompt.push_str(&modify_section(current, requirements));
        prompt
    }

    /// Budget retry of a modification, keeping the requested changes.
    pub fn render_modify_budget_retry(
        &self,
        current: &[GeneratedDay],
        requirements: &str,
    ) -> String {
        let mut prompt = self.render_budget_retry();
        prompt.push_str(&modify_section(current, requirements));
        prompt
    }

    fn variables(&self, final_day_cost: u64) -> Vec<(&'static str, String)> {
        vec![
            ("days", self.days.to_string()),
            ("budget", format_won(self.budget)),
            ("people_count", self.people_count.to_string()),
            ("budget_per_person", format_won(self.budget_per_person)),
            ("daily_budget", format_won(self.daily_budget)),
            ("daily_budget_plain", self.daily_budget.to_string()),
            ("budget_ceiling", format_won(self.budget_ceiling)),
            ("start_date", self.start_date.to_string()),
            ("end_date", self.end_date.to_string()),
            ("departure_location", self.departure_location.clone()),
            ("region", self.region.clone()),
            ("travel_style", self.travel_style.clone()),
            (
                "accommodation_type",
                self.accommodation_type.label().to_string(),
            ),
            ("tourist_spots", self.listings.tourist_spots.clone()),
            ("restaurants", self.listings.restaurants.clone()),
            ("accommodations", self.listings.accommodations.clone()),
            ("festivals", self.listings.festivals.clone()),
            (
                "final_day_example",
                final_day_example(self.days, final_day_cost),
            ),
        ]
    }
}

fn modify_section(current: &[GeneratedDay], requirements: &str) -> String {
    let current_itinerary = serde_json::to_string_pretty(&serde_json::json!({ "days": current }))
        .unwrap_or_else(|_| "{\"days\": []}".to_string());

    render(
        MODIFY_SECTION_TEMPLATE,
        &[
            ("current_itinerary", current_itinerary),
            ("requirements", requirements.trim().to_string()),
        ],
    )
}

/// Worked example entry for the last day, only when the trip spans several days.
fn final_day_example(days: u32, cost: u64) -> String {
    if days <= 1 {
        return String::new();
    }

    format!(
        r#",
    {{
      "day_number": {days},
      "description": "{days}일차 일정 요약",
      "attractions": [...],
      "transportation_info": {{...}},
      "accommodation_info": {{...}},
      "meals_info": {{...}},
      "events_info": [],
      "estimated_cost": {cost}
    }}"#
    )
}

/// Resolve `{{name}}` placeholders in one left-to-right pass.
///
/// Substituted values are never scanned again; unknown placeholders are kept.
fn render(template: &str, variables: &[(&str, String)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let resolved = after.find("}}").and_then(|end| {
            let name = &after[..end];
            variables
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (value, end))
        });

        match resolved {
            Some((value, end)) => {
                rendered.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                rendered.push_str("{{");
                rest = after;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// Thousands-separated amount, e.g. `1,250,000`.
pub fn format_won(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(ch);
    }
    formatted
}
