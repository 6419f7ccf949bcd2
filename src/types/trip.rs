use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{PlannerError, Result};

/// Departure used when a request does not name one.
pub const DEFAULT_DEPARTURE: &str = "서울특별시";

/// A generated plan may total at most this percentage of the requested budget.
pub const BUDGET_TOLERANCE_PERCENT: u64 = 110;

/// Lodging category requested for the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Hotel,
    #[default]
    Motel,
    Pension,
    Guesthouse,
}

impl AccommodationType {
    pub const ALL: [AccommodationType; 4] = [
        AccommodationType::Hotel,
        AccommodationType::Motel,
        AccommodationType::Pension,
        AccommodationType::Guesthouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationType::Hotel => "hotel",
            AccommodationType::Motel => "motel",
            AccommodationType::Pension => "pension",
            AccommodationType::Guesthouse => "guesthouse",
        }
    }

    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            AccommodationType::Hotel => "호텔",
            AccommodationType::Motel => "모텔",
            AccommodationType::Pension => "펜션",
            AccommodationType::Guesthouse => "게스트하우스",
        }
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccommodationType {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value) || kind.label() == value)
            .ok_or_else(|| {
                PlannerError::InvalidRequest(format!(
                    "unknown accommodation type `{value}` (expected hotel, motel, pension or guesthouse)"
                ))
            })
    }
}

/// Parameters of a single itinerary generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Total budget for the whole party, in KRW
    pub budget: u64,
    pub people_count: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_departure")]
    pub departure_location: String,
    pub region: String,
    pub travel_style: String,
    #[serde(default)]
    pub accommodation_type: AccommodationType,
}

fn default_departure() -> String {
    DEFAULT_DEPARTURE.to_string()
}

impl TripRequest {
    pub fn validate(&self) -> Result<()> {
        if self.people_count == 0 {
            return Err(PlannerError::InvalidRequest(
                "people_count must be at least 1".to_string(),
            ));
        }
        if self.start_date > self.end_date {
            return Err(PlannerError::InvalidRequest(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        if self.region.trim().is_empty() {
            return Err(PlannerError::InvalidRequest(
                "region must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Inclusive day count between start and end date.
    ///
    /// Zero for a request whose end precedes its start.
    pub fn duration_days(&self) -> u32 {
        let span = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(span).unwrap_or(0)
    }

    pub fn budget_per_person(&self) -> u64 {
        self.budget / u64::from(self.people_count.max(1))
    }

    pub fn daily_budget(&self) -> u64 {
        self.budget / u64::from(self.duration_days().max(1))
    }

    /// Highest total estimated cost accepted without regeneration.
    pub fn budget_ceiling(&self) -> u64 {
        let ceiling = u128::from(self.budget) * u128::from(BUDGET_TOLERANCE_PERCENT) / 100;
        u64::try_from(ceiling).unwrap_or(u64::MAX)
    }

    pub fn start_month(&self) -> u32 {
        self.start_date.month()
    }

    /// Calendar date of a 1-based day number.
    pub fn date_for_day(&self, day_number: u32) -> NaiveDate {
        let offset = u64::from(day_number.saturating_sub(1));
        self.start_date
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.end_date)
    }

    pub fn plan_title(&self) -> String {
        format!("{} {} 여행", self.region, self.travel_style)
    }
}
