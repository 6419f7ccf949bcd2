pub mod catalog;
pub mod itinerary;
pub mod plan;
pub mod report;
pub mod response;
pub mod trip;

pub use catalog::{CatalogFestival, CatalogPlace, PlaceKind};
pub use itinerary::{
    AccommodationInfo, Attraction, DayPeriod, EventInfo, GeneratedDay, ItineraryResponse,
    MealInfo, MealSlot,
};
pub use plan::{MergeSummary, PlanDay, TravelPlan};
pub use report::{
    BudgetCheck, ConformanceIssue, FallbackReason, GenerationOutcome, GenerationReport,
};
pub use response::deserialize_structured_response;
pub use trip::{AccommodationType, TripRequest, DEFAULT_DEPARTURE};
