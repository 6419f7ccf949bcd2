//! tripify: AI-assisted travel itinerary generation grounded in a local
//! places and festivals catalog.
//!
//! A [`ItineraryGenerator`] turns a [`TripRequest`] into a day-by-day
//! [`ItineraryResponse`]: it pulls candidate places from a [`Catalog`], renders
//! a prompt, calls a Gemini-style endpoint once, validates the JSON answer
//! against the itinerary schema and regenerates once when the plan runs more
//! than 10% over budget. Missing credentials, transport failures and
//! malformed answers all end in a deterministic synthetic plan.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tripify::{GeneratorConfig, InMemoryCatalog, ItineraryGenerator, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = ItineraryGenerator::new(
//!         GeneratorConfig::from_env(),
//!         Arc::new(InMemoryCatalog::new()),
//!     );
//!
//!     let trip: TripRequest = serde_json::from_str(
//!         r#"{"budget": 500000, "people_count": 2, "start_date": "2025-10-01",
//!             "end_date": "2025-10-03", "region": "부산", "travel_style": "힐링"}"#,
//!     )?;
//!
//!     let itinerary = generator.generate(&trip).await;
//!     println!("{}", serde_json::to_string_pretty(&itinerary)?);
//!     Ok(())
//! }
//! ```

extern crate self as tripify;

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod store;
pub mod types;

pub use catalog::{Catalog, InMemoryCatalog, LoadSummary};
pub use config::GeneratorConfig;
pub use self::core::{GenerationStep, GenerationTrace, ItineraryGenerator};
pub use error::{PlannerError, Result};
pub use schemas::{schema_type_name, CompletionSchema, SchemaHandle};
pub use store::{InMemoryPlanStore, PlanModification, PlanStore, TripPlanner};
pub use tripify_macros::completion_schema;
pub use types::{
    deserialize_structured_response, AccommodationType, FallbackReason, GeneratedDay,
    GenerationOutcome, GenerationReport, ItineraryResponse, TravelPlan, TripRequest,
};

#[cfg(feature = "cli")]
pub mod cli;
