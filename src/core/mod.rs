pub mod generator;
pub mod steps;
pub mod trace;
mod workflow;

pub use generator::ItineraryGenerator;
pub use steps::GenerationStep;
pub use trace::GenerationTrace;
pub use workflow::{ACCOMMODATION_LIMIT, FESTIVAL_LIMIT, RESTAURANT_LIMIT, TOURIST_SPOT_LIMIT};
