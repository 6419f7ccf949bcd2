pub mod budget;
pub mod conformance;
pub mod generation_client;
pub mod prompt;
pub mod response_parser;
pub mod synthetic;

pub use budget::check_budget;
pub use conformance::check_conformance;
pub use generation_client::{GenerateContentRequest, GenerationClient, DEFAULT_BASE_URL};
pub use prompt::{CatalogListings, PromptContext, PromptKind, TEMPLATE_VERSION};
pub use response_parser::{parse_itinerary, strip_code_fence};
pub use synthetic::synthetic_plan;
