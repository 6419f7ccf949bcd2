//! Procedural macros for the tripify planner.

mod completion_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Derive a cached [`CompletionSchema`] implementation for a response struct.
///
/// The struct must also derive `schemars::JsonSchema` and `serde::Deserialize`.
/// Doc comments on the struct and its fields are copied into the generated
/// schema as descriptions. The schema validates generated payloads before
/// they are deserialized.
///
/// ```ignore
/// #[derive(serde::Deserialize, schemars::JsonSchema)]
/// #[completion_schema(name = "itinerary")]
/// pub struct ItineraryResponse {
///     /// One entry per trip day
///     pub days: Vec<GeneratedDay>,
/// }
/// ```
///
/// [`CompletionSchema`]: ../tripify/schemas/trait.CompletionSchema.html
#[proc_macro_attribute]
pub fn completion_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    completion_schema::expand(attr, item)
}
