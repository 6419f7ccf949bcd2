use serde_json::Value;
use tracing::debug;

use crate::{
    error::{PlannerError, Result},
    types::{deserialize_structured_response, ItineraryResponse},
};

/// Extract the first Markdown code fence (```` ```json ```` or bare ```` ``` ````).
///
/// The fence may sit anywhere in the text, so prose around it is dropped.
/// Text without a fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text.trim();
    };
    let rest = &text[start + 3..];
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let body = match rest.find("```") {
        Some(end) => &rest[..end],
        None => rest,
    };
    body.trim()
}

/// Parse generated text into an itinerary.
///
/// Text that is not JSON is [`PlannerError::MalformedResponse`]; JSON that
/// does not fit the itinerary schema is [`PlannerError::Validation`].
pub fn parse_itinerary(text: &str) -> Result<ItineraryResponse> {
    let body = strip_code_fence(text);
    let payload: Value = serde_json::from_str(body).map_err(|err| {
        PlannerError::MalformedResponse(format!("generated text is not valid JSON: {err}"))
    })?;

    let itinerary = deserialize_structured_response::<ItineraryResponse>(&payload)?;
    debug!(days = itinerary.days.len(), "parsed itinerary");
    Ok(itinerary)
}
