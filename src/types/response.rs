use std::any::TypeId;

use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    schemas::{schema_type_name, validate_structured_payload, CompletionSchema, SchemaHandle},
};

/// Validate `payload` against `T`'s schema, then deserialize it with path-annotated errors.
pub fn deserialize_structured_response<T>(payload: &Value) -> Result<T>
where
    T: CompletionSchema,
{
    let schema = T::schema();
    ensure_schema_matches::<T>(schema)?;
    validate_structured_payload(schema, payload)?;

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    if schema.type_id() != TypeId::of::<T>() {
        return Err(PlannerError::Validation(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            schema_type_name::<T>(),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::itinerary::ItineraryResponse;
    use serde_json::json;

    #[test]
    fn schema_violation_is_reported_with_path() {
        let payload = json!({
            "days": [{"day_number": "first", "description": "잘못된 형식"}]
        });

        let err = deserialize_structured_response::<ItineraryResponse>(&payload).unwrap_err();
        match err {
            PlannerError::Validation(message) => {
                assert!(message.contains("itinerary"), "{message}");
                assert!(message.contains("/days/0/day_number"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn valid_payload_deserializes() {
        let payload = json!({
            "days": [{
                "day_number": 1,
                "description": "해운대 산책",
                "attractions": [{"name": "해운대해수욕장", "time": "10:00"}],
                "transportation_info": {"오전": "지하철 2호선"},
                "meals_info": {"점심": {"restaurant": "돼지국밥", "cost": 9000}},
                "estimated_cost": 90000
            }]
        });

        let plan = deserialize_structured_response::<ItineraryResponse>(&payload).unwrap();
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].attractions[0].duration, "");
        assert_eq!(plan.total_estimated_cost(), 90_000);
    }
}
