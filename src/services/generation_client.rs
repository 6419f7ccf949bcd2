use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://gms.ssafy.io/gmsapi/generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-lite:generateContent";

/// Client for a Gemini-style `generateContent` endpoint.
///
/// Every call is a single POST; retrying is the caller's decision.
#[derive(Clone, Debug)]
pub struct GenerationClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl GenerationClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `prompt` and return the first candidate's text.
    pub async fn generate_text(&self, prompt: &str, timeout: Duration) -> Result<String> {
        let body = GenerateContentRequest::new(prompt).into_value();

        let response = self
            .http
            .post(&self.base_url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| transport_error(err, timeout))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| transport_error(err, timeout))?;

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(response_text);

            return Err(PlannerError::Transport(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
            PlannerError::MalformedResponse(format!("response body is not JSON: {err}"))
        })?;

        let text = extract_candidate_text(&response_json).ok_or_else(|| {
            PlannerError::MalformedResponse(
                "response has no candidates[0].content.parts[0].text".to_string(),
            )
        })?;

        debug!(length = text.chars().count(), "received generation text");
        Ok(text.to_string())
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> PlannerError {
    if err.is_timeout() {
        PlannerError::Timeout(timeout.as_secs())
    } else {
        // The URL carries the key as a query parameter.
        PlannerError::Transport(format!("HTTP request failed: {}", err.without_url()))
    }
}

/// Text of the first part of the first candidate.
pub fn extract_candidate_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?
        .first()?
        .get("text")?
        .as_str()
}

/// Body of a `generateContent` call.
#[derive(Clone, Debug)]
pub struct GenerateContentRequest {
    prompt: String,
}

impl GenerateContentRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn into_value(self) -> Value {
        json!({
            "contents": [
                { "parts": [ { "text": self.prompt } ] }
            ]
        })
    }
}
