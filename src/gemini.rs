//! Client for the Gemini `generateContent` endpoint.
//!
//! One best-effort POST per invocation, no retries. The model answers with a
//! JSON envelope whose nested candidate text itself contains the verdict
//! JSON, often wrapped in markdown code fences.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::constants::{GEMINI_API_BASE, IMAGE_MIME_TYPE, REQUEST_TIMEOUT_SECONDS};
use crate::error::VerifyError;

/// Outermost brace-to-brace block, for answers where the model wraps the
/// verdict JSON in prose.
#[allow(clippy::expect_used)]
static JSON_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("hardcoded regex compiles"));

// -----------------------------
// Wire format
// -----------------------------

/// Request body for POST {model}:generateContent
/// Docs: https://ai.google.dev/api/generate-content
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

// -----------------------------
// Client
// -----------------------------

/// Thin client around one `generateContent` call.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl GeminiClient {
    /// Builds the endpoint URL for `model` with the API key as a query
    /// parameter, and an HTTP client with the fixed request timeout.
    pub fn new(api_key: &str, model: &str) -> Result<Self, VerifyError> {
        let mut endpoint = Url::parse(&format!("{GEMINI_API_BASE}/{model}:generateContent"))?;
        endpoint.query_pairs_mut().append_pair("key", api_key);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Sends the prompt and the base64 PNG receipt, returning the model's
    /// verdict mapping unchanged.
    pub async fn analyze(&self, image_b64: &str, prompt: &str) -> Result<Value, VerifyError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: IMAGE_MIME_TYPE,
                            data: image_b64,
                        },
                    },
                ],
            }],
        };

        debug!("Sending request to Gemini Vision API...");
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        handle_response(status, &bytes)
    }
}

/// Turns a raw API response into the verdict mapping. Split out from
/// [`GeminiClient::analyze`] so simulated responses can be fed in directly.
pub fn handle_response(status: reqwest::StatusCode, body: &[u8]) -> Result<Value, VerifyError> {
    if status != reqwest::StatusCode::OK {
        return Err(VerifyError::Api {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let parsed: GenerateContentResponse =
        serde_json::from_slice(body).map_err(|err| VerifyError::Parse(err.to_string()))?;

    let text = parsed
        .candidates
        .into_iter()
        .flat_map(|candidate| candidate.content.parts)
        .find_map(|part| part.text)
        .ok_or(VerifyError::MissingContent)?;

    extract_verdict(&text)
}

/// Parses the model's answer text as a JSON object, tolerating ```json fences
/// and surrounding prose.
pub fn extract_verdict(text: &str) -> Result<Value, VerifyError> {
    let stripped = text.trim().replace("```json", "").replace("```", "");
    let candidate = stripped.trim();

    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
        return require_object(value);
    }

    let grabbed = JSON_OBJECT_RE
        .find(candidate)
        .ok_or_else(|| VerifyError::Parse("no JSON object in answer".to_string()))?;
    let value = serde_json::from_str(grabbed.as_str())
        .map_err(|err| VerifyError::Parse(err.to_string()))?;
    require_object(value)
}

fn require_object(value: Value) -> Result<Value, VerifyError> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(VerifyError::Parse(
            "answer was not a JSON object".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    const ANSWER: &str = r#"{"extracted_info":{"reference_number":"1234567890123","amount":"250.00","date":"2026-08-20 09:15"},"verification_status":"APPROVED","reasoning":"Looks legitimate."}"#;

    fn envelope(text: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "candidates": [
                {"content": {"parts": [{"text": text}]}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_request_body_wire_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: "prompt" },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: "image/png",
                            data: "QUJD",
                        },
                    },
                ],
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        {"text": "prompt"},
                        {"inline_data": {"mime_type": "image/png", "data": "QUJD"}}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_plain_answer_passes_through() {
        let result = handle_response(StatusCode::OK, &envelope(ANSWER)).unwrap();
        let expected: Value = serde_json::from_str(ANSWER).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_fenced_answer_passes_through() {
        let fenced = format!("```json\n{ANSWER}\n```");
        let result = handle_response(StatusCode::OK, &envelope(&fenced)).unwrap();
        let expected: Value = serde_json::from_str(ANSWER).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_prose_wrapped_answer_is_extracted() {
        let wrapped = format!("Here is my analysis:\n{ANSWER}\nLet me know if you need more.");
        let result = extract_verdict(&wrapped).unwrap();
        let expected: Value = serde_json::from_str(ANSWER).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_non_object_answer_is_rejected() {
        assert!(matches!(
            extract_verdict("[1, 2, 3]"),
            Err(VerifyError::Parse(_))
        ));
        assert!(matches!(
            extract_verdict("no json here at all"),
            Err(VerifyError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_candidates_is_missing_content() {
        let body = serde_json::to_vec(&json!({"candidates": []})).unwrap();
        assert!(matches!(
            handle_response(StatusCode::OK, &body),
            Err(VerifyError::MissingContent)
        ));
    }

    #[test]
    fn test_non_200_is_api_error() {
        let result = handle_response(StatusCode::SERVICE_UNAVAILABLE, b"model overloaded");
        match result {
            Err(VerifyError::Api { status, body }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "model overloaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_envelope_is_parse_error() {
        assert!(matches!(
            handle_response(StatusCode::OK, b"<html>not json</html>"),
            Err(VerifyError::Parse(_))
        ));
    }
}
