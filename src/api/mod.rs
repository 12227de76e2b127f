//! Wire types for the `generateContent` endpoint.
//!
//! Every response field is optional so that a partially populated envelope
//! still deserializes; deciding what counts as an empty reply is left to
//! [`crate::core::exchange`].

use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying `text` as the only user part.
    pub fn single_user_turn(text: String) -> Self {
        Self {
            contents: vec![Content {
                role: Some(ROLE_USER.to_string()),
                parts: Some(vec![Part { text: Some(text) }]),
            }],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_user_turn_serializes_expected_shape() {
        let request = GenerateContentRequest::single_user_turn("prompt\nhello".to_string());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "prompt\nhello"}]}
                ]
            })
        );
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_none());

        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        let candidates = parsed.candidates.unwrap();
        assert!(candidates[0].content.is_none());
        assert_eq!(candidates[0].finish_reason.as_deref(), Some("SAFETY"));
    }
}
