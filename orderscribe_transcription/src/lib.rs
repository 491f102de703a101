#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Adaptation layer for speech-to-text service payloads.
//!
//! The transcription service is consumed as an opaque boundary: it is sent
//! audio plus a list of keyterms, and answers with transcript text and entity
//! spans. This crate turns its answers into the normalized types the matcher
//! works on and wraps the outcome in the response envelope callers expect.

use orderscribe_core::{ItemMatcher, MatchResult, RecognizedEntity};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Most keyterms the service accepts in one request.
pub const DEFAULT_MAX_KEYTERMS: usize = 100;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to decode service payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An entity as reported by the service.
///
/// The service has used several spellings for the same field, sometimes more
/// than one in a single entity. Every spelling is kept and [`normalize`]
/// picks the first usable one: `entity_type`, then `entityType`, then `type`
/// for the type, and snake case before camel case for offsets. Empty types
/// and zero offsets count as unusable, so a later spelling can still supply
/// them.
///
/// [`normalize`]: RawEntity::normalize
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawEntity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default, rename = "entityType")]
    pub entity_type_camel: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub start_char: Option<usize>,
    #[serde(default, rename = "startChar")]
    pub start_char_camel: Option<usize>,

    #[serde(default)]
    pub end_char: Option<usize>,
    #[serde(default, rename = "endChar")]
    pub end_char_camel: Option<usize>,
}

impl RawEntity {
    #[must_use]
    pub fn normalize(self) -> RecognizedEntity {
        let entity_type = [self.entity_type, self.entity_type_camel, self.kind]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .unwrap_or_default();

        RecognizedEntity {
            text: self.text,
            entity_type,
            start_char: first_offset(self.start_char, self.start_char_camel),
            end_char: first_offset(self.end_char, self.end_char_camel),
        }
    }
}

fn first_offset(snake: Option<usize>, camel: Option<usize>) -> usize {
    [snake, camel]
        .into_iter()
        .flatten()
        .find(|&offset| offset != 0)
        .unwrap_or(0)
}

/// A decoded service response body. Missing or null fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceTranscript {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<RawEntity>,
}

impl ServiceTranscript {
    /// Decode a service response body.
    ///
    /// # Errors
    /// Returns an error if `json` is not a JSON object of the expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let transcript: Self = serde_json::from_str(json)?;
        debug!(
            chars = transcript.text.chars().count(),
            entities = transcript.entities.len(),
            "Decoded service transcript"
        );
        Ok(transcript)
    }

    /// A transcript with no entities, as when only text is available.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entities: Vec::new(),
        }
    }

    /// Split into the transcript text and its normalized entities.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<RecognizedEntity>) {
        let entities = self
            .entities
            .into_iter()
            .map(RawEntity::normalize)
            .collect();
        (self.text, entities)
    }
}

/// The keyterms to send with a request: the first `max` names.
#[must_use]
pub fn limit_keyterms<S: AsRef<str>>(terms: &[S], max: usize) -> Vec<String> {
    if terms.len() > max {
        warn!(
            total = terms.len(),
            kept = max,
            "Too many keyterms for one request, truncating"
        );
    }
    terms
        .iter()
        .take(max)
        .map(|term| term.as_ref().to_string())
        .collect()
}

/// Outcome of transcribing and matching one recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResponse {
    pub success: bool,
    pub transcript: String,
    pub parsed_items: Vec<MatchResult>,
    pub entities: Vec<RecognizedEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscriptionResponse {
    /// Match a service transcript against the menu's item names.
    #[must_use]
    pub fn from_service<S: AsRef<str>>(
        service: ServiceTranscript,
        candidates: &[S],
        matcher: &ItemMatcher,
    ) -> Self {
        let (transcript, entities) = service.into_parts();
        let parsed_items = matcher.match_items(&transcript, candidates, &entities);

        Self {
            success: true,
            transcript,
            parsed_items,
            entities,
            error: None,
        }
    }

    /// A failed request; carries only the message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transcript: String::new(),
            parsed_items: Vec::new(),
            entities: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_entity_field_spellings() {
        let json = r#"{
            "text": "two pizzas and three sodas",
            "entities": [
                {"text": "two", "entity_type": "cardinal", "start_char": 0, "end_char": 3},
                {"text": "three", "entityType": "CARDINAL", "startChar": 15, "endChar": 20},
                {"text": "x", "type": "number"}
            ]
        }"#;
        let (text, entities) = ServiceTranscript::from_json(json)
            .expect("valid payload")
            .into_parts();

        assert_eq!(text, "two pizzas and three sodas");
        assert_eq!(entities[0], RecognizedEntity::new("two", "cardinal", 0, 3));
        assert_eq!(entities[1], RecognizedEntity::new("three", "CARDINAL", 15, 20));
        assert_eq!(entities[2], RecognizedEntity::new("x", "number", 0, 0));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_missing_fields_default() {
        let transcript = ServiceTranscript::from_json("{}").expect("empty object decodes");
        assert!(transcript.text.is_empty());
        assert!(transcript.entities.is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_null_offset_defaults_to_zero() {
        let json = r#"{
            "text": "two pizzas",
            "entities": [
                {"text": "two", "entity_type": "cardinal", "start_char": 0, "end_char": null}
            ]
        }"#;
        let (text, entities) = ServiceTranscript::from_json(json)
            .expect("null offset decodes")
            .into_parts();

        assert_eq!(text, "two pizzas");
        assert_eq!(entities, vec![RecognizedEntity::new("two", "cardinal", 0, 0)]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_null_text_and_entities() {
        let transcript = ServiceTranscript::from_json(r#"{"text": null, "entities": null}"#)
            .expect("null fields decode");
        assert_eq!(transcript, ServiceTranscript::default());

        let transcript =
            ServiceTranscript::from_json(r#"{"text": "a soda", "entities": [{"text": null}]}"#)
                .expect("null entity text decodes");
        assert_eq!(
            transcript.into_parts().1,
            vec![RecognizedEntity::new("", "", 0, 0)]
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_mixed_spellings_in_one_entity() {
        let json = r#"{"entities": [
            {"text": "3", "type": "number", "entity_type": "cardinal",
             "start_char": 4, "startChar": 9, "endChar": 5},
            {"text": "4", "entity_type": "", "entityType": null, "type": "CARDINAL",
             "start_char": 0, "startChar": 7, "end_char": 8}
        ]}"#;
        let (_, entities) = ServiceTranscript::from_json(json)
            .expect("mixed spellings decode")
            .into_parts();

        assert_eq!(entities[0], RecognizedEntity::new("3", "cardinal", 4, 5));
        assert_eq!(entities[1], RecognizedEntity::new("4", "CARDINAL", 7, 8));
    }

    #[test]
    fn test_decode_error() {
        let result = ServiceTranscript::from_json("not json");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_limit_keyterms() {
        let terms: Vec<String> = (0..150).map(|i| format!("item {i}")).collect();
        let limited = limit_keyterms(&terms, DEFAULT_MAX_KEYTERMS);
        assert_eq!(limited.len(), 100);
        assert_eq!(limited[99], "item 99");

        assert_eq!(limit_keyterms(&["a", "b"], DEFAULT_MAX_KEYTERMS), vec!["a", "b"]);
    }

    #[test]
    fn test_failure_envelope() {
        let response = TranscriptionResponse::failure("No audio data provided");
        assert!(!response.success);
        assert!(response.parsed_items.is_empty());
        assert_eq!(response.error.as_deref(), Some("No audio data provided"));
    }
}
