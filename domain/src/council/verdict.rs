//! Structured-output parsing for judge and architect responses.
//!
//! Both sites return a [`Verdict`]: either the parsed value or a tagged
//! fallback. Neither ever propagates a parse failure.

use crate::council::batch::CritiqueBatch;
use crate::council::value_objects::{Blueprint, CritiqueResult};
use serde::de::DeserializeOwned;

/// Parsed structured output, or the substitute used in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<T> {
    Parsed(T),
    Fallback { value: T, reason: String },
}

impl<T> Verdict<T> {
    pub fn value(&self) -> &T {
        match self {
            Verdict::Parsed(value) => value,
            Verdict::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Verdict::Parsed(value) => value,
            Verdict::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Verdict::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Verdict::Parsed(_) => None,
            Verdict::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Locate the outermost JSON object in a model response.
///
/// Models often wrap structured output in prose or a ```json fence.
pub fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

fn parse_structured<T: DeserializeOwned>(response: &str) -> Result<T, String> {
    let json = extract_json_object(response).ok_or_else(|| "no JSON object found".to_string())?;
    serde_json::from_str(json).map_err(|e| e.to_string())
}

/// Parse a judge response for `batch`, substituting the fallback verdict on failure.
pub fn parse_critique(response: &str, batch: &CritiqueBatch<'_>) -> Verdict<CritiqueResult> {
    match parse_structured::<CritiqueResult>(response) {
        Ok(verdict) => Verdict::Parsed(verdict),
        Err(reason) => Verdict::Fallback {
            value: CritiqueResult::fallback(&batch.ids()),
            reason,
        },
    }
}

/// Parse an architect response, substituting the degraded blueprint on failure.
pub fn parse_blueprint(response: &str) -> Verdict<Blueprint> {
    match parse_structured::<Blueprint>(response) {
        Ok(blueprint) => Verdict::Parsed(blueprint),
        Err(reason) => Verdict::Fallback {
            value: Blueprint::degraded(),
            reason,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::batch::partition;
    use crate::council::value_objects::{GenerationResult, TokenUsage, FALLBACK_WINNER_ID};

    fn results() -> Vec<GenerationResult> {
        ["The Academic", "The Layman"]
            .iter()
            .map(|n| GenerationResult::new(*n, "text", TokenUsage::default()))
            .collect()
    }

    #[test]
    fn test_extract_json_from_fence() {
        let response = "Here you go:\n```json\n{\"a\": {\"b\": 1}}\n```\nDone.";
        assert_eq!(extract_json_object(response), Some("{\"a\": {\"b\": 1}}"));
        assert_eq!(extract_json_object("no braces"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_parse_critique_valid() {
        let results = results();
        let batch = partition(&results)[0];
        let response = r#"{"winner_id": "The Layman", "rankings": ["The Layman", "The Academic"],
            "reasoning": "clear", "flaws": {"The Academic": "dense"},
            "scores": {"The Layman": 8, "The Academic": 6}}"#;
        let verdict = parse_critique(response, &batch);
        assert!(!verdict.is_fallback());
        assert_eq!(verdict.value().winner_id, "The Layman");
    }

    #[test]
    fn test_parse_critique_missing_winner_falls_back() {
        let results = results();
        let batch = partition(&results)[0];
        let response = r#"{"rankings": ["The Layman"], "reasoning": "x", "flaws": {}, "scores": {}}"#;
        let verdict = parse_critique(response, &batch);
        assert!(verdict.is_fallback());
        assert!(verdict.fallback_reason().unwrap().contains("winner_id"));
        let value = verdict.into_value();
        assert_eq!(value.winner_id, FALLBACK_WINNER_ID);
        assert_eq!(value.rankings, vec!["The Academic", "The Layman"]);
    }

    #[test]
    fn test_parse_critique_garbage_falls_back() {
        let results = results();
        let batch = partition(&results)[0];
        let verdict = parse_critique("I liked them both.", &batch);
        assert_eq!(verdict.fallback_reason(), Some("no JSON object found"));
    }

    #[test]
    fn test_parse_blueprint_valid_and_degraded() {
        let ok = parse_blueprint(
            r#"{"structure": ["Intro"], "tone_guidelines": "calm",
               "missing_facts_to_add": ["x"], "critique_integration": "merge"}"#,
        );
        assert!(!ok.is_fallback());
        assert_eq!(ok.value().critique_integration, "merge");

        let bad = parse_blueprint("{\"structure\": 3}");
        assert!(bad.is_fallback());
        assert!(bad.value().is_degraded());
    }
}
