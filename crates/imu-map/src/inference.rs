//! The optional inference collaborator boundary.
//!
//! Column names the deterministic path cannot resolve may be handed to an
//! external natural-language classifier. The core only knows this narrow
//! capability interface; transports live with the surrounding tooling, and
//! the deterministic path functions fully when no collaborator is
//! configured.
//!
//! Collaborator output is messy by nature, so the parsing here is
//! deliberately tolerant: markdown fences, `//` comments and trailing
//! commas are stripped on a second attempt, malformed entries are skipped
//! rather than failing the batch, and the legacy response shape with keys
//! and values swapped is still understood.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::warn;

/// Marker prefix a collaborator uses for names it cannot classify.
pub const UNCLASSIFIABLE_MARKER: &str = "UNKNOWN";

/// Collaborator verdict for one raw column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredColumn {
    /// The raw column name the verdict applies to.
    pub raw: String,
    /// Proposed canonical identifier, unvalidated — the mapping builder
    /// checks it against the vocabulary before accepting it.
    pub proposal: Proposal,
    /// Short natural-language justification, when the collaborator gave one.
    pub reasoning: Option<String>,
}

/// What the collaborator proposed for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    /// A candidate canonical identifier string.
    Canonical(String),
    /// Explicitly marked unclassifiable.
    Unclassifiable(String),
}

/// Narrow capability interface for natural-language column classification.
///
/// Implementations receive the batch of unresolved raw names and return one
/// verdict per name they could process. Names missing from the response are
/// treated as unresolved by the caller.
pub trait ColumnInference {
    fn classify(&self, columns: &[String]) -> Result<Vec<InferredColumn>>;
}

/// Parses a collaborator response body into per-column verdicts.
///
/// Tries the text as-is first; if that fails, strips markdown fences,
/// `//` comments and trailing commas and retries.
pub fn parse_response_text(text: &str) -> Result<Vec<InferredColumn>> {
    let object = extract_json_object(text)?;
    Ok(parse_response_value(&object))
}

/// Extracts per-column verdicts from a parsed JSON object.
///
/// Understands two shapes per entry:
/// - modern: `{"raw_name": {"standard": "R_FOOT_ACC_X", "reasoning": "..."}}`
/// - legacy (keys and values swapped): `{"R_FOOT_ACC_X": "raw_name"}`
///
/// Entries of any other shape are skipped with a warning.
pub fn parse_response_value(value: &Value) -> Vec<InferredColumn> {
    let Some(object) = value.as_object() else {
        warn!("collaborator response is not a JSON object, ignoring");
        return Vec::new();
    };

    let mut results = Vec::new();
    for (key, entry) in object {
        match entry {
            Value::Object(fields) => {
                let Some(standard) = fields.get("standard").and_then(Value::as_str) else {
                    warn!(column = %key, "collaborator entry has no usable 'standard' field, skipping");
                    continue;
                };
                let reasoning = fields
                    .get("reasoning")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                results.push(InferredColumn {
                    raw: key.clone(),
                    proposal: proposal_from(standard),
                    reasoning,
                });
            }
            Value::String(raw) => {
                // Legacy shape: the canonical identifier is the key and the
                // raw name is the value.
                results.push(InferredColumn {
                    raw: raw.clone(),
                    proposal: proposal_from(key),
                    reasoning: None,
                });
            }
            _ => {
                warn!(column = %key, "collaborator entry is neither object nor string, skipping");
            }
        }
    }
    results
}

fn proposal_from(standard: &str) -> Proposal {
    let trimmed = standard.trim();
    if trimmed.starts_with(UNCLASSIFIABLE_MARKER) {
        Proposal::Unclassifiable(trimmed.to_string())
    } else {
        Proposal::Canonical(trimmed.to_string())
    }
}

fn extract_json_object(text: &str) -> Result<Value> {
    let start = text.find('{');
    let end = text.rfind('}');
    let (Some(start), Some(end)) = (start, end) else {
        return Err(anyhow!("no JSON object in collaborator response"));
    };
    if end < start {
        return Err(anyhow!("no JSON object in collaborator response"));
    }
    let body = &text[start..=end];

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return Ok(value);
    }

    // Second attempt: scrub the decorations sloppy responses carry.
    let mut cleaned = String::with_capacity(body.len());
    for line in body.lines() {
        let line = match line.find("//") {
            Some(pos) => &line[..pos],
            None => line,
        };
        cleaned.push_str(line);
        cleaned.push('\n');
    }
    let cleaned = regex::Regex::new(r",\s*([}\]])")
        .expect("trailing-comma pattern compiles")
        .replace_all(&cleaned, "$1")
        .into_owned();
    serde_json::from_str(&cleaned).context("collaborator response is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modern_shape_with_reasoning() {
        let text = r#"{"P6_LF_acc_x": {"standard": "L_FOOT_ACC_X", "reasoning": "LF means left foot."}}"#;
        let results = parse_response_text(text).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].raw, "P6_LF_acc_x");
        assert_eq!(
            results[0].proposal,
            Proposal::Canonical("L_FOOT_ACC_X".to_string())
        );
        assert_eq!(results[0].reasoning.as_deref(), Some("LF means left foot."));
    }

    #[test]
    fn parses_legacy_swapped_shape() {
        let text = r#"{"L_FOOT_ACC_X": "P6_LF_acc_x"}"#;
        let results = parse_response_text(text).unwrap();
        assert_eq!(results[0].raw, "P6_LF_acc_x");
        assert_eq!(
            results[0].proposal,
            Proposal::Canonical("L_FOOT_ACC_X".to_string())
        );
    }

    #[test]
    fn unknown_marker_is_unclassifiable() {
        let text = r#"{"step_count": {"standard": "UNKNOWN:step_count", "reasoning": "not inertial"}}"#;
        let results = parse_response_text(text).unwrap();
        assert!(matches!(results[0].proposal, Proposal::Unclassifiable(_)));
    }

    #[test]
    fn skips_malformed_entries_keeps_rest() {
        let text = r#"{
            "good": {"standard": "R_FOOT_ACC_X"},
            "no_standard": {"reasoning": "oops"},
            "wrong_type": 42
        }"#;
        let results = parse_response_text(text).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].raw, "good");
    }

    #[test]
    fn scrubs_fences_comments_and_trailing_commas() {
        let text = "```json\n{\n  \"a\": {\"standard\": \"R_FOOT_ACC_X\"}, // deterministic miss\n}\n```";
        let results = parse_response_text(text).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].raw, "a");
    }

    #[test]
    fn rejects_response_without_object() {
        assert!(parse_response_text("no json here").is_err());
    }
}
