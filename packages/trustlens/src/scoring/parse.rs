//! Defensive parsing of the provider's free-text reply.
//!
//! Models often wrap the requested JSON in prose or code fences. The reply
//! is cut down to the span from the first `{` to the last `}` before it is
//! parsed, and each required field is then checked for a numeric value.

use serde_json::{Map, Value};

use crate::error::{ScoreFailure, ScoreResult};
use crate::types::{Criterion, SubScores};

/// The substring from the first `{` to the last `}` inclusive.
pub fn isolate_json_object(reply: &str) -> ScoreResult<&str> {
    let start = reply.find('{');
    let end = reply.rfind('}');

    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&reply[start..=end]),
        _ => Err(ScoreFailure::parse(
            "Could not extract JSON object from response text",
        )),
    }
}

/// Parse a provider reply into [`SubScores`].
///
/// Fails with [`ScoreFailure::Parse`] when no well-formed object can be
/// isolated, and with [`ScoreFailure::Schema`] when any of the four fields
/// is absent or not a number.
pub fn parse_sub_scores(reply: &str) -> ScoreResult<SubScores> {
    let candidate = isolate_json_object(reply)?;

    let object: Map<String, Value> = serde_json::from_str(candidate)
        .map_err(|e| ScoreFailure::parse(format!("Error parsing API response: {}", e)))?;

    let mut values = [0.0f64; 4];
    let mut missing = Vec::new();
    for (slot, criterion) in values.iter_mut().zip(Criterion::ALL) {
        match object.get(criterion.field_name()).and_then(Value::as_f64) {
            Some(v) => *slot = v,
            None => missing.push(criterion.field_name().to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ScoreFailure::Schema { missing });
    }

    let [superlatives, generic, ai, behavior] = values;
    Ok(SubScores::new(superlatives, generic, ai, behavior))
}
