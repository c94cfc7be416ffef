//! Provider input: truncation and the fixed scoring instruction.

use std::borrow::Cow;

use crate::types::Criterion;

/// Appended to text cut at the length limit.
pub const TRUNCATION_MARKER: &str = "...";

/// Cut `text` to at most `max_chars` characters, appending
/// [`TRUNCATION_MARKER`] when anything was dropped.
pub fn truncate_review(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(text),
    }
}

/// The instruction sent with every review. Asks for exactly the four
/// sub-score fields, judged on this review alone.
pub fn scoring_prompt(review_text: &str) -> String {
    format!(
        r#"Analyze the following product review and return a JSON object with scores between 0.0 (not present) and 1.0 (highly present) for each category:
1. "{superlatives}": excessive superlatives (amazing, perfect, best ever) and excessive punctuation (!!!, ???).
2. "{generic}": how generic, vague, or lacking in specific detail the review is.
3. "{ai}": likelihood the review was written by an AI (overly formal, no personal touch, unusual phrasing).
4. "{behavior}": unusual patterns within this single review's text (repetition atypical of human writing, contradictory statements). Do not consider other reviews.

Return ONLY the JSON object with these four keys and their numeric scores. No other text.

Review Text:
"{review_text}"

JSON Output:"#,
        superlatives = Criterion::SuperlativesPunctuation.field_name(),
        generic = Criterion::GenericContent.field_name(),
        ai = Criterion::AiWritten.field_name(),
        behavior = Criterion::BehaviorPatterns.field_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_borrowed() {
        let text = "fine as is";
        assert!(matches!(truncate_review(text, 15_000), Cow::Borrowed(_)));
        assert_eq!(truncate_review("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_long_text_is_cut_with_marker() {
        let text = "a".repeat(15_010);
        let cut = truncate_review(&text, 15_000);

        assert_eq!(cut.chars().count(), 15_000 + TRUNCATION_MARKER.len());
        assert!(cut.ends_with("a..."));
    }

    #[test]
    fn test_cut_never_splits_a_character() {
        let cut = truncate_review("ééééé", 2);
        assert_eq!(cut, "éé...");
    }

    #[test]
    fn test_prompt_names_every_field() {
        let prompt = scoring_prompt("Nice mug");

        for criterion in Criterion::ALL {
            assert!(prompt.contains(criterion.field_name()));
        }
        assert!(prompt.contains("\"Nice mug\""));
    }
}
