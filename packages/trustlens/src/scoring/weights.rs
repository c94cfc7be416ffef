//! Fixed-weight reduction of sub-scores to a suspicion percentage.

use crate::types::{Criterion, Issue, ReviewResult, SubScores};

/// Weighted sum of the four sub-scores, before scaling.
pub fn raw_score(scores: &SubScores) -> f64 {
    Criterion::ALL
        .iter()
        .map(|&c| scores.get(c) * c.weight())
        .sum()
}

/// `round(raw * 100)` capped to `0..=100`.
pub fn suspicion_score(scores: &SubScores) -> u8 {
    let percent = (raw_score(scores) * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Issues for every criterion at or above its alert threshold, in
/// [`Criterion::ALL`] order.
pub fn detect_issues(scores: &SubScores) -> Vec<Issue> {
    Criterion::ALL
        .iter()
        .filter(|&&c| scores.get(c) >= c.alert_threshold())
        .map(|&c| Issue {
            criterion: c,
            raw_score: scores.get(c),
            weight_percent: c.weight() * 100.0,
        })
        .collect()
}

/// Build the result for one review.
pub fn evaluate(text: impl Into<String>, scores: &SubScores) -> ReviewResult {
    ReviewResult {
        text: text.into(),
        issues: detect_issues(scores),
        suspicion_score: suspicion_score(scores),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extremes() {
        assert_eq!(suspicion_score(&SubScores::new(1.0, 1.0, 1.0, 1.0)), 100);
        assert_eq!(suspicion_score(&SubScores::new(0.0, 0.0, 0.0, 0.0)), 0);
    }

    #[test]
    fn test_weighted_sum() {
        // 0.40 * 0.8 + 0.30 * 0.2 = 0.38
        assert_eq!(suspicion_score(&SubScores::new(0.8, 0.2, 0.0, 0.0)), 38);
        assert_eq!(suspicion_score(&SubScores::new(0.0, 0.0, 1.0, 1.0)), 30);
    }

    #[test]
    fn test_out_of_range_provider_values_are_clamped() {
        assert_eq!(suspicion_score(&SubScores::new(3.0, 2.0, 1.0, 1.0)), 100);
        assert_eq!(suspicion_score(&SubScores::new(-1.0, 0.0, 0.0, 0.0)), 0);
    }

    #[test]
    fn test_issue_thresholds() {
        let at = detect_issues(&SubScores::new(0.6, 0.0, 0.5, 0.0));
        let criteria: Vec<_> = at.iter().map(|i| i.criterion).collect();
        assert_eq!(criteria, vec![Criterion::SuperlativesPunctuation, Criterion::AiWritten]);

        let below = detect_issues(&SubScores::new(0.59, 0.59, 0.49, 0.49));
        assert!(below.is_empty());
    }

    #[test]
    fn test_issue_records_weight_percent() {
        let issues = detect_issues(&SubScores::new(0.0, 0.9, 0.0, 0.7));

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].criterion, Criterion::GenericContent);
        assert_eq!(issues[0].raw_score, 0.9);
        assert!((issues[0].weight_percent - 30.0).abs() < 1e-9);
        assert_eq!(issues[1].criterion, Criterion::BehaviorPatterns);
        assert!((issues[1].weight_percent - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_keeps_text() {
        let result = evaluate("Best purchase ever!!!", &SubScores::new(1.0, 0.6, 0.0, 0.0));

        assert_eq!(result.text, "Best purchase ever!!!");
        assert_eq!(result.suspicion_score, 58);
        assert_eq!(result.issues.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_score_stays_in_range(
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
            c in 0.0f64..=1.0,
            d in 0.0f64..=1.0,
        ) {
            let score = suspicion_score(&SubScores::new(a, b, c, d));
            prop_assert!(score <= 100);
        }

        #[test]
        fn prop_score_is_monotonic(
            a in 0.0f64..=0.9,
            b in 0.0f64..=1.0,
            c in 0.0f64..=1.0,
            d in 0.0f64..=1.0,
        ) {
            let lower = suspicion_score(&SubScores::new(a, b, c, d));
            let higher = suspicion_score(&SubScores::new(a + 0.1, b, c, d));
            prop_assert!(higher >= lower);
        }
    }
}
