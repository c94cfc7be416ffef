//! Integration tests for a full analysis run.
//!
//! These drive the analyzer end to end with a mock judge:
//! 1. Scan the page for reviews
//! 2. Score them concurrently
//! 3. Keep the successes in page order
//! 4. Present and persist the run

use std::sync::Arc;
use std::time::Duration;

use trustlens::{
    broker,
    testing::{review_page_html, FailingStore, MockJudge},
    Analyzer, AnalyzerConfig, MemoryStore, MemorySurface, Page, ResultStore, RunOutcome,
    ScoreFailure, SubScores, UI_BLOCK_ID,
};

const PRODUCT_URL: &str = "https://www.amazon.com/dp/B0KETTLE";

fn product_page(html: String) -> Page {
    Page::new(PRODUCT_URL, html).unwrap()
}

/// Helper to build an analyzer with in-memory collaborators.
fn setup_analyzer(judge: MockJudge) -> Analyzer<MockJudge, MemoryStore, MemorySurface> {
    Analyzer::new(
        AnalyzerConfig::default(),
        judge,
        MemoryStore::new(),
        MemorySurface::new(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_partial_failure_keeps_successes_in_page_order() {
    let judge = MockJudge::new()
        .with_scores("alpha", SubScores::new(1.0, 0.0, 0.0, 0.0))
        .with_failure("bravo", ScoreFailure::transport("connection reset"))
        .with_delay("charlie", Duration::from_millis(100))
        .with_scores("charlie", SubScores::new(0.0, 1.0, 0.0, 0.0))
        .with_failure("delta", ScoreFailure::parse("no JSON object in reply"));
    let analyzer = setup_analyzer(judge.clone());

    let html = review_page_html(&[
        "alpha review of the kettle",
        "bravo review of the kettle",
        "charlie review of the kettle",
        "delta review of the kettle",
        "echo review of the kettle",
    ]);

    let outcome = analyzer.run(&product_page(html)).await;
    let run = outcome.run().expect("run should complete");

    assert_eq!(judge.call_count(), 5);
    assert_eq!(run.dispatched, 5);
    assert_eq!(run.failed(), 2);

    let positions: Vec<usize> = run.reviews.iter().map(|r| r.element.position()).collect();
    assert_eq!(positions, vec![0, 2, 4]);

    let scores: Vec<u8> = run.reviews.iter().map(|r| r.result.suspicion_score).collect();
    assert_eq!(scores, vec![40, 30, 0]);

    // (40 + 30 + 0) / 3 rounded
    assert_eq!(run.average_suspicion_score, 23);

    let block = analyzer.presenter().block(UI_BLOCK_ID).unwrap();
    assert_eq!(block.review_count, 3);
    assert_eq!(block.anchor, "#centerCol");

    let stored = analyzer.store().latest().unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].text, "alpha review of the kettle");
}

#[tokio::test]
async fn test_all_failures_have_no_visible_effect() {
    let judge = MockJudge::new().with_failure("kettle", ScoreFailure::transport("offline"));
    let analyzer = setup_analyzer(judge);

    let html = review_page_html(&["first kettle review", "second kettle review"]);
    let outcome = analyzer.run(&product_page(html)).await;

    assert_eq!(
        outcome,
        RunOutcome::NothingAnalyzable {
            discovered: 2,
            candidates: 2,
            failed: 2
        }
    );
    assert!(analyzer.presenter().blocks().is_empty());
    assert_eq!(analyzer.store().save_count(), 0);
}

#[tokio::test]
async fn test_fallback_text_excludes_scripts() {
    let judge = MockJudge::new();
    let analyzer = setup_analyzer(judge.clone());

    let html = r#"<html><body><div id="rightCol"></div>
        <div data-hook="review">
          <div data-hook="review-body">Actually a decent kettle<script>var tracking = "abcdefghijklmnop";</script></div>
        </div></body></html>"#;

    let outcome = analyzer.run(&product_page(html.to_string())).await;

    assert!(outcome.run().is_some());
    let received = judge.received();
    assert_eq!(received.len(), 1);
    assert!(received[0].contains("Actually a decent kettle"));
    assert!(!received[0].contains("tracking"));
}

#[tokio::test]
async fn test_rerun_replaces_block_and_stored_results() {
    let judge = MockJudge::new()
        .with_scores("boils", SubScores::new(1.0, 1.0, 1.0, 1.0))
        .with_scores("handle", SubScores::new(0.8, 0.8, 0.8, 0.8))
        .with_scores("spout", SubScores::new(0.1, 0.1, 0.1, 0.1));
    let analyzer = setup_analyzer(judge);

    let first = analyzer
        .run(&product_page(review_page_html(&[
            "The kettle boils fast",
            "The handle gets a bit warm",
        ])))
        .await;
    assert_eq!(first.run().unwrap().average_suspicion_score, 90);

    let second = analyzer
        .run(&product_page(review_page_html(&["Narrow spout pours cleanly"])))
        .await;
    let second = second.run().unwrap();
    assert_eq!(second.average_suspicion_score, 10);

    let blocks = analyzer.presenter().blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        analyzer.presenter().block(UI_BLOCK_ID).unwrap().average_score,
        second.average_suspicion_score
    );
    assert_eq!(blocks[0].review_count, 1);

    let stored: Vec<String> = analyzer
        .store()
        .latest()
        .unwrap()
        .into_iter()
        .map(|r| r.text)
        .collect();
    assert_eq!(stored, vec!["Narrow spout pours cleanly"]);
    assert_eq!(analyzer.store().save_count(), 2);
}

#[tokio::test]
async fn test_store_failure_does_not_block_presentation() {
    let store = FailingStore::new();
    let analyzer = Analyzer::new(
        AnalyzerConfig::default(),
        MockJudge::new(),
        store.clone(),
        MemorySurface::new(),
    )
    .unwrap();

    let outcome = analyzer
        .run(&product_page(review_page_html(&["Sturdy and quiet kettle"])))
        .await;

    assert!(outcome.run().is_some());
    assert_eq!(store.attempts(), 1);
    assert_eq!(analyzer.presenter().blocks().len(), 1);
}

#[tokio::test]
async fn test_long_review_is_truncated_for_the_judge_only() {
    let judge = MockJudge::new();
    let analyzer = setup_analyzer(judge.clone());
    let long = "word ".repeat(4_000);

    let outcome = analyzer
        .run(&product_page(review_page_html(&[long.trim()])))
        .await;

    let sent = &judge.received()[0];
    assert_eq!(sent.chars().count(), 15_003);
    assert!(sent.ends_with("..."));
    assert_eq!(outcome.run().unwrap().reviews[0].result.text, long.trim());
}

#[tokio::test(start_paused = true)]
async fn test_slow_review_times_out_without_stalling_the_run() {
    let judge = MockJudge::new()
        .with_delay("glacial", Duration::from_secs(120))
        .with_scores("quick", SubScores::new(0.0, 0.0, 1.0, 0.0));
    let analyzer = setup_analyzer(judge);

    let outcome = analyzer
        .run(&product_page(review_page_html(&[
            "glacial review text",
            "quick review text",
        ])))
        .await;

    let run = outcome.run().unwrap();
    assert_eq!(run.failed(), 1);
    assert_eq!(run.reviews[0].element.position(), 1);
    assert_eq!(run.average_suspicion_score, 15);
}

#[tokio::test]
async fn test_broker_backed_run_persists_through_the_channel() {
    let store = Arc::new(MemoryStore::new());
    let judge = MockJudge::new().with_default_scores(SubScores::new(0.2, 0.2, 0.2, 0.2));
    let (handle, _task) = broker::spawn(judge, store.clone());

    let analyzer = Analyzer::new(
        AnalyzerConfig::default(),
        handle.clone(),
        handle.clone(),
        MemorySurface::new(),
    )
    .unwrap();

    let outcome = analyzer
        .run(&product_page(review_page_html(&[
            "Pours without dripping",
            "Lid clicks shut nicely",
        ])))
        .await;

    assert_eq!(outcome.run().unwrap().average_suspicion_score, 20);
    assert_eq!(store.save_count(), 1);
    assert_eq!(handle.load_analysis().await.unwrap().unwrap().len(), 2);
}
