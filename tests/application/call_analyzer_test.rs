use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use leadscribe::application::services::CallAnalyzer;
use leadscribe::domain::{AnalysisFailureKind, AnalysisOutcome};

use crate::helpers::{ChatScript, MockChatClient};

#[tokio::test]
async fn given_responsive_llm_when_generating_feedback_then_returns_it_first_try() {
    let chat = Arc::new(MockChatClient::new(
        vec![ChatScript::Reply("Good pitch.")],
        Vec::new(),
    ));
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));

    let outcome = analyzer.generate_feedback("hello world").await;

    assert_eq!(outcome.as_generated(), Some("Good pitch."));
    assert_eq!(chat.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn given_rate_limits_then_success_when_generating_feedback_then_backs_off_exponentially() {
    let chat = Arc::new(MockChatClient::new(
        vec![
            ChatScript::RateLimited,
            ChatScript::RateLimited,
            ChatScript::RateLimited,
            ChatScript::RateLimited,
            ChatScript::Reply("Good pitch."),
        ],
        Vec::new(),
    ));
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));

    let started = Instant::now();
    let outcome = analyzer.generate_feedback("hello world").await;

    assert_eq!(outcome.as_generated(), Some("Good pitch."));
    assert_eq!(chat.calls.load(Ordering::SeqCst), 5);
    // 2 + 4 + 8 + 16 seconds of backoff between the five attempts.
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn given_persistent_rate_limit_when_generating_feedback_then_gives_up_after_five_attempts() {
    let chat = Arc::new(MockChatClient::new(
        vec![
            ChatScript::RateLimited,
            ChatScript::RateLimited,
            ChatScript::RateLimited,
            ChatScript::RateLimited,
            ChatScript::RateLimited,
        ],
        Vec::new(),
    ));
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));

    let started = Instant::now();
    let outcome = analyzer.generate_feedback("hello world").await;

    match outcome {
        AnalysisOutcome::Failed(failure) => {
            assert_eq!(failure.kind, AnalysisFailureKind::RateLimitExhausted);
        }
        AnalysisOutcome::Generated(text) => panic!("unexpected feedback: {}", text),
    }
    assert_eq!(chat.calls.load(Ordering::SeqCst), 5);
    // No sleep after the final attempt.
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn given_provider_error_when_generating_feedback_then_fails_without_retry() {
    let chat = Arc::new(MockChatClient::new(
        vec![ChatScript::Fail("model overloaded")],
        Vec::new(),
    ));
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));

    let started = Instant::now();
    let outcome = analyzer.generate_feedback("hello world").await;

    assert!(outcome.as_generated().is_none());
    assert_eq!(chat.calls.load(Ordering::SeqCst), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn given_empty_transcript_when_generating_feedback_then_skips_llm_entirely() {
    let chat = Arc::new(MockChatClient::new(Vec::new(), Vec::new()));
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));

    let outcome = analyzer.generate_feedback("   ").await;

    match outcome {
        AnalysisOutcome::Failed(failure) => {
            assert_eq!(failure.kind, AnalysisFailureKind::EmptyTranscript);
        }
        AnalysisOutcome::Generated(text) => panic!("unexpected feedback: {}", text),
    }
    assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_responsive_llm_when_analyzing_sentiment_then_returns_trimmed_label() {
    let chat = Arc::new(MockChatClient::new(
        Vec::new(),
        vec![ChatScript::Reply("  Positive\n")],
    ));
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));

    let outcome = analyzer.analyze_sentiment("hello world").await;

    assert_eq!(outcome.as_generated(), Some("Positive"));
}

#[tokio::test]
async fn given_provider_error_when_analyzing_sentiment_then_fails_after_single_attempt() {
    let chat = Arc::new(MockChatClient::new(
        Vec::new(),
        vec![ChatScript::Fail("model overloaded")],
    ));
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));

    let outcome = analyzer.analyze_sentiment("hello world").await;

    assert!(outcome.as_generated().is_none());
    assert_eq!(chat.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_transcript_when_analyzing_then_runs_feedback_and_sentiment() {
    let chat = Arc::new(MockChatClient::succeeding("Good pitch.", "Positive"));
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));

    let analysis = analyzer.analyze("hello world").await;

    assert_eq!(analysis.feedback.as_generated(), Some("Good pitch."));
    assert_eq!(analysis.sentiment.as_generated(), Some("Positive"));
    assert_eq!(chat.calls.load(Ordering::SeqCst), 2);
}
