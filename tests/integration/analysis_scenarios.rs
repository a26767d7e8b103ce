use super::support::ScriptedServices;
use super::IntegrationHarness;
use personaprofiler::orchestration::{AnalysisFailure, IgnoredReason, Phase};
use personaprofiler::{AnalysisOutcome, LoadingStage, NotificationKind};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn active_profile_completes_and_is_recorded() {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(3, 5, [4.0, 7.0, 2.0, 9.0])));

    let outcome = session.analyze("alice").await;
    let done = match outcome {
        AnalysisOutcome::Completed(done) => done,
        other => panic!("Expected completed analysis, got {other:?}"),
    };
    assert_eq!(done.handle, "alice");
    assert_eq!(done.snapshot.posts.len(), 3);
    assert_eq!(done.snapshot.comments.len(), 5);
    assert_eq!(done.persona.traits.intuition_sensing, 7.0);

    let orchestrator = session.orchestrator();
    assert_eq!(orchestrator.stage(), LoadingStage::Idle);
    assert_eq!(orchestrator.current_persona(), Some(done.persona.clone()));
    assert_eq!(orchestrator.current_snapshot(), Some(done.snapshot.clone()));

    let history = orchestrator.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].handle, "alice");
    assert_eq!(history[0].persona, done.persona);

    let note = orchestrator.notifications().current().expect("notification shown");
    assert_eq!(note.kind, NotificationKind::Success);
    assert_eq!(note.message, "Persona analysis complete!");
}

#[tokio::test]
async fn profile_without_activity_fails_before_persona_call() {
    let harness = IntegrationHarness::new();
    let services = Arc::new(ScriptedServices::new(0, 0, [5.0; 4]));
    let session = harness.session(services.clone());

    let outcome = session.analyze("bob").await;
    assert_eq!(
        outcome,
        AnalysisOutcome::Failed(AnalysisFailure::NoData {
            posts: 0,
            comments: 0
        })
    );
    assert_eq!(services.persona_calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.orchestrator().history_len(), 0);
    assert!(session.orchestrator().current_snapshot().is_none());

    let note = session.orchestrator().notifications().current().expect("notification shown");
    assert_eq!(note.kind, NotificationKind::Failure);
    assert_eq!(note.message, "Failed to analyze persona");
}

#[tokio::test]
async fn posts_without_comments_is_still_no_data() {
    let harness = IntegrationHarness::new();
    let services = Arc::new(ScriptedServices::new(4, 0, [5.0; 4]));
    let session = harness.session(services.clone());

    let outcome = session.analyze("carol").await;
    assert!(matches!(
        outcome,
        AnalysisOutcome::Failed(AnalysisFailure::NoData {
            posts: 4,
            comments: 0
        })
    ));
    assert_eq!(services.persona_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn persona_server_error_clears_current_results() {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(
        ScriptedServices::new(2, 2, [5.0; 4]).persona_status(500),
    ));

    let outcome = session.analyze("dave").await;
    assert_eq!(
        outcome,
        AnalysisOutcome::Failed(AnalysisFailure::DerivationFailed { status: 500 })
    );
    let orchestrator = session.orchestrator();
    assert!(orchestrator.current_snapshot().is_none());
    assert!(orchestrator.current_persona().is_none());
    assert_eq!(orchestrator.history_len(), 0);
    assert_eq!(orchestrator.stage(), LoadingStage::Idle);
}

#[tokio::test]
async fn unreachable_scraper_is_a_transport_failure() {
    let harness = IntegrationHarness::new();
    let services = Arc::new(ScriptedServices::new(2, 2, [5.0; 4]).failing_scrape());
    let session = harness.session(services.clone());

    let outcome = session.analyze("erin").await;
    assert!(matches!(
        outcome,
        AnalysisOutcome::Failed(AnalysisFailure::TransportFailure {
            phase: Phase::Scrape,
            ..
        })
    ));
    assert_eq!(services.persona_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn each_terminal_run_emits_exactly_one_notification() {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(1, 1, [5.0; 4])));
    let mut notes = session.orchestrator().notifications().subscribe();

    session.analyze("alice").await;
    assert_eq!(
        notes.try_recv().expect("one notification").kind,
        NotificationKind::Success
    );
    assert!(notes.try_recv().is_err(), "Expected a single notification per run");

    let ignored = session.analyze("  ").await;
    assert_eq!(ignored, AnalysisOutcome::Ignored(IgnoredReason::EmptyHandle));
    assert!(notes.try_recv().is_err(), "Ignored runs must stay silent");
}

#[tokio::test]
async fn profile_url_is_reduced_to_handle() {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(1, 1, [5.0; 4])));

    let outcome = session.analyze("https://www.reddit.com/user/frank/").await;
    let done = match outcome {
        AnalysisOutcome::Completed(done) => done,
        other => panic!("Expected completed analysis, got {other:?}"),
    };
    assert_eq!(done.handle, "frank");
    assert_eq!(done.snapshot.handle(), "frank");
}

#[tokio::test]
async fn history_keeps_the_ten_most_recent() {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(1, 1, [5.0; 4])));

    for idx in 0..11 {
        session.analyze(&format!("user{idx}")).await;
    }
    let history = session.orchestrator().history();
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].handle, "user10");
    assert_eq!(history[9].handle, "user1");
    assert!(history.iter().all(|entry| entry.handle != "user0"));
}

#[tokio::test]
async fn selecting_history_is_offline_and_non_destructive() {
    let harness = IntegrationHarness::new();
    let services = Arc::new(ScriptedServices::new(2, 2, [5.0; 4]));
    let session = harness.session(services.clone());
    session.analyze("alice").await;
    session.analyze("bob").await;
    let calls_before = services.total_calls();
    let history_before = session.orchestrator().history();

    let selected = session.select(1).expect("entry 1 exists");
    assert_eq!(selected.handle, "alice");
    assert_eq!(services.total_calls(), calls_before);
    assert_eq!(session.orchestrator().history(), history_before);
    assert_eq!(
        session.orchestrator().current_persona().map(|p| p.profile.username),
        Some("alice".to_string())
    );

    let lines = session.history_lines();
    assert!(lines[0].starts_with("  0. @bob ("), "unexpected line {:?}", lines[0]);
    assert!(lines[1].starts_with("> 1. @alice ("), "unexpected line {:?}", lines[1]);

    let err = session.select(7).expect_err("Expected out of range error");
    assert!(err.to_string().contains("No history entry at index 7"));
}

#[tokio::test]
async fn raw_data_mirrors_current_snapshot() {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(1, 2, [5.0; 4])));
    assert!(session.raw_data().unwrap().is_none());
    assert_eq!(session.history_lines(), vec!["No analyses yet".to_string()]);

    session.analyze("alice").await;
    let raw = session.raw_data().unwrap().expect("snapshot present");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["username"], "alice");
    assert_eq!(value["comments"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["posts"][0]["type"], "post");
}

#[tokio::test]
async fn failed_run_drops_the_selection_marker() {
    let harness = IntegrationHarness::new();
    {
        let seed = harness.session(Arc::new(ScriptedServices::new(1, 1, [5.0; 4])));
        seed.analyze("alice").await;
    }

    let session = harness.session(Arc::new(ScriptedServices::new(0, 0, [5.0; 4])));
    session.select(0).expect("persisted entry");
    assert_eq!(session.orchestrator().selected_history(), Some(0));

    let outcome = session.analyze("bob").await;
    assert!(matches!(outcome, AnalysisOutcome::Failed(AnalysisFailure::NoData { .. })));
    let orchestrator = session.orchestrator();
    assert_eq!(orchestrator.selected_history(), None);
    assert!(orchestrator.current_persona().is_none());
    let lines = session.history_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines.iter().all(|line| !line.starts_with('>')), "stale marker in {lines:?}");
}

#[tokio::test]
async fn derivation_failure_after_selection_clears_marker() {
    let harness = IntegrationHarness::new();
    {
        let seed = harness.session(Arc::new(ScriptedServices::new(1, 1, [5.0; 4])));
        seed.analyze("alice").await;
    }

    let session = harness.session(Arc::new(
        ScriptedServices::new(2, 2, [5.0; 4]).persona_status(502),
    ));
    session.select(0).expect("persisted entry");
    let outcome = session.analyze("carol").await;
    assert_eq!(
        outcome,
        AnalysisOutcome::Failed(AnalysisFailure::DerivationFailed { status: 502 })
    );
    assert_eq!(session.orchestrator().selected_history(), None);
    assert!(session.orchestrator().current_snapshot().is_none());
}
