use super::support::ScriptedServices;
use super::IntegrationHarness;
use personaprofiler::orchestration::IgnoredReason;
use personaprofiler::{AnalysisOutcome, LoadingStage};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn second_run_while_busy_is_ignored() {
    let harness = IntegrationHarness::new();
    let services = Arc::new(ScriptedServices::new(2, 2, [5.0; 4]).gated());
    let session = harness.session(services.clone());
    let orchestrator = session.orchestrator();
    let mut notes = orchestrator.notifications().subscribe();

    let first = orchestrator.run_analysis("alice");
    let second = async {
        services.scrape_started.notified().await;
        assert_eq!(orchestrator.stage(), LoadingStage::Scraping);
        let outcome = orchestrator.run_analysis("bob").await;
        services.release_scrape.notify_one();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(second, AnalysisOutcome::Ignored(IgnoredReason::Busy));
    let done = match first {
        AnalysisOutcome::Completed(done) => done,
        other => panic!("Expected first run to complete, got {other:?}"),
    };
    assert_eq!(done.handle, "alice");
    assert_eq!(services.scrape_calls.load(Ordering::SeqCst), 1);
    assert_eq!(orchestrator.history_len(), 1);
    assert_eq!(orchestrator.stage(), LoadingStage::Idle);

    assert!(notes.try_recv().is_ok());
    assert!(notes.try_recv().is_err(), "The ignored run must not notify");
}

#[tokio::test]
async fn stage_watch_follows_the_pipeline() {
    let harness = IntegrationHarness::new();
    let services = Arc::new(ScriptedServices::new(1, 1, [5.0; 4]).gated());
    let session = harness.session(services.clone());
    let orchestrator = session.orchestrator();
    let mut stages = orchestrator.subscribe_stage();
    assert_eq!(*stages.borrow(), LoadingStage::Idle);

    let run = orchestrator.run_analysis("alice");
    let observe = async {
        services.scrape_started.notified().await;
        assert_eq!(*stages.borrow_and_update(), LoadingStage::Scraping);
        services.release_scrape.notify_one();
    };
    let (outcome, ()) = tokio::join!(run, observe);

    assert!(matches!(outcome, AnalysisOutcome::Completed(_)));
    assert_eq!(*stages.borrow_and_update(), LoadingStage::Idle);
}
