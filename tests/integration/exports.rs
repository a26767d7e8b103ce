use super::support::{persona_template, ScriptedServices};
use super::IntegrationHarness;
use personaprofiler::models::Insight;
use personaprofiler::reports::ExportFormat;
use personaprofiler::storage::compute_hash;
use std::fs;
use std::sync::Arc;

#[tokio::test]
async fn plain_text_export_writes_named_report() -> anyhow::Result<()> {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(3, 5, [4.0, 7.0, 2.0, 9.0])));
    session.analyze("alice").await;

    let outcome = session.export_text()?.expect("Expected an export for the active persona");
    assert_eq!(outcome.path, session.export_dir().join("alice_persona.txt"));
    let contents = fs::read_to_string(&outcome.path)?;
    assert_eq!(outcome.hash, compute_hash(contents.as_bytes()));

    assert!(contents.starts_with("REDDIT PERSONA ANALYSIS\n"));
    assert!(contents.contains("Username: @alice"));
    assert!(contents.contains("Total Karma: 17,368"));
    assert!(contents.contains("Account Created: 2015-01-01"));
    assert!(contents.contains("Introversion/Extroversion: 4/10"));
    assert!(contents.contains("Perceiving/Judging: 9/10"));
    assert!(contents.contains("1. Checks in every evening."));
    assert!(contents.contains("curious, methodical, wry, generous"));
    Ok(())
}

#[tokio::test]
async fn null_insight_text_renders_as_empty_entry() -> anyhow::Result<()> {
    let harness = IntegrationHarness::new();
    let mut persona = persona_template([5.0; 4]);
    persona.frustrations = vec![Insight::default()];
    let services = ScriptedServices::new(1, 1, [5.0; 4]).with_persona(persona);
    let session = harness.session(Arc::new(services));
    session.analyze("alice").await;

    let outcome = session.export(ExportFormat::PlainText)?.expect("export written");
    let contents = fs::read_to_string(outcome.path)?;
    let frustrations = contents
        .split("FRUSTRATIONS")
        .nth(1)
        .expect("frustrations section present");
    assert!(frustrations.contains("\n1. \n"), "unexpected section {frustrations:?}");
    Ok(())
}

#[tokio::test]
async fn nothing_is_exported_without_a_persona() -> anyhow::Result<()> {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(0, 0, [5.0; 4])));
    session.analyze("bob").await;

    assert!(session.export_text()?.is_none());
    assert!(session.export_document()?.is_none());
    assert!(!session.export_dir().exists());
    Ok(())
}

#[tokio::test]
async fn printable_document_embeds_print_script() -> anyhow::Result<()> {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(3, 5, [4.0, 7.0, 2.0, 9.0])));
    session.analyze("alice").await;

    let outcome = session
        .export(ExportFormat::PrintableDocument)?
        .expect("document written");
    assert_eq!(outcome.path, session.export_dir().join("alice_persona.html"));
    let html = fs::read_to_string(&outcome.path)?;
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("window.print()"));
    assert!(html.contains("}, 500);"));
    assert!(html.contains("width: 90%"));
    assert!(html.contains("https://www.reddit.com/r/rust/comments/p0"));
    Ok(())
}

#[tokio::test]
async fn recalled_history_entry_is_exportable() -> anyhow::Result<()> {
    let harness = IntegrationHarness::new();
    let session = harness.session(Arc::new(ScriptedServices::new(1, 1, [5.0; 4])));
    session.analyze("alice").await;
    session.analyze("bob").await;
    session.select(1)?;

    let outcome = session.export_text()?.expect("export written");
    assert!(outcome.path.ends_with("alice_persona.txt"));
    Ok(())
}
