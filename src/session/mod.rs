//! Command facade over the orchestrator, history and exports.
//!
//! Converts user requests into orchestrator calls and user-facing lines, and
//! writes export artifacts to the configured directory.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{self, AppConfig};
use crate::notifications::NotificationChannel;
use crate::orchestration::{AnalysisOrchestrator, AnalysisOutcome, CompletedAnalysis};
use crate::reports::{document, plain_text, ExportFormat};
use crate::services::{HttpProfileServices, ProfileServices};
use crate::storage::{self, HistoryStore, WriteOutcome};

pub struct ProfilerSession {
    config: AppConfig,
    orchestrator: AnalysisOrchestrator,
    export_dir: PathBuf,
}

impl ProfilerSession {
    /// Loads configuration and history from the workspace and talks HTTP to the
    /// configured service.
    pub fn new() -> Result<Self> {
        let config = config::load_or_default()?;
        let services = Arc::new(HttpProfileServices::new(config.service.base_url.clone()));
        Self::with_services(config, services)
    }

    /// Uses the default workspace root with caller-supplied collaborators.
    pub fn with_services(config: AppConfig, services: Arc<dyn ProfileServices>) -> Result<Self> {
        let workspace = config::workspace_root()?;
        Ok(Self::in_workspace(&workspace, config, services))
    }

    /// Opens a session rooted at `workspace`. History is read here, once.
    pub fn in_workspace(
        workspace: &Path,
        config: AppConfig,
        services: Arc<dyn ProfileServices>,
    ) -> Self {
        let history = HistoryStore::load(config::history_file_path(workspace));
        let notifications = NotificationChannel::new(config.notifications.display_duration());
        let export_dir = config::export_dir(&config, workspace);
        Self {
            orchestrator: AnalysisOrchestrator::new(services, history, notifications),
            config,
            export_dir,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &AnalysisOrchestrator {
        &self.orchestrator
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub async fn analyze(&self, handle: &str) -> AnalysisOutcome {
        self.orchestrator.run_analysis(handle).await
    }

    /// One line per stored analysis, most recent first; the selected one is marked.
    pub fn history_lines(&self) -> Vec<String> {
        let entries = self.orchestrator.history();
        if entries.is_empty() {
            return vec!["No analyses yet".into()];
        }
        let selected = self.orchestrator.selected_history();
        entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let marker = if selected == Some(idx) { ">" } else { " " };
                format!(
                    "{marker} {idx}. @{} ({})",
                    entry.handle,
                    entry.created_at.format("%Y-%m-%d %H:%M")
                )
            })
            .collect()
    }

    pub fn select(&self, index: usize) -> Result<CompletedAnalysis> {
        match self.orchestrator.select_history(index) {
            Some(selected) => Ok(selected),
            None => bail!(
                "No history entry at index {index} ({} stored).",
                self.orchestrator.history_len()
            ),
        }
    }

    /// Pretty-printed JSON of the current raw snapshot.
    pub fn raw_data(&self) -> Result<Option<String>> {
        self.orchestrator
            .current_snapshot()
            .map(|snapshot| {
                serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")
            })
            .transpose()
    }

    /// Writes `<handle>_persona.txt` for the active persona. `None` when there is none.
    pub fn export_text(&self) -> Result<Option<WriteOutcome>> {
        let Some(persona) = self.orchestrator.current_persona() else {
            return Ok(None);
        };
        let contents = plain_text::render(&persona, Utc::now());
        let path = self
            .export_dir
            .join(ExportFormat::PlainText.file_name(persona.handle()));
        let outcome = storage::write_text(&path, &contents)?;
        tracing::info!(path = %outcome.path.display(), "Plain-text persona exported");
        Ok(Some(outcome))
    }

    /// Writes the printable document for the active persona and, when enabled,
    /// hands it to the system viewer, which opens the print dialog itself.
    pub fn export_document(&self) -> Result<Option<WriteOutcome>> {
        let Some(persona) = self.orchestrator.current_persona() else {
            return Ok(None);
        };
        let contents = document::render(&persona, Utc::now(), self.config.export.print_delay());
        let path = self
            .export_dir
            .join(ExportFormat::PrintableDocument.file_name(persona.handle()));
        let outcome = storage::write_text(&path, &contents)?;
        tracing::info!(path = %outcome.path.display(), "Printable persona exported");
        if self.config.export.open_documents {
            if let Err(err) = open::that(&outcome.path) {
                tracing::warn!(
                    path = %outcome.path.display(),
                    error = %err,
                    "Could not open document"
                );
            }
        }
        Ok(Some(outcome))
    }

    pub fn export(&self, format: ExportFormat) -> Result<Option<WriteOutcome>> {
        match format {
            ExportFormat::PlainText => self.export_text(),
            ExportFormat::PrintableDocument => self.export_document(),
        }
    }
}
