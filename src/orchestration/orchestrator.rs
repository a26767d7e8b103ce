//! Two-phase analysis pipeline: scrape the profile, then derive a persona.

use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use super::failure::{AnalysisFailure, IgnoredReason, Phase};
use super::stage::LoadingStage;
use crate::models::{HistoryEntry, PersonaRecord, ProfileSnapshot};
use crate::notifications::{NotificationChannel, NotificationKind};
use crate::services::ProfileServices;
use crate::storage::HistoryStore;

pub const SUCCESS_MESSAGE: &str = "Persona analysis complete!";
pub const FAILURE_MESSAGE: &str = "Failed to analyze persona";

const PROFILE_URL_MARKER: &str = "reddit.com/user/";

/// A snapshot/persona pair for one handle, either fresh or recalled from history.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAnalysis {
    pub handle: String,
    pub snapshot: ProfileSnapshot,
    pub persona: PersonaRecord,
}

/// Terminal result of [`AnalysisOrchestrator::run_analysis`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(CompletedAnalysis),
    Failed(AnalysisFailure),
    /// The call was a no-op: nothing changed and nothing was emitted.
    Ignored(IgnoredReason),
}

struct SessionState {
    stage: LoadingStage,
    current_snapshot: Option<ProfileSnapshot>,
    current_persona: Option<PersonaRecord>,
    selected_history: Option<usize>,
    history: HistoryStore,
}

/// Owns the loading state machine (`Idle -> Scraping -> Deriving -> Idle`),
/// the "current" snapshot/persona slot and the history cache.
///
/// Every method takes `&self`. The state lock is never held across an
/// `.await`, so a second run started while one is in flight sees a non-idle
/// stage and is turned away.
pub struct AnalysisOrchestrator {
    services: Arc<dyn ProfileServices>,
    notifications: NotificationChannel,
    state: Mutex<SessionState>,
    stage_tx: watch::Sender<LoadingStage>,
}

impl AnalysisOrchestrator {
    pub fn new(
        services: Arc<dyn ProfileServices>,
        history: HistoryStore,
        notifications: NotificationChannel,
    ) -> Self {
        let (stage_tx, _) = watch::channel(LoadingStage::Idle);
        Self {
            services,
            notifications,
            state: Mutex::new(SessionState {
                stage: LoadingStage::Idle,
                current_snapshot: None,
                current_persona: None,
                selected_history: None,
                history,
            }),
            stage_tx,
        }
    }

    /// Runs one analysis to completion. Never returns an error; failures are
    /// reported through the outcome and a single failure notification.
    pub async fn run_analysis(&self, handle: &str) -> AnalysisOutcome {
        let handle = normalize_handle(handle);
        if handle.is_empty() {
            tracing::debug!("Ignoring analysis request with empty handle");
            return AnalysisOutcome::Ignored(IgnoredReason::EmptyHandle);
        }
        if !self.begin_run() {
            tracing::warn!(%handle, "Analysis already in progress; request ignored");
            return AnalysisOutcome::Ignored(IgnoredReason::Busy);
        }

        tracing::info!(%handle, "Starting persona analysis");
        let outcome = match self.run_pipeline(&handle).await {
            Ok((snapshot, persona)) => self.complete(handle, snapshot, persona),
            Err(failure) => self.fail(&handle, failure),
        };
        self.set_stage(LoadingStage::Idle);
        outcome
    }

    /// Makes a past analysis current again. No network access; history order
    /// and length are untouched. Out-of-range indexes change nothing.
    pub fn select_history(&self, index: usize) -> Option<CompletedAnalysis> {
        let mut state = self.lock_state();
        let entry = state.history.get(index)?.clone();
        state.current_snapshot = Some(entry.snapshot.clone());
        state.current_persona = Some(entry.persona.clone());
        state.selected_history = Some(index);
        tracing::debug!(index, handle = %entry.handle, "History entry selected");
        Some(CompletedAnalysis {
            handle: entry.handle,
            snapshot: entry.snapshot,
            persona: entry.persona,
        })
    }

    pub fn stage(&self) -> LoadingStage {
        self.lock_state().stage
    }

    /// Receives every stage transition.
    pub fn subscribe_stage(&self) -> watch::Receiver<LoadingStage> {
        self.stage_tx.subscribe()
    }

    pub fn current_snapshot(&self) -> Option<ProfileSnapshot> {
        self.lock_state().current_snapshot.clone()
    }

    pub fn current_persona(&self) -> Option<PersonaRecord> {
        self.lock_state().current_persona.clone()
    }

    pub fn selected_history(&self) -> Option<usize> {
        self.lock_state().selected_history
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock_state().history.entries().to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.lock_state().history.len()
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    async fn run_pipeline(
        &self,
        handle: &str,
    ) -> Result<(ProfileSnapshot, PersonaRecord), AnalysisFailure> {
        let snapshot = self
            .services
            .scrape(handle)
            .await
            .map_err(|err| AnalysisFailure::from_service(Phase::Scrape, err))?;
        if !snapshot.has_activity() {
            return Err(AnalysisFailure::NoData {
                posts: snapshot.posts.len(),
                comments: snapshot.comments.len(),
            });
        }
        tracing::info!(
            %handle,
            posts = snapshot.posts.len(),
            comments = snapshot.comments.len(),
            "Profile scraped"
        );

        {
            let mut state = self.lock_state();
            state.current_snapshot = Some(snapshot.clone());
            state.current_persona = None;
            state.selected_history = None;
        }
        self.set_stage(LoadingStage::Deriving);

        let persona = self
            .services
            .generate_persona(&snapshot)
            .await
            .map_err(|err| AnalysisFailure::from_service(Phase::Derive, err))?;
        Ok((snapshot, persona))
    }

    fn begin_run(&self) -> bool {
        let mut state = self.lock_state();
        if !state.stage.is_idle() {
            return false;
        }
        state.stage = LoadingStage::Scraping;
        self.stage_tx.send_replace(LoadingStage::Scraping);
        true
    }

    fn complete(
        &self,
        handle: String,
        snapshot: ProfileSnapshot,
        persona: PersonaRecord,
    ) -> AnalysisOutcome {
        {
            let mut state = self.lock_state();
            state.current_snapshot = Some(snapshot.clone());
            state.current_persona = Some(persona.clone());
            state.selected_history = None;
            let entry =
                HistoryEntry::new(handle.clone(), snapshot.clone(), persona.clone(), Utc::now());
            if let Err(err) = state.history.append(entry) {
                tracing::error!(%handle, error = %err, "Failed to persist analysis history");
            }
        }
        tracing::info!(%handle, "Persona analysis complete");
        self.notifications.notify(NotificationKind::Success, SUCCESS_MESSAGE);
        AnalysisOutcome::Completed(CompletedAnalysis {
            handle,
            snapshot,
            persona,
        })
    }

    fn fail(&self, handle: &str, failure: AnalysisFailure) -> AnalysisOutcome {
        {
            let mut state = self.lock_state();
            state.current_snapshot = None;
            state.current_persona = None;
            state.selected_history = None;
        }
        tracing::error!(%handle, error = %failure, "Persona analysis failed");
        self.notifications.notify(NotificationKind::Failure, FAILURE_MESSAGE);
        AnalysisOutcome::Failed(failure)
    }

    fn set_stage(&self, stage: LoadingStage) {
        self.lock_state().stage = stage;
        self.stage_tx.send_replace(stage);
        tracing::debug!(?stage, "Loading stage changed");
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Trims whitespace and reduces a full profile URL to its user name.
pub fn normalize_handle(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.find(PROFILE_URL_MARKER) {
        Some(idx) => trimmed[idx + PROFILE_URL_MARKER.len()..]
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => trimmed.to_string(),
    }
}
