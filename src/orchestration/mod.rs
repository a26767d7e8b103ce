//! Analysis orchestration: the loading state machine and its failure taxonomy.

pub mod failure;
pub mod orchestrator;
pub mod stage;

pub use failure::{AnalysisFailure, IgnoredReason, Phase};
pub use orchestrator::{
    normalize_handle, AnalysisOrchestrator, AnalysisOutcome, CompletedAnalysis, FAILURE_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use stage::LoadingStage;
