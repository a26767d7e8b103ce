pub mod config;
pub mod models;
pub mod notifications;
pub mod orchestration;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

// Re-export commonly used types for convenience.
pub use config::AppConfig;
pub use models::{HistoryEntry, Insight, PersonaRecord, ProfileSnapshot};
pub use notifications::{Notification, NotificationChannel, NotificationKind};
pub use orchestration::{AnalysisFailure, AnalysisOrchestrator, AnalysisOutcome, LoadingStage};
pub use session::ProfilerSession;
pub use storage::HistoryStore;
