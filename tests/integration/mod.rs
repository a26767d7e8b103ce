use personaprofiler::config::AppConfig;
use personaprofiler::services::ProfileServices;
use personaprofiler::ProfilerSession;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self { workspace }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    /// Test sessions never hand documents to the system viewer.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.export.open_documents = false;
        config
    }

    pub fn session(&self, services: Arc<dyn ProfileServices>) -> ProfilerSession {
        ProfilerSession::in_workspace(self.workspace_path(), self.config(), services)
    }
}

mod analysis_scenarios;
mod concurrent_runs;
mod exports;
pub mod support;
