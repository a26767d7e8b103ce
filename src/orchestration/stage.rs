use serde::Serialize;

/// Where an analysis run currently is. Only `Idle` accepts a new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingStage {
    Idle,
    Scraping,
    Deriving,
}

const SCRAPING_STEPS: &[&str] = &[
    "Connecting to Reddit...",
    "Fetching user profile...",
    "Collecting posts and comments...",
    "Processing user data...",
    "Analyzing activity patterns...",
];

const DERIVING_STEPS: &[&str] = &[
    "Initializing AI analysis...",
    "Understanding communication patterns...",
    "Identifying personality traits...",
    "Extracting behavioral insights...",
    "Generating comprehensive persona...",
];

impl LoadingStage {
    pub fn is_idle(self) -> bool {
        matches!(self, LoadingStage::Idle)
    }

    /// Short title for a progress display; `None` while idle.
    pub fn headline(self) -> Option<&'static str> {
        match self {
            LoadingStage::Idle => None,
            LoadingStage::Scraping => Some("Scraping Reddit Data"),
            LoadingStage::Deriving => Some("Analyzing Profile"),
        }
    }

    /// Rotating progress messages shown while the stage is active.
    pub fn steps(self) -> &'static [&'static str] {
        match self {
            LoadingStage::Idle => &[],
            LoadingStage::Scraping => SCRAPING_STEPS,
            LoadingStage::Deriving => DERIVING_STEPS,
        }
    }
}
