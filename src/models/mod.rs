pub mod history;
pub mod persona;
pub mod snapshot;

pub use history::HistoryEntry;
pub use persona::{Insight, InsightSection, PersonaRecord, TraitScores};
pub use snapshot::{ActivityItem, ActivityKind, ProfileIdentity, ProfileSnapshot};
