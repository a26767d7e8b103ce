
pub use scripted::{persona_template, snapshot_with, ScriptedServices};
