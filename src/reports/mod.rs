//! Persona exports: a plain-text report and a printable HTML document.
//!
//! Both renderers are pure functions of the persona and a caller-supplied
//! render time, so identical inputs always produce byte-identical output.
//! Passing no persona is not an error; there is simply nothing to export.

pub mod document;
pub mod format;
pub mod plain_text;

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::models::PersonaRecord;

pub(crate) const REPORT_TITLE: &str = "Reddit Persona Analysis";

/// Print-dialog delay used when no configuration is supplied.
pub const DEFAULT_PRINT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    PlainText,
    PrintableDocument,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::PlainText => "txt",
            ExportFormat::PrintableDocument => "html",
        }
    }

    /// `<handle>_persona.<ext>`, with the handle made safe for file systems.
    pub fn file_name(self, handle: &str) -> String {
        format!("{}_persona.{}", format::file_stem(handle), self.extension())
    }
}

pub fn to_plain_text(
    persona: Option<&PersonaRecord>,
    rendered_at: DateTime<Utc>,
) -> Option<String> {
    persona.map(|persona| plain_text::render(persona, rendered_at))
}

pub fn to_printable_document(
    persona: Option<&PersonaRecord>,
    rendered_at: DateTime<Utc>,
) -> Option<String> {
    persona.map(|persona| document::render(persona, rendered_at, DEFAULT_PRINT_DELAY))
}
