//! Boundary to the two remote collaborators: the scraper and the persona generator.

pub mod http;

pub use http::HttpProfileServices;

use async_trait::async_trait;

use crate::models::{PersonaRecord, ProfileSnapshot};

pub const SCRAPE_ENDPOINT: &str = "scrape";
pub const PERSONA_ENDPOINT: &str = "generate_persona";

/// Errors surfaced by a collaborator call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Request to /{endpoint} failed: {reason}")]
    Request {
        endpoint: &'static str,
        reason: String,
    },

    #[error("/{endpoint} responded with HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Invalid /{endpoint} response: {reason}")]
    Decode {
        endpoint: &'static str,
        reason: String,
    },
}

/// The remote calls an analysis depends on.
///
/// Implementations perform exactly one attempt per call; there is no retry or
/// timeout at this layer.
#[async_trait]
pub trait ProfileServices: Send + Sync {
    /// Fetches the raw profile and recent activity for `handle`.
    async fn scrape(&self, handle: &str) -> Result<ProfileSnapshot, ServiceError>;

    /// Derives a persona from a complete snapshot.
    async fn generate_persona(
        &self,
        snapshot: &ProfileSnapshot,
    ) -> Result<PersonaRecord, ServiceError>;
}
