//! Filesystem helpers for JSON artifacts kept in the workspace.

pub mod history;

pub use history::{HistoryStore, HISTORY_CAPACITY};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Result returned after writing an artifact.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub hash: String,
}

/// Loads a JSON artifact if it exists.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Option<T>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read(path).with_context(|| format!("Failed reading artifact {:?}", path))?;
    let value = serde_json::from_slice(&data)
        .with_context(|| format!("Failed parsing artifact {:?}", path))?;
    Ok(Some(value))
}

/// Writes a JSON artifact, replacing any previous contents.
pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<WriteOutcome> {
    let path = path.as_ref();
    let payload = serde_json::to_vec_pretty(value)
        .with_context(|| format!("Failed serializing artifact {:?}", path))?;
    write_bytes(path, &payload)
}

/// Writes a text artifact (report, document) and returns its hash.
pub fn write_text<P: AsRef<Path>>(path: P, contents: &str) -> Result<WriteOutcome> {
    write_bytes(path.as_ref(), contents.as_bytes())
}

fn write_bytes(path: &Path, payload: &[u8]) -> Result<WriteOutcome> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating directory {:?}", parent))?;
    }
    fs::write(path, payload).with_context(|| format!("Failed writing artifact {:?}", path))?;
    Ok(WriteOutcome {
        path: path.to_path_buf(),
        hash: compute_hash(payload),
    })
}

/// Computes a lowercase hex SHA-256 hash of the provided bytes.
pub fn compute_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}
