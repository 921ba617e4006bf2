//! Run summaries for downstream auditing.
//!
//! Two records per batch run: the formatting summary (which keys produced
//! artifacts, with checksums) and the assembly summary (which keys landed in
//! which output documents, with counts). Both are persisted as pretty JSON
//! in the batch directory; artifact files are written atomically.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use docweave_shared::{BatchId, DocweaveError, Result};

/// Metadata for one written artifact file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub key: String,
    pub filename: String,
    pub sha256: String,
    pub size_bytes: usize,
}

impl ArtifactMeta {
    /// Describe `content` written for `key` at `filename`.
    pub fn describe(key: &str, filename: &str, content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        Self {
            key: key.to_string(),
            filename: filename.to_string(),
            sha256: format!("{:x}", hasher.finalize()),
            size_bytes: content.len(),
        }
    }
}

/// Summary of the formatting phase (`formatting_summary.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattingSummary {
    pub batch_id: BatchId,
    /// Keys that produced an artifact, in processing order.
    pub formatted: Vec<String>,
    /// Artifact file metadata per formatted key.
    pub artifacts: Vec<ArtifactMeta>,
    /// Keys skipped, with the reason (failed extraction, empty payload, ...).
    pub skipped: Vec<(String, String)>,
    pub total_formatted: usize,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of one placeholder key within one assembled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOutcome {
    /// Token found and replaced.
    Substituted,
    /// Token absent from the template; left for the next document.
    NotFound,
    /// Fragment missing, failed, or without a usable artifact.
    Skipped,
}

/// Per-document assembly report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    pub template: String,
    pub output: String,
    /// Keys actually replaced in this document.
    pub substituted: usize,
    /// Keys attempted against this document.
    pub attempted: usize,
    /// Outcome per attempted key, in order.
    pub keys: Vec<(String, KeyOutcome)>,
    /// Populated when the document could not be assembled at all
    /// (missing template); the batch run continues regardless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a full assembly run (`assembly_summary.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyRunSummary {
    pub run_id: Uuid,
    pub batch_id: BatchId,
    pub documents: Vec<DocumentReport>,
    pub total_documents: usize,
    pub completed_at: DateTime<Utc>,
}

impl AssemblyRunSummary {
    pub fn new(batch_id: BatchId, documents: Vec<DocumentReport>) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            batch_id,
            total_documents: documents.len(),
            documents,
            completed_at: Utc::now(),
        }
    }
}

/// Write a summary record as pretty JSON, atomically (temp file + rename).
pub fn write_summary<T: Serialize>(path: &Path, summary: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DocweaveError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| DocweaveError::Store(format!("summary serialization: {e}")))?;

    let temp: PathBuf = match path.file_name() {
        Some(name) => path.with_file_name(format!(".{}.tmp", name.to_string_lossy())),
        None => return Err(DocweaveError::validation("summary path has no file name")),
    };

    std::fs::write(&temp, &json).map_err(|e| DocweaveError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| DocweaveError::io(path, e))?;

    debug!(path = %path.display(), "wrote run summary");
    Ok(())
}
