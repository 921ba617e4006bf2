//! Batch identity bookkeeping and directory layout.
//!
//! One batch is processed end-to-end per invocation. The batch token is
//! shared by all stages through `current_batch.txt` at the workspace root;
//! this is incidental plumbing, not part of the assembly contract.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use docweave_shared::{BatchId, DocweaveError, Result};

/// Name of the well-known batch token file.
const CURRENT_BATCH_FILE: &str = "current_batch.txt";

/// Paths inside one batch working directory.
#[derive(Debug, Clone)]
pub struct BatchDirs {
    /// `<root>/<batch>/`
    pub batch_dir: PathBuf,
    /// Extracted content store.
    pub extracted_dir: PathBuf,
    /// Formatted-artifact intermediates.
    pub artifacts_dir: PathBuf,
    /// Assembled output documents.
    pub documents_dir: PathBuf,
    /// Chart series for the external renderer.
    pub charts_dir: PathBuf,
}

impl BatchDirs {
    /// Compute the directory layout for a batch (no filesystem access).
    pub fn new(root: &Path, batch: &BatchId) -> Self {
        let batch_dir = root.join(batch.to_string());
        Self {
            extracted_dir: batch_dir.join("extracted"),
            artifacts_dir: batch_dir.join("artifacts"),
            documents_dir: batch_dir.join("documents"),
            charts_dir: batch_dir.join("charts"),
            batch_dir,
        }
    }

    /// Path of the content store file.
    pub fn content_file(&self) -> PathBuf {
        self.extracted_dir.join("content.json")
    }

    /// Create the full directory skeleton.
    pub fn create(&self) -> Result<()> {
        let dirs = [
            &self.batch_dir,
            &self.extracted_dir,
            &self.artifacts_dir,
            &self.documents_dir,
            &self.charts_dir,
        ];

        for dir in dirs {
            std::fs::create_dir_all(dir).map_err(|e| DocweaveError::io(dir, e))?;
        }

        debug!(path = %self.batch_dir.display(), "batch directory structure created");
        Ok(())
    }
}

/// Create a fresh batch: generate a token, write `current_batch.txt`
/// (replacing any previous token), and create the directory skeleton.
pub fn create_batch(root: &Path) -> Result<BatchId> {
    std::fs::create_dir_all(root).map_err(|e| DocweaveError::io(root, e))?;

    let batch = BatchId::new();
    let dirs = BatchDirs::new(root, &batch);
    dirs.create()?;

    let token_file = root.join(CURRENT_BATCH_FILE);
    std::fs::write(&token_file, batch.to_string())
        .map_err(|e| DocweaveError::io(&token_file, e))?;

    info!(%batch, root = %root.display(), "created fresh batch");
    Ok(batch)
}

/// Read the current batch token.
///
/// Missing token file means no batch has been created yet.
pub fn current_batch(root: &Path) -> Result<BatchId> {
    let token_file = root.join(CURRENT_BATCH_FILE);
    if !token_file.exists() {
        return Err(DocweaveError::missing(&token_file));
    }

    let content =
        std::fs::read_to_string(&token_file).map_err(|e| DocweaveError::io(&token_file, e))?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DocweaveError::validation("current_batch.txt is empty"));
    }

    Ok(BatchId(trimmed.to_string()))
}
