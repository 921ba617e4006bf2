//! Per-batch content store for Docweave.
//!
//! The store is one structured JSON document per batch
//! (`<root>/<batch>/extracted/content.json`), appended to by the extraction
//! collaborators and read by the formatting/assembly engine. Writes are
//! overwrite-merge per key: saving a fragment never destroys unrelated keys.

pub mod batch;
pub mod summary;

use std::path::Path;

use tracing::{debug, info};

use docweave_shared::{
    BatchId, ContentSet, DocweaveError, ExtractionLogEntry, FragmentRecord, Result,
};

pub use batch::{BatchDirs, create_batch, current_batch};
pub use summary::{
    ArtifactMeta, AssemblyRunSummary, DocumentReport, FormattingSummary, KeyOutcome,
};

/// Load the content store for a batch.
///
/// Fails with [`DocweaveError::MissingResource`] if no extraction has run
/// yet for the batch (the first save creates the file).
pub fn load_content_set(root: &Path, batch: &BatchId) -> Result<ContentSet> {
    let path = BatchDirs::new(root, batch).content_file();
    if !path.exists() {
        return Err(DocweaveError::missing(&path));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| DocweaveError::io(&path, e))?;
    let set: ContentSet = serde_json::from_str(&content)
        .map_err(|e| DocweaveError::Store(format!("invalid content store: {e}")))?;

    debug!(
        %batch,
        fragments = set.placeholders.len(),
        "loaded content store"
    );
    Ok(set)
}

/// Persist a full content set, creating parent directories as needed.
pub fn save_content_set(root: &Path, set: &ContentSet) -> Result<()> {
    let path = BatchDirs::new(root, &set.batch_id).content_file();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DocweaveError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(set)
        .map_err(|e| DocweaveError::Store(format!("content store serialization: {e}")))?;
    std::fs::write(&path, json).map_err(|e| DocweaveError::io(&path, e))?;

    debug!(batch = %set.batch_id, path = %path.display(), "wrote content store");
    Ok(())
}

/// Merge one fragment (and its log entry) into the store.
///
/// Read-modify-write: the existing store is loaded if present, the named key
/// is overwritten in place, and every unrelated key survives untouched. The
/// first merge for a batch creates the store file.
pub fn merge_fragment(
    root: &Path,
    batch: &BatchId,
    key: &str,
    record: FragmentRecord,
    log_entry: ExtractionLogEntry,
) -> Result<()> {
    let mut set = match load_content_set(root, batch) {
        Ok(set) => set,
        Err(DocweaveError::MissingResource { .. }) => ContentSet::new(batch.clone()),
        Err(e) => return Err(e),
    };

    set.placeholders.insert(key.to_string(), record);
    set.extraction_log.insert(key.to_string(), log_entry);
    save_content_set(root, &set)?;

    info!(%batch, key, "merged fragment into content store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docweave_shared::ExtractionStatus;
    use std::path::PathBuf;

    fn temp_root() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "docweave-store-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn record(text: &str) -> FragmentRecord {
        FragmentRecord {
            type_tag: "plain_text".into(),
            payload: serde_json::json!(text),
            extracted_from: Some("TBMT.pdf".into()),
            extraction_timestamp: Utc::now(),
        }
    }

    fn success_entry() -> ExtractionLogEntry {
        ExtractionLogEntry {
            status: ExtractionStatus::Success,
            timestamp: Utc::now(),
            source_file: Some("TBMT.pdf".into()),
            error: None,
        }
    }

    #[test]
    fn load_before_first_extraction_is_missing_resource() {
        let root = temp_root();
        let batch = BatchId("20250101T000000".into());

        let err = load_content_set(&root, &batch).unwrap_err();
        assert!(matches!(err, DocweaveError::MissingResource { .. }));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn first_merge_creates_store() {
        let root = temp_root();
        let batch = BatchId("20250101T000000".into());

        merge_fragment(&root, &batch, "chu_dau_tu", record("Sở Nội vụ"), success_entry())
            .unwrap();

        let set = load_content_set(&root, &batch).unwrap();
        assert_eq!(set.placeholders.len(), 1);
        assert!(set.is_success("chu_dau_tu"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn merge_preserves_unrelated_keys() {
        let root = temp_root();
        let batch = BatchId("20250101T000000".into());

        merge_fragment(&root, &batch, "chu_dau_tu", record("Sở Nội vụ"), success_entry())
            .unwrap();
        merge_fragment(
            &root,
            &batch,
            "ten_goi_thau",
            record("Chỉnh lý tài liệu"),
            success_entry(),
        )
        .unwrap();

        let set = load_content_set(&root, &batch).unwrap();
        assert_eq!(set.placeholders.len(), 2);
        assert!(set.placeholders.contains_key("chu_dau_tu"));
        assert!(set.placeholders.contains_key("ten_goi_thau"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn re_extraction_overwrites_in_place() {
        let root = temp_root();
        let batch = BatchId("20250101T000000".into());

        merge_fragment(&root, &batch, "chu_dau_tu", record("first pass"), success_entry())
            .unwrap();
        merge_fragment(&root, &batch, "chu_dau_tu", record("second pass"), success_entry())
            .unwrap();

        let set = load_content_set(&root, &batch).unwrap();
        assert_eq!(set.placeholders.len(), 1);
        assert_eq!(
            set.placeholders["chu_dau_tu"].payload,
            serde_json::json!("second pass")
        );

        let _ = std::fs::remove_dir_all(&root);
    }
}
