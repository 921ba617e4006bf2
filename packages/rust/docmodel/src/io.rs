//! Document tree persistence.
//!
//! Trees are stored as pretty-printed JSON. A byte-level office codec can
//! replace this boundary without touching the assembly engine.

use std::path::Path;

use tracing::debug;

use docweave_shared::{DocweaveError, Result};

use crate::tree::DocumentTree;

/// Load a document tree from `path`.
///
/// A missing file is a [`DocweaveError::MissingResource`], which callers
/// treat as fatal for the one document being processed.
pub fn load_document(path: &Path) -> Result<DocumentTree> {
    if !path.exists() {
        return Err(DocweaveError::missing(path));
    }

    let content = std::fs::read_to_string(path).map_err(|e| DocweaveError::io(path, e))?;
    let tree: DocumentTree = serde_json::from_str(&content).map_err(|e| {
        DocweaveError::validation(format!("invalid document {}: {e}", path.display()))
    })?;

    debug!(path = %path.display(), blocks = tree.blocks.len(), "loaded document");
    Ok(tree)
}

/// Write a document tree to `path` (pretty-printed, parent dirs created).
pub fn save_document(path: &Path, tree: &DocumentTree) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DocweaveError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(tree).map_err(|e| {
        DocweaveError::validation(format!("document serialization failed: {e}"))
    })?;
    std::fs::write(path, json).map_err(|e| DocweaveError::io(path, e))?;

    debug!(path = %path.display(), blocks = tree.blocks.len(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Block, Paragraph};
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "docweave-docmodel-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = temp_dir();
        let path = tmp.join("doc.json");

        let tree = DocumentTree {
            blocks: vec![Block::Paragraph(Paragraph::plain("content"))],
        };

        save_document(&path, &tree).unwrap();
        let loaded = load_document(&path).unwrap();
        assert_eq!(loaded, tree);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_missing_is_missing_resource() {
        let tmp = temp_dir();
        let err = load_document(&tmp.join("absent.json")).unwrap_err();
        assert!(matches!(err, DocweaveError::MissingResource { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let tmp = temp_dir();
        let path = tmp.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, DocweaveError::Validation { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
