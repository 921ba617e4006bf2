//! Content-type formatters and the formatter dispatcher.
//!
//! Each formatter is a pure transform from a fragment payload to a
//! [`FormattedArtifact`]: an ordered sequence of template-insertable blocks
//! with concrete styling already applied. The dispatcher routes each
//! fragment to its formatter by the declared type tag; formatters are tried
//! with explicit [`StyleConfig`] values, never ambient defaults.

mod conditional;
mod plain;
mod structured;
mod table;

use std::path::{Path, PathBuf};

use tracing::warn;

use docweave_docmodel::{Block, DocumentTree};
use docweave_shared::{FragmentContent, FragmentRecord, Result, StyleConfig};

pub use conditional::{
    STEPS_21_FRAGMENT, STEPS_23_FRAGMENT, format_step_table, fragment_for_step_count,
};
pub use plain::format_plain_text;
pub use structured::format_structured;
pub use table::{allocate_column_widths, format_table};

// ---------------------------------------------------------------------------
// Formatted artifacts
// ---------------------------------------------------------------------------

/// The template-ready rendering of one fragment, independent of any target
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedArtifact {
    pub blocks: Vec<Block>,
}

impl FormattedArtifact {
    /// View the artifact as a standalone document tree for persistence.
    pub fn into_tree(self) -> DocumentTree {
        DocumentTree {
            blocks: self.blocks,
        }
    }
}

/// Path of the intermediate artifact file for a key.
pub fn artifact_path(artifacts_dir: &Path, key: &str) -> PathBuf {
    artifacts_dir.join(format!("{key}.json"))
}

/// Persist an artifact as a standalone document so formatting and merging
/// stay independently testable, re-runnable stages.
pub fn write_artifact(
    artifacts_dir: &Path,
    key: &str,
    artifact: FormattedArtifact,
) -> Result<PathBuf> {
    let path = artifact_path(artifacts_dir, key);
    docweave_docmodel::save_document(&path, &artifact.into_tree())?;
    Ok(path)
}

/// Load a previously written artifact for structural substitution.
pub fn load_artifact(artifacts_dir: &Path, key: &str) -> Result<DocumentTree> {
    docweave_docmodel::load_document(&artifact_path(artifacts_dir, key))
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Type tags the closed variant set covers (legacy spellings included).
const KNOWN_TAGS: [&str; 5] = [
    "plain_text",
    "simple_text",
    "table",
    "structured_text",
    "structured_content",
];

/// Route a fragment to its formatter by the declared type tag.
///
/// Returns `None` ("no artifact produced") for empty or malformed payloads,
/// which callers treat exactly like an extraction failure. An unrecognized
/// type tag is not rejected: it degrades to the plain-text formatter applied
/// to the payload's string conversion, with a warning in the run log.
pub fn dispatch(
    key: &str,
    record: &FragmentRecord,
    style: &StyleConfig,
    templates_dir: &Path,
) -> Option<FormattedArtifact> {
    match FragmentContent::parse(record) {
        Some(FragmentContent::PlainText(text)) => format_plain_text(&text, style),
        Some(FragmentContent::Table(data)) => format_table(&data, style),
        Some(FragmentContent::StepTable { step_count }) => {
            format_step_table(step_count, templates_dir, style)
        }
        Some(FragmentContent::StructuredText(blocks)) => format_structured(&blocks, style),
        None if KNOWN_TAGS.contains(&record.type_tag.as_str()) => {
            warn!(key, tag = %record.type_tag, "malformed payload, no artifact produced");
            None
        }
        None => {
            warn!(
                key,
                tag = %record.type_tag,
                "unknown content type, degrading to plain text"
            );
            let text = match record.payload.as_str() {
                Some(s) => s.to_string(),
                None => record.payload.to_string(),
            };
            format_plain_text(&text, style)
        }
    }
}
