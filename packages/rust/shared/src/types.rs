//! Core domain types for Docweave content batches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current schema version for the content store format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// BatchId
// ---------------------------------------------------------------------------

/// An opaque batch token, shared by every stage of one processing run.
///
/// Generated tokens are compact UTC timestamps (`YYYYMMDDTHHMMSS`), which
/// keeps batch directories time-sortable on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub String);

impl BatchId {
    /// Generate a fresh batch token from the current UTC time.
    pub fn new() -> Self {
        Self(Utc::now().format("%Y%m%dT%H%M%S").to_string())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BatchId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// ContentSet
// ---------------------------------------------------------------------------

/// The per-batch content store record (`content.json`).
///
/// One entry per placeholder key; re-extraction overwrites the entry in
/// place, never appends a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSet {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Owning batch.
    pub batch_id: BatchId,
    /// When the store was first created.
    pub created_at: DateTime<Utc>,
    /// Extracted fragments, keyed by placeholder name.
    #[serde(default)]
    pub placeholders: BTreeMap<String, FragmentRecord>,
    /// Extraction outcome per key, written by the extraction collaborators.
    #[serde(default)]
    pub extraction_log: BTreeMap<String, ExtractionLogEntry>,
}

impl ContentSet {
    /// Create an empty store record for a batch.
    pub fn new(batch_id: BatchId) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            batch_id,
            created_at: Utc::now(),
            placeholders: BTreeMap::new(),
            extraction_log: BTreeMap::new(),
        }
    }

    /// Whether `key` was extracted successfully.
    ///
    /// A key with no log entry counts as not extracted: its placeholder is
    /// skipped during assembly rather than substituted with garbage.
    pub fn is_success(&self, key: &str) -> bool {
        matches!(
            self.extraction_log.get(key),
            Some(entry) if entry.status == ExtractionStatus::Success
        )
    }

    /// Keys that are present and successfully extracted, in store order.
    pub fn successful_keys(&self) -> Vec<String> {
        self.placeholders
            .keys()
            .filter(|k| self.is_success(k))
            .cloned()
            .collect()
    }
}

/// One extracted fragment as persisted in the store.
///
/// The type tag and payload stay schemaless here so records written by
/// future extractors with unknown tags remain loadable; [`FragmentContent`]
/// is the closed, typed view used by the formatters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentRecord {
    /// Content type tag: `plain_text`, `table`, or `structured_text`.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Type-dependent payload.
    pub payload: serde_json::Value,
    /// Source document the fragment was extracted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_from: Option<String>,
    /// When the fragment was extracted.
    pub extraction_timestamp: DateTime<Utc>,
}

/// Per-key extraction outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionLogEntry {
    /// Terminal extraction status.
    pub status: ExtractionStatus,
    /// When the extraction finished.
    pub timestamp: DateTime<Utc>,
    /// Source document name, for auditing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Diagnostic message for failed extractions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Extraction status for a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Success,
    Failed,
}

// ---------------------------------------------------------------------------
// FragmentContent
// ---------------------------------------------------------------------------

/// Closed, typed view of a fragment payload.
///
/// The dispatcher matches exhaustively over this enum, so adding a content
/// type is a compile-checked change rather than a runtime string guess.
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentContent {
    /// A single short string.
    PlainText(String),
    /// A literal header/rows grid.
    Table(TableData),
    /// A table fragment carrying a step-count discriminator instead of
    /// literal rows; resolved against a canonical pre-authored fragment.
    StepTable { step_count: u32 },
    /// An ordered sequence of headings, bullets, and paragraphs.
    StructuredText(Vec<ContentBlock>),
}

impl FragmentContent {
    /// Parse a raw store record into the closed variant type.
    ///
    /// Returns `None` for an unrecognized tag or a payload that does not
    /// match its tag; the dispatcher then degrades to plain text.
    pub fn parse(record: &FragmentRecord) -> Option<Self> {
        match record.type_tag.as_str() {
            "plain_text" | "simple_text" => record
                .payload
                .as_str()
                .map(|s| Self::PlainText(s.to_string())),
            "table" => {
                // A table payload is either a literal grid or a step-count
                // selector for the canonical process-step fragments.
                if let Some(step_count) = record
                    .payload
                    .get("step_count")
                    .and_then(serde_json::Value::as_u64)
                {
                    return Some(Self::StepTable {
                        step_count: step_count as u32,
                    });
                }
                serde_json::from_value::<TableData>(record.payload.clone())
                    .ok()
                    .map(Self::Table)
            }
            "structured_text" | "structured_content" => {
                serde_json::from_value::<Vec<ContentBlock>>(record.payload.clone())
                    .ok()
                    .map(Self::StructuredText)
            }
            _ => None,
        }
    }
}

/// Tabular fragment payload. Rows may be shorter than the header count;
/// missing trailing cells render empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

/// One block of a structured-text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A heading owning the bullets that follow it.
    Heading {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        bullets: Vec<String>,
    },
    /// A standalone bullet with no preceding heading.
    Bullet { text: String },
    /// A plain prose paragraph.
    Paragraph { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: &str, payload: serde_json::Value) -> FragmentRecord {
        FragmentRecord {
            type_tag: tag.into(),
            payload,
            extracted_from: Some("CHUONG_V.pdf".into()),
            extraction_timestamp: Utc::now(),
        }
    }

    #[test]
    fn batch_id_roundtrip() {
        let id = BatchId::new();
        let parsed: BatchId = id.to_string().parse().expect("parse BatchId");
        assert_eq!(id, parsed);
        assert_eq!(id.to_string().len(), 15); // YYYYMMDDTHHMMSS
    }

    #[test]
    fn parse_plain_text_payload() {
        let rec = record("plain_text", serde_json::json!("Sở Nội vụ"));
        assert_eq!(
            FragmentContent::parse(&rec),
            Some(FragmentContent::PlainText("Sở Nội vụ".into()))
        );
    }

    #[test]
    fn parse_table_payload() {
        let rec = record(
            "table",
            serde_json::json!({
                "headers": ["STT", "Tên", "Số lượng"],
                "rows": [["1", "Hồ sơ", "120"]]
            }),
        );
        match FragmentContent::parse(&rec) {
            Some(FragmentContent::Table(data)) => {
                assert_eq!(data.headers.len(), 3);
                assert_eq!(data.rows[0][2], "120");
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn parse_step_count_discriminator_wins_over_grid() {
        let rec = record(
            "table",
            serde_json::json!({ "step_count": 23, "source_file": "23_BUOC.docx" }),
        );
        assert_eq!(
            FragmentContent::parse(&rec),
            Some(FragmentContent::StepTable { step_count: 23 })
        );
    }

    #[test]
    fn parse_structured_payload() {
        let rec = record(
            "structured_content",
            serde_json::json!([
                { "kind": "heading", "text": "Căn cứ pháp lý", "bullets": ["Luật số 01"] },
                { "kind": "paragraph", "text": "Nội dung." }
            ]),
        );
        match FragmentContent::parse(&rec) {
            Some(FragmentContent::StructuredText(blocks)) => assert_eq!(blocks.len(), 2),
            other => panic!("expected structured text, got {other:?}"),
        }
    }

    #[test]
    fn parse_unknown_tag_returns_none() {
        let rec = record("hologram", serde_json::json!({ "x": 1 }));
        assert!(FragmentContent::parse(&rec).is_none());
    }

    #[test]
    fn content_set_success_filtering() {
        let mut set = ContentSet::new(BatchId::new());
        set.placeholders
            .insert("chu_dau_tu".into(), record("plain_text", "Sở Nội vụ".into()));
        set.placeholders.insert(
            "ten_goi_thau".into(),
            record("plain_text", "Chỉnh lý tài liệu".into()),
        );
        set.extraction_log.insert(
            "chu_dau_tu".into(),
            ExtractionLogEntry {
                status: ExtractionStatus::Success,
                timestamp: Utc::now(),
                source_file: Some("TBMT.pdf".into()),
                error: None,
            },
        );
        set.extraction_log.insert(
            "ten_goi_thau".into(),
            ExtractionLogEntry {
                status: ExtractionStatus::Failed,
                timestamp: Utc::now(),
                source_file: Some("TBMT.pdf".into()),
                error: Some("no answer from extraction service".into()),
            },
        );

        assert!(set.is_success("chu_dau_tu"));
        assert!(!set.is_success("ten_goi_thau"));
        assert!(!set.is_success("never_extracted"));
        assert_eq!(set.successful_keys(), vec!["chu_dau_tu".to_string()]);
    }

    #[test]
    fn content_set_serialization_roundtrip() {
        let mut set = ContentSet::new(BatchId("20250101T090000".into()));
        set.placeholders
            .insert("muc_dich".into(), record("plain_text", "text".into()));

        let json = serde_json::to_string_pretty(&set).expect("serialize");
        let parsed: ContentSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(parsed.batch_id.to_string(), "20250101T090000");
        assert_eq!(parsed.placeholders.len(), 1);
    }
}
