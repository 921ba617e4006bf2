//! Plain-text formatter: wraps a short string in a single styled paragraph.

use docweave_docmodel::{Block, Paragraph, Run};
use docweave_shared::StyleConfig;

use crate::FormattedArtifact;

/// Format a plain-text fragment.
///
/// Returns `None` for an empty or whitespace-only string ("no artifact
/// produced"); minimal styling otherwise, letting the template slot control
/// emphasis.
pub fn format_plain_text(content: &str, style: &StyleConfig) -> Option<FormattedArtifact> {
    if content.trim().is_empty() {
        return None;
    }

    let run = Run::styled(content, None, None, Some(style.font.clone()));
    Some(FormattedArtifact {
        blocks: vec![Block::Paragraph(Paragraph::from_runs(vec![run]))],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_text_in_one_paragraph() {
        let style = StyleConfig::default();
        let artifact = format_plain_text("Sở Nội vụ", &style).unwrap();

        assert_eq!(artifact.blocks.len(), 1);
        let Block::Paragraph(p) = &artifact.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.text(), "Sở Nội vụ");
        assert_eq!(p.runs[0].font.as_ref().unwrap().name, "Times New Roman");
        assert_eq!(p.runs[0].bold, None);
    }

    #[test]
    fn empty_payload_produces_nothing() {
        let style = StyleConfig::default();
        assert!(format_plain_text("", &style).is_none());
        assert!(format_plain_text("   ", &style).is_none());
    }
}
