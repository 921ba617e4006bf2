//! Structured-text formatter: headings, bullets, and prose paragraphs.

use docweave_docmodel::{Alignment, Block, Paragraph, Run};
use docweave_shared::{ContentBlock, StyleConfig};

use crate::FormattedArtifact;

/// Format a structured-text fragment.
///
/// A heading becomes a bold paragraph followed by its attached bullets;
/// standalone bullets and paragraphs render in sequence. Every paragraph
/// gets first-line indentation, justified alignment, and fixed
/// inter-paragraph spacing. Returns `None` for an empty block sequence.
pub fn format_structured(
    blocks: &[ContentBlock],
    style: &StyleConfig,
) -> Option<FormattedArtifact> {
    if blocks.is_empty() {
        return None;
    }

    let mut out = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Heading { text, bullets } => {
                out.push(styled_paragraph(text, Some(true), style));
                for bullet in bullets {
                    out.push(styled_paragraph(&format!("- {}", bullet.trim()), None, style));
                }
            }
            ContentBlock::Bullet { text } => {
                out.push(styled_paragraph(&format!("- {}", text.trim()), None, style));
            }
            ContentBlock::Paragraph { text } => {
                out.push(styled_paragraph(text, None, style));
            }
        }
    }

    if out.is_empty() {
        return None;
    }

    Some(FormattedArtifact { blocks: out })
}

fn styled_paragraph(text: &str, bold: Option<bool>, style: &StyleConfig) -> Block {
    let run = Run::styled(text, bold, None, Some(style.font.clone()));
    Block::Paragraph(Paragraph {
        runs: vec![run],
        alignment: Some(Alignment::Justify),
        first_line_indent_in: Some(style.first_line_indent_in),
        space_after_pt: Some(style.space_after_pt),
        line_spacing: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para_at(artifact: &FormattedArtifact, i: usize) -> &Paragraph {
        match &artifact.blocks[i] {
            Block::Paragraph(p) => p,
            Block::Table(_) => panic!("expected paragraph at {i}"),
        }
    }

    #[test]
    fn heading_with_attached_bullets() {
        let style = StyleConfig::default();
        let blocks = vec![
            ContentBlock::Heading {
                text: "Căn cứ pháp lý".into(),
                bullets: vec!["Luật Lưu trữ số 01/2011/QH13".into(), "Nghị định 01/2013".into()],
            },
            ContentBlock::Paragraph {
                text: "Các văn bản trên là cơ sở thực hiện.".into(),
            },
        ];

        let artifact = format_structured(&blocks, &style).unwrap();
        assert_eq!(artifact.blocks.len(), 4);

        let heading = para_at(&artifact, 0);
        assert_eq!(heading.runs[0].bold, Some(true));
        assert_eq!(heading.text(), "Căn cứ pháp lý");

        let bullet = para_at(&artifact, 1);
        assert_eq!(bullet.runs[0].bold, None);
        assert!(bullet.text().starts_with("- Luật Lưu trữ"));
    }

    #[test]
    fn standalone_bullet_renders_dash_prefixed() {
        let style = StyleConfig::default();
        let blocks = vec![ContentBlock::Bullet {
            text: "Mục tiêu độc lập".into(),
        }];

        let artifact = format_structured(&blocks, &style).unwrap();
        assert_eq!(para_at(&artifact, 0).text(), "- Mục tiêu độc lập");
    }

    #[test]
    fn every_paragraph_is_indented_and_justified() {
        let style = StyleConfig::default();
        let blocks = vec![
            ContentBlock::Heading {
                text: "H".into(),
                bullets: vec!["b".into()],
            },
            ContentBlock::Paragraph { text: "p".into() },
        ];

        let artifact = format_structured(&blocks, &style).unwrap();
        for block in &artifact.blocks {
            let Block::Paragraph(p) = block else {
                panic!("expected paragraph");
            };
            assert_eq!(p.alignment, Some(Alignment::Justify));
            assert_eq!(p.first_line_indent_in, Some(0.5));
            assert_eq!(p.space_after_pt, Some(6.0));
        }
    }

    #[test]
    fn empty_sequence_produces_nothing() {
        let style = StyleConfig::default();
        assert!(format_structured(&[], &style).is_none());
    }
}
