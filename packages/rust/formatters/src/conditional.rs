//! Conditional-table formatter: resolves a step-count discriminator to one
//! of the two canonical pre-authored process-step fragments and applies a
//! narrow cosmetic post-pass.

use std::path::Path;

use docweave_docmodel::{Alignment, Block, DocumentTree, Paragraph, Run, TableCell};
use docweave_shared::StyleConfig;
use tracing::warn;

use crate::FormattedArtifact;

/// Canonical fragment file for the 21-step workflow.
pub const STEPS_21_FRAGMENT: &str = "process_steps_21.json";
/// Canonical fragment file for the 23-step workflow.
pub const STEPS_23_FRAGMENT: &str = "process_steps_23.json";

/// Resolve a step count to its canonical fragment file name.
/// Values outside {21, 23} fall back to the 21-step fragment with a warning.
pub fn fragment_for_step_count(step_count: u32) -> &'static str {
    match step_count {
        21 => STEPS_21_FRAGMENT,
        23 => STEPS_23_FRAGMENT,
        other => {
            warn!(
                step_count = other,
                "unknown step count, falling back to the 21-step fragment"
            );
            STEPS_21_FRAGMENT
        }
    }
}

/// Format a step-table fragment.
///
/// Copies the canonical fragment's block sequence verbatim at the structural
/// level (empty paragraphs dropped), then: normalizes single-letter
/// first-column cells to the `"x)"` lettering convention, re-rendered
/// centered + italic, and justifies all non-empty paragraphs. Returns `None`
/// when the canonical fragment is missing from the templates directory.
pub fn format_step_table(
    step_count: u32,
    templates_dir: &Path,
    style: &StyleConfig,
) -> Option<FormattedArtifact> {
    let fragment_name = fragment_for_step_count(step_count);
    let path = templates_dir.join(fragment_name);

    let source: DocumentTree = match docweave_docmodel::load_document(&path) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(fragment = fragment_name, error = %e, "canonical fragment unavailable");
            return None;
        }
    };

    let mut blocks: Vec<Block> = source
        .blocks
        .into_iter()
        .filter(|b| match b {
            Block::Paragraph(p) => !p.text().trim().is_empty(),
            Block::Table(_) => true,
        })
        .collect();

    for block in &mut blocks {
        match block {
            Block::Table(table) => {
                for row in &mut table.rows {
                    if let Some(first_cell) = row.cells.first_mut() {
                        normalize_letter_cell(first_cell, style);
                    }
                }
            }
            Block::Paragraph(p) => {
                if !p.text().trim().is_empty() {
                    p.alignment = Some(Alignment::Justify);
                }
            }
        }
    }

    Some(FormattedArtifact { blocks })
}

/// Normalize a lettering cell: `"a"` and `"a)"` alike become a centered,
/// italic `"a)"`. Cells longer than three characters or containing anything
/// but letters (and the closing parenthesis) are left untouched.
fn normalize_letter_cell(cell: &mut TableCell, style: &StyleConfig) {
    let text = cell.text();
    let trimmed = text.trim();

    let letters: String = trimmed.chars().filter(|c| *c != ')').collect();
    if letters.is_empty()
        || trimmed.chars().count() > 3
        || !letters.chars().all(char::is_alphabetic)
    {
        return;
    }

    let lettered = if trimmed.contains(')') {
        trimmed.to_string()
    } else {
        format!("{trimmed})")
    };

    let run = Run::styled(lettered, None, Some(true), Some(style.font.clone()));
    cell.paragraphs = vec![Paragraph {
        runs: vec![run],
        alignment: Some(Alignment::Center),
        ..Paragraph::default()
    }];
}
