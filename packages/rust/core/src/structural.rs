//! Structural substitution: whole-paragraph replacement by a multi-block
//! formatted artifact.

use docweave_docmodel::{Block, DocumentTree, normalize_fonts};
use docweave_shared::FontSpec;
use tracing::debug;

use crate::scalar::{SubstitutionOutcome, token_for};

/// Replace the first top-level paragraph containing `{{key}}` with the full
/// block sequence of `artifact`.
///
/// Blocks are cloned structurally, so nested runs, table cells, and borders
/// carry over from the artifact untouched; afterwards a font-normalization
/// pass (family + size only, never bold/italic/alignment) runs over every
/// run of the newly inserted blocks. Only the first matching paragraph
/// across the whole document is substituted.
pub fn substitute_structural(
    tree: &mut DocumentTree,
    key: &str,
    artifact: &DocumentTree,
    font: &FontSpec,
) -> SubstitutionOutcome {
    let token = token_for(key);

    let position = tree.blocks.iter().position(|b| match b {
        Block::Paragraph(p) => p.text().contains(&token),
        Block::Table(_) => false,
    });

    let Some(index) = position else {
        debug!(key, "token not present, substitution not applied");
        return SubstitutionOutcome::NotFound;
    };

    let mut inserted: Vec<Block> = artifact.blocks.clone();
    normalize_fonts(&mut inserted, font);
    let inserted_len = inserted.len();

    tree.blocks.splice(index..index + 1, inserted);

    debug!(key, blocks = inserted_len, "structural substitution applied");
    SubstitutionOutcome::Applied
}
