//! Scalar substitution: in-run replacement of a placeholder token by a
//! short text value, preserving all surrounding run formatting.

use docweave_docmodel::{DocumentTree, Paragraph, Run};
use tracing::debug;

use crate::charmap::segment_with_replacement;

/// Result of one substitution attempt. The token being absent is an
/// ordinary outcome, not an error: partial substitution across a
/// multi-placeholder document is the normal case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionOutcome {
    /// Token found and replaced.
    Applied,
    /// Token absent from the document; nothing was modified.
    NotFound,
}

/// The literal placeholder token for a key.
pub fn token_for(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

/// Replace the first occurrence of `{{key}}` in the first top-level
/// paragraph that contains it.
///
/// The paragraph's runs are re-emitted as minimal uniform-style segments:
/// text adjacent to the token keeps its exact bold/italic/font state even
/// when the token itself spanned several runs, and the replacement inherits
/// the style in effect at the token's first character. A second occurrence
/// of the token in the same paragraph is intentionally left untouched.
pub fn substitute_scalar(
    tree: &mut DocumentTree,
    key: &str,
    replacement: &str,
) -> SubstitutionOutcome {
    let token = token_for(key);

    for paragraph in tree.paragraphs_mut() {
        let full_text = paragraph.text();
        let Some(byte_start) = full_text.find(&token) else {
            continue;
        };

        let token_start = full_text[..byte_start].chars().count();
        let token_len = token.chars().count();

        rebuild_runs(paragraph, token_start, token_len, replacement);

        debug!(key, "scalar substitution applied");
        return SubstitutionOutcome::Applied;
    }

    debug!(key, "token not present, substitution not applied");
    SubstitutionOutcome::NotFound
}

fn rebuild_runs(paragraph: &mut Paragraph, token_start: usize, token_len: usize, replacement: &str) {
    let segments = segment_with_replacement(&paragraph.runs, token_start, token_len, replacement);

    paragraph.runs = segments
        .into_iter()
        .map(|(text, style)| Run::styled(text, style.bold, style.italic, style.font))
        .collect();
}
