//! Placeholder substitution and assembly orchestration for Docweave.
//!
//! This crate ties the content store, formatters, and schedule scaling into
//! end-to-end workflows: per-character scalar substitution, structural
//! block substitution, and the batch assembly driver.

pub mod charmap;
pub mod driver;
pub mod scalar;
pub mod structural;

pub use charmap::{CharStyle, char_styles, segment_with_replacement, style_at, styled_segments};
pub use driver::{
    BatchRunConfig, BatchRunReport, COMPLETION_TIME_KEY, FormatOutcome, PROCESS_STEPS_KEY,
    ProgressReporter, SilentProgress, assemble_document, format_fragments, run_batch,
};
pub use scalar::{SubstitutionOutcome, substitute_scalar, token_for};
pub use structural::substitute_structural;
