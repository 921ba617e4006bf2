//! Document object graph and persistence for Docweave.
//!
//! Defines the paragraph/run/table tree that templates, formatted artifacts,
//! and assembled outputs share, plus the JSON load/save boundary standing in
//! for a byte-level office codec.

pub mod io;
pub mod tree;

pub use io::{load_document, save_document};
pub use tree::{
    Alignment, Block, DocumentTree, Paragraph, Run, Table, TableCell, TableRow,
    apply_line_spacing, normalize_fonts,
};
