//! The document object graph: an ordered tree of paragraphs, runs, and tables.
//!
//! Templates, formatted artifacts, and assembled outputs are all instances of
//! [`DocumentTree`]. The graph carries exactly the formatting attributes the
//! assembly engine needs to preserve: per-run bold/italic/font, per-paragraph
//! alignment, indent, spacing, and per-cell widths.

use serde::{Deserialize, Serialize};

use docweave_shared::FontSpec;

// ---------------------------------------------------------------------------
// Runs and paragraphs
// ---------------------------------------------------------------------------

/// Paragraph-level alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// A contiguous span of uniformly formatted text within a paragraph.
///
/// `None` for bold/italic/font means "inherit the document default", which is
/// distinct from an explicit `Some(false)`; substitution must preserve that
/// distinction byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontSpec>,
}

impl Run {
    /// A run with no explicit formatting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: None,
            italic: None,
            font: None,
        }
    }

    /// A run with explicit emphasis flags and font.
    pub fn styled(
        text: impl Into<String>,
        bold: Option<bool>,
        italic: Option<bool>,
        font: Option<FontSpec>,
    ) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            font,
        }
    }
}

/// One paragraph: an ordered run sequence plus block-level formatting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<Run>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line_indent_in: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_after_pt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
}

impl Paragraph {
    /// A paragraph holding a single unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            ..Self::default()
        }
    }

    /// A paragraph built from explicit runs.
    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    /// The paragraph's concatenated text across all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// One table cell; a cell owns its own paragraph sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_in: Option<f64>,
}

impl TableCell {
    /// A cell holding one plain paragraph.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::plain(text)],
            width_in: None,
        }
    }

    /// The cell's concatenated text across all paragraphs.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

/// A bordered grid of rows and cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

// ---------------------------------------------------------------------------
// Blocks and the document tree
// ---------------------------------------------------------------------------

/// One top-level block of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// The ordered block tree of one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentTree {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl DocumentTree {
    /// Iterate top-level paragraphs in block order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Iterate top-level paragraphs mutably, in block order.
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.blocks.iter_mut().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Iterate tables mutably, in block order.
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.blocks.iter_mut().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// The document's full text, paragraphs and cells included.
    pub fn text(&self) -> String {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => out.push(p.text()),
                Block::Table(t) => {
                    for row in &t.rows {
                        for cell in &row.cells {
                            out.push(cell.text());
                        }
                    }
                }
            }
        }
        out.join("\n")
    }
}

// ---------------------------------------------------------------------------
// Document-wide passes
// ---------------------------------------------------------------------------

/// Force `font` (family + size only) onto every run in `blocks`.
///
/// Bold, italic, and alignment are left exactly as authored.
pub fn normalize_fonts(blocks: &mut [Block], font: &FontSpec) {
    for block in blocks {
        match block {
            Block::Paragraph(p) => normalize_paragraph_fonts(p, font),
            Block::Table(t) => {
                for row in &mut t.rows {
                    for cell in &mut row.cells {
                        for p in &mut cell.paragraphs {
                            normalize_paragraph_fonts(p, font);
                        }
                    }
                }
            }
        }
    }
}

fn normalize_paragraph_fonts(paragraph: &mut Paragraph, font: &FontSpec) {
    for run in &mut paragraph.runs {
        run.font = Some(font.clone());
    }
}

/// Apply a uniform line-spacing multiple to every paragraph in the document,
/// table cells included.
pub fn apply_line_spacing(tree: &mut DocumentTree, spacing: f64) {
    for block in &mut tree.blocks {
        match block {
            Block::Paragraph(p) => p.line_spacing = Some(spacing),
            Block::Table(t) => {
                for row in &mut t.rows {
                    for cell in &mut row.cells {
                        for p in &mut cell.paragraphs {
                            p.line_spacing = Some(spacing);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> FontSpec {
        FontSpec {
            name: "Times New Roman".into(),
            size_pt: 14.0,
        }
    }

    #[test]
    fn paragraph_text_concatenates_runs() {
        let p = Paragraph::from_runs(vec![
            Run::plain("Gói thầu: "),
            Run::styled("{{ten_goi_thau}}", Some(true), None, None),
            Run::plain("."),
        ]);
        assert_eq!(p.text(), "Gói thầu: {{ten_goi_thau}}.");
    }

    #[test]
    fn tree_serialization_roundtrip() {
        let tree = DocumentTree {
            blocks: vec![
                Block::Paragraph(Paragraph::plain("Hello")),
                Block::Table(Table {
                    rows: vec![TableRow {
                        cells: vec![TableCell::plain("a"), TableCell::plain("b")],
                    }],
                }),
            ],
        };

        let json = serde_json::to_string_pretty(&tree).expect("serialize");
        let parsed: DocumentTree = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, tree);
    }

    #[test]
    fn normalize_fonts_preserves_emphasis() {
        let mut blocks = vec![Block::Paragraph(Paragraph::from_runs(vec![Run::styled(
            "bold text",
            Some(true),
            Some(false),
            Some(FontSpec {
                name: "Arial".into(),
                size_pt: 11.0,
            }),
        )]))];

        normalize_fonts(&mut blocks, &font());

        let Block::Paragraph(p) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.runs[0].bold, Some(true));
        assert_eq!(p.runs[0].italic, Some(false));
        assert_eq!(p.runs[0].font.as_ref().unwrap().name, "Times New Roman");
        assert_eq!(p.runs[0].font.as_ref().unwrap().size_pt, 14.0);
    }

    #[test]
    fn line_spacing_reaches_table_cells() {
        let mut tree = DocumentTree {
            blocks: vec![
                Block::Paragraph(Paragraph::plain("top")),
                Block::Table(Table {
                    rows: vec![TableRow {
                        cells: vec![TableCell::plain("in cell")],
                    }],
                }),
            ],
        };

        apply_line_spacing(&mut tree, 1.4);

        let Block::Paragraph(p) = &tree.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.line_spacing, Some(1.4));

        let Block::Table(t) = &tree.blocks[1] else {
            panic!("expected table");
        };
        assert_eq!(t.rows[0].cells[0].paragraphs[0].line_spacing, Some(1.4));
    }
}
