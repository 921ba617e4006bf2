//! Table formatter: renders a header/rows grid with proportional column
//! widths and content-aware cell alignment.

use docweave_docmodel::{
    Alignment, Block, Paragraph, Run, Table, TableCell, TableRow,
};
use docweave_shared::{StyleConfig, TableData};
use tracing::debug;

use crate::FormattedArtifact;

/// Format a tabular fragment into a single styled table block.
///
/// Returns `None` when headers or rows are empty.
pub fn format_table(data: &TableData, style: &StyleConfig) -> Option<FormattedArtifact> {
    if data.is_empty() {
        debug!("empty table data, no artifact produced");
        return None;
    }

    let widths = allocate_column_widths(&max_column_lengths(data), style);

    let mut rows = Vec::with_capacity(data.rows.len() + 1);
    rows.push(header_row(&data.headers, &widths, style));

    for row_data in &data.rows {
        rows.push(data_row(row_data, data.headers.len(), &widths, style));
    }

    Some(FormattedArtifact {
        blocks: vec![Block::Table(Table { rows })],
    })
}

/// Maximum textual width observed per column, header included.
fn max_column_lengths(data: &TableData) -> Vec<usize> {
    let cols = data.headers.len();
    let mut max_lengths: Vec<usize> = data.headers.iter().map(|h| h.chars().count()).collect();

    for row in &data.rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            max_lengths[i] = max_lengths[i].max(cell.chars().count());
        }
    }

    max_lengths
}

/// Allocate column widths proportionally to observed character widths,
/// clamped to the configured band, then redistribute the leftover so the
/// total meets the page-width budget (as far as the band allows).
pub fn allocate_column_widths(max_lengths: &[usize], style: &StyleConfig) -> Vec<f64> {
    let cols = max_lengths.len();
    if cols == 0 {
        return Vec::new();
    }

    let total_chars: usize = max_lengths.iter().sum();
    let mut widths: Vec<f64> = max_lengths
        .iter()
        .map(|&len| {
            let proportional = if total_chars > 0 {
                (len as f64 / total_chars as f64) * style.page_width_in
            } else {
                style.page_width_in / cols as f64
            };
            proportional.clamp(style.min_col_in, style.max_col_in)
        })
        .collect();

    // Clamping skews the total away from the budget; hand the difference to
    // the columns that still have room in the band.
    for _ in 0..cols {
        let diff = style.page_width_in - widths.iter().sum::<f64>();
        if diff.abs() < 1e-9 {
            break;
        }

        let adjustable: Vec<usize> = widths
            .iter()
            .enumerate()
            .filter(|&(_, &w)| {
                if diff > 0.0 {
                    w < style.max_col_in - 1e-9
                } else {
                    w > style.min_col_in + 1e-9
                }
            })
            .map(|(i, _)| i)
            .collect();

        if adjustable.is_empty() {
            break;
        }

        let share = diff / adjustable.len() as f64;
        for i in adjustable {
            widths[i] = (widths[i] + share).clamp(style.min_col_in, style.max_col_in);
        }
    }

    widths
}

fn styled_cell(
    text: &str,
    width: f64,
    alignment: Alignment,
    bold: Option<bool>,
    italic: Option<bool>,
    style: &StyleConfig,
) -> TableCell {
    let run = Run::styled(text.trim(), bold, italic, Some(style.font.clone()));
    let paragraph = Paragraph {
        runs: vec![run],
        alignment: Some(alignment),
        ..Paragraph::default()
    };
    TableCell {
        paragraphs: vec![paragraph],
        width_in: Some(width),
    }
}

fn header_row(headers: &[String], widths: &[f64], style: &StyleConfig) -> TableRow {
    TableRow {
        cells: headers
            .iter()
            .enumerate()
            .map(|(i, text)| {
                styled_cell(
                    text,
                    widths[i],
                    Alignment::Center,
                    Some(true),
                    Some(true),
                    style,
                )
            })
            .collect(),
    }
}

fn data_row(row: &[String], cols: usize, widths: &[f64], style: &StyleConfig) -> TableRow {
    let mut cells = Vec::with_capacity(cols);

    for i in 0..cols {
        // Rows shorter than the header count render empty trailing cells.
        let text = row.get(i).map(String::as_str).unwrap_or("");
        let trimmed = text.trim();

        // Short cells read as numeric/code columns and center better; the
        // first column is always centered.
        let alignment = if i == 0 || trimmed.chars().count() < style.center_threshold {
            Alignment::Center
        } else {
            Alignment::Left
        };

        cells.push(styled_cell(trimmed, widths[i], alignment, None, None, style));
    }

    TableRow { cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableData {
        TableData {
            headers: vec!["STT".into(), "Nội dung công việc".into(), "Số lượng".into()],
            rows: vec![
                vec![
                    "1".into(),
                    "Chỉnh lý tài liệu tồn đọng của Sở Nội vụ giai đoạn 2010-2020".into(),
                    "120 mét".into(),
                ],
                vec!["2".into(), "Ngắn".into()],
            ],
        }
    }

    #[test]
    fn grid_shape_with_padded_short_rows() {
        let style = StyleConfig::default();
        let artifact = format_table(&sample(), &style).unwrap();

        let Block::Table(table) = &artifact.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.rows.len(), 3); // header + 2 data rows
        for row in &table.rows {
            assert_eq!(row.cells.len(), 3);
        }
        // Short second row renders an empty trailing cell.
        assert_eq!(table.rows[2].cells[2].text(), "");
    }

    #[test]
    fn header_cells_are_bold_italic_centered() {
        let style = StyleConfig::default();
        let artifact = format_table(&sample(), &style).unwrap();

        let Block::Table(table) = &artifact.blocks[0] else {
            panic!("expected table");
        };
        for cell in &table.rows[0].cells {
            let p = &cell.paragraphs[0];
            assert_eq!(p.alignment, Some(Alignment::Center));
            assert_eq!(p.runs[0].bold, Some(true));
            assert_eq!(p.runs[0].italic, Some(true));
        }
    }

    #[test]
    fn cell_alignment_by_length() {
        let style = StyleConfig::default();
        let artifact = format_table(&sample(), &style).unwrap();

        let Block::Table(table) = &artifact.blocks[0] else {
            panic!("expected table");
        };
        let row = &table.rows[1];
        // First column always centered.
        assert_eq!(row.cells[0].paragraphs[0].alignment, Some(Alignment::Center));
        // Long prose cell left-aligned.
        assert_eq!(row.cells[1].paragraphs[0].alignment, Some(Alignment::Left));
        // Short cell centered.
        assert_eq!(row.cells[2].paragraphs[0].alignment, Some(Alignment::Center));
    }

    #[test]
    fn widths_clamped_and_budgeted() {
        let style = StyleConfig::default();
        let widths = allocate_column_widths(&[3, 60, 8], &style);

        for &w in &widths {
            assert!(w >= style.min_col_in - 1e-9);
            assert!(w <= style.max_col_in + 1e-9);
        }

        // Band allows 3 * 2.0 = 6.0 max, under the 7.0 budget, so the total
        // lands on the band ceiling rather than the budget.
        let sum: f64 = widths.iter().sum();
        assert!(sum <= style.page_width_in + 1e-9);
    }

    #[test]
    fn widths_meet_budget_when_band_allows() {
        let style = StyleConfig::default();
        let widths = allocate_column_widths(&[10, 10, 10, 10, 10], &style);
        let sum: f64 = widths.iter().sum();
        assert!((sum - style.page_width_in).abs() < 1e-6, "sum was {sum}");
    }

    #[test]
    fn empty_table_produces_nothing() {
        let style = StyleConfig::default();
        assert!(format_table(&TableData::default(), &style).is_none());
        assert!(
            format_table(
                &TableData {
                    headers: vec!["A".into()],
                    rows: vec![],
                },
                &style
            )
            .is_none()
        );
    }
}
