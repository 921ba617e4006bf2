//! Per-character formatting maps.
//!
//! Scalar substitution must replace a token embedded in an arbitrarily
//! fragmented run structure without disturbing any surrounding style. The
//! functions here are pure: they map a run sequence to per-character styles
//! and back to minimal uniform-style segments, with no document or file
//! dependency, so the tricky arithmetic is unit-testable in isolation.

use docweave_docmodel::Run;
use docweave_shared::FontSpec;

/// The effective character-level style at one position of a paragraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharStyle {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub font: Option<FontSpec>,
}

impl CharStyle {
    fn of_run(run: &Run) -> Self {
        Self {
            bold: run.bold,
            italic: run.italic,
            font: run.font.clone(),
        }
    }
}

/// Build the per-character style map of a paragraph by walking its runs in
/// order. One entry per `char` of the concatenated text.
pub fn char_styles(runs: &[Run]) -> Vec<CharStyle> {
    let mut styles = Vec::new();
    for run in runs {
        let style = CharStyle::of_run(run);
        for _ in run.text.chars() {
            styles.push(style.clone());
        }
    }
    styles
}

/// The style in effect at character `index`, or the unstyled default past
/// the end of the map.
pub fn style_at(styles: &[CharStyle], index: usize) -> CharStyle {
    styles.get(index).cloned().unwrap_or_default()
}

/// Merge a character sequence into minimal contiguous segments of uniform
/// style, one output entry per run to re-emit.
pub fn styled_segments(chars: &[(char, CharStyle)]) -> Vec<(String, CharStyle)> {
    let mut segments: Vec<(String, CharStyle)> = Vec::new();

    for (ch, style) in chars {
        match segments.last_mut() {
            Some((text, last)) if last == style => text.push(*ch),
            _ => segments.push((ch.to_string(), style.clone())),
        }
    }

    segments
}

/// Splice `replacement` over the token at `[token_start, token_start +
/// token_len)` (char indices) and return the minimal run segments for the
/// whole paragraph.
///
/// Text before and after the token keeps its original per-character style;
/// the replacement inherits the style in effect at the token's first
/// character in the original text, not a default.
pub fn segment_with_replacement(
    runs: &[Run],
    token_start: usize,
    token_len: usize,
    replacement: &str,
) -> Vec<(String, CharStyle)> {
    let full_text: String = runs.iter().map(|r| r.text.as_str()).collect();
    let styles = char_styles(runs);
    let token_style = style_at(&styles, token_start);

    let mut chars: Vec<(char, CharStyle)> = Vec::new();
    for (i, ch) in full_text.chars().enumerate() {
        if i == token_start {
            for rch in replacement.chars() {
                chars.push((rch, token_style.clone()));
            }
        }
        if i >= token_start && i < token_start + token_len {
            continue;
        }
        chars.push((ch, style_at(&styles, i)));
    }

    styled_segments(&chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> CharStyle {
        CharStyle {
            bold: Some(true),
            ..CharStyle::default()
        }
    }

    #[test]
    fn char_styles_walks_runs_in_order() {
        let runs = vec![
            Run::styled("ab", Some(true), None, None),
            Run::plain("cd"),
        ];

        let styles = char_styles(&runs);
        assert_eq!(styles.len(), 4);
        assert_eq!(styles[0].bold, Some(true));
        assert_eq!(styles[1].bold, Some(true));
        assert_eq!(styles[2].bold, None);
        assert_eq!(styles[3].bold, None);
    }

    #[test]
    fn char_styles_counts_chars_not_bytes() {
        let runs = vec![Run::styled("Sở", Some(true), None, None), Run::plain("!")];
        let styles = char_styles(&runs);
        assert_eq!(styles.len(), 3);
    }

    #[test]
    fn segments_merge_uniform_neighbors() {
        let chars: Vec<(char, CharStyle)> = "aab"
            .chars()
            .zip([bold(), bold(), CharStyle::default()])
            .collect();

        let segments = styled_segments(&chars);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], ("aa".to_string(), bold()));
        assert_eq!(segments[1].0, "b");
    }

    #[test]
    fn replacement_inherits_token_start_style() {
        // "pre " plain, "{{k}}" bold, " post" plain.
        let runs = vec![
            Run::plain("pre "),
            Run::styled("{{k}}", Some(true), None, None),
            Run::plain(" post"),
        ];

        let segments = segment_with_replacement(&runs, 4, 5, "VALUE");
        assert_eq!(
            segments,
            vec![
                ("pre ".to_string(), CharStyle::default()),
                ("VALUE".to_string(), bold()),
                (" post".to_string(), CharStyle::default()),
            ]
        );
    }

    #[test]
    fn token_spanning_three_styled_runs_keeps_neighbors() {
        // The authoring tool fragmented "{{key}}" across three runs with
        // three distinct styles; adjacent text must keep every style.
        let italic = CharStyle {
            italic: Some(true),
            ..CharStyle::default()
        };
        let runs = vec![
            Run::styled("A{{k", Some(true), None, None),
            Run::plain("ey}}B"),
            Run::styled("C", None, Some(true), None),
        ];

        let segments = segment_with_replacement(&runs, 1, 7, "X");
        assert_eq!(
            segments,
            vec![
                ("AX".to_string(), bold()),
                ("B".to_string(), CharStyle::default()),
                ("C".to_string(), italic),
            ]
        );
    }

    #[test]
    fn replacement_at_paragraph_start_and_end() {
        let runs = vec![Run::styled("{{k}}", None, None, None)];
        let segments = segment_with_replacement(&runs, 0, 5, "only");
        assert_eq!(segments, vec![("only".to_string(), CharStyle::default())]);
    }
}
