//! Word wrapping for the chat log.
//!
//! Lines are broken at the current width before they reach the `Paragraph`,
//! which then renders them without its own wrapping. The number of lines
//! returned is the number of rows drawn, so scroll limits computed from it
//! always reach the last row.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Styled spans for one output row, merging adjacent runs of equal style.
#[derive(Default)]
struct RowBuilder {
    spans: Vec<Span<'static>>,
    width: usize,
}

impl RowBuilder {
    fn push(&mut self, ch: char, style: Style, ch_width: usize) {
        self.width += ch_width;
        if let Some(last) = self.spans.last_mut() {
            if last.style == style {
                last.content.to_mut().push(ch);
                return;
            }
        }
        self.spans.push(Span::styled(ch.to_string(), style));
    }

    fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn take(&mut self, template: &Line) -> Line<'static> {
        self.width = 0;
        let mut line = Line::from(std::mem::take(&mut self.spans)).style(template.style);
        line.alignment = template.alignment;
        line
    }
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Wrap `lines` to `width` columns at spaces, splitting words wider than a
/// full row. Styles and alignment carry over to every produced row.
pub fn prewrap_lines(lines: &[Line], width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    let mut out = Vec::with_capacity(lines.len());

    for line in lines {
        if width == 0 || line.spans.is_empty() {
            let spans: Vec<Span<'static>> = line
                .spans
                .iter()
                .map(|s| Span::styled(s.content.to_string(), s.style))
                .collect();
            let mut owned = Line::from(spans).style(line.style);
            owned.alignment = line.alignment;
            out.push(owned);
            continue;
        }

        let rows_before = out.len();
        let mut row = RowBuilder::default();
        let mut word: Vec<(char, Style)> = Vec::new();
        let mut word_width = 0;

        let flush_word = |row: &mut RowBuilder,
                          out: &mut Vec<Line<'static>>,
                          word: &mut Vec<(char, Style)>,
                          word_width: &mut usize| {
            if word.is_empty() {
                return;
            }
            if row.width > 0 && row.width + *word_width > width {
                out.push(row.take(line));
            }
            for (ch, style) in word.drain(..) {
                let w = char_width(ch);
                if row.width > 0 && row.width + w > width {
                    out.push(row.take(line));
                }
                row.push(ch, style, w);
            }
            *word_width = 0;
        };

        for span in &line.spans {
            for ch in span.content.chars() {
                if ch == ' ' {
                    flush_word(&mut row, &mut out, &mut word, &mut word_width);
                    if row.width < width {
                        row.push(' ', span.style, 1);
                    } else {
                        // Space at the break point is dropped.
                        out.push(row.take(line));
                    }
                } else {
                    word_width += char_width(ch);
                    word.push((ch, span.style));
                }
            }
        }
        flush_word(&mut row, &mut out, &mut word, &mut word_width);

        if !row.is_empty() || out.len() == rows_before {
            out.push(row.take(line));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Alignment;
    use ratatui::style::Color;

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn breaks_at_word_boundaries() {
        let wrapped = prewrap_lines(&[Line::from("abcdefg abcdefg abcdefg END")], 16);
        assert_eq!(texts(&wrapped), vec!["abcdefg abcdefg ", "abcdefg END"]);
    }

    #[test]
    fn splits_words_longer_than_a_row() {
        let wrapped = prewrap_lines(&[Line::from("abcdefghij")], 4);
        assert_eq!(texts(&wrapped), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_blank_lines_and_alignment() {
        let lines = vec![
            Line::from(""),
            Line::from("centered text").alignment(Alignment::Center),
        ];
        let wrapped = prewrap_lines(&lines, 8);
        assert_eq!(texts(&wrapped), vec!["", "centered", "text"]);
        assert_eq!(wrapped[2].alignment, Some(Alignment::Center));
    }

    #[test]
    fn counts_wide_characters_by_display_width() {
        let wrapped = prewrap_lines(&[Line::from("界界界界")], 5);
        assert_eq!(texts(&wrapped), vec!["界界", "界界"]);
    }

    #[test]
    fn styles_survive_wrapping() {
        let label = Style::default().fg(Color::Cyan);
        let body = Style::default().fg(Color::White);
        let line = Line::from(vec![
            Span::styled("Sage: ", label),
            Span::styled("hello there", body),
        ]);
        let wrapped = prewrap_lines(&[line], 12);
        assert_eq!(texts(&wrapped), vec!["Sage: hello ", "there"]);
        assert_eq!(wrapped[0].spans[0].style, label);
        assert_eq!(wrapped[0].spans[1].style, body);
        assert_eq!(wrapped[1].spans[0].style, body);
    }
}
