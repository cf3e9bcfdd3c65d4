use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::classify::{cursor_index, CellState, CharacterCell};
use crate::ui::wrap::{follow, row_count, wrap_rows, wrap_width};

/// Placeholder drawn for hidden characters; keeps each cell's width so the
/// layout matches the real passage
const HIDDEN_GLYPH: char = '░';

/// Terminal-safe glyph for a cell. Control characters never reach the terminal.
fn glyph(cell: &CharacterCell) -> String {
    match (cell.state, cell.ch) {
        (CellState::Hidden, c) if c.is_whitespace() => " ".to_string(),
        (CellState::Hidden, c) => HIDDEN_GLYPH
            .to_string()
            .repeat(c.width().unwrap_or(1).max(1)),
        (CellState::Wrong, ' ') => "·".to_string(),
        (_, c) if c.is_control() => "·".to_string(),
        (_, c) => c.to_string(),
    }
}

fn cell_style(cell: &CharacterCell) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let style = match cell.state {
        CellState::Correct => bold.fg(Color::Green),
        CellState::Wrong => bold.fg(Color::Red),
        CellState::Hint => bold.add_modifier(Modifier::DIM),
        CellState::Hidden => Style::default().fg(Color::DarkGray),
    };
    if cell.is_cursor {
        style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED)
    } else {
        style
    }
}

/// Char used to lay a cell out. A wrongly typed control char is drawn as `·`
/// and must not break the row like a real newline.
fn layout_char(cell: &CharacterCell) -> char {
    match cell.state {
        CellState::Wrong if cell.ch.is_control() => '·',
        _ => cell.ch,
    }
}

/// Word-wrap the cells into styled rows `width` columns wide.
///
/// Returns the lines and the row holding the cursor (the last row once the
/// passage is complete).
pub fn cell_lines(cells: &[CharacterCell], width: usize) -> (Vec<Line<'static>>, usize) {
    let glyphs: Vec<String> = cells.iter().map(glyph).collect();
    let layout: Vec<(char, usize)> = cells
        .iter()
        .zip(&glyphs)
        .map(|(cell, g)| (layout_char(cell), g.width()))
        .collect();
    let rows = wrap_rows(&layout, width);

    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new(); row_count(&layout, &rows)];
    for ((cell, glyph), &row) in cells.iter().zip(glyphs).zip(&rows) {
        if layout_char(cell) == '\n' {
            if cell.is_cursor {
                lines[row].push(Span::styled(" ", cell_style(cell)));
            }
            continue;
        }
        lines[row].push(Span::styled(glyph, cell_style(cell)));
    }

    let cursor_row = cursor_index(cells).map_or(lines.len() - 1, |idx| rows[idx]);
    (lines.into_iter().map(Line::from).collect(), cursor_row)
}

/// The passage as the player sees it while typing, scrolled to keep the cursor
/// and the hints after it in view
pub struct TypingArea<'a> {
    cells: &'a [CharacterCell],
}

impl<'a> TypingArea<'a> {
    pub fn new(cells: &'a [CharacterCell]) -> Self {
        Self { cells }
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (lines, cursor_row) = cell_lines(self.cells, wrap_width(area.width));
        let offset = follow(cursor_row, lines.len(), area.height);
        Paragraph::new(lines).scroll((offset, 0)).render(area, buf);
    }
}
