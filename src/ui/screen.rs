use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Screen as AppScreen},
    difficulty::Difficulty,
    ui::{
        bold, dim, frame_chunks, key_hints, printable,
        typing_area::TypingArea,
        wrap::{char_width, follow, row_count, wrap_rows, wrap_width},
    },
    util::{format_clock, format_elapsed, percent},
};

/// A UI Screen boundary: responsible for rendering one application screen
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

fn title(text: &str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        text.to_string(),
        bold().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
}

/// Passage entry with the inline validation message
pub struct SetupScreen;

impl SetupScreen {
    fn editor_glyph(c: char) -> String {
        match c {
            '\t' => "    ".to_string(),
            c if c.is_control() => "·".to_string(),
            c => c.to_string(),
        }
    }

    /// Editor text wrapped to `width` with the cursor as a reversed cell.
    /// Also returns the cursor's row.
    fn editor_lines(app: &App, width: usize) -> (Vec<Line<'static>>, usize) {
        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);
        let chars: Vec<char> = app.editor.value().chars().collect();
        let cursor = app.editor.cursor().min(chars.len());

        let glyphs: Vec<String> = chars.iter().map(|&c| Self::editor_glyph(c)).collect();
        let mut layout: Vec<(char, usize)> = chars
            .iter()
            .zip(&glyphs)
            .map(|(&c, g)| (c, if c == '\n' { 0 } else { g.width() }))
            .collect();
        // the cursor past the end takes one column after the text
        layout.push((' ', 1));
        let rows = wrap_rows(&layout, width);

        let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new(); row_count(&layout, &rows)];
        for (idx, &row) in rows.iter().enumerate() {
            let style = if idx == cursor {
                cursor_style
            } else {
                Style::default()
            };
            match chars.get(idx) {
                None | Some('\n') => {
                    if idx == cursor {
                        lines[row].push(Span::styled(" ", cursor_style));
                    }
                }
                Some(_) => lines[row].push(Span::styled(glyphs[idx].clone(), style)),
            }
        }

        (lines.into_iter().map(Line::from).collect(), rows[cursor])
    }
}

impl Screen for SetupScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let (header, body, footer) = frame_chunks(f.area(), 2);

        f.render_widget(title("recite: type it from memory"), header);

        let body_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(body);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Paste or type the passage to memorize");
        let inner = block.inner(body_chunks[0]);
        let (lines, cursor_row) = Self::editor_lines(app, wrap_width(inner.width));
        let offset = follow(cursor_row, lines.len(), inner.height);
        let editor = Paragraph::new(lines).block(block).scroll((offset, 0));
        f.render_widget(editor, body_chunks[0]);

        if let Some(err) = &app.setup_error {
            let error = Paragraph::new(Span::styled(err.to_string(), bold().fg(Color::Red)))
                .alignment(Alignment::Center);
            f.render_widget(error, body_chunks[1]);
        }

        f.render_widget(
            key_hints(&[
                ("ctrl+s", "start"),
                ("ctrl+e", "sample"),
                ("ctrl+r", "random passage"),
                ("esc", "quit"),
            ]),
            footer,
        );
    }
}

/// Three-way difficulty picker
pub struct DifficultyScreen;

impl Screen for DifficultyScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let (header, body, footer) = frame_chunks(f.area(), 2);
        f.render_widget(title("Choose a difficulty"), header);

        let mut lines = Vec::new();
        for (idx, level) in Difficulty::ALL.iter().enumerate() {
            let selected = *level == app.difficulty;
            let marker = if selected { "▶ " } else { "  " };
            let mut name_style = bold().fg(level.color());
            if selected {
                name_style = name_style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{} ", idx + 1), dim()),
                Span::styled(format!(" {level} "), name_style),
                Span::styled(
                    format!("  {} ahead", level.hint_window()),
                    dim(),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("      {}", level.hint_text()),
                dim(),
            )));
            lines.push(Line::default());
        }

        f.render_widget(Paragraph::new(lines), body);
        f.render_widget(
            key_hints(&[
                ("1-3", "choose"),
                ("↑/↓ enter", "select"),
                ("esc", "back"),
            ]),
            footer,
        );
    }
}

/// Passage in full with the open-ended memorize clock
pub struct MemorizeScreen;

impl MemorizeScreen {
    fn passage_lines(text: &str, width: usize) -> Vec<Line<'static>> {
        let shown = printable(text);
        let layout: Vec<(char, usize)> = shown.chars().map(|c| (c, char_width(c))).collect();
        let rows = wrap_rows(&layout, width);

        let mut lines = vec![String::new(); row_count(&layout, &rows)];
        for (&(c, _), &row) in layout.iter().zip(&rows) {
            if c != '\n' {
                lines[row].push(c);
            }
        }
        lines.into_iter().map(Line::from).collect()
    }
}

impl Screen for MemorizeScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let (header, body, footer) = frame_chunks(f.area(), 2);

        let clock = Paragraph::new(Line::from(vec![
            Span::styled("Memorize  ", bold()),
            Span::styled(format_clock(app.memorize_secs()), bold().fg(Color::Yellow)),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(clock, header);

        let mut block = Block::default().borders(Borders::ALL);
        let inner = block.inner(body);
        let lines = Self::passage_lines(
            app.text.as_deref().unwrap_or_default(),
            wrap_width(inner.width),
        );

        let total = lines.len();
        let height = usize::from(inner.height);
        let max_scroll = u16::try_from(total.saturating_sub(height)).unwrap_or(u16::MAX);
        if app.memorize_scroll > max_scroll {
            app.memorize_scroll = max_scroll;
        }
        if max_scroll > 0 {
            let first = usize::from(app.memorize_scroll) + 1;
            let last = (first - 1 + height).min(total);
            block = block
                .title_top(Line::from(format!(" lines {first}-{last} of {total} ")).right_aligned());
        }

        let passage = Paragraph::new(lines)
            .block(block)
            .scroll((app.memorize_scroll, 0));
        f.render_widget(passage, body);

        f.render_widget(
            key_hints(&[
                ("enter", "I'm ready"),
                ("↑/↓ pgup/pgdn", "scroll"),
                ("esc", "quit"),
            ]),
            footer,
        );
    }
}

/// Typing test with progress, mistakes and the hint-limited passage
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let Some(session) = app.session.as_ref() else {
            return;
        };
        let (header, body, footer) = frame_chunks(f.area(), 3);

        let header_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(header);

        let difficulty = session.difficulty();
        let status = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {difficulty} "),
                bold().fg(difficulty.color()).add_modifier(Modifier::REVERSED),
            ),
            Span::raw("   "),
            Span::styled(format!("Mistakes: {}", session.mistakes()), bold()),
        ]));
        f.render_widget(status, header_chunks[0]);

        let progress = percent(session.progress());
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(difficulty.color()))
            .percent(progress)
            .label(format!("{progress}%"));
        f.render_widget(gauge, header_chunks[1]);

        let hint = Paragraph::new(Span::styled(
            difficulty.hint_text(),
            dim().add_modifier(Modifier::ITALIC),
        ));
        f.render_widget(hint, header_chunks[2]);

        let cells = session.cells();
        let border = Block::default().borders(Borders::ALL);
        let inner = border.inner(body);
        f.render_widget(border, body);
        f.render_widget(TypingArea::new(&cells), inner);

        f.render_widget(
            key_hints(&[("tab", "restart"), ("esc", "quit")]),
            footer,
        );
    }
}

/// Final scores for the finished attempt
pub struct ResultsScreen;

impl ResultsScreen {
    fn accuracy_color(accuracy: u32) -> Color {
        match accuracy {
            100 => Color::Green,
            a if a > 90 => Color::Cyan,
            _ => Color::Yellow,
        }
    }
}

impl Screen for ResultsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let Some(results) = app.results.as_ref() else {
            return;
        };
        let (header, body, footer) = frame_chunks(f.area(), 2);
        f.render_widget(title("Results"), header);

        let row = |label: &str, value: String, style: Style| {
            Line::from(vec![
                Span::styled(format!("{label:>10}  "), dim()),
                Span::styled(value, style),
            ])
        };

        let lines = vec![
            row("Time", format_elapsed(results.elapsed_secs), bold()),
            row("Mistakes", results.mistakes.to_string(), bold().fg(Color::Red)),
            row("WPM", results.wpm.to_string(), bold().fg(Color::Magenta)),
            row(
                "Accuracy",
                format!("{}%", results.accuracy),
                bold().fg(Self::accuracy_color(results.accuracy)),
            ),
            Line::default(),
            row(
                "Difficulty",
                results.difficulty.to_string(),
                bold().fg(results.difficulty.color()),
            ),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            body,
        );
        f.render_widget(
            key_hints(&[("r", "try again"), ("n", "new game"), ("q", "quit")]),
            footer,
        );
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: AppScreen) -> Box<dyn Screen> {
    match state {
        AppScreen::Setup => Box::new(SetupScreen),
        AppScreen::Difficulty => Box::new(DifficultyScreen),
        AppScreen::Memorize => Box::new(MemorizeScreen),
        AppScreen::Playing => Box::new(PlayingScreen),
        AppScreen::Results => Box::new(ResultsScreen),
    }
}
