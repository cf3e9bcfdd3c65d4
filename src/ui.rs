pub mod screen;
pub mod typing_area;
pub mod wrap;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn key_hint_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}

/// Replace control characters so passage text cannot drive the terminal
pub fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() && c != '\n' { '·' } else { c })
        .collect()
}

/// Draw whichever screen is active. Screens may clamp view state such as scroll offsets.
pub fn draw(app: &mut App, f: &mut Frame) {
    screen::current_screen(app.screen).render(app, f);
}

/// Split the frame into title / body / footer rows inside the standard margins
pub fn frame_chunks(area: Rect, title_height: u16) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(title_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Footer line listing the keys valid on a screen, e.g. `[("enter", "ready")]`
pub fn key_hints(hints: &[(&str, &str)]) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (idx, (key, label)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ·  ", dim()));
        }
        spans.push(Span::styled(key.to_string(), bold()));
        spans.push(Span::styled(format!(" {label}"), key_hint_style()));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Action, Screen};
    use crate::difficulty::Difficulty;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::time::{Duration, Instant};

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app_on(screen: Screen) -> App {
        let now = Instant::now();
        let mut app = App::with_text("remember this line", Difficulty::Medium);
        if screen == Screen::Setup {
            return app;
        }
        app.apply(Action::Submit, now);
        if screen == Screen::Difficulty {
            return app;
        }
        app.apply(Action::Choose(Difficulty::Medium), now);
        if screen == Screen::Memorize {
            app.on_tick(now + Duration::from_secs(75));
            return app;
        }
        app.apply(Action::Ready, now);
        if screen == Screen::Playing {
            app.apply(Action::Type('r'), now);
            app.apply(Action::Type('x'), now);
            return app;
        }
        for (i, c) in "remember this line".chars().enumerate() {
            let at = if i == 0 { now } else { now + Duration::from_secs(6) };
            app.apply(Action::Type(c), at);
        }
        app
    }

    #[test]
    fn test_setup_screen_shows_editor_and_hints() {
        let text = render(&mut app_on(Screen::Setup), 80, 24);
        assert!(text.contains("remember this line"));
        assert!(text.contains("ctrl+s"));
    }

    #[test]
    fn test_setup_screen_shows_error() {
        let mut app = App::with_text("tiny", Difficulty::Easy);
        app.apply(Action::Submit, Instant::now());
        let text = render(&mut app, 80, 24);
        assert!(text.contains("at least 10 characters"));
    }

    #[test]
    fn test_difficulty_screen_lists_levels() {
        let text = render(&mut app_on(Screen::Difficulty), 80, 24);
        assert!(text.contains("EASY"));
        assert!(text.contains("MEDIUM"));
        assert!(text.contains("HARD"));
    }

    #[test]
    fn test_memorize_screen_shows_clock_and_text() {
        let text = render(&mut app_on(Screen::Memorize), 80, 24);
        assert!(text.contains("1:15"));
        assert!(text.contains("remember this line"));
    }

    #[test]
    fn test_playing_screen_shows_mistakes_and_badge() {
        let mut app = app_on(Screen::Playing);
        let text = render(&mut app, 80, 24);
        assert!(text.contains("MEDIUM"));
        assert!(text.contains("Mistakes: 1"));
        // the hidden remainder must not leak the passage
        assert!(!text.contains("this line"));
    }

    #[test]
    fn test_results_screen_shows_scores() {
        let mut app = app_on(Screen::Results);
        assert_eq!(app.screen, Screen::Results);
        let text = render(&mut app, 80, 24);
        assert!(text.contains("6.0s"));
        assert!(text.contains("WPM"));
        assert!(text.contains("Accuracy"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        for screen in [
            Screen::Setup,
            Screen::Difficulty,
            Screen::Memorize,
            Screen::Playing,
            Screen::Results,
        ] {
            let mut app = app_on(screen);
            render(&mut app, 10, 3);
            render(&mut app, 1, 1);
        }
    }

    fn numbered_words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{i:03}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_long_passage_can_be_scrolled_to_the_end() {
        let now = Instant::now();
        let mut app = App::with_text(&numbered_words(400), Difficulty::Easy);
        app.apply(Action::Submit, now);
        app.apply(Action::Choose(Difficulty::Easy), now);
        assert_eq!(app.screen, Screen::Memorize);

        let text = render(&mut app, 80, 24);
        assert!(text.contains("w000"));
        assert!(!text.contains("w399"));
        assert!(text.contains("lines 1-17 of 31"));

        for _ in 0..10 {
            app.apply(Action::Scroll(10), now);
        }
        let text = render(&mut app, 80, 24);
        assert!(text.contains("w399"));
        assert!(!text.contains("w000"));
        // overshoot is clamped to the last page
        assert_eq!(app.memorize_scroll, 14);
        assert!(text.contains("lines 15-31 of 31"));

        app.apply(Action::Scroll(-1), now);
        let text = render(&mut app, 80, 24);
        assert!(text.contains("lines 14-30 of 31"));
    }

    #[test]
    fn test_long_editor_text_keeps_cursor_in_view() {
        let mut app = App::with_text(&numbered_words(400), Difficulty::Easy);
        let text = render(&mut app, 80, 24);
        assert!(text.contains("w399"));
        assert!(!text.contains("w000"));
    }

    #[test]
    fn test_long_game_shows_cursor_region() {
        let now = Instant::now();
        let passage = numbered_words(400);
        let mut app = App::with_text(&passage, Difficulty::Easy);
        app.apply(Action::Submit, now);
        app.apply(Action::Choose(Difficulty::Easy), now);
        app.apply(Action::Ready, now);
        for c in passage.chars().take(1900) {
            app.apply(Action::Type(c), now);
        }

        let text = render(&mut app, 80, 24);
        assert!(text.contains("w380 w381 w382"));
        assert!(!text.contains("w383"));
    }

    #[test]
    fn test_printable_masks_control_chars() {
        assert_eq!(printable("a\u{1b}[0m\tb\nc"), "a·[0m·b\nc");
    }

    #[test]
    fn test_key_hints_layout() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buffer = Buffer::empty(area);
        ratatui::widgets::Widget::render(
            key_hints(&[("r", "retry"), ("q", "quit")]),
            area,
            &mut buffer,
        );
        let text = buffer_text(&buffer);
        assert!(text.contains("r retry"));
        assert!(text.contains("q quit"));
    }
}
