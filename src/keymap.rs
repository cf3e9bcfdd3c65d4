use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Action, App, Sample, Screen};
use crate::difficulty::Difficulty;

/// Rows moved by PgUp/PgDn on the memorize screen
const SCROLL_PAGE: isize = 10;

/// Translate a key press into an action for the active screen
pub fn action_for(app: &App, key: KeyEvent) -> Option<Action> {
    // Only process Press events; Repeat/Release would inflate input
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.screen {
        Screen::Setup => setup_action(key, ctrl),
        Screen::Difficulty => difficulty_action(app, key),
        Screen::Memorize => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Ready),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Scroll(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Scroll(1)),
            KeyCode::PageUp => Some(Action::Scroll(-SCROLL_PAGE)),
            KeyCode::PageDown => Some(Action::Scroll(SCROLL_PAGE)),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Screen::Playing => playing_action(key, ctrl),
        Screen::Results => match key.code {
            KeyCode::Char('r') => Some(Action::Retry),
            KeyCode::Char('n') => Some(Action::NewGame),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}

fn setup_action(key: KeyEvent, ctrl: bool) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') if ctrl => Some(Action::Submit),
        KeyCode::Char('e') if ctrl => Some(Action::LoadSample(Sample::Default)),
        KeyCode::Char('r') if ctrl => Some(Action::LoadSample(Sample::Random)),
        _ if ctrl => None,
        _ => Some(Action::Edit(key)),
    }
}

fn difficulty_action(app: &App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('1') | KeyCode::Char('e') => Some(Action::Choose(Difficulty::Easy)),
        KeyCode::Char('2') | KeyCode::Char('m') => Some(Action::Choose(Difficulty::Medium)),
        KeyCode::Char('3') | KeyCode::Char('h') => Some(Action::Choose(Difficulty::Hard)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveSelection(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveSelection(1)),
        KeyCode::Enter => Some(Action::Choose(app.difficulty)),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::Back),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn playing_action(key: KeyEvent, ctrl: bool) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::Restart),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Enter => Some(Action::Type('\n')),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Action::Type(c)),
        _ => None,
    }
}
