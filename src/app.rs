use std::time::Instant;

use crossterm::event::KeyEvent;
use tracing::{debug, info, warn};

use crate::difficulty::Difficulty;
use crate::editor::TextEditor;
use crate::session::Session;
use crate::stats::Results;
use crate::text::{self, TextError};
use crate::timer::RepeatingTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Screen {
    Setup,
    Difficulty,
    Memorize,
    Playing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Default,
    Random,
}

/// Everything a user can ask the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Editing key for the setup text area
    Edit(KeyEvent),
    LoadSample(Sample),
    Submit,
    /// Move the difficulty picker highlight up (negative) or down
    MoveSelection(isize),
    Choose(Difficulty),
    Back,
    /// Scroll the memorize view by this many rows
    Scroll(isize),
    Ready,
    Type(char),
    Backspace,
    Restart,
    Retry,
    NewGame,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub editor: TextEditor,
    pub setup_error: Option<TextError>,
    /// Normalized passage, set once setup succeeds
    pub text: Option<String>,
    /// Chosen difficulty; doubles as the picker highlight on the difficulty screen
    pub difficulty: Difficulty,
    pub memorize_timer: RepeatingTimer,
    /// First visible row of the passage on the memorize screen; clamped when drawn
    pub memorize_scroll: u16,
    pub session: Option<Session>,
    pub results: Option<Results>,
    pub should_quit: bool,
}

impl App {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            screen: Screen::Setup,
            editor: TextEditor::default(),
            setup_error: None,
            text: None,
            difficulty,
            memorize_timer: RepeatingTimer::every_second(),
            memorize_scroll: 0,
            session: None,
            results: None,
            should_quit: false,
        }
    }

    /// Start on the setup screen with `text` already in the editor
    pub fn with_text(text: &str, difficulty: Difficulty) -> Self {
        let mut app = Self::new(difficulty);
        app.editor.set(text);
        app
    }

    /// Whole seconds spent on the memorize screen so far
    pub fn memorize_secs(&self) -> u64 {
        self.memorize_timer.ticks()
    }

    /// Apply `action` to the current screen.
    ///
    /// Returns false when the action is not valid for the current screen; in that
    /// case nothing changes.
    pub fn apply(&mut self, action: Action, now: Instant) -> bool {
        match (self.screen, action) {
            (_, Action::Quit) => {
                info!(screen = %self.screen, "quit requested");
                self.memorize_timer.cancel();
                self.should_quit = true;
                true
            }

            (Screen::Setup, Action::Edit(key)) => {
                let changed = self.editor.handle(key);
                if changed {
                    self.setup_error = None;
                }
                changed
            }
            (Screen::Setup, Action::LoadSample(sample)) => {
                let passage = match sample {
                    Sample::Default => text::SAMPLE_TEXT,
                    Sample::Random => text::random_sample(),
                };
                self.editor.set(passage);
                self.setup_error = None;
                true
            }
            (Screen::Setup, Action::Submit) => {
                match text::normalize(self.editor.value()) {
                    Ok(passage) => {
                        info!(chars = passage.chars().count(), "passage accepted");
                        self.text = Some(passage);
                        self.setup_error = None;
                        self.switch(Screen::Difficulty);
                    }
                    Err(err) => {
                        debug!(%err, "passage rejected");
                        self.setup_error = Some(err);
                    }
                }
                true
            }

            (Screen::Difficulty, Action::MoveSelection(delta)) => {
                let len = Difficulty::ALL.len() as isize;
                let idx = (self.difficulty.index() as isize + delta).rem_euclid(len);
                self.difficulty = Difficulty::from_index(idx as usize).unwrap_or_default();
                true
            }
            (Screen::Difficulty, Action::Choose(difficulty)) => {
                self.difficulty = difficulty;
                self.start_memorize(now);
                true
            }
            (Screen::Difficulty, Action::Back) => {
                self.switch(Screen::Setup);
                true
            }

            (Screen::Memorize, Action::Scroll(delta)) => {
                let row = (self.memorize_scroll as isize).saturating_add(delta).max(0);
                self.memorize_scroll = u16::try_from(row).unwrap_or(u16::MAX);
                true
            }
            (Screen::Memorize, Action::Ready) => {
                // the ticker must be gone before the game is set up
                self.memorize_timer.cancel();
                info!(memorized_secs = self.memorize_secs(), "ready to type");
                self.start_game();
                true
            }

            (Screen::Playing, Action::Type(c)) => self.type_char(c, now),
            (Screen::Playing, Action::Backspace) => match self.session.as_mut() {
                Some(session) => {
                    session.backspace();
                    true
                }
                None => false,
            },
            (Screen::Playing, Action::Restart) => {
                debug!("restarting game");
                self.start_game();
                true
            }

            (Screen::Results, Action::Retry) => {
                self.start_memorize(now);
                true
            }
            (Screen::Results, Action::NewGame) => {
                self.text = None;
                self.editor.clear();
                self.setup_error = None;
                self.session = None;
                self.results = None;
                self.switch(Screen::Setup);
                true
            }

            (screen, action) => {
                debug!(%screen, ?action, "action ignored");
                false
            }
        }
    }

    /// Advance the memorize counter. Only counts while the memorize screen is active.
    pub fn on_tick(&mut self, now: Instant) {
        if self.screen == Screen::Memorize {
            self.memorize_timer.poll(now);
        }
    }

    /// Terminal paste. Fills the editor on the setup screen; dropped everywhere
    /// else so it can never reach the session.
    pub fn paste(&mut self, pasted: &str) -> bool {
        if self.screen != Screen::Setup {
            warn!(screen = %self.screen, chars = pasted.chars().count(), "paste ignored");
            return false;
        }
        for c in pasted.replace("\r\n", "\n").replace('\r', "\n").chars() {
            self.editor.insert(c);
        }
        self.setup_error = None;
        debug!(chars = pasted.chars().count(), "pasted into editor");
        true
    }

    fn type_char(&mut self, c: char, now: Instant) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.push(c, now);

        if session.is_complete() {
            self.results = Results::from_session(session);
            if let Some(results) = &self.results {
                info!(
                    elapsed_secs = results.elapsed_secs,
                    wpm = results.wpm,
                    accuracy = results.accuracy,
                    mistakes = results.mistakes,
                    "game finished"
                );
            }
            self.switch(Screen::Results);
        }
        true
    }

    fn start_memorize(&mut self, now: Instant) {
        self.session = None;
        self.results = None;
        self.memorize_scroll = 0;
        self.memorize_timer.start(now);
        self.switch(Screen::Memorize);
    }

    fn start_game(&mut self) {
        let text = self.text.clone().unwrap_or_default();
        self.session = Some(Session::new(&text, self.difficulty));
        self.results = None;
        self.switch(Screen::Playing);
    }

    fn switch(&mut self, screen: Screen) {
        info!(from = %self.screen, to = %screen, "screen change");
        self.screen = screen;
    }
}
