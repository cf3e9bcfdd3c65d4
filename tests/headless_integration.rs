use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use recite::app::{App, Screen};
use recite::difficulty::Difficulty;
use recite::runtime::{dispatch, AppEvent, FixedTicker, Runner, TestEventSource};

// Headless integration using the internal runtime without a TTY.
// Keys go through the same keymap + dispatch path as the binary.

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn send_text(tx: &Sender<AppEvent>, text: &str) {
    for c in text.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

/// Drain events until `done` holds or the step budget runs out
fn drive(
    app: &mut App,
    runner: &Runner<TestEventSource, FixedTicker>,
    steps: u32,
    done: impl Fn(&App) -> bool,
) {
    for _ in 0..steps {
        let event = runner.step();
        dispatch(app, event, Instant::now());
        if done(app) {
            break;
        }
    }
}

fn runner() -> (Sender<AppEvent>, Runner<TestEventSource, FixedTicker>) {
    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    (tx, Runner::new(es, ticker))
}

#[test]
fn headless_full_game_reaches_results() {
    let mut app = App::with_text("  hello   there world  ", Difficulty::Easy);
    let (tx, runner) = runner();

    tx.send(ctrl('s')).unwrap();
    tx.send(key(KeyCode::Char('3'))).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    // one slip, corrected with backspace
    tx.send(key(KeyCode::Char('j'))).unwrap();
    tx.send(key(KeyCode::Backspace)).unwrap();
    send_text(&tx, "hello there world");

    drive(&mut app, &runner, 200, |app| app.screen == Screen::Results);

    assert_eq!(app.screen, Screen::Results);
    let results = app.results.as_ref().expect("results after finishing");
    assert_eq!(results.difficulty, Difficulty::Hard);
    assert_eq!(results.mistakes, 1);
    assert_eq!(results.chars, 17);
    // 17 chars, one mistake: round(16 / 17 * 100)
    assert_eq!(results.accuracy, 94);
    // fast typist: elapsed is floored to one second
    assert_eq!(results.elapsed_secs, 1.0);
}

#[test]
fn headless_retry_goes_back_to_memorize() {
    let mut app = App::with_text("short but valid", Difficulty::Medium);
    let (tx, runner) = runner();

    tx.send(ctrl('s')).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Char(' '))).unwrap();
    send_text(&tx, "short but valid");
    tx.send(key(KeyCode::Char('r'))).unwrap();

    drive(&mut app, &runner, 200, |app| {
        app.screen == Screen::Memorize && app.results.is_none()
    });

    assert_eq!(app.screen, Screen::Memorize);
    assert_eq!(app.difficulty, Difficulty::Medium);
    assert_eq!(app.text.as_deref(), Some("short but valid"));
    assert!(app.memorize_timer.is_running());
}

#[test]
fn headless_paste_is_ignored_while_playing() {
    let mut app = App::with_text("no shortcuts here", Difficulty::Easy);
    let (tx, runner) = runner();

    tx.send(ctrl('s')).unwrap();
    tx.send(key(KeyCode::Char('e'))).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(AppEvent::Paste("no shortcuts here".into())).unwrap();

    drive(&mut app, &runner, 20, |_| false);

    assert_eq!(app.screen, Screen::Playing);
    let session = app.session.as_ref().unwrap();
    assert_eq!(session.input_len(), 0);
    assert_eq!(session.mistakes(), 0);
}

#[test]
fn headless_memorize_clock_counts_ticks() {
    let mut app = App::with_text("watch the clock tick", Difficulty::Easy);
    let (tx, runner) = runner();

    tx.send(ctrl('s')).unwrap();
    tx.send(key(KeyCode::Char('1'))).unwrap();

    // up to ~2s of 5ms ticks
    drive(&mut app, &runner, 400, |app| app.memorize_secs() >= 1);

    assert_eq!(app.screen, Screen::Memorize);
    assert!(app.memorize_secs() >= 1);
}

#[test]
fn headless_ctrl_c_quits_from_any_screen() {
    let mut app = App::with_text("quit from difficulty", Difficulty::Easy);
    let (tx, runner) = runner();

    tx.send(ctrl('s')).unwrap();
    tx.send(ctrl('c')).unwrap();

    drive(&mut app, &runner, 20, |app| app.should_quit);

    assert!(app.should_quit);
    assert_eq!(app.screen, Screen::Difficulty);
}
