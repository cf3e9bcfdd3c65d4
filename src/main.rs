use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use recite::{
    app::{Action, App, Screen},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    difficulty::Difficulty,
    logging,
    runtime::{self, CrosstermEventSource, FixedTicker, Runner},
    text, ui,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::info;

/// memorize a passage, then type it back from memory
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Memorize a passage for as long as you like, then reproduce it from memory in a timed typing test. Easier levels reveal a few upcoming characters as hints."
)]
pub struct Cli {
    /// passage to memorize (prefills the setup screen)
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// read the passage from a plain text file
    #[clap(short = 'f', long, conflicts_with = "prompt")]
    file: Option<PathBuf>,

    /// difficulty to play; together with a passage this skips straight to memorizing
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// event loop tick in milliseconds
    #[clap(long)]
    tick_rate: Option<u64>,

    /// save the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line flags over the stored config
    fn merge_into(&self, mut config: Config) -> Config {
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_ms = tick_rate.max(1);
        }
        config
    }

    fn initial_text(&self) -> Result<Option<String>, text::TextError> {
        match (&self.file, &self.prompt) {
            (Some(path), _) => text::load_file(path).map(Some),
            (None, Some(prompt)) => Ok(Some(prompt.clone())),
            (None, None) => Ok(None),
        }
    }
}

/// Build the starting app state from flags and config
fn build_app(cli: &Cli, config: &Config, now: Instant) -> Result<App, Box<dyn Error>> {
    let mut app = match cli.initial_text()? {
        Some(passage) => App::with_text(&passage, config.difficulty),
        None => App::new(config.difficulty),
    };

    if let (Some(difficulty), false) = (cli.difficulty, app.editor.is_empty()) {
        app.apply(Action::Submit, now);
        if app.screen == Screen::Difficulty {
            app.apply(Action::Choose(difficulty), now);
        }
    }

    Ok(app)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.merge_into(store.load());
    logging::init(AppDirs::log_path().as_deref(), &config.log_level);
    info!(?config, "starting recite");

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    let mut app = build_app(&cli, &config, Instant::now())?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.tick_rate_ms.max(1)),
    );

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick_rate));

    terminal.draw(|f| ui::draw(app, f))?;
    while !app.should_quit {
        let event = runner.step();
        if runtime::dispatch(app, event, Instant::now()) {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    Ok(())
}
