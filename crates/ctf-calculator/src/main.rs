//! ctf-calc: the calculator challenge in a terminal
//!
//! ## Usage
//!
//! ```bash
//! ctf-calc                          # Interactive terminal page
//! ctf-calc --keys '1337+1337='      # Replay keys, print the page state
//! ctf-calc --reset                  # Forget a solved challenge
//! ctf-calc --config calc.yaml       # Load settings from YAML
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ctf_calculator::config::{CalculatorConfig, ConfigError};
use ctf_calculator::core::FlagField;
use ctf_calculator::flag::{completion_state, CompletionStore, FileStore, StoreError};
use ctf_calculator::logging;
use ctf_calculator::tui::{hit_test, render, InputHandler, PageLayout, TerminalApp};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use thiserror::Error;
use tracing::{debug, info};

/// How often the event loop wakes up to run deferred page work
const TICK: Duration = Duration::from_millis(100);

/// Calculator with a hidden flag
#[derive(Debug, Parser)]
#[command(name = "ctf-calc", version, about)]
struct Cli {
    /// YAML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay keys without opening the terminal page, then print its state.
    /// `<Enter>`, `<Esc>` and `<Backspace>` name the special keys
    #[arg(short, long, value_name = "SCRIPT")]
    keys: Option<String>,

    /// Forget a previous completion and exit
    #[arg(long, conflicts_with = "keys")]
    reset: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "CTF_CALC_LOG")]
    log_level: Option<String>,
}

/// Errors that end the program
#[derive(Debug, Error)]
enum CliError {
    /// Settings file could not be used
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Completion file could not be used
    #[error("Completion store error: {0}")]
    Store(#[from] StoreError),

    /// Terminal failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let interactive = cli.keys.is_none() && !cli.reset;
    match (&config.log_file, interactive) {
        (Some(path), _) => logging::init_to_file(&config.log_level, path)?,
        // the terminal page owns the screen; stay quiet unless a log file is set
        (None, true) => {}
        (None, false) => logging::init(&config.log_level),
    }

    let mut store = FileStore::new(&config.storage_path);
    if cli.reset {
        store.reset()?;
        println!("Completion cleared: {}", store.path().display());
        return Ok(());
    }
    info!(completed = completion_state(&store), "starting");

    let mut app = TerminalApp::new(store, config);
    match cli.keys {
        Some(script) => {
            app.replay(&script);
            print_state(&app);
            Ok(())
        }
        None => run_terminal(&mut app),
    }
}

fn print_state(app: &TerminalApp<FileStore>) {
    let page = app.page();
    println!("display: {}", page.display());
    if let Some(flag) = page.flag_value() {
        println!("flag:    {flag}");
    }
    if let Some((text, _)) = page.message() {
        println!("message: {text}");
    }
}

fn run_terminal(app: &mut TerminalApp<FileStore>) -> CliResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut TerminalApp<FileStore>,
) -> CliResult<()> {
    let input_handler = InputHandler::new();

    while !app.should_quit() {
        app.tick(Instant::now());
        terminal.draw(|f| render(app.page(), f))?;

        if !event::poll(TICK)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                let action = input_handler.handle_key(key, app.page().focus());
                app.handle(action);
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let size = terminal.size()?;
                let layout = PageLayout::new(Rect::new(0, 0, size.width, size.height));
                let clicked = app
                    .page()
                    .keypad()
                    .and_then(|keypad| hit_test(keypad, layout.keypad, column, row))
                    .map(str::to_string);
                if let Some(id) = clicked {
                    debug!(%id, "mouse click");
                    app.click(&id);
                }
            }
            _ => {}
        }
    }

    Ok(())
}
