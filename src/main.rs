use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use keycalc::config::{DecimalSeparator, DisplayConfig};
use keycalc::display::{Readout, HELP};
use keycalc::keymap::{map_key, KeyAction};
use keycalc::Engine;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "keycalc")]
#[command(about = "Keystroke-driven two-operand calculator")]
struct Cli {
    /// Decimal separator used on screen
    #[arg(
        long,
        value_enum,
        env = "KEYCALC_DECIMAL_SEPARATOR",
        default_value_t = DecimalSeparator::Point
    )]
    decimal_separator: DecimalSeparator,

    /// Feed these keys to the engine and print the resulting line instead of
    /// opening the interactive screen
    #[arg(long)]
    keys: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = DisplayConfig::with_separator(cli.decimal_separator);
    info!(separator = ?config.decimal_separator, "starting keycalc");

    match cli.keys.as_deref() {
        Some(keys) => run_script(keys, &config),
        None => run_interactive(&config),
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let default_directive = if cli.debug {
        "keycalc=debug,warn"
    } else {
        "keycalc=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    match &cli.log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(env_filter)
                .init();
        }
    }
    Ok(())
}

fn run_script(keys: &str, config: &DisplayConfig) -> Result<()> {
    let mut engine = Engine::new();
    for c in keys.chars() {
        let category = engine.process(c);
        debug!(input = ?c, ?category, state = %engine.state(), "scripted key");
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", Readout::from_engine(&engine, config))
        .context("failed to write result")?;
    Ok(())
}

/// Restores the terminal when the interactive session ends, even on error.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)
            .context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn run_interactive(config: &DisplayConfig) -> Result<()> {
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;
    let mut engine = Engine::new();

    loop {
        render(&mut stdout, &engine, config)?;

        let Event::Key(key) = event::read().context("failed to read terminal event")? else {
            continue;
        };
        match map_key(&key) {
            KeyAction::Quit => break,
            KeyAction::Input(c) => {
                engine.process(c);
            }
            KeyAction::Ignore => {}
        }
    }

    info!(transitions = engine.history().transitions().len(), "session closed");
    Ok(())
}

fn render(out: &mut impl Write, engine: &Engine, config: &DisplayConfig) -> Result<()> {
    queue!(
        out,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print(HELP),
        cursor::MoveTo(0, 1),
        Print(Readout::from_engine(engine, config)),
    )
    .context("failed to draw screen")?;
    out.flush().context("failed to flush screen")?;
    Ok(())
}
