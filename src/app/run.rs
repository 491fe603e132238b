use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use exam_score_predictor::cache::ModelCache;
use exam_score_predictor::config::Config;
use exam_score_predictor::session::{Action, Command, Session};

use crate::ui;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn command_for(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Up | KeyCode::BackTab => Some(Command::FocusPrev),
        KeyCode::Down | KeyCode::Tab => Some(Command::FocusNext),
        KeyCode::Left | KeyCode::Char('-') => Some(Command::Decrease),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char(' ') => Some(Command::Increase),
        KeyCode::Enter => Some(Command::Submit),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Runs the prediction form until the user quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(config: &Config, cache: &ModelCache) -> Result<()> {
    let mut session = Session::start(config, cache);

    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| ui::draw::draw(f, &session))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(command) = command_for(k.code) else {
                    continue;
                };
                if session.handle(command) == Action::Quit {
                    break;
                }
            }
        }
    }

    info!("Exiting");
    terminal.show_cursor()?;
    Ok(())
}
