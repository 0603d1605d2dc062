//! Terminal multi-select prompt
//!
//! A crossterm raw-mode checkbox menu implementing the core `Selector`
//! boundary. Up/Down (or k/j) move, Space toggles, Enter confirms, Esc or q
//! cancels.

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::tty::IsTty;
use crossterm::execute;
use std::io::{self, Write};
use vmusb_core::{Choice, DeviceKey, Error, Result, Selector};

/// User actions derived from keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Up,
    Down,
    Toggle,
    Confirm,
    Cancel,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Cancel,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Char(' ') => Action::Toggle,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc | KeyCode::Char('q') => Action::Cancel,
            _ => Action::None,
        }
    }
}

/// Restores cooked mode even on early return or panic
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().map_err(|e| Error::Selection(e.to_string()))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn select(&mut self, title: &str, choices: &[Choice]) -> Result<Option<Vec<DeviceKey>>> {
        if choices.is_empty() {
            return Ok(Some(Vec::new()));
        }

        let mut stdout = io::stdout();
        if !stdout.is_tty() {
            return Err(Error::Selection(
                "a terminal is required for interactive selection".to_string(),
            ));
        }

        let mut selected: Vec<bool> = choices.iter().map(|c| c.selected).collect();
        let mut row = 0usize;

        let _guard = RawModeGuard::enable()?;
        execute!(
            stdout,
            Print(format!(
                "{} (space toggles, enter confirms, esc cancels)\r\n",
                title
            ))
        )
        .map_err(to_selection_error)?;
        draw(&mut stdout, choices, &selected, row)?;

        let confirmed = loop {
            let Event::Key(key) = event::read().map_err(to_selection_error)? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match Action::from(key) {
                Action::Up => row = row.saturating_sub(1),
                Action::Down => row = (row + 1).min(choices.len() - 1),
                Action::Toggle => selected[row] = !selected[row],
                Action::Confirm => break true,
                Action::Cancel => break false,
                Action::None => continue,
            }
            execute!(stdout, MoveUp(choices.len() as u16)).map_err(to_selection_error)?;
            draw(&mut stdout, choices, &selected, row)?;
        };

        if !confirmed {
            return Ok(None);
        }
        Ok(Some(
            choices
                .iter()
                .zip(&selected)
                .filter(|(_, on)| **on)
                .map(|(choice, _)| choice.key.clone())
                .collect(),
        ))
    }
}

fn draw(out: &mut impl Write, choices: &[Choice], selected: &[bool], row: usize) -> Result<()> {
    for (i, choice) in choices.iter().enumerate() {
        let cursor = if i == row { '>' } else { ' ' };
        let mark = if selected[i] { 'x' } else { ' ' };
        execute!(
            out,
            Clear(ClearType::CurrentLine),
            MoveToColumn(0),
            Print(format!("{} [{}] {}\r\n", cursor, mark, choice.label))
        )
        .map_err(to_selection_error)?;
    }
    Ok(())
}

fn to_selection_error(e: io::Error) -> Error {
    Error::Selection(e.to_string())
}
