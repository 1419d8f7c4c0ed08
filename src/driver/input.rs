use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::driver::orchestrator::StopHandle;

/// Discrete command consumed by the render loop once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    FocusNext,
    FocusPrevious,
    ToggleDebug,
    NextScene,
    Quit,
}

impl Command {
    /// Scroll delta for directional commands.
    pub fn scroll_delta(self) -> Option<(i32, i32)> {
        match self {
            Self::Up => Some((0, -1)),
            Self::Down => Some((0, 1)),
            Self::Left => Some((-1, 0)),
            Self::Right => Some((1, 0)),
            _ => None,
        }
    }
}

/// Map a terminal key press to a command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Right),
        KeyCode::Tab => Some(Command::FocusNext),
        KeyCode::BackTab => Some(Command::FocusPrevious),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::ToggleDebug),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::NextScene),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Multi-producer, single-consumer command queue.
///
/// Producers hold cloned [`Sender`]s and may live on any thread; the render loop drains the
/// queue without blocking at the start of each tick.
#[derive(Debug)]
pub struct InputQueue {
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Command> {
        self.tx.clone()
    }

    pub fn push(&self, cmd: Command) {
        // the receiver lives in `self`, so sending cannot fail
        let _ = self.tx.send(cmd);
    }

    /// Everything queued so far, oldest first. Never blocks.
    pub fn drain(&self) -> Vec<Command> {
        self.rx.try_iter().collect()
    }

    /// Read keyboard events on a background thread until `stop` is raised.
    ///
    /// The terminal must already be in raw mode for single key presses to arrive.
    pub fn spawn_terminal_reader(&self, stop: StopHandle) -> std::io::Result<JoinHandle<()>> {
        let tx = self.sender();
        thread::Builder::new()
            .name("matrix-composer-input".to_owned())
            .spawn(move || read_terminal_keys(&tx, &stop))
    }
}

fn read_terminal_keys(tx: &Sender<Command>, stop: &StopHandle) {
    while !stop.is_stopped() {
        match event::poll(Duration::from_millis(50)) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                tracing::warn!(error = %err, "input poll failed; reader exiting");
                return;
            }
        }
        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(error = %err, "input read failed; reader exiting");
                return;
            }
        };
        if let Some(cmd) = map_key(key) {
            tracing::trace!(?cmd, "input command");
            if tx.send(cmd).is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/input.rs"]
mod tests;
