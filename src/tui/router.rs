use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use super::board::BoardController;
use super::form::FormController;
use crate::model::Task;

/// Input delivered to the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Emitted by the form when a task is submitted
    TaskCreated(Task),
}

/// Which controller receives raw input and is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Board,
    Form,
}

/// What the host loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Top-level dispatcher between the board and the form.
///
/// Only the controller matching `mode` sees key input; the other keeps its
/// state untouched until it becomes active again.
#[derive(Debug, Default)]
pub struct AppRouter {
    mode: Mode,
    board: BoardController,
    form: FormController,
}

impl AppRouter {
    pub fn new(board: BoardController, form: FormController) -> Self {
        Self {
            mode: Mode::Board,
            board,
            form,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn board(&self) -> &BoardController {
        &self.board
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn dispatch(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Resize { width, height } => {
                self.board.resize(width, height);
                Flow::Continue
            }
            AppEvent::TaskCreated(task) => {
                self.board.insert_created_task(task);
                self.switch_mode(Mode::Board);
                Flow::Continue
            }
            AppEvent::Key(key) => self.dispatch_key(key),
        }
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("quit requested");
            return Flow::Quit;
        }

        match self.mode {
            Mode::Board => match key.code {
                KeyCode::Char('q') => {
                    info!("quit requested");
                    Flow::Quit
                }
                KeyCode::Char('n') => {
                    self.form.open(self.board.focused());
                    self.switch_mode(Mode::Form);
                    Flow::Continue
                }
                _ => {
                    self.board.handle_key(key);
                    Flow::Continue
                }
            },
            Mode::Form => match key.code {
                KeyCode::Esc => {
                    self.switch_mode(Mode::Board);
                    Flow::Continue
                }
                _ => match self.form.handle_key(key) {
                    Some(task) => self.dispatch(AppEvent::TaskCreated(task)),
                    None => Flow::Continue,
                },
            },
        }
    }

    fn switch_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = ?self.mode, to = ?mode, "mode switched");
            self.mode = mode;
        }
    }
}
