use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, error};

use crate::model::{Column, ColumnSet, Task};

/// Rows reserved around the column lists (header, borders, footer)
const LIST_CHROME_HEIGHT: u16 = 5;

/// Board mode: owns the columns, the focused column and the advance operation.
///
/// Columns are only handed out by shared reference, so `advance_selected`
/// and `insert_created_task` are the only ways tasks move between columns.
#[derive(Debug)]
pub struct BoardController {
    columns: ColumnSet,
    focused: Column,
    viewport: (u16, u16),
}

impl BoardController {
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            focused: Column::ToDo,
            viewport: (0, 0),
        }
    }

    pub fn focused(&self) -> Column {
        self.focused
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Last terminal size reported by a resize event
    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Height available to a column's task list
    pub fn list_height(&self) -> u16 {
        self.viewport.1.saturating_sub(LIST_CHROME_HEIGHT)
    }

    /// Move focus left, stopping at To Do
    pub fn focus_left(&mut self) {
        self.focused = self.focused.left();
    }

    /// Move focus right, stopping at Done
    pub fn focus_right(&mut self) {
        self.focused = self.focused.right();
    }

    pub fn select_up(&mut self) {
        self.columns.select_prev(self.focused);
    }

    pub fn select_down(&mut self) {
        self.columns.select_next(self.focused);
    }

    /// Move the selected task of the focused column to the end of its next column.
    ///
    /// No-op on an empty column.
    pub fn advance_selected(&mut self) {
        let from = self.focused;
        let Some(index) = self.columns.selected_index(from) else {
            return;
        };

        match self.columns.remove_at(from, index) {
            Ok(mut task) => {
                let to = task.column().next();
                task.set_column(to);
                debug!(title = task.title(), from = from.as_str(), to = to.as_str(), "advanced task");
                self.columns.append(to, task);
            }
            Err(err) => error!(%err, "failed to advance selected task"),
        }
    }

    /// Append a task created by the form to the column it is tagged with
    pub fn insert_created_task(&mut self, task: Task) {
        let column = task.column();
        debug!(title = task.title(), column = column.as_str(), "inserted created task");
        self.columns.append(column, task);
    }

    /// Record the new terminal size. Tasks and selection are left untouched.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.focus_left(),
            KeyCode::Char('l') | KeyCode::Right => self.focus_right(),
            KeyCode::Char('k') | KeyCode::Up => self.select_up(),
            KeyCode::Char('j') | KeyCode::Down => self.select_down(),
            KeyCode::Enter => self.advance_selected(),
            _ => {}
        }
    }
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new(ColumnSet::seeded())
    }
}
