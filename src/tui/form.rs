use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use super::input::{ActiveField, TextField};
use crate::model::{Column, Task};

/// Form mode: a title field, a description field and the column new tasks go to.
#[derive(Debug)]
pub struct FormController {
    target_column: Column,
    active_field: ActiveField,
    title: TextField,
    description: TextField,
}

impl FormController {
    pub fn new(target_column: Column) -> Self {
        let mut form = Self {
            target_column,
            active_field: ActiveField::Title,
            title: TextField::single_line(),
            description: TextField::multi_line(),
        };
        form.open(target_column);
        form
    }

    /// Reset the form for a new task that will land in `column`
    pub fn open(&mut self, column: Column) {
        self.target_column = column;
        self.title.clear();
        self.description.clear();
        self.focus(ActiveField::Title);
    }

    pub fn target_column(&self) -> Column {
        self.target_column
    }

    pub fn active_field(&self) -> ActiveField {
        self.active_field
    }

    pub fn title(&self) -> &TextField {
        &self.title
    }

    pub fn description(&self) -> &TextField {
        &self.description
    }

    /// Feed a key to the form. Returns the created task when the
    /// description is confirmed; the form is then reset for reuse.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Task> {
        match key.code {
            KeyCode::Enter => self.handle_enter(key),
            KeyCode::Tab => {
                let next = match self.active_field {
                    ActiveField::Title => ActiveField::Description,
                    ActiveField::Description => ActiveField::Title,
                };
                self.focus(next);
                None
            }
            _ => {
                self.active_mut().handle_key(key);
                None
            }
        }
    }

    fn handle_enter(&mut self, key: KeyEvent) -> Option<Task> {
        match self.active_field {
            ActiveField::Title => {
                self.focus(ActiveField::Description);
                None
            }
            ActiveField::Description => {
                if key.modifiers.contains(KeyModifiers::ALT) {
                    self.description.insert_newline();
                    return None;
                }
                Some(self.submit())
            }
        }
    }

    fn submit(&mut self) -> Task {
        let task = Task::new(
            self.target_column,
            self.title.value(),
            self.description.value(),
        );
        info!(title = task.title(), column = self.target_column.as_str(), "task created");
        self.open(self.target_column);
        task
    }

    fn focus(&mut self, field: ActiveField) {
        debug!(?field, "form field focused");
        self.active_field = field;
        match field {
            ActiveField::Title => {
                self.description.blur();
                self.title.focus();
            }
            ActiveField::Description => {
                self.title.blur();
                self.description.focus();
            }
        }
    }

    fn active_mut(&mut self) -> &mut TextField {
        match self.active_field {
            ActiveField::Title => &mut self.title,
            ActiveField::Description => &mut self.description,
        }
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(Column::ToDo)
    }
}
