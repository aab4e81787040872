use thiserror::Error;

use super::task::{Column, Task};

/// Errors raised by [`ColumnSet`] index operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColumnError {
    #[error("index {index} out of range for column {column:?} with {len} tasks")]
    IndexOutOfRange { column: Column, index: usize, len: usize },
}

/// Three ordered task lists, one per column, each with its own cursor.
///
/// Cursors are kept inside `[0, len)`; an empty column has no selection.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    lists: [Vec<Task>; 3],
    cursors: [usize; 3],
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a column set from tasks, each placed in the column it is tagged with
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut set = Self::new();
        for task in tasks {
            set.append(task.column(), task);
        }
        set
    }

    /// Column set holding the startup tasks
    pub fn seeded() -> Self {
        Self::from_tasks(super::seed_tasks())
    }

    pub fn tasks(&self, column: Column) -> &[Task] {
        &self.lists[column.index()]
    }

    pub fn len(&self, column: Column) -> usize {
        self.lists[column.index()].len()
    }

    pub fn is_empty(&self, column: Column) -> bool {
        self.lists[column.index()].is_empty()
    }

    /// Number of tasks across all columns
    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn selected_index(&self, column: Column) -> Option<usize> {
        if self.is_empty(column) {
            None
        } else {
            Some(self.cursors[column.index()])
        }
    }

    /// Task under the cursor of a column
    pub fn selected(&self, column: Column) -> Option<&Task> {
        self.selected_index(column)
            .and_then(|i| self.lists[column.index()].get(i))
    }

    /// Move the cursor down one task, stopping at the last one
    pub fn select_next(&mut self, column: Column) {
        let len = self.len(column);
        let cursor = &mut self.cursors[column.index()];
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    /// Move the cursor up one task, stopping at the first one
    pub fn select_prev(&mut self, column: Column) {
        let cursor = &mut self.cursors[column.index()];
        *cursor = cursor.saturating_sub(1);
    }

    /// Insert a task at `index`, clamped into `[0, len]`.
    ///
    /// The cursor keeps pointing at the task it selected before. The task's
    /// column tag is not checked against `column`.
    pub fn insert(&mut self, column: Column, index: usize, task: Task) {
        let slot = column.index();
        let list = &mut self.lists[slot];
        let was_empty = list.is_empty();
        let index = index.min(list.len());
        list.insert(index, task);
        if !was_empty && index <= self.cursors[slot] {
            self.cursors[slot] += 1;
        }
        self.clamp_cursor(column);
    }

    pub fn append(&mut self, column: Column, task: Task) {
        let len = self.len(column);
        self.insert(column, len, task);
    }

    pub fn remove_at(&mut self, column: Column, index: usize) -> Result<Task, ColumnError> {
        let list = &mut self.lists[column.index()];
        if index >= list.len() {
            return Err(ColumnError::IndexOutOfRange {
                column,
                index,
                len: list.len(),
            });
        }
        let task = list.remove(index);
        self.clamp_cursor(column);
        Ok(task)
    }

    fn clamp_cursor(&mut self, column: Column) {
        let len = self.len(column);
        let cursor = &mut self.cursors[column.index()];
        if len == 0 {
            *cursor = 0;
        } else if *cursor >= len {
            *cursor = len - 1;
        }
    }
}
