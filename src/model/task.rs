/// Column of the kanban board. Also the storage key of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Column {
    #[default]
    ToDo,
    InProgress,
    Done,
}

impl Column {
    /// Columns in board order, left to right
    pub const ALL: [Column; 3] = [Column::ToDo, Column::InProgress, Column::Done];

    pub fn index(self) -> usize {
        match self {
            Column::ToDo => 0,
            Column::InProgress => 1,
            Column::Done => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::ToDo => "todo",
            Column::InProgress => "in_progress",
            Column::Done => "done",
        }
    }

    /// Header shown above the column
    pub fn title(&self) -> &'static str {
        match self {
            Column::ToDo => "To Do",
            Column::InProgress => "In Progress",
            Column::Done => "Done",
        }
    }

    /// Cyclic successor used when a task is advanced. Done wraps to To Do.
    pub fn next(self) -> Self {
        match self {
            Column::ToDo => Column::InProgress,
            Column::InProgress => Column::Done,
            Column::Done => Column::ToDo,
        }
    }

    /// Column to the left, saturating at To Do
    pub fn left(self) -> Self {
        match self {
            Column::ToDo | Column::InProgress => Column::ToDo,
            Column::Done => Column::InProgress,
        }
    }

    /// Column to the right, saturating at Done
    pub fn right(self) -> Self {
        match self {
            Column::ToDo => Column::InProgress,
            Column::InProgress | Column::Done => Column::Done,
        }
    }
}

/// A task on the kanban board.
///
/// The column tag can only be changed from inside the crate, so a task's
/// tag and the column it is stored in are kept in sync by [`ColumnSet`].
///
/// [`ColumnSet`]: super::ColumnSet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    column: Column,
    title: String,
    description: String,
}

impl Task {
    pub fn new(column: Column, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            column,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn set_column(&mut self, column: Column) {
        self.column = column;
    }
}

/// Hard-coded tasks the board starts with
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task::new(Column::ToDo, "Write documentation", "Write documentation for the project"),
        Task::new(Column::ToDo, "Write tests", "Write tests for the project"),
        Task::new(Column::ToDo, "Write code", "Write code for the project"),
        Task::new(Column::InProgress, "SoW", "Write statement of work."),
        Task::new(
            Column::InProgress,
            "Leverage Requirements",
            "Leverage project functional and non-functional requirements.",
        ),
        Task::new(
            Column::InProgress,
            "Architectural Documentation",
            "Write documentation about the solution architecture.",
        ),
        Task::new(Column::Done, "Project Idea", "zzzzz."),
    ]
}
