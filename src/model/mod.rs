mod columns;
mod task;

pub use columns::{ColumnError, ColumnSet};
pub use task::{seed_tasks, Column, Task};
