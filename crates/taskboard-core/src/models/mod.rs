mod task;

pub use task::{CreateTask, Priority, Task, TaskStatus};
