// Re-export core types
pub use taskboard_core::board::TaskBoard;
pub use taskboard_core::drag::{DragController, DragEnd, Point};
pub use taskboard_core::models::{CreateTask, Priority, Task, TaskStatus};

/// Extension trait for TaskStatus with TUI-specific display helpers
pub trait TaskStatusExt {
    fn label(&self) -> &'static str;
    fn next(&self) -> TaskStatus;
    fn previous(&self) -> TaskStatus;
}

impl TaskStatusExt for TaskStatus {
    fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::Doing => "Doing",
            TaskStatus::Done => "Done",
        }
    }

    fn next(&self) -> TaskStatus {
        match self {
            TaskStatus::Todo => TaskStatus::Doing,
            TaskStatus::Doing => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }

    fn previous(&self) -> TaskStatus {
        match self {
            TaskStatus::Todo => TaskStatus::Done,
            TaskStatus::Doing => TaskStatus::Todo,
            TaskStatus::Done => TaskStatus::Doing,
        }
    }
}

/// Extension trait for Priority with TUI-specific display helpers
pub trait PriorityExt {
    fn badge(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn next(&self) -> Priority;
    fn previous(&self) -> Priority;
}

impl PriorityExt for Priority {
    fn badge(&self) -> &'static str {
        match self {
            Priority::Low => "L",
            Priority::Medium => "M",
            Priority::High => "H",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    fn next(&self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    fn previous(&self) -> Priority {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}
