use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use crate::models::{CreateTask, TaskStatus};

/// Application actions that can be triggered by events
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Action {
    // Tick and Render
    Tick,
    Render,
    Resize(u16, u16),

    // Terminal actions
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),

    // Navigation
    NextTask,
    PreviousTask,
    NextColumn,
    PreviousColumn,

    // Modals
    ToggleHelp,

    // Task form
    NewTask,
    CancelInput,
    SubmitInput,
    NextField,
    PreviousField,
    InsertChar(char),
    DeleteBackward,
    DeleteForward,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,

    // Board mutations
    AddTask(CreateTask),
    DeleteSelectedTask,
    AdvanceSelectedTask,
    MoveSelectedTask(TaskStatus),
    MoveTask(Uuid, TaskStatus),
}
