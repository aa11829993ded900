//! Domain logic for the task board: the task model, the board collection
//! manager, and the drag-interaction state machine.
//!
//! This crate has no I/O and no terminal dependency; clients feed it user
//! input (form payloads, pointer events) and render read-only snapshots.

pub mod board;
pub mod drag;
pub mod models;

pub use board::TaskBoard;
pub use drag::{DragController, DragEnd, Point};
pub use models::{CreateTask, Priority, Task, TaskStatus};
