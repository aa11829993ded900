use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::models::{CreateTask, Task, TaskStatus};

/// The ordered task collection behind the three columns.
///
/// All operations take and apply user input synchronously; invalid input
/// (empty title, unknown id, same-status move) degrades to a silent no-op
/// rather than an error.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Appends a new task in the todo column with a fresh id.
    ///
    /// Returns `None` without touching the collection when the title trims
    /// to empty. The title is stored as typed, untrimmed.
    pub fn add_task(&mut self, payload: &CreateTask) -> Option<Uuid> {
        if payload.title.trim().is_empty() {
            return None;
        }
        let task = Task {
            id: Uuid::new_v4(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            priority: payload.priority,
            status: TaskStatus::Todo,
            created_at: Utc::now(),
        };
        let id = task.id;
        debug!(%id, title = %task.title, "task created");
        self.tasks.push(task);
        Some(id)
    }

    /// Updates only `status` on the matching task; all other fields are
    /// untouched. Unknown ids are ignored.
    pub fn move_task(&mut self, id: Uuid, new_status: TaskStatus) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            debug!(%id, from = task.status.as_str(), to = new_status.as_str(), "task moved");
            task.status = new_status;
        }
    }

    /// Removes the matching task permanently. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: Uuid) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            debug!(%id, "task deleted");
        }
    }

    /// Ordered sub-sequence of tasks in the given column, preserving the
    /// relative order of the backing collection.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use pretty_assertions::assert_eq;

    fn payload(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            ..CreateTask::default()
        }
    }

    fn seeded_board() -> (TaskBoard, Uuid) {
        let mut board = TaskBoard::new();
        let id = board.add_task(&payload("Welcome")).unwrap();
        (board, id)
    }

    #[test]
    fn add_task_appends_in_todo() {
        let mut board = TaskBoard::new();
        let id = board.add_task(&payload("Buy milk")).unwrap();
        assert_eq!(board.len(), 1);
        let task = board.task(id).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.title, "Buy milk");
    }

    #[test]
    fn add_task_rejects_blank_titles() {
        let mut board = TaskBoard::new();
        assert_eq!(board.add_task(&payload("")), None);
        assert_eq!(board.add_task(&payload("   \t ")), None);
        assert!(board.is_empty());
    }

    #[test]
    fn add_task_generates_unique_ids() {
        let mut board = TaskBoard::new();
        let a = board.add_task(&payload("a")).unwrap();
        let b = board.add_task(&payload("b")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn move_task_changes_only_status() {
        let (mut board, id) = seeded_board();
        let before = board.task(id).unwrap().clone();
        board.move_task(id, TaskStatus::Doing);
        let after = board.task(id).unwrap();
        assert_eq!(after.status, TaskStatus::Doing);
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn move_task_unknown_id_is_a_noop() {
        let (mut board, _) = seeded_board();
        let snapshot = board.tasks().to_vec();
        board.move_task(Uuid::new_v4(), TaskStatus::Done);
        assert_eq!(board.tasks(), snapshot.as_slice());
    }

    #[test]
    fn move_task_to_same_status_keeps_content() {
        let (mut board, id) = seeded_board();
        let snapshot = board.tasks().to_vec();
        board.move_task(id, TaskStatus::Todo);
        assert_eq!(board.tasks(), snapshot.as_slice());
    }

    #[test]
    fn delete_task_removes_exactly_one() {
        let mut board = TaskBoard::new();
        let a = board.add_task(&payload("a")).unwrap();
        let b = board.add_task(&payload("b")).unwrap();
        let c = board.add_task(&payload("c")).unwrap();
        board.delete_task(b);
        let ids: Vec<Uuid> = board.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn delete_task_unknown_id_is_a_noop() {
        let (mut board, _) = seeded_board();
        let snapshot = board.tasks().to_vec();
        board.delete_task(Uuid::new_v4());
        assert_eq!(board.tasks(), snapshot.as_slice());
    }

    #[test]
    fn columns_partition_the_board() {
        let mut board = TaskBoard::new();
        for i in 0..6 {
            board.add_task(&payload(&format!("t{i}")));
        }
        let ids: Vec<Uuid> = board.tasks().iter().map(|t| t.id).collect();
        board.move_task(ids[1], TaskStatus::Doing);
        board.move_task(ids[4], TaskStatus::Done);
        board.move_task(ids[5], TaskStatus::Doing);

        let mut seen: Vec<Uuid> = Vec::new();
        for status in TaskStatus::ALL {
            for task in board.tasks_by_status(status) {
                assert!(!seen.contains(&task.id), "task in more than one column");
                assert_eq!(task.status, status);
                seen.push(task.id);
            }
        }
        assert_eq!(seen.len(), board.len());
    }

    #[test]
    fn tasks_by_status_preserves_relative_order() {
        let mut board = TaskBoard::new();
        let a = board.add_task(&payload("a")).unwrap();
        let b = board.add_task(&payload("b")).unwrap();
        let c = board.add_task(&payload("c")).unwrap();
        board.move_task(b, TaskStatus::Doing);
        let todo: Vec<Uuid> = board
            .tasks_by_status(TaskStatus::Todo)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(todo, vec![a, c]);
    }

    #[test]
    fn seeded_scenario() {
        let (mut board, seed_id) = seeded_board();

        let milk_id = board
            .add_task(&CreateTask {
                title: "Buy milk".to_string(),
                description: None,
                priority: Priority::Low,
            })
            .unwrap();
        assert_eq!(board.len(), 2);
        let milk = board.task(milk_id).unwrap();
        assert_eq!(milk.status, TaskStatus::Todo);
        assert_eq!(milk.priority, Priority::Low);

        board.move_task(milk_id, TaskStatus::Doing);
        let doing = board.tasks_by_status(TaskStatus::Doing);
        assert_eq!(doing.len(), 1);
        assert_eq!(doing[0].title, "Buy milk");
        assert_eq!(board.tasks_by_status(TaskStatus::Todo).len(), 1);

        board.delete_task(seed_id);
        assert!(board.tasks_by_status(TaskStatus::Todo).is_empty());
        assert_eq!(board.len(), 1);
    }
}
