use uuid::Uuid;

use crate::models::TaskStatus;

/// Pointer travel required before a press turns into a drag.
pub const ACTIVATION_DISTANCE: f64 = 10.0;

/// A pointer position in whatever coordinate space the rendering layer
/// uses (terminal cells, pixels, synthetic test units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Outcome of a completed drag: move the task to the resolved column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub task_id: Uuid,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    // Pressed on a task but not yet past the activation distance.
    Armed { task_id: Uuid, origin: Point },
    Dragging { task_id: Uuid },
}

/// Two-state (idle/dragging) pointer tracker for column reassignment.
///
/// The rendering layer hit-tests pointer positions against its column
/// rectangles and passes resolved targets to [`pointer_up`]; no task
/// mutation happens here. A press only becomes a drag once the pointer
/// travels the activation distance, so plain clicks never move tasks.
///
/// [`pointer_up`]: DragController::pointer_up
#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    state: State,
    activation_distance: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::with_activation_distance(ACTIVATION_DISTANCE)
    }

    pub fn with_activation_distance(activation_distance: f64) -> Self {
        Self {
            state: State::Idle,
            activation_distance,
        }
    }

    /// Records a press on a task element. The machine stays idle until the
    /// pointer moves far enough.
    pub fn pointer_down(&mut self, task_id: Uuid, at: Point) {
        self.state = State::Armed { task_id, origin: at };
    }

    /// Tracks pointer motion, activating the drag once the travel from the
    /// press origin reaches the activation distance.
    pub fn pointer_move(&mut self, to: Point) {
        if let State::Armed { task_id, origin } = self.state {
            if origin.distance(to) >= self.activation_distance {
                self.state = State::Dragging { task_id };
            }
        }
    }

    /// Ends the gesture. Yields a [`DragEnd`] only when a drag was active
    /// and the release point resolved to a known column; any other release
    /// returns to idle with no side effect.
    pub fn pointer_up(&mut self, target: Option<TaskStatus>) -> Option<DragEnd> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        match (state, target) {
            (State::Dragging { task_id }, Some(status)) => Some(DragEnd { task_id, status }),
            _ => None,
        }
    }

    /// Unconditional return to idle.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Id of the task under an active drag, if any.
    pub fn dragging_task(&self) -> Option<Uuid> {
        match self.state {
            State::Dragging { task_id } => Some(task_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn press_alone_does_not_drag() {
        let mut drag = DragController::new();
        drag.pointer_down(Uuid::new_v4(), Point::new(5.0, 5.0));
        assert!(!drag.is_dragging());
        assert_eq!(drag.pointer_up(Some(TaskStatus::Done)), None);
    }

    #[test]
    fn motion_under_the_threshold_stays_idle() {
        let mut drag = DragController::new();
        drag.pointer_down(Uuid::new_v4(), Point::new(0.0, 0.0));
        drag.pointer_move(Point::new(6.0, 6.0)); // ~8.49 units
        assert!(!drag.is_dragging());
    }

    #[test]
    fn motion_at_the_threshold_activates() {
        let id = Uuid::new_v4();
        let mut drag = DragController::new();
        drag.pointer_down(id, Point::new(0.0, 0.0));
        drag.pointer_move(Point::new(10.0, 0.0));
        assert!(drag.is_dragging());
        assert_eq!(drag.dragging_task(), Some(id));
    }

    #[test]
    fn release_over_a_column_yields_the_move() {
        let id = Uuid::new_v4();
        let mut drag = DragController::new();
        drag.pointer_down(id, Point::new(0.0, 0.0));
        drag.pointer_move(Point::new(30.0, 2.0));
        let end = drag.pointer_up(Some(TaskStatus::Doing));
        assert_eq!(
            end,
            Some(DragEnd {
                task_id: id,
                status: TaskStatus::Doing,
            })
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn release_without_a_target_cancels() {
        let mut drag = DragController::new();
        drag.pointer_down(Uuid::new_v4(), Point::new(0.0, 0.0));
        drag.pointer_move(Point::new(30.0, 2.0));
        assert!(drag.is_dragging());
        assert_eq!(drag.pointer_up(None), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn release_without_a_press_is_a_noop() {
        let mut drag = DragController::new();
        assert_eq!(drag.pointer_up(Some(TaskStatus::Todo)), None);
    }

    #[test]
    fn cancel_resets_an_active_drag() {
        let mut drag = DragController::new();
        drag.pointer_down(Uuid::new_v4(), Point::new(0.0, 0.0));
        drag.pointer_move(Point::new(0.0, 20.0));
        drag.cancel();
        assert!(!drag.is_dragging());
        assert_eq!(drag.pointer_up(Some(TaskStatus::Done)), None);
    }

    #[test]
    fn a_new_press_supersedes_the_previous_one() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let mut drag = DragController::new();
        drag.pointer_down(first, Point::new(0.0, 0.0));
        drag.pointer_down(second, Point::new(50.0, 0.0));
        drag.pointer_move(Point::new(50.0, 12.0));
        assert_eq!(drag.dragging_task(), Some(second));
    }

    #[test]
    fn custom_activation_distance_is_honored() {
        let id = Uuid::new_v4();
        let mut drag = DragController::with_activation_distance(2.0);
        drag.pointer_down(id, Point::new(0.0, 0.0));
        drag.pointer_move(Point::new(2.0, 0.0));
        assert!(drag.is_dragging());
    }
}
