use color_eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Position, prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use super::Component;
use crate::models::{
    CreateTask, DragController, Point, Priority, PriorityExt, Task, TaskBoard, TaskStatus,
    TaskStatusExt,
};
use crate::{action::Action, config::Config};

/// The three-column board: owns the task collection and the drag tracker,
/// and translates keyboard/mouse input into board mutations.
pub struct Board {
    command_tx: Option<UnboundedSender<Action>>,
    config: Config,
    board: TaskBoard,
    drag: DragController,
    selected_column: TaskStatus,
    selected_index: usize,
    // Hit-test rectangles recorded at draw time
    column_areas: Vec<(TaskStatus, Rect)>,
    card_areas: Vec<(Uuid, Rect)>,
    // Column under the pointer during an active drag
    drag_over: Option<TaskStatus>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        let mut board = TaskBoard::new();
        board.add_task(&CreateTask {
            title: "Welcome to your board".to_string(),
            description: Some("Drag tasks between columns, or press ? for keys".to_string()),
            priority: Priority::Medium,
        });
        Self {
            command_tx: None,
            config: Config::default(),
            board,
            drag: DragController::new(),
            selected_column: TaskStatus::Todo,
            selected_index: 0,
            column_areas: Vec::new(),
            card_areas: Vec::new(),
            drag_over: None,
        }
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.board
            .tasks_by_status(self.selected_column)
            .get(self.selected_index)
            .copied()
    }

    fn next_task(&mut self) {
        let count = self.board.tasks_by_status(self.selected_column).len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    fn previous_task(&mut self) {
        let count = self.board.tasks_by_status(self.selected_column).len();
        if count > 0 {
            self.selected_index = if self.selected_index == 0 {
                count - 1
            } else {
                self.selected_index - 1
            };
        }
    }

    fn next_column(&mut self) {
        self.selected_column = self.selected_column.next();
        self.selected_index = 0;
    }

    fn previous_column(&mut self) {
        self.selected_column = self.selected_column.previous();
        self.selected_index = 0;
    }

    fn clamp_selection(&mut self) {
        let count = self.board.tasks_by_status(self.selected_column).len();
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    fn column_at(&self, position: Position) -> Option<TaskStatus> {
        self.column_areas
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(status, _)| *status)
    }

    fn card_at(&self, position: Position) -> Option<Uuid> {
        self.card_areas
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(id, _)| *id)
    }

    /// Moves keyboard selection to the card under the pointer.
    fn select_card(&mut self, id: Uuid) {
        if let Some(task) = self.board.task(id) {
            let status = task.status;
            if let Some(index) = self
                .board
                .tasks_by_status(status)
                .iter()
                .position(|t| t.id == id)
            {
                self.selected_column = status;
                self.selected_index = index;
            }
        }
    }

    fn priority_color(priority: Priority) -> Color {
        match priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        }
    }

    fn selected_style(&self) -> Style {
        self.config
            .styles
            .0
            .get(&crate::app::Mode::Board)
            .and_then(|styles| styles.get("selected"))
            .copied()
            .unwrap_or_else(|| Style::new().yellow().bold())
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(format!(" Task Board ({} tasks) ", self.board.len()))
            .style(Style::new().cyan().bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hints =
            " n new  d delete  space advance  1/2/3 move  j/k h/l select  drag with mouse  ? help  q quit";
        frame.render_widget(Paragraph::new(hints).style(Style::new().dim()), area);
    }

    fn draw_column(&mut self, frame: &mut Frame, area: Rect, status: TaskStatus) {
        let is_selected_column = self.selected_column == status;
        let tasks = self.board.tasks_by_status(status);

        let border_color = if self.drag.is_dragging() && self.drag_over == Some(status) {
            Color::Yellow
        } else if is_selected_column {
            Color::Cyan
        } else {
            Color::White
        };

        let block = Block::default()
            .title(format!(" {} ({}) ", status.label(), tasks.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected_style = self.selected_style();
        let dragging = self.drag.dragging_task();

        let tasks: Vec<Task> = tasks.into_iter().cloned().collect();
        let mut y = inner.y;
        for (i, task) in tasks.iter().enumerate() {
            let height = Self::card_height(task);
            if y + height > inner.bottom() {
                let left = tasks.len() - i;
                if y < inner.bottom() {
                    let more = Paragraph::new(format!("… {left} more")).style(Style::new().dim());
                    frame.render_widget(more, Rect::new(inner.x, y, inner.width, 1));
                }
                break;
            }
            let card_area = Rect::new(inner.x, y, inner.width, height);
            self.card_areas.push((task.id, card_area));
            let selected = is_selected_column && i == self.selected_index;
            self.draw_card(frame, card_area, task, selected, selected_style, dragging);
            y += height;
        }
    }

    fn card_height(task: &Task) -> u16 {
        // borders + title + optional description + meta line
        if task.description.is_some() {
            5
        } else {
            4
        }
    }

    fn draw_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        task: &Task,
        selected: bool,
        selected_style: Style,
        dragging: Option<Uuid>,
    ) {
        let mut lines = vec![Line::from(Span::styled(
            task.title.clone(),
            Style::new().white().bold(),
        ))];
        if let Some(description) = &task.description {
            lines.push(Line::from(Span::styled(
                description.clone(),
                Style::new().gray(),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}]", task.priority.badge()),
                Style::default()
                    .fg(Self::priority_color(task.priority))
                    .bold(),
            ),
            Span::styled(
                format!("  {}", task.created_at.format("%Y-%m-%d")),
                Style::new().dim(),
            ),
        ]));

        let border_style = if selected {
            selected_style
        } else {
            Style::new().white()
        };
        let mut card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        if dragging == Some(task.id) {
            card = card.style(Style::new().dim());
        }
        frame.render_widget(card, area);
    }
}

impl Component for Board {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let position = Position::new(mouse.column, mouse.row);
        let point = Point::new(mouse.column as f64, mouse.row as f64);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = self.card_at(position) {
                    self.drag.pointer_down(id, point);
                    self.select_card(id);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.pointer_move(point);
                if self.drag.is_dragging() {
                    self.drag_over = self.column_at(position);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_over = None;
                let target = self.column_at(position);
                if let Some(end) = self.drag.pointer_up(target) {
                    return Ok(Some(Action::MoveTask(end.task_id, end.status)));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextTask => self.next_task(),
            Action::PreviousTask => self.previous_task(),
            Action::NextColumn => self.next_column(),
            Action::PreviousColumn => self.previous_column(),
            Action::AddTask(payload) => {
                self.board.add_task(&payload);
            }
            Action::DeleteSelectedTask => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.board.delete_task(id);
                    self.clamp_selection();
                }
            }
            Action::AdvanceSelectedTask => {
                if let Some(task) = self.selected_task() {
                    let (id, next) = (task.id, task.status.next());
                    self.board.move_task(id, next);
                    self.clamp_selection();
                }
            }
            Action::MoveSelectedTask(status) => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.board.move_task(id, status);
                    self.clamp_selection();
                }
            }
            Action::MoveTask(id, status) => {
                self.board.move_task(id, status);
                self.clamp_selection();
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(chunks[1]);

        self.column_areas.clear();
        self.card_areas.clear();
        for (i, status) in TaskStatus::ALL.into_iter().enumerate() {
            self.column_areas.push((status, columns[i]));
            self.draw_column(frame, columns[i], status);
        }

        self.draw_footer(frame, chunks[2]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn payload(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            ..CreateTask::default()
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn render(board: &mut Board) {
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| board.draw(f, f.area()).unwrap())
            .unwrap();
    }

    #[test]
    fn starts_with_the_welcome_task() {
        let board = Board::new();
        assert_eq!(board.board().len(), 1);
        assert_eq!(
            board.board().tasks_by_status(TaskStatus::Todo)[0].title,
            "Welcome to your board"
        );
    }

    #[test]
    fn add_task_action_grows_the_todo_column() {
        let mut board = Board::new();
        board.update(Action::AddTask(payload("Buy milk"))).unwrap();
        assert_eq!(board.board().tasks_by_status(TaskStatus::Todo).len(), 2);
    }

    #[test]
    fn delete_selected_removes_the_selected_task() {
        let mut board = Board::new();
        board.update(Action::AddTask(payload("Buy milk"))).unwrap();
        board.update(Action::NextTask).unwrap();
        assert_eq!(board.selected_task().unwrap().title, "Buy milk");
        board.update(Action::DeleteSelectedTask).unwrap();
        assert_eq!(board.board().len(), 1);
        assert_eq!(
            board.selected_task().unwrap().title,
            "Welcome to your board"
        );
    }

    #[test]
    fn advance_moves_the_selected_task_to_the_next_column() {
        let mut board = Board::new();
        board.update(Action::AdvanceSelectedTask).unwrap();
        assert!(board.board().tasks_by_status(TaskStatus::Todo).is_empty());
        assert_eq!(board.board().tasks_by_status(TaskStatus::Doing).len(), 1);
    }

    #[test]
    fn move_selected_targets_a_specific_column() {
        let mut board = Board::new();
        board
            .update(Action::MoveSelectedTask(TaskStatus::Done))
            .unwrap();
        assert_eq!(board.board().tasks_by_status(TaskStatus::Done).len(), 1);
    }

    #[test]
    fn column_navigation_wraps() {
        let mut board = Board::new();
        board.update(Action::NextColumn).unwrap();
        board.update(Action::NextColumn).unwrap();
        board.update(Action::NextColumn).unwrap();
        assert_eq!(board.selected_column, TaskStatus::Todo);
        board.update(Action::PreviousColumn).unwrap();
        assert_eq!(board.selected_column, TaskStatus::Done);
    }

    #[test]
    fn mouse_drag_between_columns_emits_a_move() {
        let mut board = Board::new();
        render(&mut board);

        let (id, card) = board.card_areas[0];
        let (_, doing) = board.column_areas[1];
        let target = Position::new(doing.x + doing.width / 2, doing.y + doing.height / 2);

        board
            .handle_mouse_event(mouse(
                MouseEventKind::Down(MouseButton::Left),
                card.x + 1,
                card.y + 1,
            ))
            .unwrap();
        board
            .handle_mouse_event(mouse(
                MouseEventKind::Drag(MouseButton::Left),
                target.x,
                target.y,
            ))
            .unwrap();
        assert!(board.drag.is_dragging());
        let action = board
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), target.x, target.y))
            .unwrap();
        assert_eq!(action, Some(Action::MoveTask(id, TaskStatus::Doing)));
    }

    #[test]
    fn a_plain_click_moves_nothing() {
        let mut board = Board::new();
        render(&mut board);

        let (_, card) = board.card_areas[0];
        board
            .handle_mouse_event(mouse(
                MouseEventKind::Down(MouseButton::Left),
                card.x + 1,
                card.y + 1,
            ))
            .unwrap();
        let action = board
            .handle_mouse_event(mouse(
                MouseEventKind::Up(MouseButton::Left),
                card.x + 1,
                card.y + 1,
            ))
            .unwrap();
        assert_eq!(action, None);
        assert_eq!(
            board.board().tasks_by_status(TaskStatus::Todo).len(),
            1
        );
    }

    #[test]
    fn release_outside_any_column_cancels_the_drag() {
        let mut board = Board::new();
        render(&mut board);

        let (_, card) = board.card_areas[0];
        board
            .handle_mouse_event(mouse(
                MouseEventKind::Down(MouseButton::Left),
                card.x + 1,
                card.y + 1,
            ))
            .unwrap();
        board
            .handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 89, 29))
            .unwrap();
        // footer row is outside every column
        let action = board
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 89, 29))
            .unwrap();
        assert_eq!(action, None);
        assert!(!board.drag.is_dragging());
    }
}
