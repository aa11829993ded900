use color_eyre::Result;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::Component;
use crate::models::{CreateTask, Priority, PriorityExt};
use crate::{action::Action, config::Config};

/// Field the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormField {
    #[default]
    Title,
    Description,
    Priority,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Priority,
            FormField::Priority => FormField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::Priority => FormField::Description,
        }
    }
}

/// Modal create-task form: title, optional description, priority.
#[derive(Default)]
pub struct TaskForm {
    command_tx: Option<UnboundedSender<Action>>,
    config: Config,
    visible: bool,
    field: FormField,
    title: String,
    description: String,
    priority: Priority,
    cursor: usize,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn open(&mut self) {
        self.visible = true;
        self.field = FormField::Title;
        self.title.clear();
        self.description.clear();
        self.priority = Priority::default();
        self.cursor = 0;
    }

    fn close(&mut self) {
        self.visible = false;
    }

    /// Builds the payload and closes. Returns `None` when the title trims
    /// to empty, matching the board's silent no-op.
    fn submit(&mut self) -> Option<CreateTask> {
        self.close();
        if self.title.trim().is_empty() {
            return None;
        }
        Some(CreateTask {
            title: self.title.clone(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            priority: self.priority,
        })
    }

    fn active_text(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Priority => None,
        }
    }

    fn switch_field(&mut self, field: FormField) {
        self.field = field;
        self.cursor = match field {
            FormField::Title => self.title.chars().count(),
            FormField::Description => self.description.chars().count(),
            FormField::Priority => 0,
        };
    }

    fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let cursor = self.cursor;
        if let Some(text) = self.active_text() {
            let byte = byte_index(text, cursor);
            text.insert(byte, c);
            self.cursor += 1;
        }
    }

    fn delete_backward(&mut self) {
        let cursor = self.cursor;
        if cursor == 0 {
            return;
        }
        if let Some(text) = self.active_text() {
            let byte = byte_index(text, cursor - 1);
            text.remove(byte);
            self.cursor -= 1;
        }
    }

    fn delete_forward(&mut self) {
        let cursor = self.cursor;
        if let Some(text) = self.active_text() {
            if cursor < text.chars().count() {
                let byte = byte_index(text, cursor);
                text.remove(byte);
            }
        }
    }

    fn move_cursor_left(&mut self) {
        if self.field == FormField::Priority {
            self.priority = self.priority.previous();
        } else if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        match self.field {
            FormField::Priority => self.priority = self.priority.next(),
            _ => {
                let len = self.active_text().map(|t| t.chars().count()).unwrap_or(0);
                if self.cursor < len {
                    self.cursor += 1;
                }
            }
        }
    }

    fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    fn move_cursor_end(&mut self) {
        self.cursor = self.active_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    fn field_line<'a>(&self, label: &'a str, value: &'a str, active: bool) -> Line<'a> {
        let label_style = if active {
            Style::new().yellow().bold()
        } else {
            Style::new().white()
        };
        Line::from(vec![
            Span::styled(format!("{label:<13}"), label_style),
            Span::raw(value.to_string()),
        ])
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl Component for TaskForm {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if !self.visible && action != Action::NewTask {
            return Ok(None);
        }
        match action {
            Action::NewTask => self.open(),
            Action::CancelInput => self.close(),
            Action::SubmitInput => {
                if let Some(payload) = self.submit() {
                    return Ok(Some(Action::AddTask(payload)));
                }
            }
            Action::NextField => self.switch_field(self.field.next()),
            Action::PreviousField => self.switch_field(self.field.previous()),
            Action::InsertChar(c) => self.insert_char(c),
            Action::DeleteBackward => self.delete_backward(),
            Action::DeleteForward => self.delete_forward(),
            Action::MoveCursorLeft => self.move_cursor_left(),
            Action::MoveCursorRight => self.move_cursor_right(),
            Action::MoveCursorHome => self.move_cursor_home(),
            Action::MoveCursorEnd => self.move_cursor_end(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if !self.visible {
            return Ok(());
        }

        let popup_area = self.centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let priority = format!("< {} >", self.priority.label());
        let lines = vec![
            self.field_line("Title:", &self.title, self.field == FormField::Title),
            self.field_line(
                "Description:",
                &self.description,
                self.field == FormField::Description,
            ),
            self.field_line("Priority:", &priority, self.field == FormField::Priority),
            Line::raw(""),
            Line::from(Span::styled(
                "enter create  tab next field  esc cancel",
                Style::new().dim(),
            )),
        ];

        let form = Paragraph::new(lines).block(
            Block::default()
                .title(" New Task ")
                .borders(Borders::ALL)
                .border_style(Style::new().cyan()),
        );
        frame.render_widget(form, popup_area);

        // Cursor lives in the text fields only
        let row = match self.field {
            FormField::Title => Some(0u16),
            FormField::Description => Some(1),
            FormField::Priority => None,
        };
        if let Some(row) = row {
            let x = popup_area.x + 1 + 13 + self.cursor as u16;
            let y = popup_area.y + 1 + row;
            let x = x.min(popup_area.x + popup_area.width.saturating_sub(2));
            frame.set_cursor_position((x, y));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_text(form: &mut TaskForm, text: &str) {
        for c in text.chars() {
            form.update(Action::InsertChar(c)).unwrap();
        }
    }

    #[test]
    fn typing_and_submitting_emits_add_task() {
        let mut form = TaskForm::new();
        form.update(Action::NewTask).unwrap();
        type_text(&mut form, "Buy milk");
        form.update(Action::NextField).unwrap();
        type_text(&mut form, "2 liters");
        form.update(Action::NextField).unwrap();
        form.update(Action::MoveCursorLeft).unwrap(); // Medium -> Low

        let action = form.update(Action::SubmitInput).unwrap();
        assert_eq!(
            action,
            Some(Action::AddTask(CreateTask {
                title: "Buy milk".to_string(),
                description: Some("2 liters".to_string()),
                priority: Priority::Low,
            }))
        );
        assert!(!form.is_visible());
    }

    #[test]
    fn empty_title_submits_nothing() {
        let mut form = TaskForm::new();
        form.update(Action::NewTask).unwrap();
        type_text(&mut form, "   ");
        let action = form.update(Action::SubmitInput).unwrap();
        assert_eq!(action, None);
        assert!(!form.is_visible());
    }

    #[test]
    fn blank_description_becomes_none() {
        let mut form = TaskForm::new();
        form.update(Action::NewTask).unwrap();
        type_text(&mut form, "Buy milk");
        let action = form.update(Action::SubmitInput).unwrap();
        assert_eq!(
            action,
            Some(Action::AddTask(CreateTask {
                title: "Buy milk".to_string(),
                description: None,
                priority: Priority::Medium,
            }))
        );
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut form = TaskForm::new();
        form.update(Action::NewTask).unwrap();
        type_text(&mut form, "Draft");
        form.update(Action::CancelInput).unwrap();
        assert!(!form.is_visible());

        form.update(Action::NewTask).unwrap();
        let action = form.update(Action::SubmitInput).unwrap();
        assert_eq!(action, None);
    }

    #[test]
    fn editing_keys_operate_on_the_active_field() {
        let mut form = TaskForm::new();
        form.update(Action::NewTask).unwrap();
        type_text(&mut form, "milkk");
        form.update(Action::DeleteBackward).unwrap();
        form.update(Action::MoveCursorHome).unwrap();
        type_text(&mut form, "Buy ");
        let action = form.update(Action::SubmitInput).unwrap();
        assert_eq!(
            action,
            Some(Action::AddTask(CreateTask {
                title: "Buy milk".to_string(),
                description: None,
                priority: Priority::Medium,
            }))
        );
    }

    #[test]
    fn priority_field_cycles() {
        let mut form = TaskForm::new();
        form.update(Action::NewTask).unwrap();
        type_text(&mut form, "t");
        form.update(Action::NextField).unwrap();
        form.update(Action::NextField).unwrap();
        form.update(Action::MoveCursorRight).unwrap(); // Medium -> High
        assert_eq!(form.priority, Priority::High);
        form.update(Action::MoveCursorRight).unwrap(); // High -> Low
        assert_eq!(form.priority, Priority::Low);
    }

    #[test]
    fn actions_are_ignored_while_hidden() {
        let mut form = TaskForm::new();
        type_text(&mut form, "ghost");
        assert_eq!(form.title, "");
        assert_eq!(form.update(Action::SubmitInput).unwrap(), None);
    }
}
