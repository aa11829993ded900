use color_eyre::Result;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::Component;
use crate::{action::Action, config::Config};

const SHORTCUTS: &[(&str, &str)] = &[
    ("j / k", "select task"),
    ("h / l", "switch column"),
    ("n", "new task"),
    ("d", "delete task"),
    ("space", "advance to next column"),
    ("1 / 2 / 3", "move to todo / doing / done"),
    ("mouse drag", "move a card between columns"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

/// Help modal listing the keybindings.
#[derive(Default)]
pub struct Help {
    command_tx: Option<UnboundedSender<Action>>,
    config: Config,
    visible: bool,
}

impl Help {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn centered_rect(&self, width: u16, height: u16, r: Rect) -> Rect {
        let x = r.x + r.width.saturating_sub(width) / 2;
        let y = r.y + r.height.saturating_sub(height) / 2;
        Rect::new(x, y, width.min(r.width), height.min(r.height))
    }
}

impl Component for Help {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::ToggleHelp {
            self.visible = !self.visible;
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if !self.visible {
            return Ok(());
        }

        let popup_area = self.centered_rect(46, SHORTCUTS.len() as u16 + 2, area);
        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = SHORTCUTS
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(format!("{key:<12}"), Style::new().cyan().bold()),
                    Span::raw(*description),
                ])
            })
            .collect();

        let help = Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::new().cyan()),
        );
        frame.render_widget(help, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_shows_and_hides() {
        let mut help = Help::new();
        assert!(!help.is_visible());
        help.update(Action::ToggleHelp).unwrap();
        assert!(help.is_visible());
        help.update(Action::ToggleHelp).unwrap();
        assert!(!help.is_visible());
    }
}
