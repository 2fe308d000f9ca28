use anyhow::Result;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::action::Action;
use crate::components::{Component, ComponentId};
use crate::widgets::shortcut::{Shortcut, shortcut_line};

pub struct FooterComponent {
    shortcuts: Vec<Shortcut>,
    hl_style: Style,
}

fn get_default_shortcuts() -> Vec<Shortcut> {
    vec![Shortcut::key("h", "help"), Shortcut::key("q", "quit")]
}

impl FooterComponent {
    pub fn new(hl_style: Style) -> Self {
        Self { shortcuts: get_default_shortcuts(), hl_style }
    }
}

impl Component for FooterComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Footer
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Action::Shortcuts(shortcuts) = action {
            let mut sc = get_default_shortcuts();
            sc.extend(shortcuts);
            self.shortcuts = sc;
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(shortcut_line(&self.shortcuts, "   ", self.hl_style), area);
        Ok(())
    }
}
