use anyhow::Result;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;
use ratatui::{Frame, symbols};

use crate::action::Action;
use crate::components::{Component, ComponentId};
use crate::models::Page;
use crate::utils::symbols::superscript;

/// Table tabs on the left, page title and version on the right.
pub struct HeaderComponent {
    page_title: Option<String>,
    tables: Vec<String>,
    focused: usize,
    hl_style: Style,
}

impl HeaderComponent {
    pub fn new(page: &Page, hl_style: Style) -> Self {
        let mut header = Self { page_title: None, tables: vec![], focused: 0, hl_style };
        header.load(page);
        header
    }

    fn load(&mut self, page: &Page) {
        self.page_title = page.title.clone();
        self.tables = page.tables.iter().map(|t| t.title.clone()).collect();
        self.focused = self.focused.min(self.tables.len().saturating_sub(1));
    }

    fn tab_widget(&self) -> Tabs<'_> {
        let tabs: Vec<Line> = self
            .tables
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let title = if title.is_empty() { "untitled" } else { title.as_str() };
                Line::from(vec![Span::styled(superscript(i + 1), self.hl_style), Span::from(title)])
            })
            .collect();
        Tabs::new(tabs).select(self.focused).divider("|")
    }

    fn version_widget(&self) -> Line<'_> {
        let title = self.page_title.as_deref().unwrap_or("-");
        Line::from(vec![
            Span::styled(format!("[ {} {} ", title, symbols::DOT), Style::default().fg(Color::Blue)),
            Span::styled(
                format!("{} ", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::LightCyan),
            ),
            Span::styled("]", Style::default().fg(Color::Blue)),
        ])
        .alignment(Alignment::Right)
    }
}

impl Component for HeaderComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::FocusTable(to) if to < self.tables.len() => self.focused = to,
            Action::PageLoaded(page) => self.load(&page),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let [tabs, version] =
            Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
                .areas(area);

        frame.render_widget(self.tab_widget(), tabs);
        frame.render_widget(self.version_widget(), version);

        Ok(())
    }
}
