use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use super::{Component, ComponentId};
use crate::action::Action;
use crate::config::get_config_path;

#[derive(Debug, Default)]
pub struct HelpComponent {
    offset: u16,
}

enum HelpRow<'a> {
    Empty,
    Title(Line<'a>),
    Entry { left: Span<'a>, right: Span<'a> },
}

impl<'a> HelpRow<'a> {
    fn key_title(s: impl Into<Span<'a>>) -> Self {
        Self::Title(Line::from(vec!["--- ".into(), s.into().italic().bold(), " ---".into()]))
    }

    fn entry(left: impl Into<Span<'a>>, right: impl Into<Span<'a>>) -> Self {
        Self::Entry { left: left.into(), right: right.into() }
    }
}

impl HelpComponent {
    fn rows<'a>() -> Vec<HelpRow<'a>> {
        let config_path = get_config_path()
            .map(|p| format!("'{}'", p.display()))
            .unwrap_or_else(|e| format!("unavailable: {e}"));
        vec![
            HelpRow::Empty,
            HelpRow::entry(Span::raw("Default configuration").bold(), config_path),
            HelpRow::entry(Span::raw("Version").bold(), env!("CARGO_PKG_VERSION")),
            HelpRow::Empty,
            HelpRow::entry(Span::raw("Key").bold(), Span::raw("Description").bold()),
            HelpRow::key_title("common"),
            HelpRow::entry("h", "Toggle help"),
            HelpRow::entry("q / Ctrl+c", "Quits program"),
            HelpRow::entry("Ctrl+z", "Suspend"),
            HelpRow::entry("r", "Reload page files"),
            HelpRow::Empty,
            HelpRow::key_title("tables"),
            HelpRow::entry("Number, Tab, Shift+Tab", "focus table"),
            HelpRow::entry("Left, Right", "select header"),
            HelpRow::entry("Enter / s / click header", "sort, again to reverse"),
            HelpRow::entry("k / Up, j / Down", "navigation"),
            HelpRow::entry("g, G", "go to first, last"),
            HelpRow::entry("PageUp, Space / PageDown", "page up, down"),
            HelpRow::Empty,
        ]
    }

    fn lines<'a>(gap: u16, center: u16) -> Vec<Line<'a>> {
        Self::rows()
            .into_iter()
            .map(|row| match row {
                HelpRow::Empty => Line::raw(""),
                HelpRow::Title(title) => {
                    let title_len = title.width() as u16;
                    let pad_left = center.saturating_sub(title_len / 2);
                    let mut spans = vec![" ".repeat(pad_left as usize).into()];
                    spans.extend(title.spans);
                    Line::from(spans)
                }
                HelpRow::Entry { left, right } => {
                    let left_len = left.width() as u16;

                    // right-align keys against the center column
                    let pad_left = center.saturating_sub(left_len).saturating_sub(gap / 2);
                    let spans = vec![
                        " ".repeat(pad_left as usize).into(),
                        left,
                        " ".repeat(gap as usize).into(),
                        right,
                    ];
                    Line::from(spans)
                }
            })
            .collect()
    }
}

impl Component for HelpComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Help
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Some(Action::Quit));
            }
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('h') => {
                self.offset = 0;
                return Ok(Some(Action::Unfocus));
            }
            KeyCode::Down | KeyCode::Char('j') => self.offset = self.offset.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.offset = self.offset.saturating_sub(1),
            _ => (),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let border = Block::bordered().border_type(BorderType::Rounded).title(" Help ");
        let inner = border.inner(area);
        frame.render_widget(border, area);

        let gap = 4; // between key and description
        let center_x = (inner.width as f32 * 0.4) as u16;
        let lines = Self::lines(gap, center_x);

        let max_offset = (lines.len() as u16).saturating_sub(inner.height);
        self.offset = self.offset.min(max_offset);
        frame.render_widget(Paragraph::new(lines).scroll((self.offset, 0)), inner);

        Ok(())
    }
}
