use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Cell as TableCell, HighlightSpacing, Paragraph, Row, Table as TableWidget,
    TableState,
};
use tracing::{debug, error, info};

use crate::action::Action;
use crate::components::{Component, ComponentId};
use crate::models::{Page, Table};
use crate::sorter::{HeaderId, TableSorter};
use crate::utils::symbols::{arrow, superscript};
use crate::utils::text_ui::{text_width, top_title_line};
use crate::widgets::shortcut::Shortcut;

const COLUMN_SPACING: u16 = 1;
/// Room kept after every header for the sort marker.
const MARKER_WIDTH: usize = 2;

/// Where a table landed on screen in the last frame.
#[derive(Debug, Default, Clone)]
struct TableArea {
    block: Rect,
    headers: Vec<Rect>,
    body_height: u16,
}

/// All tables of the page, stacked. Clicking a header cell sorts its table.
pub struct PageComponent {
    page: Page,
    sorter: TableSorter,
    states: Vec<TableState>,
    areas: Vec<TableArea>,
    focused: usize,
    /// First table drawn; tables above it are scrolled off.
    offset: usize,
    selected_col: usize,
    hl_style: Style,
}

impl PageComponent {
    pub fn new(page: Page, hl_style: Style) -> Self {
        let mut component = Self {
            page: Page::default(),
            sorter: TableSorter::default(),
            states: vec![],
            areas: vec![],
            focused: 0,
            offset: 0,
            selected_col: 0,
            hl_style,
        };
        component.load(page);
        component
    }

    /// Replace the page; every header starts over unsorted.
    fn load(&mut self, page: Page) {
        self.sorter = TableSorter::install(&page);
        self.states = vec![TableState::default(); page.tables.len()];
        self.areas.clear();
        self.page = page;
        self.focus(self.focused);
    }

    fn focus(&mut self, table: usize) {
        self.focused = table.min(self.page.tables.len().saturating_sub(1));
        let columns = self.focused_table().map_or(0, Table::column_count);
        self.selected_col = self.selected_col.min(columns.saturating_sub(1));
    }

    fn focused_table(&self) -> Option<&Table> {
        self.page.tables.get(self.focused)
    }

    /// Move the row selection of the focused table.
    fn scroll<F: FnOnce(&mut TableState)>(&mut self, f: F) {
        if let Some(state) = self.states.get_mut(self.focused) {
            f(state);
        }
    }

    fn sort(&mut self, header: HeaderId) {
        match self.sorter.activate_on(&mut self.page, header) {
            Ok(dir) => info!(%header, ?dir, "Sorted table"),
            Err(e) => error!(%header, "Fail to sort table: {e}"),
        }
    }

    fn header_at(&self, pos: Position) -> Option<HeaderId> {
        self.areas.iter().enumerate().find_map(|(table, area)| {
            let column = area.headers.iter().position(|rect| rect.contains(pos))?;
            Some(HeaderId::new(table, column))
        })
    }

    fn table_at(&self, pos: Position) -> Option<usize> {
        self.areas.iter().position(|area| area.block.contains(pos))
    }

    /// Move `offset` so the focused table fits in `available` rows together with the tables
    /// above it that are still drawn.
    fn scroll_to_focused(&mut self, heights: &[u16], available: u16) {
        let focused = self.focused;
        let span = |from: usize| heights[from..=focused].iter().map(|&h| u32::from(h)).sum::<u32>();
        self.offset = self.offset.min(focused);
        while self.offset < focused && span(self.offset) > u32::from(available) {
            self.offset += 1;
        }
    }

    fn page_size(&self) -> u16 {
        self.areas.get(self.focused).map_or(1, |a| a.body_height.max(1))
    }

    fn column_widths(table: &Table) -> Vec<Constraint> {
        (0..table.column_count())
            .map(|col| {
                let width = (0..table.rows.len())
                    .map(|row| text_width(table.display_text(row, col)))
                    .fold(text_width(&table.headers[col]) + MARKER_WIDTH, usize::max);
                Constraint::Length(u16::try_from(width).unwrap_or(u16::MAX))
            })
            .collect()
    }

    fn draw_table(&mut self, frame: &mut Frame, idx: usize, area: Rect) -> TableArea {
        let table = &self.page.tables[idx];
        let focused = idx == self.focused;
        let sorted = self.sorter.last_sorted(idx);

        let name = if table.title.is_empty() { "untitled" } else { table.title.as_str() };
        let title = format!("{}{}", superscript(idx + 1), name);
        let border_style = if focused { self.hl_style } else { Style::default().dim() };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(top_title_line(&title, Style::default().bold()));
        let inner = block.inner(area);

        let header = table.headers.iter().enumerate().map(|(col, text)| {
            let mut spans = vec![Span::raw(text.as_str())];
            if let Some(spec) = sorted
                && spec.col == col
            {
                spans.push(Span::styled(format!(" {}", spec.dir.symbol()), self.hl_style));
            }
            let style = if focused && col == self.selected_col {
                Style::default().bold().reversed()
            } else {
                Style::default().bold()
            };
            TableCell::from(Line::from(spans)).style(style)
        });
        let columns = table.column_count();
        let rows = (0..table.rows.len())
            .map(|row| Row::new((0..columns).map(|col| table.display_text(row, col))));
        let widths = Self::column_widths(table);
        let row_style = if focused { Style::default().reversed() } else { Style::default() };

        let widget = TableWidget::new(rows, widths.clone())
            .header(Row::new(header))
            .block(block)
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .highlight_spacing(HighlightSpacing::Never)
            .row_highlight_style(row_style);
        frame.render_stateful_widget(widget, area, &mut self.states[idx]);

        // same split the table widget does for its columns
        let header_line = Rect { height: inner.height.min(1), ..inner };
        let headers = Layout::horizontal(widths)
            .flex(Flex::Start)
            .spacing(COLUMN_SPACING)
            .split(header_line)
            .to_vec();
        TableArea { block: area, headers, body_height: inner.height.saturating_sub(1) }
    }
}

impl Component for PageComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Page
    }

    fn shortcuts(&self) -> Vec<Shortcut> {
        vec![
            Shortcut::key("Tab", "table"),
            Shortcut::pair(arrow::LEFT, "column", arrow::RIGHT),
            Shortcut::key("Enter", "sort"),
            Shortcut::key("r", "reload"),
        ]
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let count = self.page.tables.len();
        if count == 0 {
            return Ok(None);
        }
        let columns = self.focused_table().map_or(0, Table::column_count);
        let page_size = self.page_size();
        match key.code {
            KeyCode::Tab => return Ok(Some(Action::FocusTable((self.focused + 1) % count))),
            KeyCode::BackTab => {
                return Ok(Some(Action::FocusTable((self.focused + count - 1) % count)));
            }
            KeyCode::Left => self.selected_col = self.selected_col.saturating_sub(1),
            KeyCode::Right => {
                self.selected_col = (self.selected_col + 1).min(columns.saturating_sub(1))
            }
            KeyCode::Enter | KeyCode::Char('s') if columns > 0 => {
                self.sort(HeaderId::new(self.focused, self.selected_col))
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll(TableState::select_next),
            KeyCode::Up | KeyCode::Char('k') => self.scroll(TableState::select_previous),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll(|s| s.scroll_down_by(page_size)),
            KeyCode::PageUp => self.scroll(|s| s.scroll_up_by(page_size)),
            KeyCode::Char('g') => self.scroll(TableState::select_first),
            KeyCode::Char('G') => self.scroll(TableState::select_last),
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(header) = self.header_at(pos) {
                    debug!(%header, "Header clicked");
                    self.sort(header);
                    self.selected_col = header.column;
                    return Ok(Some(Action::FocusTable(header.table)));
                }
                if let Some(table) = self.table_at(pos) {
                    return Ok(Some(Action::FocusTable(table)));
                }
            }
            MouseEventKind::ScrollDown => {
                if let Some(table) = self.table_at(pos) {
                    self.states[table].scroll_down_by(1);
                }
            }
            MouseEventKind::ScrollUp => {
                if let Some(table) = self.table_at(pos) {
                    self.states[table].scroll_up_by(1);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::FocusTable(table) if table < self.page.tables.len() => self.focus(table),
            Action::PageLoaded(page) => self.load(*page),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if self.page.tables.is_empty() {
            self.areas.clear();
            frame.render_widget(Paragraph::new("No tables on this page").centered(), area);
            return Ok(());
        }

        // borders plus header row
        let heights: Vec<u16> = self
            .page
            .tables
            .iter()
            .map(|t| u16::try_from(t.rows.len() + 3).unwrap_or(u16::MAX))
            .collect();
        self.scroll_to_focused(&heights, area.height);

        let constraints = heights[self.offset..].iter().map(|&h| Constraint::Max(h));
        let chunks = Layout::vertical(constraints).flex(Flex::Start).split(area);
        let mut areas = vec![TableArea::default(); self.offset];
        for (idx, chunk) in (self.offset..).zip(chunks.iter()) {
            areas.push(self.draw_table(frame, idx, *chunk));
        }
        self.areas = areas;
        Ok(())
    }
}
