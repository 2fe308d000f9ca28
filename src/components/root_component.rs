use std::collections::HashMap;

use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::action::Action;
use crate::components::footer_component::FooterComponent;
use crate::components::header_component::HeaderComponent;
use crate::components::help_component::HelpComponent;
use crate::components::overlay::OverlayComponent;
use crate::components::page_component::PageComponent;
use crate::components::{Component, ComponentId};
use crate::models::Page;
use crate::utils::text_ui::popup_area;

pub struct RootComponent {
    components: HashMap<ComponentId, Box<dyn Component>>,
    action_tx: Option<UnboundedSender<Action>>,
    popup: Option<ComponentId>,
    overlay: Option<OverlayComponent>,
}

impl RootComponent {
    pub fn new(page: Page, hl_style: Style) -> Self {
        let components: Vec<Box<dyn Component>> = vec![
            Box::new(HeaderComponent::new(&page, hl_style)),
            Box::new(FooterComponent::new(hl_style)),
            Box::new(HelpComponent::default()),
            Box::new(PageComponent::new(page, hl_style)),
        ];
        let components = components.into_iter().map(|c| (c.id(), c)).collect::<HashMap<_, _>>();
        Self { components, action_tx: None, popup: None, overlay: None }
    }

    fn component(&mut self, id: ComponentId) -> Result<&mut Box<dyn Component>> {
        self.components.get_mut(&id).ok_or_else(|| anyhow!("unsupported component {:?}", id))
    }

    fn send(&self, action: Action) -> Result<()> {
        if let Some(tx) = &self.action_tx {
            tx.send(action)?;
        }
        Ok(())
    }
}

impl Component for RootComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Root
    }

    fn init(&mut self) -> Result<()> {
        for component in self.components.values_mut() {
            component.init()?;
        }
        let shortcuts = self.component(ComponentId::Page)?.shortcuts();
        self.send(Action::Shortcuts(shortcuts))
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        for component in self.components.values_mut() {
            component.register_action_handler(tx.clone())?;
        }
        self.action_tx = Some(tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(overlay) = &self.overlay {
            if overlay.should_close_on_key(key) {
                self.overlay = None;
            }
            return Ok(None);
        }
        // popup first: `Unfocus` closes it, anything else propagates
        if let Some(popup) = self.popup {
            return match self.component(popup)?.handle_key_event(key)? {
                Some(Action::Unfocus) => {
                    self.popup = None;
                    Ok(None)
                }
                action => Ok(action),
            };
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Some(Action::Quit));
            }
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Some(Action::Suspend));
            }
            KeyCode::Char('h') => return Ok(Some(Action::Help)),
            KeyCode::Char('r') => return Ok(Some(Action::Reload)),
            KeyCode::Char(c @ '1'..='9') => {
                return Ok(Some(Action::FocusTable((c as u8 - b'1') as usize)));
            }
            _ => {}
        }
        debug!(component = ComponentId::Page.full_name(), ?key, "Try handling key event");
        self.component(ComponentId::Page)?.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.overlay.is_some() || self.popup.is_some() {
            return Ok(None);
        }
        self.component(ComponentId::Page)?.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match &action {
            Action::Help => self.popup = Some(ComponentId::Help),
            Action::Unfocus => self.popup = None,
            Action::Error(error) => self.overlay = Some(OverlayComponent::error(error.clone())),
            _ => {}
        }
        // propagate action to all components
        for component in self.components.values_mut() {
            if let Some(action) = component.update(action.clone())?
                && let Some(tx) = &self.action_tx
            {
                tx.send(action)?;
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let [header, body, footer] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
                .areas(area);

        self.component(ComponentId::Header)?.draw(frame, header)?;
        self.component(ComponentId::Page)?.draw(frame, body)?;
        if let Some(popup) = self.popup {
            self.component(popup)?.draw(frame, popup_area(body, 70, 80))?;
        }
        if let Some(overlay) = &self.overlay {
            overlay.draw(frame, body)?;
        }
        self.component(ComponentId::Footer)?.draw(frame, footer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;
    use crate::models::{Cell, Table};

    fn root() -> RootComponent {
        let table = Table::new(
            "Standings",
            vec!["Name".into(), "Wins".into()],
            vec![vec![Cell::new("Bob"), Cell::new("9")], vec![Cell::new("Al"), Cell::new("11")]],
        );
        RootComponent::new(Page::new(Some("League".into()), vec![table]), Style::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_global_keys() {
        let mut root = root();
        assert_eq!(root.handle_key_event(key(KeyCode::Char('q'))).unwrap(), Some(Action::Quit));
        assert_eq!(
            root.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            Some(Action::Quit)
        );
        assert_eq!(root.handle_key_event(key(KeyCode::Char('r'))).unwrap(), Some(Action::Reload));
        assert_eq!(
            root.handle_key_event(key(KeyCode::Char('2'))).unwrap(),
            Some(Action::FocusTable(1))
        );
        assert_eq!(root.handle_key_event(key(KeyCode::Tab)).unwrap(), Some(Action::FocusTable(0)));
    }

    #[test]
    fn test_help_popup() {
        let mut root = root();
        assert_eq!(root.handle_key_event(key(KeyCode::Char('h'))).unwrap(), Some(Action::Help));
        root.update(Action::Help).unwrap();
        assert_eq!(root.popup, Some(ComponentId::Help));

        // keys go to the popup, which asks to be closed
        assert_eq!(root.handle_key_event(key(KeyCode::Char('r'))).unwrap(), None);
        assert_eq!(root.handle_key_event(key(KeyCode::Esc)).unwrap(), None);
        assert_eq!(root.popup, None);
    }

    #[test]
    fn test_error_overlay_swallows_keys() {
        let mut root = root();
        root.update(Action::Error(("Reload failed", "boom").into())).unwrap();
        assert!(root.overlay.is_some());
        assert_eq!(root.handle_key_event(key(KeyCode::Char('q'))).unwrap(), None);
        assert!(root.overlay.is_none());
        assert_eq!(root.handle_key_event(key(KeyCode::Char('q'))).unwrap(), Some(Action::Quit));
    }

    #[test]
    fn test_init_sends_page_shortcuts() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut root = root();
        root.register_action_handler(tx).unwrap();
        root.init().unwrap();
        match rx.try_recv().unwrap() {
            Action::Shortcuts(shortcuts) => assert_eq!(shortcuts.len(), 4),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
