use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, trace, warn};

use crate::action::Action;
use crate::components::Component;
use crate::components::root_component::RootComponent;
use crate::config::Config;
use crate::models::Page;
use crate::tui::{Event, Tui};

pub struct App {
    config: Config,
    files: Vec<PathBuf>,
    tick_rate: f64,
    frame_rate: f64,
    root: RootComponent,

    should_quit: bool,
    should_suspend: bool,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: Config, files: Vec<PathBuf>, page: Page) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let root = RootComponent::new(page, config.highlight_style());
        Self {
            config,
            files,
            tick_rate: 4.0,
            frame_rate: 60.0,
            root,

            should_quit: false,
            should_suspend: false,
            action_tx,
            action_rx,
        }
    }

    pub fn rates(mut self, tick_rate: f64, frame_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self.frame_rate = frame_rate;
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate)
            .mouse(self.config.mouse);
        tui.enter()?;

        self.root.register_action_handler(self.action_tx.clone())?;
        self.root.init()?;

        let action_tx = self.action_tx.clone();
        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                action_tx.send(Action::ClearScreen)?;
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        match event {
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
            _ => trace!("handle_events: {event:?}"),
        }
        if let Some(action) = self.root.handle_events(Some(event))? {
            action_tx.send(action)?;
        }
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                trace!("handle_actions: {action:?}");
            }
            match action {
                Action::Tick => {}
                Action::Quit => self.should_quit = true,
                Action::Suspend => self.should_suspend = true,
                Action::Resume => self.should_suspend = false,
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => self.handle_resize(tui, w, h)?,
                Action::Render => self.render(tui)?,
                Action::Reload => self.reload()?,
                _ => {}
            }
            if let Some(action) = self.root.update(action)? {
                self.action_tx.send(action)?
            };
        }
        Ok(())
    }

    fn reload(&self) -> Result<()> {
        info!(files = ?self.files, "Reloading page");
        let action = match load_page(&self.files) {
            Ok(page) => Action::PageLoaded(Box::new(page)),
            Err(e) => {
                warn!("Fail to reload page: {e:#}");
                Action::Error(("Reload failed", e).into())
            }
        };
        self.action_tx.send(action)?;
        Ok(())
    }

    fn handle_resize(&mut self, tui: &mut Tui, w: u16, h: u16) -> Result<()> {
        tui.resize(Rect::new(0, 0, w, h))?;
        self.render(tui)?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            if let Err(err) = self.root.draw(frame, frame.area()) {
                let _ = self.action_tx.send(Action::Error(("Failed to draw", err).into()));
            }
        })?;
        Ok(())
    }
}

/// Load the page files again; stdin was consumed on start and cannot be read twice.
fn load_page(files: &[PathBuf]) -> Result<Page> {
    if files.iter().any(|f| f == Path::new("-")) {
        bail!("The page was read from stdin and cannot be reloaded");
    }
    Page::load_all(files)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_reload_rejects_stdin() {
        let err = load_page(&[PathBuf::from("-")]).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn test_reload_reads_files_again() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"tables: [{title: A, headers: [x], rows: [[1]]}]").unwrap();
        let files = vec![file.path().to_owned()];
        assert_eq!(load_page(&files).unwrap().tables[0].title, "A");

        std::fs::write(file.path(), "tables: [{title: B, headers: [x]}]").unwrap();
        assert_eq!(load_page(&files).unwrap().tables[0].title, "B");
    }

    #[test]
    fn test_reload_failure_becomes_error_action() {
        let page = Page::new(None, vec![]);
        let mut app = App::new(Config::default(), vec![PathBuf::from("/no/such/page.yaml")], page);
        app.reload().unwrap();
        match app.action_rx.try_recv().unwrap() {
            Action::Error(e) => {
                assert_eq!(e.title, "Reload failed");
                assert!(e.message.contains("Fail to read file"), "got {}", e.message);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}
