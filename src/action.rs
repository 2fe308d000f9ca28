use crate::error::UserError;
use crate::models::Page;
use crate::widgets::shortcut::Shortcut;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(UserError),
    Help,
    Unfocus,
    /// Read the page files again.
    Reload,
    PageLoaded(Box<Page>),
    FocusTable(usize),
    Shortcuts(Vec<Shortcut>),
}
