use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub const DEFAULT_HL_COLOR: Color = Color::Indexed(130);

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Raw(Box<str>),
    Hl(Box<str>),
}

impl Fragment {
    #[inline]
    pub fn raw<S: Into<Box<str>>>(s: S) -> Self {
        Self::Raw(s.into())
    }

    #[inline]
    pub fn hl<S: Into<Box<str>>>(s: S) -> Self {
        Self::Hl(s.into())
    }
}

/// A key hint shown in the footer, e.g. `Tab next table`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortcut {
    parts: Vec<Fragment>,
}

impl Shortcut {
    pub fn new(parts: Vec<Fragment>) -> Self {
        Self { parts }
    }

    /// Highlighted `key` followed by a plain `description`.
    pub fn key(key: &str, description: &str) -> Self {
        Self::new(vec![Fragment::hl(key), Fragment::raw(format!(" {description}"))])
    }

    /// Two highlighted keys around a description, e.g. `← column →`.
    pub fn pair(left: &str, description: &str, right: &str) -> Self {
        Self::new(vec![
            Fragment::hl(left),
            Fragment::raw(format!(" {description} ")),
            Fragment::hl(right),
        ])
    }

    pub fn spans(&'_ self, hl_style: Option<Style>) -> Vec<Span<'_>> {
        let hl_style = hl_style.unwrap_or(Style::default().fg(DEFAULT_HL_COLOR));
        self.parts
            .iter()
            .filter_map(|v| match v {
                Fragment::Raw(s) if !s.is_empty() => Some(Span::raw(s.as_ref())),
                Fragment::Hl(s) if !s.is_empty() => Some(Span::styled(s.as_ref(), hl_style)),
                _ => None,
            })
            .collect()
    }
}

/// Lay shortcuts out on one line, separated by `sep`.
pub fn shortcut_line<'a>(shortcuts: &'a [Shortcut], sep: &'a str, hl_style: Style) -> Line<'a> {
    let mut spans = Vec::with_capacity(shortcuts.len() * 3);
    for (i, shortcut) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(sep));
        }
        spans.extend(shortcut.spans(Some(hl_style)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key() {
        let sc = Shortcut::key("Tab", "next table");
        let spans = sc.spans(None);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "Tab");
        assert_eq!(spans[0].style.fg, Some(DEFAULT_HL_COLOR));
        assert_eq!(spans[1].content, " next table");
        assert_eq!(spans[1].style.fg, None);
    }

    #[test]
    fn test_empty_fragments_dropped() {
        let sc = Shortcut::new(vec![Fragment::hl(""), Fragment::raw("x"), Fragment::raw("")]);
        assert_eq!(sc.spans(None).len(), 1);
    }

    #[test]
    fn test_shortcut_line() {
        let shortcuts = vec![Shortcut::key("h", "help"), Shortcut::pair("←", "column", "→")];
        let style = Style::default().fg(Color::Cyan);
        let line = shortcut_line(&shortcuts, "  ", style);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "h help  ← column →");
        assert_eq!(line.spans[0].style.fg, Some(Color::Cyan));
    }
}
