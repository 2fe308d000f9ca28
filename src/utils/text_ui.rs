use const_format::concatcp;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::line::{TOP_LEFT, TOP_RIGHT};
use ratatui::text::{Line, Span};

pub const TOP_TITLE_LEFT: &str = concatcp!(TOP_RIGHT, " ");
pub const TOP_TITLE_RIGHT: &str = concatcp!(" ", TOP_LEFT);

pub fn top_title_line<S: Into<Style>>(title: &'_ str, title_style: S) -> Line<'_> {
    Line::from(vec![
        Span::raw(TOP_TITLE_LEFT),
        Span::styled(title, title_style),
        Span::raw(TOP_TITLE_RIGHT),
    ])
}

/// Centered popup area taking `percent_x` / `percent_y` of `area`.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Display width of `text` in terminal columns.
#[inline]
pub fn text_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Pad `text` with spaces up to `width` terminal columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len() + width);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(text_width(text))));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_area() {
        let area = popup_area(Rect::new(0, 0, 100, 40), 80, 50);
        assert_eq!(area, Rect::new(10, 10, 80, 20));
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
        // wide characters take two columns
        assert_eq!(text_width("名前"), 4);
        assert_eq!(pad_right("名前", 5), "名前 ");
    }
}
