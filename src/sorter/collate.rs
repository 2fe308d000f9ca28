//! Locale-aware string ordering, modelled on the CLDR root collation.
//!
//! Strings are compared in three passes. The primary pass looks at base characters only: case is
//! folded, diacritics are dropped after canonical decomposition, and characters are grouped as
//! white space, punctuation, symbols, digits and letters, in that order. Ties are broken by
//! diacritics (unaccented first), then by case (lowercase first). Control characters are ignored.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Space,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

impl Group {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            Group::Space
        } else if c.is_ascii_punctuation() {
            match c {
                '`' | '^' | '+' | '<' | '=' | '>' | '|' | '~' | '$' => Group::Symbol,
                _ => Group::Punctuation,
            }
        } else if c.is_numeric() {
            Group::Digit
        } else if c.is_alphabetic() {
            Group::Letter
        } else {
            Group::Symbol
        }
    }
}

#[derive(Debug)]
struct Element {
    group: Group,
    base: char,
    marks: Vec<char>,
    upper: bool,
}

fn elements(s: &str) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::with_capacity(s.len());
    for c in s.nfd() {
        if c.is_control() {
            continue;
        }
        if is_combining_mark(c) {
            if let Some(last) = out.last_mut() {
                last.marks.push(c);
            }
            continue;
        }
        out.push(Element {
            group: Group::of(c),
            base: c.to_lowercase().next().unwrap_or(c),
            marks: Vec::new(),
            upper: c.is_uppercase(),
        });
    }
    out
}

/// Compare two strings the way a user of the default locale expects to see them ordered.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = elements(a);
    let b = elements(b);

    let primary = a.iter().map(|e| (e.group, e.base)).cmp(b.iter().map(|e| (e.group, e.base)));
    primary
        .then_with(|| a.iter().map(|e| &e.marks).cmp(b.iter().map(|e| &e.marks)))
        .then_with(|| a.iter().map(|e| e.upper).cmp(b.iter().map(|e| e.upper)))
}
