use std::borrow::Cow;

use serde::Deserialize;

use crate::sorter::{SortError, TableView};

/// One table cell: the text shown on screen, plus optional raw text that stands in for it when
/// the shown text is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "CellRepr")]
pub struct Cell {
    pub text: String,
    pub raw: Option<String>,
}

impl Cell {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into(), raw: None }
    }

    #[cfg(test)]
    pub fn with_raw<S: Into<String>, R: Into<String>>(text: S, raw: R) -> Self {
        Self { text: text.into(), raw: Some(raw.into()) }
    }

    /// The text used for sorting.
    pub fn value(&self) -> &str {
        if self.text.is_empty() { self.raw.as_deref().unwrap_or("") } else { &self.text }
    }
}

/// Cell shapes accepted in page documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Full {
        #[serde(default)]
        text: String,
        #[serde(default)]
        raw: Option<String>,
    },
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl From<CellRepr> for Cell {
    fn from(value: CellRepr) -> Self {
        match value {
            CellRepr::Full { text, raw } => Cell { text, raw },
            CellRepr::Text(text) => Cell::new(text),
            CellRepr::Int(n) => Cell::new(n.to_string()),
            CellRepr::Float(n) => Cell::new(n.to_string()),
            CellRepr::Bool(b) => Cell::new(b.to_string()),
            CellRepr::Empty => Cell::default(),
        }
    }
}

/// Header cells plus body rows aligned with them by position.
///
/// Rows are allowed to be shorter than the header row; the missing cells draw as blanks, but
/// sorting by one of those columns fails with [`SortError::MissingCell`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub title: String,
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    #[cfg(test)]
    pub fn new<S: Into<String>>(title: S, headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { title: title.into(), headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Text shown at `(row, col)`, blank for missing cells.
    pub fn display_text(&self, row: usize, col: usize) -> &str {
        self.rows.get(row).and_then(|r| r.get(col)).map(|c| c.text.as_str()).unwrap_or("")
    }

    /// Indexes of rows with fewer cells than there are headers.
    pub fn short_rows(&self) -> impl Iterator<Item = usize> + '_ {
        let width = self.column_count();
        self.rows.iter().enumerate().filter(move |(_, r)| r.len() < width).map(|(i, _)| i)
    }
}

impl TableView for Table {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_text(&self, row: usize, col: usize) -> Result<Cow<'_, str>, SortError> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|cell| Cow::Borrowed(cell.value()))
            .ok_or(SortError::MissingCell { row, column: col })
    }

    fn reorder_rows(&mut self, new_order: &[usize]) -> Result<(), SortError> {
        let rows = self.rows.len();
        let mut seen = vec![false; rows];
        let is_permutation = new_order.len() == rows
            && new_order.iter().all(|&i| i < rows && !std::mem::replace(&mut seen[i], true));
        if !is_permutation {
            return Err(SortError::BadOrder { rows });
        }

        let mut old: Vec<Option<Vec<Cell>>> =
            std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        self.rows = new_order.iter().filter_map(|&i| old[i].take()).collect();
        Ok(())
    }
}
