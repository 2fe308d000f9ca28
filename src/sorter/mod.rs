//! Sorting of table body rows by an activated header cell.
//!
//! The sorter never looks at how a table is drawn. It reads cell text and writes back a new row
//! order through [`TableView`], and remembers one direction per header in [`TableSorter`].

mod collate;
mod merge;
mod number;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use thiserror::Error;
use tracing::{debug, trace};

pub use self::collate::compare as collate;
pub use self::number::parse_number;
use crate::models::Page;
use crate::models::sort::{SortDir, SortSpec};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("row {row} has no cell at column {column}")]
    MissingCell { row: usize, column: usize },
    #[error("{0} is not bound to any table on the page")]
    UnknownHeader(HeaderId),
    #[error("new row order is not a permutation of {rows} rows")]
    BadOrder { rows: usize },
}

/// A header cell on a page: which table, and its position among its sibling headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeaderId {
    pub table: usize,
    pub column: usize,
}

impl HeaderId {
    pub fn new(table: usize, column: usize) -> Self {
        Self { table, column }
    }
}

impl fmt::Display for HeaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "header {} of table {}", self.column, self.table)
    }
}

/// The part of a displayed table the sorter works against.
pub trait TableView {
    /// Number of body rows.
    fn row_count(&self) -> usize;

    /// Indexes of the body rows in their current order.
    fn rows(&self) -> Range<usize> {
        0..self.row_count()
    }

    /// Text compared when sorting by `col`: the visible text, or the raw text when nothing is
    /// visible. Fails when the row is too short to have that column.
    fn cell_text(&self, row: usize, col: usize) -> Result<Cow<'_, str>, SortError>;

    /// Rearrange the body so that new position `i` holds the row previously at `new_order[i]`.
    fn reorder_rows(&mut self, new_order: &[usize]) -> Result<(), SortError>;
}

/// Compare two cell values in ascending order.
///
/// Two non-empty numeric values compare by their difference; anything else, including a blank
/// value against a number, compares as text.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    if !a.is_empty()
        && !b.is_empty()
        && let (Some(x), Some(y)) = (parse_number(a), parse_number(b))
    {
        // NaN (`Infinity - Infinity`) counts as equal
        return (x - y).partial_cmp(&0.0).unwrap_or(Ordering::Equal);
    }
    collate(a, b)
}

/// Direction swaps the operands, the comparison itself is never inverted.
#[inline]
pub fn compare_directed(a: &str, b: &str, dir: SortDir) -> Ordering {
    match dir {
        SortDir::Asc => compare_values(a, b),
        SortDir::Desc => compare_values(b, a),
    }
}

/// Reorder the rows of `view` by the values in `column`.
///
/// All values are read before anything moves, so a structural error leaves the table untouched.
pub fn sort_by_column<V>(view: &mut V, column: usize, dir: SortDir) -> Result<(), SortError>
where
    V: TableView + ?Sized,
{
    let values = view
        .rows()
        .map(|row| view.cell_text(row, column).map(Cow::into_owned))
        .collect::<Result<Vec<String>, _>>()?;

    let mut order: Vec<usize> = (0..values.len()).collect();
    merge::sort_by(&mut order, |&a, &b| compare_directed(&values[a], &values[b], dir));
    trace!(column, ?dir, ?order, "computed row order");
    view.reorder_rows(&order)
}

/// Remembers the direction of every header on a page and sorts when one is activated.
///
/// Each header starts out "not ascending" ([`SortDir::Desc`]) and toggles on every activation,
/// so the first activation sorts ascending. Headers do not share state, but only the most
/// recent activation in a table decides its row order.
#[derive(Debug, Default, Clone)]
pub struct TableSorter {
    directions: HashMap<HeaderId, SortDir>,
    last_sorted: HashMap<usize, SortSpec>,
}

impl TableSorter {
    /// Bind every header of every table on `page`.
    pub fn install(page: &Page) -> Self {
        let directions: HashMap<HeaderId, SortDir> =
            page.headers().map(|header| (header, SortDir::default())).collect();
        debug!(headers = directions.len(), tables = page.tables.len(), "installed table sorter");
        Self { directions, last_sorted: HashMap::new() }
    }

    #[cfg(test)]
    pub fn is_bound(&self, header: HeaderId) -> bool {
        self.directions.contains_key(&header)
    }

    /// Direction of the most recent activation of `header`, `None` for unbound headers.
    #[cfg(test)]
    pub fn direction(&self, header: HeaderId) -> Option<SortDir> {
        self.directions.get(&header).copied()
    }

    /// The header that last determined the row order of `table`.
    pub fn last_sorted(&self, table: usize) -> Option<SortSpec> {
        self.last_sorted.get(&table).copied()
    }

    /// Activate `header`, sorting `view` by its column.
    ///
    /// The remembered direction flips before sorting, so it flips even if the table turns out
    /// to be malformed.
    pub fn activate<V>(&mut self, header: HeaderId, view: &mut V) -> Result<SortDir, SortError>
    where
        V: TableView + ?Sized,
    {
        let remembered =
            self.directions.get_mut(&header).ok_or(SortError::UnknownHeader(header))?;
        *remembered = remembered.toggle();
        let dir = *remembered;

        sort_by_column(view, header.column, dir)?;
        self.last_sorted.insert(header.table, SortSpec { col: header.column, dir });
        Ok(dir)
    }

    /// Activate `header` against the table it belongs to on `page`.
    pub fn activate_on(&mut self, page: &mut Page, header: HeaderId) -> Result<SortDir, SortError> {
        let table = page.tables.get_mut(header.table).ok_or(SortError::UnknownHeader(header))?;
        self.activate(header, table)
    }
}
