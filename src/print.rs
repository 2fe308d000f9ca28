use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use tracing::info;

use crate::cli::SortArg;
use crate::models::{Page, Table};
use crate::sorter::TableSorter;
use crate::utils::text_ui::{pad_right, text_width};

const COLUMN_GAP: &str = "  ";

/// Activate each header named by `sorts`, in order, as if it was clicked.
pub fn apply_sorts(page: &mut Page, sorter: &mut TableSorter, sorts: &[SortArg]) -> Result<()> {
    for arg in sorts {
        let table = match &arg.table {
            Some(key) => {
                page.find_table(key).ok_or_else(|| anyhow!("No table `{key}` on the page"))?
            }
            None => 0,
        };
        let header = page
            .find_header(table, &arg.column)
            .ok_or_else(|| anyhow!("No header `{}` in table {table}", arg.column))?;
        let dir = sorter
            .activate_on(page, header)
            .with_context(|| format!("Fail to sort by {header}"))?;
        info!(%header, ?dir, "Sorted");
    }
    Ok(())
}

/// Write every table of `page` as aligned text, marking the header that last sorted each one.
pub fn write_page<W: Write>(out: &mut W, page: &Page, sorter: &TableSorter) -> io::Result<()> {
    if let Some(title) = &page.title {
        writeln!(out, "{title}")?;
        writeln!(out)?;
    }
    for (idx, table) in page.tables.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        let headers: Vec<String> = table
            .headers
            .iter()
            .enumerate()
            .map(|(col, h)| match sorter.last_sorted(idx) {
                Some(spec) if spec.col == col => format!("{h} {}", spec.dir.symbol()),
                _ => h.clone(),
            })
            .collect();
        write_table(out, table, &headers)?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, table: &Table, headers: &[String]) -> io::Result<()> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            (0..table.rows.len())
                .map(|row| text_width(table.display_text(row, col)))
                .fold(text_width(h), usize::max)
        })
        .collect();

    if !table.title.is_empty() {
        writeln!(out, "{}", table.title)?;
    }
    write_line(out, headers.iter().map(String::as_str), &widths)?;
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    write_line(out, rule.iter().map(String::as_str), &widths)?;
    for row in 0..table.rows.len() {
        write_line(out, (0..widths.len()).map(|col| table.display_text(row, col)), &widths)?;
    }
    Ok(())
}

fn write_line<'a, W, I>(out: &mut W, cells: I, widths: &[usize]) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = &'a str>,
{
    let line: Vec<String> = cells.zip(widths).map(|(text, &w)| pad_right(text, w)).collect();
    writeln!(out, "{}", line.join(COLUMN_GAP).trim_end())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Cell;

    fn page() -> Page {
        let table = Table::new(
            "People",
            vec!["Name".into(), "Age".into()],
            vec![
                vec![Cell::new("Bob"), Cell::new("30")],
                vec![Cell::new("Al"), Cell::new("5")],
                vec![Cell::new("Cy"), Cell::new("100")],
            ],
        );
        Page::new(Some("Roster".into()), vec![table])
    }

    fn sort(args: &[&str]) -> Vec<SortArg> {
        args.iter().map(|a| a.parse().unwrap()).collect()
    }

    fn render(page: &Page, sorter: &TableSorter) -> String {
        let mut buf = Vec::new();
        write_page(&mut buf, page, sorter).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_print_unsorted() {
        let page = page();
        let sorter = TableSorter::install(&page);
        let expected = "\
Roster

People
Name  Age
----  ---
Bob   30
Al    5
Cy    100
";
        assert_eq!(render(&page, &sorter), expected);
    }

    #[test]
    fn test_print_sorted() {
        let mut page = page();
        let mut sorter = TableSorter::install(&page);
        apply_sorts(&mut page, &mut sorter, &sort(&["People:Age"])).unwrap();
        let expected = "\
Roster

People
Name  Age ▴
----  -----
Al    5
Bob   30
Cy    100
";
        assert_eq!(render(&page, &sorter), expected);
    }

    #[test]
    fn test_repeated_sort_toggles() {
        let mut page = page();
        let mut sorter = TableSorter::install(&page);
        apply_sorts(&mut page, &mut sorter, &sort(&["Age", "0:1"])).unwrap();
        let ages: Vec<&str> = page.tables[0].rows.iter().map(|r| r[1].value()).collect();
        assert_eq!(ages, vec!["100", "30", "5"]);
    }

    #[test]
    fn test_unknown_sort_targets() {
        let mut page = page();
        let mut sorter = TableSorter::install(&page);
        let err = apply_sorts(&mut page, &mut sorter, &sort(&["Nope:Age"])).unwrap_err();
        assert_eq!(err.to_string(), "No table `Nope` on the page");
        let err = apply_sorts(&mut page, &mut sorter, &sort(&["Height"])).unwrap_err();
        assert_eq!(err.to_string(), "No header `Height` in table 0");
    }

    #[test]
    fn test_missing_cell_fails() {
        let mut page = page();
        page.tables[0].rows[1].truncate(1);
        let mut sorter = TableSorter::install(&page);
        let err = apply_sorts(&mut page, &mut sorter, &sort(&["Age"])).unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "Fail to sort by header 1 of table 0: row 1 has no cell at column 1"
        );
    }
}
