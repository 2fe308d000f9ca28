use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::Table;
use crate::sorter::HeaderId;

/// A set of tables shown together, as loaded from one or more page documents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Yaml,
    Json,
}

impl DocFormat {
    /// Pick the format from the file extension; anything but `.json` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocFormat::Json,
            _ => DocFormat::Yaml,
        }
    }
}

impl Page {
    #[cfg(test)]
    pub fn new(title: Option<String>, tables: Vec<Table>) -> Self {
        Self { title, tables }
    }

    pub fn parse(content: &str, format: DocFormat) -> Result<Self> {
        let page = match format {
            DocFormat::Yaml => serde_yaml_ng::from_str(content)?,
            DocFormat::Json => serde_json::from_str(content)?,
        };
        Ok(page)
    }

    /// Load one page document. `-` reads YAML from stdin.
    pub fn load(path: &Path) -> Result<Self> {
        let (content, format) = if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Fail to read page from stdin")?;
            (buf, DocFormat::Yaml)
        } else {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Fail to read file `{}`", path.display()))?;
            (content, DocFormat::from_path(path))
        };
        let mut page = Self::parse(&content, format)
            .with_context(|| format!("Fail to deserialize file `{}`", path.display()))?;
        if page.title.is_none() && path != Path::new("-") {
            page.title = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        }
        info!(path = %path.display(), tables = page.tables.len(), "Loaded page");
        Ok(page)
    }

    /// Load every document and join their tables, in order, into one page named after the
    /// first document.
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut pages = paths.iter().map(|p| Self::load(p.as_ref()));
        let Some(first) = pages.next() else {
            bail!("No page document given");
        };
        let mut page = first?;
        for other in pages {
            page.tables.extend(other?.tables);
        }
        page.warn_short_rows();
        Ok(page)
    }

    fn warn_short_rows(&self) {
        for table in &self.tables {
            let short: Vec<usize> = table.short_rows().collect();
            if !short.is_empty() {
                warn!(table = %table.title, rows = ?short, "Rows have fewer cells than headers");
            }
        }
    }

    /// Every header cell of every table, in page order.
    pub fn headers(&self) -> impl Iterator<Item = HeaderId> + '_ {
        self.tables.iter().enumerate().flat_map(|(table, t)| {
            (0..t.column_count()).map(move |column| HeaderId::new(table, column))
        })
    }

    /// Find a table by index or title (exact first, then case-insensitive).
    pub fn find_table(&self, key: &str) -> Option<usize> {
        if let Ok(idx) = key.parse::<usize>() {
            return (idx < self.tables.len()).then_some(idx);
        }
        self.tables
            .iter()
            .position(|t| t.title == key)
            .or_else(|| self.tables.iter().position(|t| t.title.eq_ignore_ascii_case(key)))
    }

    /// Find a header of table `table` by index or header text (exact first, then
    /// case-insensitive).
    pub fn find_header(&self, table: usize, key: &str) -> Option<HeaderId> {
        let headers = &self.tables.get(table)?.headers;
        let column = match key.parse::<usize>() {
            Ok(idx) => (idx < headers.len()).then_some(idx),
            Err(_) => headers
                .iter()
                .position(|h| h == key)
                .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(key))),
        }?;
        Some(HeaderId::new(table, column))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    const LEAGUE: &str = r#"
title: League
tables:
  - title: Standings
    headers: [Name, Wins, Losses]
    rows:
      - [Bob, 9, 4]
      - [Al, 11, 2]
  - title: Playoffs
    headers: [Season, Champion]
    rows:
      - [2019, Al]
"#;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocFormat::from_path(Path::new("a.json")), DocFormat::Json);
        assert_eq!(DocFormat::from_path(Path::new("a.JSON")), DocFormat::Json);
        assert_eq!(DocFormat::from_path(Path::new("a.yaml")), DocFormat::Yaml);
        assert_eq!(DocFormat::from_path(Path::new("a")), DocFormat::Yaml);
    }

    #[test]
    fn test_parse_yaml() {
        let page = Page::parse(LEAGUE, DocFormat::Yaml).unwrap();
        assert_eq!(page.title.as_deref(), Some("League"));
        assert_eq!(page.tables.len(), 2);
        assert_eq!(page.tables[0].rows[1][1].value(), "11");
        assert_eq!(
            page.headers().collect::<Vec<_>>(),
            vec![
                HeaderId::new(0, 0),
                HeaderId::new(0, 1),
                HeaderId::new(0, 2),
                HeaderId::new(1, 0),
                HeaderId::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"tables": [{"headers": ["Opponent", "Wins"], "rows": [["Cy", 2]]}]}"#;
        let page = Page::parse(json, DocFormat::Json).unwrap();
        assert_eq!(page.title, None);
        assert_eq!(page.tables[0].title, "");
        assert_eq!(page.tables[0].rows[0][1].value(), "2");
    }

    #[test]
    fn test_load_all_joins_tables() {
        let yaml = temp_file(".yaml", LEAGUE);
        let json = temp_file(".json", r#"{"tables": [{"title": "H2H", "headers": ["Opponent"]}]}"#);

        let page = Page::load_all(&[yaml.path(), json.path()]).unwrap();
        assert_eq!(page.title.as_deref(), Some("League"));
        let titles: Vec<&str> = page.tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Standings", "Playoffs", "H2H"]);
    }

    #[test]
    fn test_load_names_untitled_page_after_file() {
        let file = temp_file(".json", r#"{"tables": []}"#);
        let page = Page::load(file.path()).unwrap();
        let stem = file.path().file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(page.title, Some(stem));
    }

    #[test]
    fn test_load_errors() {
        let missing = Page::load(Path::new("/definitely/not/here.yaml"));
        assert!(missing.unwrap_err().to_string().contains("Fail to read file"));

        let bad = temp_file(".yaml", "tables: [{rows: 1}]");
        let err = Page::load(bad.path()).unwrap_err().to_string();
        assert!(err.contains("Fail to deserialize file"), "got {err}");

        let none: [&Path; 0] = [];
        assert!(Page::load_all(&none).is_err());
    }

    #[test]
    fn test_demo_page() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/league.yaml"));
        let mut page = Page::load(path).unwrap();
        assert_eq!(page.title.as_deref(), Some("Gridiron League"));
        assert_eq!(page.tables.len(), 3);
        assert!(page.tables.iter().all(|t| t.short_rows().next().is_none()));

        let mut sorter = crate::sorter::TableSorter::install(&page);
        let pct = page.find_header(0, "win percentage").unwrap();
        sorter.activate_on(&mut page, pct).unwrap();
        sorter.activate_on(&mut page, pct).unwrap();
        let leader: Vec<&str> = page.tables[0].rows.iter().take(2).map(|r| r[0].value()).collect();
        assert_eq!(leader, vec!["Ortega", "Achebe"]);

        let year = page.find_header(2, "Year").unwrap();
        sorter.activate_on(&mut page, year).unwrap();
        sorter.activate_on(&mut page, year).unwrap();
        assert_eq!(page.tables[2].rows[0][0].value(), "2023");
        let nakamura = page.tables[0].rows.iter().find(|r| r[0].value() == "Nakamura").unwrap();
        assert_eq!(nakamura[4].value(), "0.500");
    }

    #[test]
    fn test_bare_numbers_render_canonically() {
        let yaml = "tables: [{headers: [a, b, c, d], rows: [[0.500, 9873.50, 1e3, \"0.500\"]]}]";
        let page = Page::parse(yaml, DocFormat::Yaml).unwrap();
        let texts: Vec<&str> = page.tables[0].rows[0].iter().map(|c| c.value()).collect();
        assert_eq!(texts, vec!["0.5", "9873.5", "1000", "0.500"]);

        let json = r#"{"tables": [{"headers": ["a", "b"], "rows": [[0.500, "0.500"]]}]}"#;
        let page = Page::parse(json, DocFormat::Json).unwrap();
        assert_eq!(page.tables[0].rows[0][0].value(), "0.5");
        assert_eq!(page.tables[0].rows[0][1].value(), "0.500");
    }

    #[test]
    fn test_find() {
        let page = Page::parse(LEAGUE, DocFormat::Yaml).unwrap();
        assert_eq!(page.find_table("1"), Some(1));
        assert_eq!(page.find_table("5"), None);
        assert_eq!(page.find_table("standings"), Some(0));
        assert_eq!(page.find_table("Playoffs"), Some(1));
        assert_eq!(page.find_table("nope"), None);

        assert_eq!(page.find_header(0, "wins"), Some(HeaderId::new(0, 1)));
        assert_eq!(page.find_header(0, "2"), Some(HeaderId::new(0, 2)));
        assert_eq!(page.find_header(0, "3"), None);
        assert_eq!(page.find_header(1, "Champion"), Some(HeaderId::new(1, 1)));
        assert_eq!(page.find_header(2, "Champion"), None);
    }
}
