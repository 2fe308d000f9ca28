use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::widgets::shortcut::DEFAULT_HL_COLOR;

const DEFAULT_CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
    #[serde(default = "default_mouse")]
    pub mouse: bool,
    pub highlight_color: Option<String>,
}

fn default_mouse() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self { log_file: None, log_level: None, mouse: default_mouse(), highlight_color: None }
    }
}

impl Config {
    /// Load the config from `path`, or from the default location, writing the default config
    /// there on first run.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.is_file() {
                    bail!("Config file `{}` does not exist", path.display());
                }
                Self::load(&path)
            }
            None => {
                let path = get_config_path()?;
                if !path.is_file() {
                    fs::write(&path, DEFAULT_CONFIG)
                        .with_context(|| format!("Fail to write file `{}`", path.display()))?;
                    return Self::parse(DEFAULT_CONFIG);
                }
                Self::load(&path)
            }
        }
    }

    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Fail to open file `{}`", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Fail to deserialize file `{}`", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Style for highlighted keys and sort markers; an unparsable color falls back to the
    /// default one.
    pub fn highlight_style(&self) -> Style {
        let color = match self.highlight_color.as_deref().map(Color::from_str) {
            Some(Ok(color)) => color,
            Some(Err(_)) => {
                warn!(color = ?self.highlight_color, "Unknown highlight color");
                DEFAULT_HL_COLOR
            }
            None => DEFAULT_HL_COLOR,
        };
        Style::default().fg(color)
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let dir = get_project_dir()?.config_dir().to_owned();
    if !dir.is_dir() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Fail to create directory `{}`", dir.display()))?;
    }

    Ok(dir.join("config.yaml"))
}

pub fn get_project_dir() -> Result<ProjectDirs> {
    ProjectDirs::from("io.github", "", env!("CARGO_PKG_NAME"))
        .ok_or(anyhow!("Fail to get project directory"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.log_file, None);
        assert_eq!(config.log_level, Some("warn".to_owned()));
        assert!(config.mouse);
        assert_eq!(config.highlight_style().fg, Some(Color::Rgb(0xaf, 0x5f, 0x00)));
    }

    #[test]
    fn test_config_existing_file() {
        let file = config_file(
            r#"
log-file: /tmp/log.log
log-level: "info"
mouse: false
highlight-color: cyan
"#,
        );

        let config = Config::new(Some(file.path().to_owned())).unwrap();
        assert_eq!(
            config,
            Config {
                log_file: Some("/tmp/log.log".to_owned()),
                log_level: Some("info".to_owned()),
                mouse: false,
                highlight_color: Some("cyan".to_owned()),
            }
        );
        assert_eq!(config.highlight_style().fg, Some(Color::Cyan));
    }

    #[test]
    fn test_config_partial_file() {
        let file = config_file("log-level: debug\n");
        let config = Config::new(Some(file.path().to_owned())).unwrap();
        assert!(config.mouse);
        assert_eq!(config.highlight_color, None);
        assert_eq!(config.highlight_style().fg, Some(DEFAULT_HL_COLOR));
    }

    #[test]
    fn test_config_bad_color_falls_back() {
        let config = Config { highlight_color: Some("not-a-color".into()), ..Config::default() };
        assert_eq!(config.highlight_style().fg, Some(DEFAULT_HL_COLOR));
    }

    #[test]
    fn test_config_ser_error() {
        let file = config_file(
            r#"
log-file: ["/tmp/log.log"]
"#,
        );

        let result = Config::new(Some(file.path().to_owned()));
        assert!(result.is_err(), "expected error, got {:?}", result);

        let err_msg = result.unwrap_err().to_string();
        assert!(
            err_msg.contains("Fail to deserialize file"),
            "expected contains `Fail to deserialize file`, but got {}",
            err_msg
        );
    }

    #[test]
    fn test_config_missing_file() {
        let result = Config::new(Some(PathBuf::from("/definitely/not/config.yaml")));
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }
}
