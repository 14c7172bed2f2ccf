//! Options for the picker, read from `key value` lines.
//!
//! Files and `-o key=value` overrides are merged in order over the defaults.
//! Scalar keys replace the previous value, list keys (`exclude`) append to it.
use crate::ui::terminal::CursorShape;
use crate::ui::UiOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/kovidgoyal/kitty-themes/master/themes.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{origin}:{line}: unknown option '{key}'")]
    UnknownKey {
        origin: String,
        line: usize,
        key: String,
    },

    #[error("{origin}:{line}: invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        origin: String,
        line: usize,
        key: String,
        value: String,
        reason: String,
    },

    #[error("{origin}:{line}: expected 'key value', got '{text}'")]
    Malformed {
        origin: String,
        line: usize,
        text: String,
    },

    #[error("could not read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub catalog_url: String,
    pub catalog_file: Option<PathBuf>,
    pub fetch_delay: Duration,
    pub request_timeout: Duration,
    pub window_title: String,
    pub cursor_shape: CursorShape,
    pub exclude: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        let ui = UiOptions::default();
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_file: None,
            fetch_delay: Duration::ZERO,
            request_timeout: Duration::from_secs(30),
            window_title: ui.window_title,
            cursor_shape: ui.cursor_shape,
            exclude: ui.exclude,
        }
    }
}

/// Where a setting came from, for error messages.
#[derive(Debug, Clone, Copy)]
struct Origin<'a> {
    name: &'a str,
    line: usize,
}

impl Options {
    /// Applies a single setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_from(
            key,
            value,
            Origin {
                name: "<command line>",
                line: 0,
            },
        )
    }

    fn set_from(&mut self, key: &str, value: &str, origin: Origin<'_>) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            origin: origin.name.to_string(),
            line: origin.line,
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };

        match key {
            "catalog_url" => self.catalog_url = value.to_string(),
            "catalog_file" => self.catalog_file = Some(PathBuf::from(value)),
            "fetch_delay" => self.fetch_delay = parse_seconds(value).map_err(invalid)?,
            "request_timeout" => self.request_timeout = parse_seconds(value).map_err(invalid)?,
            "window_title" => self.window_title = value.to_string(),
            "cursor_shape" => self.cursor_shape = value.parse().map_err(invalid)?,
            "exclude" => self.exclude.push(value.to_string()),
            _ => {
                return Err(ConfigError::UnknownKey {
                    origin: origin.name.to_string(),
                    line: origin.line,
                    key: key.to_string(),
                })
            }
        }
        debug!("Option {} = {:?}", key, value);
        Ok(())
    }

    /// Merges `key value` lines. Blank lines and `#` comments are skipped.
    pub fn merge_str(&mut self, text: &str, origin: &str) -> Result<(), ConfigError> {
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let at = Origin {
                name: origin,
                line: index + 1,
            };
            let (key, value) = line
                .split_once(char::is_whitespace)
                .map(|(key, value)| (key, value.trim()))
                .ok_or_else(|| ConfigError::Malformed {
                    origin: origin.to_string(),
                    line: at.line,
                    text: line.to_string(),
                })?;
            self.set_from(key, value, at)?;
        }
        Ok(())
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_str(&text, &path.display().to_string())
    }

    /// Applies a `key=value` override as given to `-o`.
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), ConfigError> {
        match assignment.split_once('=') {
            Some((key, value)) => self.set(key.trim(), value.trim()),
            None => Err(ConfigError::Malformed {
                origin: "<command line>".to_string(),
                line: 0,
                text: assignment.to_string(),
            }),
        }
    }

    pub fn ui_options(&self) -> UiOptions {
        UiOptions {
            window_title: self.window_title.clone(),
            cursor_shape: self.cursor_shape,
            exclude: self.exclude.clone(),
        }
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| "expected a number of seconds".to_string())?;
    if !secs.is_finite() || secs < 0.0 {
        return Err("must be a non-negative number".to_string());
    }
    Ok(Duration::from_secs_f64(secs))
}
