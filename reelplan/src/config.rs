//! User configuration for reelplan.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/reelplan/config.toml` (falling
//! back to `~/.config/reelplan/config.toml`). Every key is optional. A missing
//! file yields the defaults; a malformed file is reported and the defaults are
//! used, so configuration problems never prevent startup.
//!
//! ```toml
//! theme = "catppuccin-mocha"
//!
//! [producer]
//! kind = "http"                      # demo | file | http
//! endpoint = "http://localhost:8000/generate-video"
//! max_ideators = 1
//! timeout_secs = 120
//! latency_ms = 0
//!
//! [timeline]
//! card_width = 44
//! gap = 2
//! scroll_step = 40
//! smooth_scroll = true
//!
//! [log]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use reelplan_core::ScrollOptions;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Where storyboards come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProducerKind {
    /// The bundled sample storyboard.
    #[default]
    Demo,
    /// A storyboard JSON file on disk.
    File,
    /// A generation service reached over HTTP.
    Http,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    pub kind: ProducerKind,
    /// Payload file for `kind = "file"`.
    pub path: Option<PathBuf>,
    /// Generation endpoint for `kind = "http"`.
    pub endpoint: String,
    pub max_ideators: u32,
    /// Artificial delay before a load completes.
    pub latency_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            kind: ProducerKind::Demo,
            path: None,
            endpoint: "http://localhost:8000/generate-video".to_owned(),
            max_ideators: 1,
            latency_ms: 0,
            timeout_secs: 120,
        }
    }
}

/// Card geometry and scroll behaviour of the timeline strip, in columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub card_width: u16,
    pub gap: u16,
    pub scroll_step: u16,
    pub smooth_scroll: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            card_width: 44,
            gap: 2,
            scroll_step: 40,
            smooth_scroll: true,
        }
    }
}

impl TimelineConfig {
    pub fn scroll_options(&self) -> ScrollOptions {
        ScrollOptions {
            step: f32::from(self.scroll_step.max(1)),
            smooth: self.smooth_scroll,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Log file; defaults to the XDG state directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub producer: ProducerConfig,
    pub timeline: TimelineConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            producer: ProducerConfig::default(),
            timeline: TimelineConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Loads `path`. A missing file is not an error and yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Returns the path to the reelplan config file.
///
/// Prefers `$XDG_CONFIG_HOME/reelplan/config.toml`; falls back to
/// `~/.config/reelplan/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join("config.toml")
}

/// Default log file: `$XDG_STATE_HOME/reelplan/reelplan.log`, falling back to
/// `~/.local/state/reelplan/reelplan.log`.
pub fn default_log_path() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state").join("reelplan.log")
}

fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    let base = std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(home_fallback))
        })
        .unwrap_or_else(|| PathBuf::from(home_fallback));
    base.join("reelplan")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            theme = "dark"
            [producer]
            kind = "file"
            path = "board.json"
            [timeline]
            gap = 4
            smooth_scroll = false
            "#,
        )
        .unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.producer.kind, ProducerKind::File);
        assert_eq!(config.producer.path, Some(PathBuf::from("board.json")));
        assert_eq!(config.producer.max_ideators, 1);
        assert_eq!(config.timeline.card_width, 44);
        assert_eq!(config.timeline.gap, 4);

        let options = config.timeline.scroll_options();
        assert_eq!(options.step, 40.0);
        assert!(!options.smooth);
    }

    #[test]
    fn unknown_producer_kind_is_an_error() {
        assert!(Config::parse("[producer]\nkind = \"ftp\"").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = Path::new("/nonexistent/reelplan/config.toml");
        assert_eq!(Config::load(path).unwrap(), Config::default());
    }
}
