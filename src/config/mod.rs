use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tui::ThemeConfig;

/// Contents of `~/.tarefas/config.toml`. Everything is optional; a missing
/// file yields the defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Event-loop tick rate in milliseconds. Default: 250.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Where to write the tracing log. The terminal is owned by the TUI, so
    /// logging is off unless a file is configured here.
    #[serde(default)]
    pub log_file: Option<String>,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tick_rate_ms: default_tick_rate_ms(),
            log_file: None,
            theme: ThemeConfig::default(),
        }
    }
}

fn default_tick_rate_ms() -> u64 {
    250
}

/// Template written by `tarefas init`.
const DEFAULT_CONFIG: &str = "\
# tarefas configuration
#
# tick_rate_ms = 250
# log_file = \"/tmp/tarefas.log\"
#
# [theme]
# border_focused = \"cyan\"
# task_done = \"rgb(29, 184, 99)\"
";

/// Returns the base config directory: ~/.tarefas/
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".tarefas"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.toml"))
}

/// Ensure the config directory exists.
pub fn ensure_dirs() -> Result<()> {
    fs::create_dir_all(base_dir()?).context("failed to create ~/.tarefas/")?;
    Ok(())
}

/// Write the commented default config, unless one already exists.
pub fn write_default_config() -> Result<PathBuf> {
    let path = config_path()?;
    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(path)
}

/// Load config from ~/.tarefas/config.toml (or defaults if it doesn't exist).
pub fn load() -> Result<Config> {
    let path = config_path()?;
    if path.exists() { load_from(&path) } else { Ok(Config::default()) }
}

/// Load config from an explicit path (`--config`). The file must exist.
pub fn load_from(path: &Path) -> Result<Config> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = Config::default();
        assert_eq!(cfg.tick_rate_ms, 250);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn empty_file_uses_serde_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();
        let cfg = load_from(file.path()).unwrap();
        assert_eq!(cfg.tick_rate_ms, 250);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn load_from_parses_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"tick_rate_ms = 100\nlog_file = \"/tmp/t.log\"\n\n[theme]\nborder_focused = \"red\"\n",
        )
        .unwrap();

        let cfg = load_from(file.path()).unwrap();
        assert_eq!(cfg.tick_rate_ms, 100);
        assert_eq!(cfg.log_file.as_deref(), Some("/tmp/t.log"));
        assert_eq!(
            cfg.theme.build().border_focused,
            ratatui::style::Color::Red
        );
    }

    #[test]
    fn load_from_missing_file_errors() {
        assert!(load_from(Path::new("/nonexistent/config.toml")).is_err());
    }

    #[test]
    fn default_template_parses() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(cfg.tick_rate_ms, 250);
    }
}
