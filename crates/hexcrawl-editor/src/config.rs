//! Configuration for the editor client.
//!
//! Settings come from an optional YAML file (`--config`, or
//! `HEXCRAWL_CONFIG`, resolved by the binary's argument parser) and are
//! then overridden by environment variables:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `HEXCRAWL_BACKEND_URL` | `backend_url` | `http://127.0.0.1:8000` |
//! | `HEXCRAWL_MODE` | `initial_mode` | `paint` |
//! | `HEXCRAWL_SPAWN_TABLE` | `spawn_table` | `wilds_basic` |
//! | `HEXCRAWL_LOG_FORMAT` | `log_format` | `pretty` |

use std::path::Path;

use hexcrawl_types::EditorMode;
use serde::Deserialize;

use crate::error::EditorError;

/// Encounter table every spawner placed from the grid is bound to.
pub const DEFAULT_SPAWN_TABLE: &str = "wilds_basic";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, one event per line.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(EditorError::Config(format!("unknown log format: {other}"))),
        }
    }
}

/// Complete editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Base URL of the world backend (no trailing `/api`).
    pub backend_url: String,
    /// Grid-click mode active at startup.
    pub initial_mode: EditorMode,
    /// Terrain selector value at startup.
    pub default_terrain: String,
    /// Site-kind selector value at startup.
    pub default_site_kind: String,
    /// Encounter table used for every spawner placed from the grid.
    ///
    /// There is no selector for this; it is fixed for the session.
    pub spawn_table: String,
    /// Tracing output format.
    pub log_format: LogFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_owned(),
            initial_mode: EditorMode::Paint,
            default_terrain: "plains".to_owned(),
            default_site_kind: "dungeon".to_owned(),
            spawn_table: DEFAULT_SPAWN_TABLE.to_owned(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl EditorConfig {
    /// Load configuration for the running process.
    ///
    /// Reads `path` if one is given, otherwise starts from defaults;
    /// environment variables are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, EditorError> {
        let mut config = match path {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Read a YAML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EditorError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, EditorError> {
        let config: Self = serde_yml::from_str(yaml)
            .map_err(|e| EditorError::Config(format!("failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HEXCRAWL_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), EditorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("HEXCRAWL_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(mode) = lookup("HEXCRAWL_MODE") {
            self.initial_mode = mode
                .parse()
                .map_err(|e| EditorError::Config(format!("invalid HEXCRAWL_MODE: {e}")))?;
        }
        if let Some(table) = lookup("HEXCRAWL_SPAWN_TABLE") {
            self.spawn_table = table;
        }
        if let Some(format) = lookup("HEXCRAWL_LOG_FORMAT") {
            self.log_format = format.parse()?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), EditorError> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://"))
        {
            return Err(EditorError::Config(format!(
                "backend_url must be an http(s) URL, got `{}`",
                self.backend_url
            )));
        }
        if self.spawn_table.trim().is_empty() {
            return Err(EditorError::Config("spawn_table must not be empty".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_backend_conventions() {
        let config = EditorConfig::default();
        assert_eq!(config.backend_url, "http://127.0.0.1:8000");
        assert_eq!(config.initial_mode, EditorMode::Paint);
        assert_eq!(config.spawn_table, "wilds_basic");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn yaml_overrides_only_given_keys() {
        let config = EditorConfig::parse("backend_url: http://sim:9000\ninitial_mode: spawn\n");
        let config = config.unwrap_or_default();
        assert_eq!(config.backend_url, "http://sim:9000");
        assert_eq!(config.initial_mode, EditorMode::Spawn);
        assert_eq!(config.default_terrain, "plains");
    }

    #[test]
    fn env_overrides_win() {
        let mut config = EditorConfig::default();
        let result = config.apply_overrides(env(&[
            ("HEXCRAWL_BACKEND_URL", "https://editor.example"),
            ("HEXCRAWL_MODE", "site"),
            ("HEXCRAWL_LOG_FORMAT", "json"),
        ]));
        assert!(result.is_ok());
        assert_eq!(config.backend_url, "https://editor.example");
        assert_eq!(config.initial_mode, EditorMode::Site);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_mode_is_a_config_error() {
        let mut config = EditorConfig::default();
        let result = config.apply_overrides(env(&[("HEXCRAWL_MODE", "erase")]));
        assert!(matches!(result, Err(EditorError::Config(_))));
    }

    #[test]
    fn non_http_backend_is_rejected() {
        let result = EditorConfig::parse("backend_url: ftp://sim\n");
        assert!(matches!(result, Err(EditorError::Config(_))));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = EditorConfig::from_file(Path::new("/nonexistent/hexcrawl.yaml"));
        assert!(matches!(result, Err(EditorError::Config(_))));
    }
}
