use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::summary::DetailMetric;
use crate::pareto::Direction;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PARETO_VIEWER_CONFIG";
/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "pareto-viewer.json";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Hex colours used by the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub data: String,
    pub front: String,
    pub highlight: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            data: "#daa622".into(),
            front: "#008080".into(),
            highlight: "#000000".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Opened at start-up when no path is given on the command line.
    pub default_dataset: Option<PathBuf>,
    /// Column naming each design option (labels, preview file names).
    pub id_column: String,
    /// Directory holding `<label>.png` previews.
    pub image_dir: PathBuf,
    /// Columns where a larger value is better.
    pub maximize_columns: Vec<String>,
    /// Columns plotted as a plain scatter, without a front.
    pub scatter_only_columns: Vec<String>,
    /// Bars shown in a highlighted point's detail window.
    pub detail_metrics: Vec<DetailMetric>,
    pub colors: ColorConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_dataset: None,
            id_column: "index".into(),
            image_dir: PathBuf::from("models"),
            maximize_columns: Vec::new(),
            scatter_only_columns: Vec::new(),
            detail_metrics: Vec::new(),
            colors: ColorConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// `$PARETO_VIEWER_CONFIG`, then `./pareto-viewer.json`, then defaults.
    pub fn discover() -> Self {
        Self::discover_from(std::env::var_os(CONFIG_ENV), Path::new("."))
    }

    /// Lookup behind [`ViewerConfig::discover`]: an explicit `env_path` wins,
    /// then [`CONFIG_FILE`] inside `dir`. A malformed file yields defaults.
    pub fn discover_from(env_path: Option<OsString>, dir: &Path) -> Self {
        let candidate = env_path
            .map(PathBuf::from)
            .or_else(|| Some(dir.join(CONFIG_FILE)).filter(|p| p.exists()));

        let Some(path) = candidate else {
            log::debug!("No config file found, using defaults");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    /// Initial optimization direction for a column.
    pub fn direction_for(&self, column: &str) -> Direction {
        if self.maximize_columns.iter().any(|c| c == column) {
            Direction::Maximize
        } else {
            Direction::Minimize
        }
    }

    /// Whether a plot of these two columns should skip the front.
    pub fn is_scatter_only(&self, x_column: &str, y_column: &str) -> bool {
        self.scatter_only_columns
            .iter()
            .any(|c| c == x_column || c == y_column)
    }

    pub fn preview_path(&self, label: &str) -> PathBuf {
        self.image_dir.join(format!("{label}.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plot_palette() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.id_column, "index");
        assert_eq!(cfg.colors.front, "#008080");
        assert_eq!(cfg.preview_path("12"), PathBuf::from("models").join("12.png"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(
            &path,
            r##"{
                "maximize_columns": ["rating"],
                "scatter_only_columns": ["index"],
                "detail_metrics": [
                    { "column": "carbon" },
                    { "column": "rating", "direction": "maximize" }
                ],
                "colors": { "front": "#ff0000" }
            }"##,
        )
        .unwrap();

        let cfg = ViewerConfig::load(&path).unwrap();
        assert_eq!(cfg.direction_for("rating"), Direction::Maximize);
        assert_eq!(cfg.direction_for("carbon"), Direction::Minimize);
        assert!(cfg.is_scatter_only("index", "carbon"));
        assert!(!cfg.is_scatter_only("rating", "carbon"));
        assert_eq!(cfg.detail_metrics[0].direction, Direction::Minimize);
        assert_eq!(cfg.detail_metrics[1].direction, Direction::Maximize);
        assert_eq!(cfg.colors.front, "#ff0000");
        assert_eq!(cfg.colors.data, "#daa622");
        assert_eq!(cfg.id_column, "index");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{ "maximise_columns": [] }"#).unwrap();
        assert!(ViewerConfig::load(&path).is_err());
    }

    fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn discover_prefers_env_path() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), CONFIG_FILE, r#"{ "id_column": "from_dir" }"#);
        let explicit = write_config(dir.path(), "explicit.json", r#"{ "id_column": "from_env" }"#);

        let cfg = ViewerConfig::discover_from(Some(explicit.into_os_string()), dir.path());
        assert_eq!(cfg.id_column, "from_env");
    }

    #[test]
    fn discover_finds_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), CONFIG_FILE, r#"{ "id_column": "from_dir" }"#);

        let cfg = ViewerConfig::discover_from(None, dir.path());
        assert_eq!(cfg.id_column, "from_dir");
    }

    #[test]
    fn discover_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ViewerConfig::discover_from(None, dir.path()), ViewerConfig::default());
    }

    #[test]
    fn discover_ignores_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), CONFIG_FILE, "{ not json");
        assert_eq!(ViewerConfig::discover_from(None, dir.path()), ViewerConfig::default());

        let missing = dir.path().join("absent.json");
        let cfg = ViewerConfig::discover_from(Some(missing.into_os_string()), dir.path());
        assert_eq!(cfg, ViewerConfig::default());
    }
}
