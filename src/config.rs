//! Viewer configuration
//!
//! Stores user preferences in `config.yaml` under the msaboard directory
//! (see [`AppDirs`]). Every field is optional; missing or malformed files
//! fall back to the defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::gutter::{clamp_label_width, DEFAULT_LABEL_WIDTH};
use crate::msa::ColorScheme;

/// Overrides the msaboard directory, e.g. for a portable install
pub const DIR_ENV_VAR: &str = "MSABOARD_HOME";

/// Base name of the rolling log file
pub const LOG_FILE_NAME: &str = "msaboard.log";

/// The msaboard directory and the files kept in it:
///
/// ```text
/// <root>/config.yaml
/// <root>/themes/<id>.yaml
/// <root>/logs/msaboard.log.<date>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// `$MSABOARD_HOME` when set, else `msaboard` under the platform config
    /// directory (`$XDG_CONFIG_HOME` or `~/.config` on Linux, Application
    /// Support on macOS, `%APPDATA%` on Windows).
    pub fn locate() -> Option<Self> {
        if let Some(root) = std::env::var_os(DIR_ENV_VAR).filter(|v| !v.is_empty()) {
            return Some(Self::at(root));
        }
        dirs::config_dir().map(|base| Self::at(base.join("msaboard")))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    /// User theme file for a theme id
    pub fn theme_file(&self, id: &str) -> PathBuf {
        self.root.join("themes").join(format!("{}.yaml", id))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Create the logs directory if needed
    pub fn ensure_logs_dir(&self) -> anyhow::Result<PathBuf> {
        let logs = self.logs_dir();
        std::fs::create_dir_all(&logs)
            .with_context(|| format!("Failed to create directory {}", logs.display()))?;
        Ok(logs)
    }
}

/// Viewer configuration loaded at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Selected theme id (e.g., "light")
    pub theme: String,
    /// Gutter width for newly opened panels, clamped to [40, 400]
    pub default_label_width: u32,
    /// Color scheme key for newly opened panels
    pub color_scheme: String,
    /// Explicit monospace TTF; common system fonts are probed when unset
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    /// Maximum number of undo steps kept
    pub undo_limit: usize,
    /// Minimum interval between applied scroll updates
    pub scroll_throttle_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            default_label_width: DEFAULT_LABEL_WIDTH,
            color_scheme: ColorScheme::Default.name().to_string(),
            font_path: None,
            font_size: 13.0,
            undo_limit: 100,
            scroll_throttle_ms: 8,
        }
    }
}

impl ViewerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(dirs) = AppDirs::locate() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&dirs.config_file())
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<ViewerConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values into usable ones
    fn sanitized(mut self) -> Self {
        let clamped = clamp_label_width(self.default_label_width as f64);
        if clamped != self.default_label_width {
            tracing::warn!(
                "default_label_width {} out of range, using {}",
                self.default_label_width,
                clamped
            );
            self.default_label_width = clamped;
        }
        if self.undo_limit == 0 {
            tracing::warn!("undo_limit must be at least 1, using 1");
            self.undo_limit = 1;
        }
        if !(self.font_size.is_finite() && self.font_size >= 6.0) {
            self.font_size = Self::default().font_size;
        }
        self
    }

    /// Parsed color scheme; unknown keys resolve to the default scheme
    pub fn scheme(&self) -> ColorScheme {
        ColorScheme::from_name(&self.color_scheme)
    }

    /// Scroll throttle interval
    pub fn scroll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.scroll_throttle_ms)
    }
}
