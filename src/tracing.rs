//! Tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! session history and pointer interaction issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=msaboard::model::history=debug` - module-level filtering
//! - `RUST_LOG=session=debug,message=debug` - scoped filtering
//!
//! # Log Files
//!
//! Logs are written to `logs/msaboard.log` in the msaboard directory with
//! daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{AppDirs, LOG_FILE_NAME};
use crate::model::AppModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes
/// to the msaboard logs directory with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let logs_dir = AppDirs::locate()
        .ok_or_else(|| anyhow::anyhow!("No config directory available"))
        .and_then(|dirs| dirs.ensure_logs_dir());
    let file_layer = match logs_dir {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of session/history state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub panel_count: usize,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub captured: bool,
}

impl SessionSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        Self {
            panel_count: model.session().len(),
            undo_depth: model.history.undo_depth(),
            redo_depth: model.history.redo_depth(),
            captured: model.capture.is_some(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.panel_count != other.panel_count {
            changes.push(format!(
                "panels: {} → {}",
                self.panel_count, other.panel_count
            ));
        }
        if self.undo_depth != other.undo_depth || self.redo_depth != other.redo_depth {
            changes.push(format!(
                "history: {}/{} → {}/{}",
                self.undo_depth, self.redo_depth, other.undo_depth, other.redo_depth
            ));
        }
        if self.captured != other.captured {
            let status = if other.captured {
                "acquired"
            } else {
                "released"
            };
            changes.push(format!("capture {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
