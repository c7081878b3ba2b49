//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::ingest::IngestSource;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the window
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Read and parse files on a worker thread.
    /// Answers with `AppMsg::FilesLoaded`.
    LoadFiles {
        paths: Vec<PathBuf>,
        source: IngestSource,
    },
    /// Show native open file dialog (multi-select, alignment filter)
    ShowOpenFileDialog,
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Loading shows nothing until FilesLoaded arrives
            Cmd::LoadFiles { .. } => false,
            Cmd::ShowOpenFileDialog => false,
            Cmd::Quit => false,
        }
    }

    /// Whether this command (or any command in a batch) requests exit
    pub fn is_quit(&self) -> bool {
        match self {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.is_quit()),
            _ => false,
        }
    }
}

/// Redraw when `changed`, otherwise nothing
pub fn redraw_if(changed: bool) -> Option<Cmd> {
    changed.then_some(Cmd::Redraw)
}
