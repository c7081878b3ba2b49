//! msaboard - Elm-style multiple sequence alignment viewer
//!
//! This crate provides the core types and logic for the viewer: alignment
//! parsing, viewport virtualization, pointer mapping, cell materialization,
//! gutter resizing and the undoable panel session, wired together with the
//! Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod gutter;
pub mod ingest;
pub mod messages;
pub mod model;
pub mod msa;
pub mod scheduler;
pub mod theme;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ViewerConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use theme::Theme;
