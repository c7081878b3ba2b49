//! Runtime module - winit/platform integration
//!
//! This module contains platform-specific code for running the viewer:
//! - `app` - ApplicationHandler and window management
//! - `input` - Keyboard, mouse and drop event to message mapping

pub mod app;
pub mod input;

pub use app::App;
