//! Message types for the Elm-style architecture
//!
//! Messages describe everything that can happen; `update` turns them into
//! state changes and commands. Time is carried in the messages that need
//! it so updates stay deterministic.

use std::path::PathBuf;
use std::time::Instant;

use crate::ingest::{LoadedFile, RejectedFile};
use crate::model::PanelId;
use crate::msa::{AlignmentMatrix, ColorScheme};

/// Undoable session operations
#[derive(Debug, Clone)]
pub enum SessionMsg {
    /// Open a parsed alignment as a new panel
    AddPanel {
        filename: String,
        data: AlignmentMatrix,
    },
    /// Close a panel
    RemovePanel(PanelId),
    Undo,
    Redo,
}

/// Interaction inside one panel
#[derive(Debug, Clone)]
pub enum PanelMsg {
    /// Scroll the cell grid by a pixel delta
    Scroll {
        id: PanelId,
        dx: f64,
        dy: f64,
        now: Instant,
    },
    /// Pointer over the panel body; local coordinates relative to the body
    Hover {
        id: PanelId,
        local_x: f64,
        local_y: f64,
        x: f64,
        y: f64,
    },
    /// Pointer left the panel
    LeaveHover(PanelId),
    /// Press on the gutter drag handle at screen x
    GutterPress { id: PanelId, x: f64 },
    /// Pointer moved while the gutter drag is active
    GutterDrag { id: PanelId, x: f64, now: Instant },
    /// Gutter drag ended (release or abnormal termination)
    GutterRelease(PanelId),
    /// Switch to the next color scheme
    CycleScheme(PanelId),
    SetScheme(PanelId, ColorScheme),
}

/// Panel arrangement on the canvas grid
#[derive(Debug, Clone)]
pub enum LayoutMsg {
    /// Start moving a panel (header drag)
    BeginMove { id: PanelId, x: f64, y: f64 },
    /// Start resizing a panel (corner drag)
    BeginResize { id: PanelId, x: f64, y: f64 },
    /// Pointer moved during a layout drag
    DragTo { x: f64, y: f64 },
    EndDrag,
    /// Scroll the canvas vertically by a pixel delta
    ScrollCanvas { dy: f64 },
}

/// Raw pointer input in window coordinates (logical pixels)
#[derive(Debug, Clone)]
pub enum PointerMsg {
    Moved { x: f64, y: f64, now: Instant },
    Pressed { x: f64, y: f64, now: Instant },
    Released { now: Instant },
    /// Wheel delta in pixels, already axis-swapped for shift
    Wheel {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        now: Instant,
    },
    /// Pointer left the window
    Left { now: Instant },
}

/// Application-level messages
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Window resized (logical pixels)
    Resize {
        width: f64,
        height: f64,
        now: Instant,
    },
    ScaleFactorChanged(f64),
    /// Frame tick: flush due throttled and coalesced work
    Tick(Instant),
    /// Show the native file picker
    OpenFileDialog,
    /// Files chosen in the picker or on the command line
    OpenFiles(Vec<PathBuf>),
    /// Files dropped onto the window
    FilesDropped(Vec<PathBuf>),
    /// Background loading finished
    FilesLoaded(Vec<Result<LoadedFile, RejectedFile>>),
    /// Window lost keyboard focus
    FocusLost,
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Session(SessionMsg),
    Panel(PanelMsg),
    Layout(LayoutMsg),
    Pointer(PointerMsg),
    App(AppMsg),
}
