//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod layout;
mod panel;
mod pointer;
mod session;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::{AppModel, PanelId, PointerCapture};

#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use layout::update_layout;
pub use panel::update_panel;
pub use pointer::update_pointer;
pub use session::update_session;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = dispatch(model, msg);
    model.sync_views();
    result
}

/// Route a message without the trailing view sync. Handlers that forward
/// to another group call this so the sync runs once per outer message.
pub(crate) fn dispatch(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Session(m) => session::update_session(model, m),
        Msg::Panel(m) => panel::update_panel(model, m),
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Combine two optional commands
pub(crate) fn merge(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
    match (a, b) {
        (None, b) => b,
        (a, None) => a,
        (Some(a), Some(b)) => Some(Cmd::batch(vec![a, b])),
    }
}

/// Write a gutter width into the session unless it is already stored
pub(crate) fn commit_label_width(model: &mut AppModel, id: PanelId, width: u32) -> bool {
    let stored = model.session().config(id).map(|c| c.label_width);
    if stored.is_none() || stored == Some(width) {
        return false;
    }
    tracing::debug!(panel = %id, width, "gutter width committed");
    model
        .history
        .update_config(id, |config| config.label_width = width)
}

/// Release the pointer capture, finishing any drag it belongs to.
/// A gutter drag always commits its final width here.
pub(crate) fn release_capture(model: &mut AppModel) -> bool {
    match model.capture.take() {
        Some(PointerCapture::Gutter(id)) => {
            let width = model.views.get_mut(&id).and_then(|v| v.end_gutter_drag());
            if let Some(width) = width {
                commit_label_width(model, id, width);
            }
            true
        }
        Some(PointerCapture::Layout(drag)) => {
            tracing::debug!(panel = %drag.id, "layout drag ended");
            true
        }
        None => false,
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after session state and logs diffs for debugging.
/// Filters out noisy messages like pointer moves and ticks from logging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::{AppMsg, PointerMsg};

    // Skip logging for noisy high-frequency messages
    let is_noisy = matches!(
        &msg,
        Msg::Pointer(PointerMsg::Moved { .. })
            | Msg::Pointer(PointerMsg::Wheel { .. })
            | Msg::App(AppMsg::Tick(_))
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = SessionSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = SessionSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "session", %diff, "state changed");
    }

    debug_assert!(
        model.session().is_consistent(),
        "session maps out of sync after {}",
        msg_name
    );

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments, except
/// for loaded alignments whose Debug output would dump every residue.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, SessionMsg};

    match msg {
        Msg::Session(SessionMsg::AddPanel { filename, data }) => {
            format!("Session::AddPanel({}, {} rows)", filename, data.row_count())
        }
        Msg::Session(m) => format!("Session::{:?}", m),
        Msg::Panel(m) => format!("Panel::{:?}", m),
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
        Msg::App(AppMsg::FilesLoaded(results)) => {
            format!("App::FilesLoaded({} files)", results.len())
        }
        Msg::App(m) => format!("App::{:?}", m),
    }
}
