//! Session message handlers (open, close, undo, redo)

use super::release_capture;
use crate::commands::{redraw_if, Cmd};
use crate::messages::SessionMsg;
use crate::model::{AppModel, PanelConfig, PanelPlacement};

/// Handle undoable session operations
pub fn update_session(model: &mut AppModel, msg: SessionMsg) -> Option<Cmd> {
    match msg {
        SessionMsg::AddPanel { filename, data } => {
            let placement =
                PanelPlacement::for_alignment(data.row_count(), model.session().next_free_row());
            let config = PanelConfig::new(
                filename,
                data,
                model.defaults.label_width,
                model.defaults.color_scheme,
            );
            let id = model.history.add_panel(config, placement);
            tracing::info!(panel = %id, "opened panel");
            Some(Cmd::Redraw)
        }

        SessionMsg::RemovePanel(id) => {
            if model.capture.is_some_and(|c| c.panel() == id) {
                release_capture(model);
            }
            redraw_if(model.history.remove_panel(id))
        }

        SessionMsg::Undo => {
            // Finish an in-flight drag first so its commit lands before the step back
            release_capture(model);
            redraw_if(model.history.undo())
        }

        SessionMsg::Redo => {
            release_capture(model);
            redraw_if(model.history.redo())
        }
    }
}
