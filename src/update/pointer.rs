//! Raw pointer routing
//!
//! Resolves window-space pointer events against the current layout and
//! forwards them as panel or layout messages. While a drag holds the
//! pointer capture, moves go to the capture owner regardless of position.

use super::{dispatch, merge, release_capture};
use crate::commands::{redraw_if, Cmd};
use crate::messages::{LayoutMsg, Msg, PanelMsg, PointerMsg, SessionMsg};
use crate::model::{AppModel, HitTarget, PanelId, PointerCapture};

/// Handle raw pointer input
pub fn update_pointer(model: &mut AppModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Moved { x, y, now } => {
            model.pointer = Some((x, y));
            match model.capture {
                Some(PointerCapture::Gutter(id)) => {
                    dispatch(model, Msg::Panel(PanelMsg::GutterDrag { id, x, now }))
                }
                Some(PointerCapture::Layout(_)) => {
                    dispatch(model, Msg::Layout(LayoutMsg::DragTo { x, y }))
                }
                None => hover_at(model, x, y),
            }
        }

        PointerMsg::Pressed { x, y, now: _ } => {
            model.pointer = Some((x, y));
            let msg = match model.hit_test(x, y) {
                HitTarget::UploadButton => return Some(Cmd::ShowOpenFileDialog),
                HitTarget::PanelRemove(id) => Msg::Session(SessionMsg::RemovePanel(id)),
                HitTarget::PanelHeader(id) => Msg::Layout(LayoutMsg::BeginMove { id, x, y }),
                HitTarget::PanelResize(id) => Msg::Layout(LayoutMsg::BeginResize { id, x, y }),
                HitTarget::GutterHandle(id) => Msg::Panel(PanelMsg::GutterPress { id, x }),
                HitTarget::PanelBody { .. } | HitTarget::Toolbar | HitTarget::Canvas => {
                    return None
                }
            };
            dispatch(model, msg)
        }

        PointerMsg::Released { now: _ } => redraw_if(release_capture(model)),

        PointerMsg::Wheel { x, y, dx, dy, now } => match model.hit_test(x, y) {
            HitTarget::PanelBody { id, .. } | HitTarget::GutterHandle(id) => {
                dispatch(model, Msg::Panel(PanelMsg::Scroll { id, dx, dy, now }))
            }
            _ => dispatch(model, Msg::Layout(LayoutMsg::ScrollCanvas { dy })),
        },

        PointerMsg::Left { now: _ } => {
            model.pointer = None;
            let released = release_capture(model);
            let mut cleared = false;
            for view in model.views.values_mut() {
                cleared |= view.clear_hover();
            }
            model.hovered_panel = None;
            redraw_if(released || cleared)
        }
    }
}

/// Update hover state for a pointer at `(x, y)` with no drag in progress
fn hover_at(model: &mut AppModel, x: f64, y: f64) -> Option<Cmd> {
    let target = match model.hit_test(x, y) {
        HitTarget::PanelBody { id, .. } | HitTarget::GutterHandle(id) => Some(id),
        HitTarget::PanelRemove(id) | HitTarget::PanelHeader(id) | HitTarget::PanelResize(id) => {
            // Over the panel chrome: the panel stays targeted, no cell is hovered
            let left = leave_previous(model, Some(id));
            let cleared = model
                .views
                .get_mut(&id)
                .map(|view| view.clear_hover())
                .unwrap_or(false);
            model.hovered_panel = Some(id);
            return merge(left, redraw_if(cleared));
        }
        HitTarget::UploadButton | HitTarget::Toolbar | HitTarget::Canvas => None,
    };

    let Some(id) = target else {
        return leave_previous(model, None);
    };
    let (local_x, local_y) = body_local(model, id, x, y)?;
    dispatch(
        model,
        Msg::Panel(PanelMsg::Hover {
            id,
            local_x,
            local_y,
            x,
            y,
        }),
    )
}

/// Clear hover on the previously hovered panel unless it is `keep`
fn leave_previous(model: &mut AppModel, keep: Option<PanelId>) -> Option<Cmd> {
    match model.hovered_panel {
        Some(previous) if Some(previous) != keep => {
            dispatch(model, Msg::Panel(PanelMsg::LeaveHover(previous)))
        }
        _ => None,
    }
}

/// Window point in the panel body's local coordinates
fn body_local(model: &AppModel, id: PanelId, x: f64, y: f64) -> Option<(f64, f64)> {
    let body = model.view(id)?.regions?.body;
    Some((x - body.x, y - body.y))
}
