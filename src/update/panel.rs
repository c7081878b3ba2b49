//! Panel interaction handlers (scroll, hover, gutter drag, color scheme)

use super::commit_label_width;
use crate::commands::{redraw_if, Cmd};
use crate::messages::PanelMsg;
use crate::model::{AppModel, PanelId, PointerCapture};
use crate::msa::ColorScheme;

/// Handle per-panel messages
pub fn update_panel(model: &mut AppModel, msg: PanelMsg) -> Option<Cmd> {
    match msg {
        PanelMsg::Scroll { id, dx, dy, now } => {
            let data = model.session().config(id).map(|c| c.data.clone())?;
            let view = model.views.get_mut(&id)?;
            redraw_if(view.scroll_by(&data, dx, dy, now))
        }

        PanelMsg::Hover {
            id,
            local_x,
            local_y,
            x,
            y,
        } => {
            let mut changed = false;
            if let Some(previous) = model.hovered_panel.filter(|p| *p != id) {
                changed |= clear_hover(model, previous);
            }
            model.hovered_panel = Some(id);

            let data = model.session().config(id).map(|c| c.data.clone())?;
            let view = model.views.get_mut(&id)?;
            changed |= view.set_pointer(&data, (local_x, local_y), (x, y));
            redraw_if(changed)
        }

        PanelMsg::LeaveHover(id) => redraw_if(clear_hover(model, id)),

        PanelMsg::GutterPress { id, x } => {
            if model.capture.is_some() {
                return None;
            }
            let view = model.views.get_mut(&id)?;
            if !view.begin_gutter_drag(x) {
                return None;
            }
            tracing::debug!(panel = %id, x, "gutter drag started");
            model.capture = Some(PointerCapture::Gutter(id));
            Some(Cmd::Redraw)
        }

        PanelMsg::GutterDrag { id, x, now } => {
            if model.capture != Some(PointerCapture::Gutter(id)) {
                return None;
            }
            let view = model.views.get_mut(&id)?;
            redraw_if(view.gutter_drag_to(x, now))
        }

        PanelMsg::GutterRelease(id) => {
            if model.capture != Some(PointerCapture::Gutter(id)) {
                return None;
            }
            model.capture = None;
            let width = model.views.get_mut(&id).and_then(|v| v.end_gutter_drag());
            if let Some(width) = width {
                commit_label_width(model, id, width);
            }
            Some(Cmd::Redraw)
        }

        PanelMsg::CycleScheme(id) => {
            let next = model.session().config(id)?.color_scheme.next();
            set_scheme(model, id, next)
        }

        PanelMsg::SetScheme(id, scheme) => set_scheme(model, id, scheme),
    }
}

fn clear_hover(model: &mut AppModel, id: PanelId) -> bool {
    if model.hovered_panel == Some(id) {
        model.hovered_panel = None;
    }
    model
        .views
        .get_mut(&id)
        .map(|view| view.clear_hover())
        .unwrap_or(false)
}

fn set_scheme(model: &mut AppModel, id: PanelId, scheme: ColorScheme) -> Option<Cmd> {
    if model.session().config(id)?.color_scheme == scheme {
        return None;
    }
    tracing::debug!(panel = %id, scheme = %scheme, "color scheme changed");
    redraw_if(
        model
            .history
            .update_config(id, |config| config.color_scheme = scheme),
    )
}
