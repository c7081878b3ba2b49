//! Layout message handlers (panel move/resize on the canvas grid)

use crate::commands::{redraw_if, Cmd};
use crate::messages::LayoutMsg;
use crate::model::layout::pixels_to_grid_delta;
use crate::model::{
    AppModel, LayoutDrag, LayoutDragKind, PanelId, PanelPlacement, PointerCapture, GRID_COLUMNS,
};

/// Handle layout messages (panel arrangement, canvas scroll)
pub fn update_layout(model: &mut AppModel, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::BeginMove { id, x, y } => begin_drag(model, id, LayoutDragKind::Move, x, y),

        LayoutMsg::BeginResize { id, x, y } => {
            begin_drag(model, id, LayoutDragKind::Resize, x, y)
        }

        LayoutMsg::DragTo { x, y } => {
            let Some(PointerCapture::Layout(drag)) = model.capture else {
                return None;
            };
            let current = *model.session().placement(drag.id)?;
            let next = dragged_placement(&drag, x, y, model.canvas.width());
            if next == current {
                return None;
            }

            // Publish the full set, as a grid layout callback would
            let mut placements: Vec<PanelPlacement> =
                model.session().ordered_placements().copied().collect();
            for placement in placements.iter_mut().filter(|p| p.id == drag.id) {
                *placement = next;
            }
            model.history.update_layout(placements);
            model.layout_panels();
            Some(Cmd::Redraw)
        }

        LayoutMsg::EndDrag => {
            if !matches!(model.capture, Some(PointerCapture::Layout(_))) {
                return None;
            }
            model.capture = None;
            Some(Cmd::Redraw)
        }

        LayoutMsg::ScrollCanvas { dy } => redraw_if(model.scroll_canvas(dy)),
    }
}

fn begin_drag(
    model: &mut AppModel,
    id: PanelId,
    kind: LayoutDragKind,
    x: f64,
    y: f64,
) -> Option<Cmd> {
    if model.capture.is_some() {
        return None;
    }
    let origin = *model.session().placement(id)?;
    tracing::debug!(panel = %id, ?kind, "layout drag started");
    model.capture = Some(PointerCapture::Layout(LayoutDrag {
        id,
        kind,
        start: (x, y),
        origin,
    }));
    None
}

/// Placement the drag would produce at pointer position `(x, y)`
pub(crate) fn dragged_placement(
    drag: &LayoutDrag,
    x: f64,
    y: f64,
    canvas_width: f64,
) -> PanelPlacement {
    let (dx, dy) = pixels_to_grid_delta(x - drag.start.0, y - drag.start.1, canvas_width);
    let origin = drag.origin;
    let columns = GRID_COLUMNS as i64;

    let mut next = origin;
    match drag.kind {
        LayoutDragKind::Move => {
            let max_x = (columns - origin.w as i64).max(0);
            next.x = (origin.x as i64 + dx).clamp(0, max_x) as u32;
            next.y = (origin.y as i64 + dy).max(0) as u32;
        }
        LayoutDragKind::Resize => {
            let max_w = (columns - origin.x as i64).max(origin.min_w as i64);
            next.w = (origin.w as i64 + dx).clamp(origin.min_w as i64, max_w) as u32;
            next.h = (origin.h as i64 + dy).max(origin.min_h as i64) as u32;
        }
    }
    next.constrained()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::layout::{column_width, GRID_MARGIN, GRID_ROW_HEIGHT};

    const CANVAS: f64 = 1210.0;

    fn drag(kind: LayoutDragKind, x: u32, w: u32) -> LayoutDrag {
        LayoutDrag {
            id: PanelId(1),
            kind,
            start: (0.0, 0.0),
            origin: PanelPlacement {
                id: PanelId(1),
                x,
                y: 2,
                w,
                h: 4,
                min_w: 2,
                min_h: 2,
            },
        }
    }

    #[test]
    fn test_move_snaps_to_whole_cells() {
        let step = column_width(CANVAS) + GRID_MARGIN;
        let d = drag(LayoutDragKind::Move, 0, 6);
        let next = dragged_placement(&d, step * 2.2, GRID_ROW_HEIGHT + GRID_MARGIN, CANVAS);
        assert_eq!((next.x, next.y), (2, 3));
        assert_eq!(next.w, 6);
    }

    #[test]
    fn test_move_stays_inside_grid() {
        let d = drag(LayoutDragKind::Move, 4, 6);
        let next = dragged_placement(&d, 10_000.0, -10_000.0, CANVAS);
        assert_eq!((next.x, next.y), (6, 0));
    }

    #[test]
    fn test_resize_respects_minimum_and_edge() {
        let d = drag(LayoutDragKind::Resize, 4, 6);
        let shrunk = dragged_placement(&d, -10_000.0, -10_000.0, CANVAS);
        assert_eq!((shrunk.w, shrunk.h), (2, 2));
        let grown = dragged_placement(&d, 10_000.0, 0.0, CANVAS);
        assert_eq!(grown.w, 8);
    }
}
