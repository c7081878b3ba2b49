//! Per-panel render state that is not part of undo history
//!
//! Scroll offsets, hover, the live gutter width during a drag and the
//! memoized virtualization/materialization caches live here. The session
//! holds only what undo/redo must restore.

use std::time::{Duration, Instant};

use super::layout::PanelRegions;
use super::session::{PanelConfig, PanelId};
use crate::gutter::GutterResizeController;
use crate::msa::pointer::{self, GridGeometry, HoverCell, TooltipPlacement};
use crate::msa::{AlignmentMatrix, GridRenderer, ViewWindow, ViewportInput, Virtualizer, CELL_SIZE};
use crate::scheduler::{Coalescer, Throttle, FRAME_INTERVAL};

/// Local state of one open panel
#[derive(Debug)]
pub struct PanelView {
    pub id: PanelId,
    pub scroll_top: f64,
    pub scroll_left: f64,
    /// Last known screen regions, refreshed on every layout pass
    pub regions: Option<PanelRegions>,
    pub gutter: GutterResizeController,
    pub hover: HoverCell,
    /// Last pointer position in body-local coordinates
    pointer_local: Option<(f64, f64)>,
    /// Last absolute pointer position, anchors the tooltip
    pointer_abs: Option<(f64, f64)>,
    scroll: Throttle<(f64, f64)>,
    gutter_commit: Coalescer<u32>,
    virtualizer: Virtualizer,
    pub renderer: GridRenderer,
}

impl PanelView {
    pub fn new(id: PanelId, label_width: u32, scroll_interval: Duration) -> Self {
        Self {
            id,
            scroll_top: 0.0,
            scroll_left: 0.0,
            regions: None,
            gutter: GutterResizeController::new(label_width),
            hover: HoverCell::NONE,
            pointer_local: None,
            pointer_abs: None,
            scroll: Throttle::new(scroll_interval),
            gutter_commit: Coalescer::new(FRAME_INTERVAL),
            virtualizer: Virtualizer::new(),
            renderer: GridRenderer::new(),
        }
    }

    /// Gutter width used for rendering (live during a drag)
    pub fn label_width(&self) -> f64 {
        self.gutter.width() as f64
    }

    /// Adopt values the session may have changed (undo/redo, commits)
    pub fn sync_from(&mut self, config: &PanelConfig) {
        self.gutter.sync_width(config.label_width);
    }

    /// Size of the cell area, gutter and ruler excluded
    pub fn cell_viewport(&self) -> (f64, f64) {
        self.regions
            .map(|r| r.cell_viewport(self.label_width()))
            .unwrap_or((0.0, 0.0))
    }

    pub fn geometry(&self, data: &AlignmentMatrix) -> GridGeometry {
        GridGeometry::new(
            self.scroll_top,
            self.scroll_left,
            self.label_width(),
            data.row_count(),
            data.col_count(),
        )
    }

    pub fn viewport_input(&self, data: &AlignmentMatrix) -> ViewportInput {
        let (width, height) = self.cell_viewport();
        ViewportInput::new(
            self.scroll_top,
            self.scroll_left,
            width,
            height,
            data.row_count(),
            data.col_count(),
        )
    }

    /// Visible window, recomputed only when an input changed
    pub fn view_window(&mut self, data: &AlignmentMatrix) -> ViewWindow {
        let input = self.viewport_input(data);
        self.virtualizer.window(input)
    }

    pub fn virtualizer(&self) -> &Virtualizer {
        &self.virtualizer
    }

    /// Largest scroll offsets that still show content
    pub fn max_scroll(&self, data: &AlignmentMatrix) -> (f64, f64) {
        let (width, height) = self.cell_viewport();
        (
            (data.row_count() as f64 * CELL_SIZE - height).max(0.0),
            (data.col_count() as f64 * CELL_SIZE - width).max(0.0),
        )
    }

    fn clamp_scroll(&self, data: &AlignmentMatrix, top: f64, left: f64) -> (f64, f64) {
        let (max_top, max_left) = self.max_scroll(data);
        (top.clamp(0.0, max_top), left.clamp(0.0, max_left))
    }

    /// Request a scroll by a pixel delta. The target accumulates on top of a
    /// pending trailing value, so no wheel delta is lost while throttled.
    /// Returns true when the offset was applied immediately.
    pub fn scroll_by(&mut self, data: &AlignmentMatrix, dx: f64, dy: f64, now: Instant) -> bool {
        let (base_top, base_left) = self
            .scroll
            .pending()
            .copied()
            .unwrap_or((self.scroll_top, self.scroll_left));
        let target = self.clamp_scroll(data, base_top + dy, base_left + dx);
        if target == (base_top, base_left) {
            return false;
        }
        match self.scroll.offer(target, now) {
            Some(target) => self.apply_scroll(data, target),
            None => false,
        }
    }

    /// Apply a trailing scroll offset once its interval has elapsed
    pub fn poll_scroll(&mut self, data: &AlignmentMatrix, now: Instant) -> bool {
        match self.scroll.take_due(now) {
            Some(target) => self.apply_scroll(data, target),
            None => false,
        }
    }

    fn apply_scroll(&mut self, data: &AlignmentMatrix, (top, left): (f64, f64)) -> bool {
        let (top, left) = self.clamp_scroll(data, top, left);
        if (top, left) == (self.scroll_top, self.scroll_left) {
            return false;
        }
        self.scroll_top = top;
        self.scroll_left = left;
        // Cells moved under a stationary pointer
        self.refresh_hover(data);
        true
    }

    /// Re-clamp after the viewport or data changed size
    pub fn reclamp(&mut self, data: &AlignmentMatrix) {
        let (top, left) = self.clamp_scroll(data, self.scroll_top, self.scroll_left);
        self.scroll_top = top;
        self.scroll_left = left;
    }

    /// Pointer moved over the body. Returns true when a redraw is needed
    /// (hover changed, or the tooltip follows the pointer).
    pub fn set_pointer(
        &mut self,
        data: &AlignmentMatrix,
        local: (f64, f64),
        absolute: (f64, f64),
    ) -> bool {
        self.pointer_local = Some(local);
        self.pointer_abs = Some(absolute);
        let before = self.hover;
        self.refresh_hover(data);
        before != self.hover || self.hover != HoverCell::NONE
    }

    fn refresh_hover(&mut self, data: &AlignmentMatrix) {
        self.hover = match self.pointer_local {
            Some((x, y)) => pointer::map_pointer(x, y, &self.geometry(data)),
            None => HoverCell::NONE,
        };
    }

    /// Pointer left the panel
    pub fn clear_hover(&mut self) -> bool {
        let changed = self.hover != HoverCell::NONE;
        self.hover = HoverCell::NONE;
        self.pointer_local = None;
        self.pointer_abs = None;
        changed
    }

    /// Tooltip anchor whenever a column is hovered (the ruler band included).
    ///
    /// The right flip edge is the panel body; `window_width` is only used
    /// before the first layout pass.
    pub fn tooltip(&self, window_width: f64, viewport_height: f64) -> Option<TooltipPlacement> {
        self.hover.col?;
        let (x, y) = self.pointer_abs?;
        let boundary_right = self.regions.map_or(window_width, |r| r.body.right());
        Some(pointer::place_tooltip(x, y, boundary_right, viewport_height))
    }

    /// Start a gutter drag at screen x
    pub fn begin_gutter_drag(&mut self, x: f64) -> bool {
        self.gutter.press(x)
    }

    /// Continue a gutter drag; the latest width is committed on the next frame
    pub fn gutter_drag_to(&mut self, x: f64, now: Instant) -> bool {
        match self.gutter.drag_to(x) {
            Some(width) => {
                self.gutter_commit.coalesce(width, now);
                true
            }
            None => false,
        }
    }

    /// End the gutter drag. Returns the width that must be committed now.
    pub fn end_gutter_drag(&mut self) -> Option<u32> {
        self.gutter_commit.cancel();
        self.gutter.release()
    }

    /// Width commit that became due, if any
    pub fn take_due_commit(&mut self, now: Instant) -> Option<u32> {
        self.gutter_commit.take_due(now)
    }

    /// Earliest pending deadline of this panel
    pub fn next_deadline(&self) -> Option<Instant> {
        crate::scheduler::earliest([self.scroll.deadline(), self.gutter_commit.deadline()])
    }
}
