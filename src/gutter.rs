//! Label gutter resize controller
//!
//! Two-state drag session. Width changes apply immediately to the panel's
//! local render state; committing them to the session is the caller's job
//! (see `PanelView::take_due_commit`), and happens at the latest on release.

/// Narrowest allowed gutter
pub const MIN_LABEL_WIDTH: u32 = 40;
/// Widest allowed gutter
pub const MAX_LABEL_WIDTH: u32 = 400;
/// Gutter width of a newly opened panel
pub const DEFAULT_LABEL_WIDTH: u32 = 100;
/// Width of the drag handle on the gutter's right edge
pub const HANDLE_WIDTH: f64 = 8.0;

/// Clamp a requested width into `[MIN_LABEL_WIDTH, MAX_LABEL_WIDTH]`
pub fn clamp_label_width(width: f64) -> u32 {
    if width.is_nan() {
        return MIN_LABEL_WIDTH;
    }
    width
        .round()
        .clamp(MIN_LABEL_WIDTH as f64, MAX_LABEL_WIDTH as f64) as u32
}

/// Drag state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GutterDrag {
    #[default]
    Idle,
    Dragging {
        /// Pointer x at the previous move event
        last_x: f64,
    },
}

/// Drives one panel's gutter width from pointer events
#[derive(Debug, Clone, PartialEq)]
pub struct GutterResizeController {
    state: GutterDrag,
    width: u32,
}

impl GutterResizeController {
    pub fn new(width: u32) -> Self {
        Self {
            state: GutterDrag::Idle,
            width: clamp_label_width(width as f64),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn state(&self) -> GutterDrag {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GutterDrag::Dragging { .. })
    }

    /// Adopt a width coming from the session (undo, config update).
    /// Ignored while dragging so the drag is not fought mid-gesture.
    pub fn sync_width(&mut self, width: u32) {
        if !self.is_dragging() {
            self.width = clamp_label_width(width as f64);
        }
    }

    /// Handle press on the drag handle. Returns false if a drag is
    /// already active.
    pub fn press(&mut self, x: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.state = GutterDrag::Dragging { last_x: x };
        true
    }

    /// Pointer moved while dragging. Returns the new width when it changed.
    pub fn drag_to(&mut self, x: f64) -> Option<u32> {
        let GutterDrag::Dragging { last_x } = self.state else {
            return None;
        };
        let delta = x - last_x;
        self.state = GutterDrag::Dragging { last_x: x };

        let next = clamp_label_width(self.width as f64 + delta);
        if next == self.width {
            return None;
        }
        self.width = next;
        Some(next)
    }

    /// End the drag (release or abnormal termination). Returns the final
    /// width to commit, or None if no drag was active.
    pub fn release(&mut self) -> Option<u32> {
        if !self.is_dragging() {
            return None;
        }
        self.state = GutterDrag::Idle;
        Some(self.width)
    }
}

impl Default for GutterResizeController {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_ignores_moves_and_release() {
        let mut c = GutterResizeController::new(100);
        assert_eq!(c.drag_to(500.0), None);
        assert_eq!(c.release(), None);
        assert_eq!(c.width(), 100);
    }

    #[test]
    fn test_incremental_deltas() {
        let mut c = GutterResizeController::new(100);
        assert!(c.press(200.0));
        assert_eq!(c.drag_to(210.0), Some(110));
        assert_eq!(c.drag_to(205.0), Some(105));
        assert_eq!(c.state(), GutterDrag::Dragging { last_x: 205.0 });
        assert_eq!(c.release(), Some(105));
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_clamped_at_both_ends() {
        let mut c = GutterResizeController::new(100);
        c.press(0.0);
        assert_eq!(c.drag_to(10_000.0), Some(MAX_LABEL_WIDTH));
        assert_eq!(c.drag_to(20_000.0), None);
        assert_eq!(c.drag_to(-50_000.0), Some(MIN_LABEL_WIDTH));
    }

    #[test]
    fn test_single_session_per_panel() {
        let mut c = GutterResizeController::new(100);
        assert!(c.press(0.0));
        assert!(!c.press(50.0));
    }

    #[test]
    fn test_sync_width_ignored_while_dragging() {
        let mut c = GutterResizeController::new(100);
        c.press(0.0);
        c.sync_width(300);
        assert_eq!(c.width(), 100);
        c.release();
        c.sync_width(300);
        assert_eq!(c.width(), 300);
    }

    #[test]
    fn test_clamp_label_width() {
        assert_eq!(clamp_label_width(-3.0), 40);
        assert_eq!(clamp_label_width(123.4), 123);
        assert_eq!(clamp_label_width(f64::INFINITY), 400);
        assert_eq!(clamp_label_width(f64::NAN), 40);
    }
}
