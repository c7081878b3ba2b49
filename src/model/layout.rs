//! Canvas geometry
//!
//! Converts grid-unit panel placements into pixel rectangles and splits a
//! panel rectangle into its interactive regions. All values are logical
//! pixels; the renderer applies the window scale factor.

use super::session::{PanelPlacement, GRID_COLUMNS};
use crate::gutter::HANDLE_WIDTH;
use crate::msa::pointer::RULER_HEIGHT;

/// Height of the toolbar strip above the canvas
pub const TOOLBAR_HEIGHT: f64 = 64.0;
/// Gap between panels and around the grid
pub const GRID_MARGIN: f64 = 10.0;
/// Height of one grid row
pub const GRID_ROW_HEIGHT: f64 = 30.0;
/// Panel header (filename and remove button)
pub const PANEL_HEADER_HEIGHT: f64 = 28.0;
pub const REMOVE_BUTTON_SIZE: f64 = 20.0;
/// Square in the bottom-right corner that starts a resize
pub const RESIZE_GRIP_SIZE: f64 = 14.0;
/// Canvas scroll per wheel line
pub const WHEEL_LINE_HEIGHT: f64 = 48.0;

/// Upload button in the toolbar
pub const UPLOAD_BUTTON: Rect = Rect {
    x: 16.0,
    y: 12.0,
    width: 140.0,
    height: 40.0,
};

/// A rectangle in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Width of one grid column for a canvas of the given width
pub fn column_width(canvas_width: f64) -> f64 {
    let cols = GRID_COLUMNS as f64;
    ((canvas_width - GRID_MARGIN * (cols + 1.0)) / cols).max(0.0)
}

/// Pixel rectangle of a placement, relative to the canvas origin
pub fn grid_to_pixels(placement: &PanelPlacement, canvas_width: f64) -> Rect {
    let col = column_width(canvas_width);
    let (w, h) = (placement.w as f64, placement.h as f64);
    Rect {
        x: GRID_MARGIN + placement.x as f64 * (col + GRID_MARGIN),
        y: GRID_MARGIN + placement.y as f64 * (GRID_ROW_HEIGHT + GRID_MARGIN),
        width: w * col + (w - 1.0).max(0.0) * GRID_MARGIN,
        height: h * GRID_ROW_HEIGHT + (h - 1.0).max(0.0) * GRID_MARGIN,
    }
}

/// Convert a pointer delta in pixels into whole grid units
pub fn pixels_to_grid_delta(dx: f64, dy: f64, canvas_width: f64) -> (i64, i64) {
    let col_step = column_width(canvas_width) + GRID_MARGIN;
    let row_step = GRID_ROW_HEIGHT + GRID_MARGIN;
    let cols = if col_step > 0.0 {
        (dx / col_step).round() as i64
    } else {
        0
    };
    (cols, (dy / row_step).round() as i64)
}

/// Height in pixels of a canvas holding panels down to `bottom_row`
pub fn content_height(bottom_row: u32) -> f64 {
    GRID_MARGIN + bottom_row as f64 * (GRID_ROW_HEIGHT + GRID_MARGIN)
}

/// The interactive regions of one panel on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRegions {
    pub outer: Rect,
    pub header: Rect,
    pub remove_button: Rect,
    /// Scroll container: gutter, ruler and cells
    pub body: Rect,
    pub resize_grip: Rect,
}

impl PanelRegions {
    pub fn compute(outer: Rect) -> Self {
        let header = Rect::new(outer.x, outer.y, outer.width, PANEL_HEADER_HEIGHT);
        let remove_button = Rect::new(
            header.right() - REMOVE_BUTTON_SIZE - 4.0,
            header.y + (PANEL_HEADER_HEIGHT - REMOVE_BUTTON_SIZE) / 2.0,
            REMOVE_BUTTON_SIZE,
            REMOVE_BUTTON_SIZE,
        );
        let body = Rect::new(
            outer.x + 1.0,
            header.bottom(),
            (outer.width - 2.0).max(0.0),
            (outer.height - PANEL_HEADER_HEIGHT - 1.0).max(0.0),
        );
        let resize_grip = Rect::new(
            outer.right() - RESIZE_GRIP_SIZE,
            outer.bottom() - RESIZE_GRIP_SIZE,
            RESIZE_GRIP_SIZE,
            RESIZE_GRIP_SIZE,
        );
        Self {
            outer,
            header,
            remove_button,
            body,
            resize_grip,
        }
    }

    /// Drag handle on the gutter's right edge, in screen coordinates
    pub fn gutter_handle(&self, label_width: f64) -> Rect {
        Rect::new(
            self.body.x + label_width - HANDLE_WIDTH,
            self.body.y,
            HANDLE_WIDTH,
            self.body.height,
        )
    }

    /// Size of the cell area (body minus gutter and ruler)
    pub fn cell_viewport(&self, label_width: f64) -> (f64, f64) {
        (
            (self.body.width - label_width).max(0.0),
            (self.body.height - RULER_HEIGHT).max(0.0),
        )
    }
}
