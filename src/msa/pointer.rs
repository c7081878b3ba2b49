//! Pointer-to-cell mapping and tooltip placement
//!
//! Local coordinates are relative to the top-left corner of a panel's
//! scroll container: the label gutter occupies `[0, gutter_width]` on the
//! x axis and the ruler band occupies `[0, ruler_height]` on the y axis.
//! Both bands stay fixed while the cell grid scrolls underneath them.

use super::viewport::CELL_SIZE;

/// Height of the ruler band: the cell size divided by `round(1.5)`
pub const RULER_HEIGHT: f64 = CELL_SIZE / 2.0;

/// Estimated tooltip size used for the flip decision
pub const TOOLTIP_ESTIMATED_WIDTH: f64 = 150.0;
pub const TOOLTIP_ESTIMATED_HEIGHT: f64 = 50.0;
/// Distance between the pointer and the tooltip corner
pub const TOOLTIP_GAP: f64 = 12.0;

/// Everything needed to map between pixels and cell indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub gutter_width: f64,
    pub ruler_height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub row_count: usize,
    pub col_count: usize,
}

impl GridGeometry {
    /// Geometry with the fixed cell size and ruler height
    pub fn new(
        scroll_top: f64,
        scroll_left: f64,
        gutter_width: f64,
        row_count: usize,
        col_count: usize,
    ) -> Self {
        Self {
            scroll_top,
            scroll_left,
            gutter_width,
            ruler_height: RULER_HEIGHT,
            cell_width: CELL_SIZE,
            cell_height: CELL_SIZE,
            row_count,
            col_count,
        }
    }
}

/// Hovered cell. Row and column are resolved independently, so hovering
/// the gutter yields a row with no column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverCell {
    pub row: Option<usize>,
    pub col: Option<usize>,
}

impl HoverCell {
    pub const NONE: HoverCell = HoverCell {
        row: None,
        col: None,
    };
}

/// Rectangle in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl CellRect {
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Index along one axis, or None when outside the band or the grid
fn axis_index(local: f64, band: f64, scroll: f64, cell: f64, count: usize) -> Option<usize> {
    if local <= band || cell <= 0.0 {
        return None;
    }
    let index = ((local - band + scroll) / cell).floor();
    if index >= 0.0 && index < count as f64 {
        Some(index as usize)
    } else {
        None
    }
}

/// Map a pointer position in local coordinates to a cell.
///
/// Never returns an index outside `[0, row_count)` / `[0, col_count)`.
pub fn map_pointer(local_x: f64, local_y: f64, geom: &GridGeometry) -> HoverCell {
    HoverCell {
        row: axis_index(
            local_y,
            geom.ruler_height,
            geom.scroll_top,
            geom.cell_height,
            geom.row_count,
        ),
        col: axis_index(
            local_x,
            geom.gutter_width,
            geom.scroll_left,
            geom.cell_width,
            geom.col_count,
        ),
    }
}

/// Rectangle of a cell in the grid's own coordinate space (no scroll,
/// gutter or ruler offset applied)
pub fn cell_grid_rect(row: usize, col: usize, cell_width: f64, cell_height: f64) -> CellRect {
    CellRect {
        top: row as f64 * cell_height,
        left: col as f64 * cell_width,
        width: cell_width,
        height: cell_height,
    }
}

/// Translate a grid-space rectangle into local container coordinates.
/// This is the exact inverse of [`map_pointer`].
pub fn grid_to_local(rect: CellRect, geom: &GridGeometry) -> CellRect {
    CellRect {
        top: rect.top + geom.ruler_height - geom.scroll_top,
        left: rect.left + geom.gutter_width - geom.scroll_left,
        ..rect
    }
}

/// Where a tooltip opens relative to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// Open to the left of the pointer
    pub flip_x: bool,
    /// Open above the pointer
    pub flip_y: bool,
}

impl TooltipPlacement {
    /// Top-left corner for a tooltip of the given size
    pub fn origin(&self, width: f64, height: f64) -> (f64, f64) {
        let x = if self.flip_x {
            self.pointer_x - TOOLTIP_GAP - width
        } else {
            self.pointer_x + TOOLTIP_GAP
        };
        let y = if self.flip_y {
            self.pointer_y - TOOLTIP_GAP - height
        } else {
            self.pointer_y + TOOLTIP_GAP
        };
        (x, y)
    }
}

/// Decide the tooltip orientation from the absolute pointer position.
/// Recomputed on every hover update, no hysteresis.
pub fn place_tooltip(
    pointer_x: f64,
    pointer_y: f64,
    boundary_right: f64,
    viewport_height: f64,
) -> TooltipPlacement {
    TooltipPlacement {
        pointer_x,
        pointer_y,
        flip_x: pointer_x + TOOLTIP_ESTIMATED_WIDTH > boundary_right,
        flip_y: pointer_y + TOOLTIP_ESTIMATED_HEIGHT > viewport_height,
    }
}
