//! Viewport virtualization
//!
//! Computes which rows and columns of the alignment grid must be
//! materialized for the current scroll position and viewport size.

/// Cell edge length in pixels (cells are square)
pub const CELL_SIZE: f64 = 24.0;

/// Extra rows/columns materialized on each side of the visible area
pub const OVERSCAN: usize = 5;

/// Half-open row and column ranges to materialize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ViewWindow {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl ViewWindow {
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.first_row..self.last_row
    }

    pub fn cols(&self) -> std::ops::Range<usize> {
        self.first_col..self.last_col
    }

    /// Number of cells in the window
    pub fn cell_count(&self) -> usize {
        (self.last_row - self.first_row) * (self.last_col - self.first_col)
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows().contains(&row) && self.cols().contains(&col)
    }
}

/// Full input tuple of the virtualization function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportInput {
    pub scroll_top: f64,
    pub scroll_left: f64,
    /// Width of the cell area (gutter already excluded)
    pub viewport_width: f64,
    /// Height of the cell area (ruler already excluded)
    pub viewport_height: f64,
    pub total_rows: usize,
    pub total_cols: usize,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl ViewportInput {
    /// Input with the fixed square cell size
    pub fn new(
        scroll_top: f64,
        scroll_left: f64,
        viewport_width: f64,
        viewport_height: f64,
        total_rows: usize,
        total_cols: usize,
    ) -> Self {
        Self {
            scroll_top,
            scroll_left,
            viewport_width,
            viewport_height,
            total_rows,
            total_cols,
            cell_width: CELL_SIZE,
            cell_height: CELL_SIZE,
        }
    }
}

/// Range along one axis: overscan on both sides, clamped into `[0, total]`
fn axis_range(scroll: f64, extent: f64, cell: f64, total: usize) -> (usize, usize) {
    if cell <= 0.0 || extent <= 0.0 || total == 0 {
        return (0, 0);
    }
    let visible = (extent / cell).ceil() as usize;
    let scrolled = (scroll.max(0.0) / cell).floor() as usize;
    let first = scrolled.saturating_sub(OVERSCAN).min(total);
    let last = first
        .saturating_add(visible)
        .saturating_add(2 * OVERSCAN)
        .min(total);
    (first, last)
}

/// Compute the visible window. Degenerate inputs yield an empty window.
pub fn compute_view_window(input: &ViewportInput) -> ViewWindow {
    let (first_row, last_row) = axis_range(
        input.scroll_top,
        input.viewport_height,
        input.cell_height,
        input.total_rows,
    );
    let (first_col, last_col) = axis_range(
        input.scroll_left,
        input.viewport_width,
        input.cell_width,
        input.total_cols,
    );
    ViewWindow {
        first_row,
        last_row,
        first_col,
        last_col,
    }
}

/// Memoized virtualizer: recomputes only when the input tuple changes
#[derive(Debug, Clone, Default)]
pub struct Virtualizer {
    cached: Option<(ViewportInput, ViewWindow)>,
    computations: usize,
}

impl Virtualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&mut self, input: ViewportInput) -> ViewWindow {
        if let Some((prev, window)) = &self.cached {
            if *prev == input {
                return *window;
            }
        }
        let window = compute_view_window(&input);
        self.cached = Some((input, window));
        self.computations += 1;
        window
    }

    /// Number of times the window was actually recomputed
    pub fn computations(&self) -> usize {
        self.computations
    }
}
