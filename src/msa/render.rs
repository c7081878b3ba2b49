//! Alignment grid materialization
//!
//! Turns a [`ViewWindow`] into cell descriptors, ruler marks and gutter
//! labels. Descriptors are cached behind `Rc` so that a cell whose inputs
//! did not change keeps the same allocation across frames; callers can
//! compare with `Rc::ptr_eq` to skip repainting it.

use std::collections::HashMap;
use std::rc::Rc;

use super::model::{AlignmentMatrix, ResidueKind};
use super::pointer::{cell_grid_rect, CellRect};
use super::scheme::ColorScheme;
use super::viewport::{ViewWindow, CELL_SIZE};
use crate::theme::Color;

/// Right padding between a gutter label and the gutter edge
pub const LABEL_PADDING: f64 = 8.0;

/// One materialized cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellDescriptor {
    pub row: usize,
    pub col: usize,
    /// None when the row is shorter than the column count (rendered blank)
    pub residue: Option<char>,
    pub background: Color,
    /// True when the cell lies in the hovered column
    pub highlighted: bool,
    /// Position in grid space, before gutter/ruler offset and scrolling
    pub rect: CellRect,
}

/// What the ruler shows above a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerMark {
    /// 1-based column position
    Number(usize),
    Tick,
    Blank,
}

impl RulerMark {
    /// Mark for a 1-based position: numbers every 10 plus the first and last
    /// column, ticks every 5
    pub fn for_position(pos: usize, col_count: usize) -> Self {
        if pos % 10 == 0 || pos == 1 || pos == col_count {
            RulerMark::Number(pos)
        } else if pos % 5 == 0 {
            RulerMark::Tick
        } else {
            RulerMark::Blank
        }
    }
}

/// Ruler marks for the visible columns, as (column index, mark)
pub fn ruler_marks(window: &ViewWindow, col_count: usize) -> Vec<(usize, RulerMark)> {
    window
        .cols()
        .map(|col| (col, RulerMark::for_position(col + 1, col_count)))
        .collect()
}

/// A row label in the fixed gutter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterLabel {
    pub row: usize,
    /// Identifier, truncated to fit the gutter; drawn right-aligned
    pub text: String,
    pub hovered: bool,
}

/// Truncate text with an ellipsis when it exceeds `max_chars`
pub fn truncate_label(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

/// Gutter labels for the visible rows.
///
/// `char_width` is the advance of one monospace glyph; labels are cut to
/// the number of glyphs fitting into the gutter minus its padding.
pub fn gutter_labels(
    data: &AlignmentMatrix,
    window: &ViewWindow,
    gutter_width: f64,
    char_width: f64,
    hovered_row: Option<usize>,
) -> Vec<GutterLabel> {
    let max_chars = if char_width > 0.0 {
        ((gutter_width - LABEL_PADDING).max(0.0) / char_width).floor() as usize
    } else {
        0
    };

    window
        .rows()
        .filter_map(|row| {
            let record = data.row(row)?;
            Some(GutterLabel {
                row,
                text: truncate_label(&record.id, max_chars),
                hovered: hovered_row == Some(row),
            })
        })
        .collect()
}

/// Inputs that invalidate every cached descriptor when they change
#[derive(Debug, Clone)]
struct CacheKey {
    data: Rc<AlignmentMatrix>,
    scheme: ColorScheme,
}

impl CacheKey {
    fn matches(&self, data: &Rc<AlignmentMatrix>, scheme: ColorScheme) -> bool {
        Rc::ptr_eq(&self.data, data) && self.scheme == scheme
    }
}

/// Materializes the visible cell set of one panel
#[derive(Debug, Default)]
pub struct GridRenderer {
    key: Option<CacheKey>,
    cache: HashMap<(usize, usize), Rc<CellDescriptor>>,
    cells: Vec<Rc<CellDescriptor>>,
    window: ViewWindow,
    hovered_col: Option<usize>,
    /// Descriptors built since creation
    built: usize,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cell set up to date. Returns true when anything changed.
    ///
    /// Produces exactly `window.cell_count()` descriptors. Cells already
    /// materialized with the same highlight state are reused as-is.
    pub fn update(
        &mut self,
        data: &Rc<AlignmentMatrix>,
        scheme: ColorScheme,
        window: ViewWindow,
        hovered_col: Option<usize>,
    ) -> bool {
        let key_valid = self
            .key
            .as_ref()
            .is_some_and(|key| key.matches(data, scheme));

        if key_valid && self.window == window && self.hovered_col == hovered_col {
            return false;
        }

        if !key_valid {
            self.cache.clear();
            self.key = Some(CacheKey {
                data: Rc::clone(data),
                scheme,
            });
        }

        let kind = data.kind();
        let mut cells = Vec::with_capacity(window.cell_count());
        let mut next_cache = HashMap::with_capacity(window.cell_count());

        for row in window.rows() {
            for col in window.cols() {
                let highlighted = hovered_col == Some(col);
                let cell = match self.cache.remove(&(row, col)) {
                    Some(cell) if cell.highlighted == highlighted => cell,
                    _ => {
                        self.built += 1;
                        Rc::new(build_cell(data, kind, scheme, row, col, highlighted))
                    }
                };
                next_cache.insert((row, col), Rc::clone(&cell));
                cells.push(cell);
            }
        }

        self.cache = next_cache;
        self.cells = cells;
        self.window = window;
        self.hovered_col = hovered_col;
        true
    }

    /// Current descriptors in row-major order
    pub fn cells(&self) -> &[Rc<CellDescriptor>] {
        &self.cells
    }

    /// Total number of descriptors constructed (cache misses)
    pub fn built(&self) -> usize {
        self.built
    }
}

fn build_cell(
    data: &AlignmentMatrix,
    kind: ResidueKind,
    scheme: ColorScheme,
    row: usize,
    col: usize,
    highlighted: bool,
) -> CellDescriptor {
    let residue = data.residue(row, col);
    CellDescriptor {
        row,
        col,
        residue,
        background: scheme.background(kind, residue),
        highlighted,
        rect: cell_grid_rect(row, col, CELL_SIZE, CELL_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msa::model::SequenceRecord;
    use crate::msa::scheme::NEUTRAL;

    fn data() -> Rc<AlignmentMatrix> {
        Rc::new(AlignmentMatrix::new(vec![
            SequenceRecord::new("seq1", "AC-GT"),
            SequenceRecord::new("seq2", "AC"),
            SequenceRecord::new("a_rather_long_identifier", "ACGGT"),
        ]))
    }

    fn window(rows: (usize, usize), cols: (usize, usize)) -> ViewWindow {
        ViewWindow {
            first_row: rows.0,
            last_row: rows.1,
            first_col: cols.0,
            last_col: cols.1,
        }
    }

    #[test]
    fn test_cell_count_matches_window() {
        let mut r = GridRenderer::new();
        r.update(&data(), ColorScheme::Default, window((0, 3), (1, 4)), None);
        assert_eq!(r.cells().len(), 9);
        assert_eq!(r.cells()[0].row, 0);
        assert_eq!(r.cells()[0].col, 1);
        assert_eq!(r.cells()[0].rect, CellRect { top: 0.0, left: 24.0, width: 24.0, height: 24.0 });
    }

    #[test]
    fn test_ragged_row_renders_blank_neutral() {
        let mut r = GridRenderer::new();
        r.update(&data(), ColorScheme::Default, window((1, 2), (0, 5)), None);
        let short = &r.cells()[3];
        assert_eq!((short.row, short.col), (1, 3));
        assert_eq!(short.residue, None);
        assert_eq!(short.background, NEUTRAL);
    }

    #[test]
    fn test_highlight_is_column_wide() {
        let mut r = GridRenderer::new();
        r.update(&data(), ColorScheme::Default, window((0, 3), (0, 5)), Some(2));
        let highlighted: Vec<_> = r.cells().iter().filter(|c| c.highlighted).collect();
        assert_eq!(highlighted.len(), 3);
        assert!(highlighted.iter().all(|c| c.col == 2));
    }

    #[test]
    fn test_unchanged_inputs_do_not_rebuild() {
        let d = data();
        let mut r = GridRenderer::new();
        assert!(r.update(&d, ColorScheme::Default, window((0, 3), (0, 5)), None));
        let before: Vec<_> = r.cells().to_vec();
        assert!(!r.update(&d, ColorScheme::Default, window((0, 3), (0, 5)), None));
        assert!(before.iter().zip(r.cells()).all(|(a, b)| Rc::ptr_eq(a, b)));
        assert_eq!(r.built(), 15);
    }

    #[test]
    fn test_hover_change_rebuilds_only_affected_columns() {
        let d = data();
        let mut r = GridRenderer::new();
        r.update(&d, ColorScheme::Default, window((0, 3), (0, 5)), Some(1));
        let before: Vec<_> = r.cells().to_vec();
        r.update(&d, ColorScheme::Default, window((0, 3), (0, 5)), Some(3));
        assert_eq!(r.built(), 15 + 6);
        for (a, b) in before.iter().zip(r.cells()) {
            let touched = a.col == 1 || a.col == 3;
            assert_eq!(Rc::ptr_eq(a, b), !touched);
        }
    }

    #[test]
    fn test_scrolled_window_keeps_overlapping_cells() {
        let d = data();
        let mut r = GridRenderer::new();
        r.update(&d, ColorScheme::Default, window((0, 3), (0, 3)), None);
        let kept = Rc::clone(&r.cells()[2]);
        r.update(&d, ColorScheme::Default, window((0, 3), (2, 5)), None);
        assert!(Rc::ptr_eq(&kept, &r.cells()[0]));
    }

    #[test]
    fn test_scheme_change_rebuilds_everything() {
        let d = data();
        let mut r = GridRenderer::new();
        r.update(&d, ColorScheme::Default, window((0, 1), (0, 1)), None);
        let a_default = r.cells()[0].background;
        r.update(&d, ColorScheme::Plain, window((0, 1), (0, 1)), None);
        assert_ne!(a_default, r.cells()[0].background);
        assert_eq!(r.built(), 2);
    }

    #[test]
    fn test_ruler_marks() {
        let marks = ruler_marks(&window((0, 0), (0, 12)), 12);
        assert_eq!(marks[0], (0, RulerMark::Number(1)));
        assert_eq!(marks[1], (1, RulerMark::Blank));
        assert_eq!(marks[4], (4, RulerMark::Tick));
        assert_eq!(marks[9], (9, RulerMark::Number(10)));
        assert_eq!(marks[11], (11, RulerMark::Number(12)));
        assert_eq!(RulerMark::for_position(15, 40), RulerMark::Tick);
        assert_eq!(RulerMark::for_position(15, 15), RulerMark::Number(15));
    }

    #[test]
    fn test_gutter_labels_truncate_and_mark_hover() {
        let d = data();
        let labels = gutter_labels(&d, &window((0, 3), (0, 0)), 8.0 + 8.0 * 6.0, 8.0, Some(2));
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].text, "seq1");
        assert_eq!(labels[2].text, "a_rat…");
        assert!(labels[2].hovered);
        assert!(!labels[0].hovered);
    }
}
