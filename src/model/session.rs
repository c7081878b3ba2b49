//! Session value types: open panels, their placement and configuration

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::gutter::clamp_label_width;
use crate::msa::{AlignmentMatrix, ColorScheme};

/// Number of columns of the canvas grid
pub const GRID_COLUMNS: u32 = 12;
/// Minimum panel size in grid units
pub const MIN_PANEL_W: u32 = 2;
pub const MIN_PANEL_H: u32 = 2;

/// Unique identifier for a panel, never reused within a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub u64);

impl PanelId {
    /// Placeholder carried by placements before the store assigns an id
    pub const UNASSIGNED: PanelId = PanelId(0);
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// Per-panel configuration, mutated only through the history store
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub filename: String,
    /// Gutter width in pixels, always within [40, 400]
    pub label_width: u32,
    pub color_scheme: ColorScheme,
    pub data: Rc<AlignmentMatrix>,
}

impl PanelConfig {
    pub fn new(
        filename: impl Into<String>,
        data: AlignmentMatrix,
        label_width: u32,
        color_scheme: ColorScheme,
    ) -> Self {
        Self {
            filename: filename.into(),
            label_width: clamp_label_width(label_width as f64),
            color_scheme,
            data: Rc::new(data),
        }
    }
}

/// Placement of a panel on the canvas grid, in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelPlacement {
    pub id: PanelId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub min_w: u32,
    pub min_h: u32,
}

impl PanelPlacement {
    /// Full-width placement sized for an alignment with `row_count` rows
    pub fn for_alignment(row_count: usize, y: u32) -> Self {
        Self {
            id: PanelId::UNASSIGNED,
            x: 0,
            y,
            w: GRID_COLUMNS,
            h: default_panel_height(row_count),
            min_w: MIN_PANEL_W,
            min_h: MIN_PANEL_H,
        }
    }

    /// First grid row below this panel
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Enforce min size and keep the panel inside the grid columns
    pub fn constrained(mut self) -> Self {
        self.w = self.w.clamp(self.min_w.min(GRID_COLUMNS), GRID_COLUMNS);
        self.h = self.h.max(self.min_h);
        self.x = self.x.min(GRID_COLUMNS - self.w);
        self
    }
}

/// Panel height heuristic: taller alignments get taller panels.
/// `clamp(2 + ceil(rows * 0.8), 3, 20)`
pub fn default_panel_height(row_count: usize) -> u32 {
    let proportional = 2 + (row_count as f64 * 0.8).ceil() as u64;
    proportional.clamp(3, 20) as u32
}

/// Complete state of the open panels.
///
/// `panel_ids`, the keys of `placements` and the keys of `configs` always
/// name the same set of panels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub panel_ids: Vec<PanelId>,
    pub placements: HashMap<PanelId, PanelPlacement>,
    pub configs: HashMap<PanelId, PanelConfig>,
}

impl Session {
    pub fn len(&self) -> usize {
        self.panel_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panel_ids.is_empty()
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.configs.contains_key(&id)
    }

    pub fn config(&self, id: PanelId) -> Option<&PanelConfig> {
        self.configs.get(&id)
    }

    pub fn placement(&self, id: PanelId) -> Option<&PanelPlacement> {
        self.placements.get(&id)
    }

    /// Placements in panel order
    pub fn ordered_placements(&self) -> impl Iterator<Item = &PanelPlacement> {
        self.panel_ids
            .iter()
            .filter_map(|id| self.placements.get(id))
    }

    /// First free grid row below every panel
    pub fn next_free_row(&self) -> u32 {
        self.placements
            .values()
            .map(PanelPlacement::bottom)
            .max()
            .unwrap_or(0)
    }

    /// Check the same-key-set invariant
    pub fn is_consistent(&self) -> bool {
        self.panel_ids.len() == self.placements.len()
            && self.panel_ids.len() == self.configs.len()
            && self
                .panel_ids
                .iter()
                .all(|id| self.placements.contains_key(id) && self.configs.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_panel_height() {
        assert_eq!(default_panel_height(0), 3);
        assert_eq!(default_panel_height(1), 3);
        assert_eq!(default_panel_height(2), 4);
        assert_eq!(default_panel_height(10), 10);
        assert_eq!(default_panel_height(1000), 20);
    }

    #[test]
    fn test_placement_for_alignment() {
        let p = PanelPlacement::for_alignment(5, 7);
        assert_eq!((p.x, p.y, p.w, p.h), (0, 7, 12, 6));
        assert_eq!((p.min_w, p.min_h), (2, 2));
    }

    #[test]
    fn test_constrained_keeps_panel_in_grid() {
        let p = PanelPlacement {
            x: 11,
            w: 5,
            h: 1,
            ..PanelPlacement::for_alignment(1, 0)
        }
        .constrained();
        assert_eq!((p.x, p.w, p.h), (7, 5, 2));
    }

    #[test]
    fn test_panel_id_display() {
        assert_eq!(PanelId(3).to_string(), "panel-3");
    }
}
