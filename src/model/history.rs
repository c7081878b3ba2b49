//! Undoable session store
//!
//! Linear undo history over immutable [`Session`] snapshots. Snapshots are
//! shared through `Rc`, so pushing the present onto `past` never copies the
//! maps; the present is copied lazily (`Rc::make_mut`) only when an in-place
//! update hits a snapshot that history still references.

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use super::session::{PanelConfig, PanelId, PanelPlacement, Session};
use crate::gutter::clamp_label_width;

/// Default bound on undo depth
pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// Past, present and future session snapshots
#[derive(Debug, Clone)]
pub struct PanelHistoryStore {
    past: VecDeque<Rc<Session>>,
    present: Rc<Session>,
    future: Vec<Rc<Session>>,
    next_id: u64,
    max_size: usize,
}

impl PanelHistoryStore {
    /// Create an empty store with the default undo bound
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_UNDO_LIMIT)
    }

    /// Create an empty store keeping at most `max_size` undo steps
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: Rc::new(Session::default()),
            future: Vec::new(),
            next_id: 1,
            max_size: max_size.max(1),
        }
    }

    pub fn present(&self) -> &Session {
        &self.present
    }

    /// Shared handle to the present snapshot
    pub fn snapshot(&self) -> Rc<Session> {
        Rc::clone(&self.present)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Make `next` the present as a new undo step
    fn commit(&mut self, next: Session) {
        let prev = std::mem::replace(&mut self.present, Rc::new(next));
        self.past.push_back(prev);
        self.future.clear();

        while self.past.len() > self.max_size {
            self.past.pop_front();
        }
    }

    /// Open a panel. The placement's id is replaced by a fresh one.
    pub fn add_panel(&mut self, config: PanelConfig, placement: PanelPlacement) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;

        let mut next = Session::clone(&self.present);
        next.panel_ids.push(id);
        next.placements.insert(
            id,
            PanelPlacement {
                id,
                ..placement.constrained()
            },
        );
        next.configs.insert(id, config);
        self.commit(next);

        tracing::debug!(panel = %id, panels = self.present.len(), "panel added");
        id
    }

    /// Close a panel. Removing an id that is not open changes nothing and
    /// records no undo step. Returns whether a panel was removed.
    pub fn remove_panel(&mut self, id: PanelId) -> bool {
        if !self.present.contains(id) {
            tracing::trace!(panel = %id, "remove of absent panel ignored");
            return false;
        }

        let mut next = Session::clone(&self.present);
        next.panel_ids.retain(|p| *p != id);
        next.placements.remove(&id);
        next.configs.remove(&id);
        self.commit(next);

        tracing::debug!(panel = %id, panels = self.present.len(), "panel removed");
        true
    }

    /// Apply `updater` to a panel's config in place, without an undo step.
    /// Returns false when the panel is not open.
    pub fn update_config(&mut self, id: PanelId, updater: impl FnOnce(&mut PanelConfig)) -> bool {
        if !self.present.contains(id) {
            return false;
        }
        let session = Rc::make_mut(&mut self.present);
        if let Some(config) = session.configs.get_mut(&id) {
            updater(config);
            config.label_width = clamp_label_width(config.label_width as f64);
        }
        true
    }

    /// Replace panel placements in place, without an undo step.
    ///
    /// Placements for ids that are not open are ignored; open panels missing
    /// from `placements` keep their current placement.
    pub fn update_layout(&mut self, placements: impl IntoIterator<Item = PanelPlacement>) {
        let incoming: HashMap<PanelId, PanelPlacement> = placements
            .into_iter()
            .filter(|p| self.present.contains(p.id))
            .map(|p| (p.id, p.constrained()))
            .collect();

        let changed = incoming
            .iter()
            .any(|(id, p)| self.present.placement(*id) != Some(p));
        if !changed {
            return;
        }

        let session = Rc::make_mut(&mut self.present);
        session.placements.extend(incoming);
    }

    /// Step back one snapshot. No-op at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.past.pop_back() else {
            tracing::trace!("undo at history start ignored");
            return false;
        };
        let current = std::mem::replace(&mut self.present, prev);
        self.future.push(current);
        tracing::debug!(undo = self.past.len(), redo = self.future.len(), "undo");
        true
    }

    /// Step forward one snapshot. No-op at the end of history.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            tracing::trace!("redo at history end ignored");
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        tracing::debug!(undo = self.past.len(), redo = self.future.len(), "redo");
        true
    }
}

impl Default for PanelHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
