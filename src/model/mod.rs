//! Application model - the complete state of the viewer
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod history;
pub mod layout;
pub mod panel;
pub mod session;

pub use history::{PanelHistoryStore, DEFAULT_UNDO_LIMIT};
pub use layout::{grid_to_pixels, PanelRegions, Rect, TOOLBAR_HEIGHT, UPLOAD_BUTTON};
pub use panel::PanelView;
pub use session::{
    default_panel_height, PanelConfig, PanelId, PanelPlacement, Session, GRID_COLUMNS,
};

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::ViewerConfig;
use crate::msa::ColorScheme;
use crate::scheduler::{earliest, Coalescer, FRAME_INTERVAL};
use crate::theme::Theme;

/// How long a status message stays in the toolbar
pub const STATUS_DURATION: Duration = Duration::from_secs(4);

/// Settings applied to newly opened panels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelDefaults {
    pub label_width: u32,
    pub color_scheme: ColorScheme,
}

/// Transient toolbar message with expiry
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            expires_at: now + STATUS_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Kind of layout drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDragKind {
    Move,
    Resize,
}

/// Active panel move/resize gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutDrag {
    pub id: PanelId,
    pub kind: LayoutDragKind,
    /// Pointer position at drag start
    pub start: (f64, f64),
    /// Placement at drag start
    pub origin: PanelPlacement,
}

/// Owner of global pointer move/release events.
///
/// Acquired on drag start; released on pointer release, pointer leaving
/// the window, focus loss or removal of the owning panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerCapture {
    Gutter(PanelId),
    Layout(LayoutDrag),
}

impl PointerCapture {
    pub fn panel(&self) -> PanelId {
        match self {
            PointerCapture::Gutter(id) => *id,
            PointerCapture::Layout(drag) => drag.id,
        }
    }
}

/// Canvas viewport state
#[derive(Debug, Clone)]
pub struct CanvasState {
    /// Window size in logical pixels
    pub window_size: (f64, f64),
    pub scale_factor: f64,
    /// Vertical scroll of the panel grid
    pub scroll_y: f64,
    /// Latest window size not yet laid out; applied once per frame
    pub pending_resize: Coalescer<(f64, f64)>,
}

impl CanvasState {
    pub fn new(width: f64, height: f64, scale_factor: f64) -> Self {
        Self {
            window_size: (width, height),
            scale_factor,
            scroll_y: 0.0,
            pending_resize: Coalescer::new(FRAME_INTERVAL),
        }
    }

    pub fn width(&self) -> f64 {
        self.window_size.0
    }

    pub fn height(&self) -> f64 {
        self.window_size.1
    }

    /// Area below the toolbar
    pub fn rect(&self) -> Rect {
        Rect::new(
            0.0,
            TOOLBAR_HEIGHT,
            self.width(),
            (self.height() - TOOLBAR_HEIGHT).max(0.0),
        )
    }
}

/// Where a window-space point lands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    UploadButton,
    Toolbar,
    PanelRemove(PanelId),
    PanelHeader(PanelId),
    PanelResize(PanelId),
    GutterHandle(PanelId),
    /// Scroll container of a panel, with body-local coordinates
    PanelBody {
        id: PanelId,
        local_x: f64,
        local_y: f64,
    },
    Canvas,
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Undoable session: panels, placements, configs
    pub history: PanelHistoryStore,
    /// Local state per open panel
    pub views: HashMap<PanelId, PanelView>,
    pub capture: Option<PointerCapture>,
    pub canvas: CanvasState,
    /// Panel under the pointer (target of the scheme shortcut)
    pub hovered_panel: Option<PanelId>,
    /// Last pointer position in window coordinates
    pub pointer: Option<(f64, f64)>,
    pub status: Option<StatusMessage>,
    pub defaults: PanelDefaults,
    pub theme: Theme,
    pub config: ViewerConfig,
    /// Monospace advance in logical pixels (corrected by the renderer)
    pub char_width: f64,
}

impl AppModel {
    /// Create a model for a window of the given logical size
    pub fn new(config: ViewerConfig, theme: Theme, width: f64, height: f64) -> Self {
        let defaults = PanelDefaults {
            label_width: config.default_label_width,
            color_scheme: config.scheme(),
        };
        Self {
            history: PanelHistoryStore::with_max_size(config.undo_limit),
            views: HashMap::new(),
            capture: None,
            canvas: CanvasState::new(width, height, 1.0),
            hovered_panel: None,
            pointer: None,
            status: None,
            defaults,
            theme,
            config,
            char_width: 8.0,
        }
    }

    /// Present session snapshot
    pub fn session(&self) -> &Session {
        self.history.present()
    }

    pub fn view(&self, id: PanelId) -> Option<&PanelView> {
        self.views.get(&id)
    }

    /// Bring the per-panel views in line with the present session and
    /// recompute their screen regions.
    pub fn sync_views(&mut self) {
        let session = self.history.snapshot();

        let stale: Vec<PanelId> = self
            .views
            .keys()
            .filter(|id| !session.contains(**id))
            .copied()
            .collect();
        for id in stale {
            self.views.remove(&id);
            if self.capture.is_some_and(|c| c.panel() == id) {
                tracing::debug!(panel = %id, "pointer capture released: panel removed");
                self.capture = None;
            }
            if self.hovered_panel == Some(id) {
                self.hovered_panel = None;
            }
        }

        let interval = self.config.scroll_interval();
        for id in &session.panel_ids {
            let Some(config) = session.config(*id) else {
                continue;
            };
            self.views
                .entry(*id)
                .or_insert_with(|| PanelView::new(*id, config.label_width, interval))
                .sync_from(config);
        }

        self.layout_panels();
    }

    /// Recompute every panel's screen regions from its placement
    pub fn layout_panels(&mut self) {
        self.clamp_canvas_scroll();
        let session = self.history.snapshot();
        let width = self.canvas.width();
        let origin_y = TOOLBAR_HEIGHT - self.canvas.scroll_y;

        for placement in session.ordered_placements() {
            let Some(view) = self.views.get_mut(&placement.id) else {
                continue;
            };
            let mut outer = grid_to_pixels(placement, width);
            outer.y += origin_y;
            view.regions = Some(PanelRegions::compute(outer));
            if let Some(config) = session.config(placement.id) {
                view.reclamp(&config.data);
            }
        }
    }

    /// Height of the panel grid in pixels
    pub fn content_height(&self) -> f64 {
        layout::content_height(self.session().next_free_row())
    }

    fn clamp_canvas_scroll(&mut self) {
        let max = (self.content_height() - self.canvas.rect().height).max(0.0);
        self.canvas.scroll_y = self.canvas.scroll_y.clamp(0.0, max);
    }

    /// Scroll the canvas; returns true when the offset changed
    pub fn scroll_canvas(&mut self, dy: f64) -> bool {
        let before = self.canvas.scroll_y;
        self.canvas.scroll_y += dy;
        self.layout_panels();
        self.canvas.scroll_y != before
    }

    /// Resolve what lies under a window-space point. Later panels are on top.
    pub fn hit_test(&self, x: f64, y: f64) -> HitTarget {
        if y < TOOLBAR_HEIGHT {
            if UPLOAD_BUTTON.contains(x, y) {
                return HitTarget::UploadButton;
            }
            return HitTarget::Toolbar;
        }

        for id in self.session().panel_ids.iter().rev() {
            let Some(view) = self.views.get(id) else {
                continue;
            };
            let Some(regions) = view.regions else {
                continue;
            };
            if !regions.outer.contains(x, y) {
                continue;
            }
            if regions.remove_button.contains(x, y) {
                return HitTarget::PanelRemove(*id);
            }
            if regions.header.contains(x, y) {
                return HitTarget::PanelHeader(*id);
            }
            if regions.resize_grip.contains(x, y) {
                return HitTarget::PanelResize(*id);
            }
            if regions.gutter_handle(view.label_width()).contains(x, y) {
                return HitTarget::GutterHandle(*id);
            }
            if regions.body.contains(x, y) {
                return HitTarget::PanelBody {
                    id: *id,
                    local_x: x - regions.body.x,
                    local_y: y - regions.body.y,
                };
            }
            return HitTarget::Canvas;
        }

        HitTarget::Canvas
    }

    /// Set a transient toolbar message
    pub fn set_status(&mut self, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusMessage::new(text, now));
    }

    /// Earliest pending deadline across all panels and the canvas.
    /// The runtime sleeps until then instead of polling.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(
            self.views
                .values()
                .map(PanelView::next_deadline)
                .chain([
                    self.canvas.pending_resize.deadline(),
                    self.status.as_ref().map(|s| s.expires_at),
                ]),
        )
    }
}
