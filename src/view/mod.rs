//! View module - draws the model into a softbuffer surface
//!
//! Contains the Renderer struct and all rendering-related functionality.
//! Layout math lives in the library (`model::layout`, `msa::render`); this
//! module only turns it into pixels.

pub mod frame;

pub use frame::{Frame, TextPainter};

use anyhow::{Context as _, Result};
use fontdue::{Font, FontSettings, LineMetrics, Metrics};
use softbuffer::Surface;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use winit::window::Window;

use msaboard::model::layout::{PanelRegions, Rect, UPLOAD_BUTTON};
use msaboard::model::{AppModel, PanelConfig, PanelView, PointerCapture, TOOLBAR_HEIGHT};
use msaboard::msa::pointer::RULER_HEIGHT;
use msaboard::msa::render::{gutter_labels, ruler_marks, LABEL_PADDING};
use msaboard::msa::{RulerMark, CELL_SIZE};

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Empty canvas hint
const EMPTY_STATE_TEXT: &str =
    "Drag and drop multiple sequence alignment files in fasta format or use the upload button";

const UPLOAD_LABEL: &str = "Upload MSA";

/// Monospace fonts probed when no font is configured
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// Read the configured font, or the first system monospace font found
fn load_font(configured: Option<&Path>) -> Result<Font> {
    let path: PathBuf = match configured {
        Some(path) => path.to_path_buf(),
        None => SYSTEM_FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .ok_or_else(|| {
                anyhow::anyhow!("No monospace font found; set font_path in config.yaml")
            })?,
    };

    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read font {}", path.display()))?;
    let font = Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| anyhow::anyhow!("Failed to load font {}: {}", path.display(), e))?;
    tracing::info!(font = %path.display(), "font loaded");
    Ok(font)
}

/// Font metrics at one pixel size
struct FontMetrics {
    size: f32,
    line: LineMetrics,
    char_width: f32,
}

impl FontMetrics {
    fn new(font: &Font, size: f32) -> Result<Self> {
        let line = font
            .horizontal_line_metrics(size)
            .ok_or_else(|| anyhow::anyhow!("Font missing horizontal line metrics"))?;
        let (metrics, _) = font.rasterize('M', size);
        Ok(Self {
            size,
            line,
            char_width: metrics.advance_width,
        })
    }

    fn line_height(&self) -> usize {
        self.line.new_line_size.ceil() as usize
    }
}

/// Scale a logical rect to physical pixels
#[inline]
fn px(rect: Rect, scale: f64) -> Rect {
    Rect::new(
        rect.x * scale,
        rect.y * scale,
        rect.width * scale,
        rect.height * scale,
    )
}

pub struct Renderer {
    font: Font,
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Softbuffer doesn't guarantee buffer contents are preserved between
    /// frames, so we draw into our own buffer and copy on present.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    /// Logical font size from config
    base_font_size: f32,
    metrics: FontMetrics,
    glyph_cache: GlyphCache,
    scale_factor: f64,
}

impl Renderer {
    /// Create a new renderer, automatically detecting the window's scale factor
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        font_path: Option<&Path>,
        font_size: f32,
    ) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let size = window.inner_size();

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;
        resize_surface(&mut surface, size.width, size.height)?;

        let font = load_font(font_path)?;
        let metrics = FontMetrics::new(&font, font_size * scale_factor as f32)?;

        Ok(Self {
            font,
            surface,
            back_buffer: vec![0u32; (size.width as usize) * (size.height as usize)],
            width: size.width,
            height: size.height,
            base_font_size: font_size,
            metrics,
            glyph_cache: HashMap::new(),
            scale_factor,
        })
    }

    /// Monospace advance in logical pixels
    pub fn char_width(&self) -> f64 {
        self.metrics.char_width as f64 / self.scale_factor
    }

    /// Re-rasterize at a new scale factor
    pub fn set_scale_factor(&mut self, scale_factor: f64) -> Result<()> {
        if scale_factor == self.scale_factor {
            return Ok(());
        }
        self.metrics = FontMetrics::new(&self.font, self.base_font_size * scale_factor as f32)?;
        self.glyph_cache.clear();
        self.scale_factor = scale_factor;
        Ok(())
    }

    /// Match the surface to the window's physical size
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        resize_surface(&mut self.surface, width, height)?;
        self.width = width;
        self.height = height;
        self.back_buffer
            .resize((width as usize) * (height as usize), 0);
        Ok(())
    }

    /// Draw the full window
    pub fn render(&mut self, model: &mut AppModel) -> Result<()> {
        let scale = self.scale_factor;
        let (width, height) = (self.width as usize, self.height as usize);
        let theme = model.theme.clone();

        {
            let mut frame = Frame::new(&mut self.back_buffer, width, height);
            let mut painter = TextPainter::new(
                &self.font,
                &mut self.glyph_cache,
                self.metrics.size,
                self.metrics.line.ascent,
                self.metrics.char_width,
                self.metrics.line_height(),
            );

            frame.clear(theme.canvas.background.to_argb_u32());

            // Panels first, toolbar on top of anything scrolled under it
            let session = model.history.snapshot();
            let canvas = px(model.canvas.rect(), scale);
            for placement in session.ordered_placements() {
                let (Some(config), Some(view)) = (
                    session.config(placement.id),
                    model.views.get_mut(&placement.id),
                ) else {
                    continue;
                };
                frame.set_clip(canvas);
                let dragging = matches!(
                    model.capture,
                    Some(PointerCapture::Gutter(id)) if id == placement.id
                );
                render_panel(&mut frame, &mut painter, &theme, config, view, dragging, scale);
                frame.clear_clip();
            }

            if session.is_empty() {
                painter.draw_centered(
                    &mut frame,
                    canvas,
                    EMPTY_STATE_TEXT,
                    theme.canvas.placeholder.to_argb_u32(),
                );
            }

            render_toolbar(&mut frame, &mut painter, model, scale);
            render_tooltip(&mut frame, &mut painter, model, scale);
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        if buffer.len() == self.back_buffer.len() {
            buffer.copy_from_slice(&self.back_buffer);
        }
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}

fn resize_surface(
    surface: &mut Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
) -> Result<()> {
    let (Some(w), Some(h)) = (
        NonZeroU32::new(width.max(1)),
        NonZeroU32::new(height.max(1)),
    ) else {
        return Ok(());
    };
    surface
        .resize(w, h)
        .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))
}

fn render_toolbar(frame: &mut Frame, painter: &mut TextPainter, model: &AppModel, scale: f64) {
    let theme = &model.theme.toolbar;
    let bar = Rect::new(0.0, 0.0, model.canvas.width(), TOOLBAR_HEIGHT);
    frame.fill_rect(px(bar, scale), model.theme.canvas.background.to_argb_u32());

    let hovered = model
        .pointer
        .is_some_and(|(x, y)| UPLOAD_BUTTON.contains(x, y));
    let button_color = if hovered {
        theme.button_hover
    } else {
        theme.button_background
    };
    let button = px(UPLOAD_BUTTON, scale);
    frame.fill_rect(button, button_color.to_argb_u32());
    painter.draw_centered(
        frame,
        button,
        UPLOAD_LABEL,
        theme.button_foreground.to_argb_u32(),
    );

    if let Some(status) = &model.status {
        let x = UPLOAD_BUTTON.right() + 16.0;
        let y = UPLOAD_BUTTON.y + (UPLOAD_BUTTON.height) / 2.0;
        painter.draw(
            frame,
            x * scale,
            y * scale - painter.line_height() as f64 / 2.0,
            &status.text,
            theme.status_foreground.to_argb_u32(),
        );
    }
}

fn render_panel(
    frame: &mut Frame,
    painter: &mut TextPainter,
    theme: &msaboard::Theme,
    config: &PanelConfig,
    view: &mut PanelView,
    dragging: bool,
    scale: f64,
) {
    let Some(regions) = view.regions else {
        return;
    };
    let PanelRegions {
        outer,
        header,
        remove_button,
        body,
        resize_grip,
    } = regions;

    frame.draw_bordered_rect(
        px(outer, scale),
        theme.panel.background.to_argb_u32(),
        theme.panel.border.to_argb_u32(),
    );

    // Header: filename and remove button
    frame.fill_rect(px(header, scale), theme.panel.header_background.to_argb_u32());
    let text_y = header.y * scale + (header.height * scale - painter.line_height() as f64) / 2.0;
    painter.draw(
        frame,
        (header.x + 8.0) * scale,
        text_y,
        &config.filename,
        theme.panel.header_foreground.to_argb_u32(),
    );
    painter.draw_centered(
        frame,
        px(remove_button, scale),
        "×",
        theme.panel.remove_foreground.to_argb_u32(),
    );

    let data = &config.data;
    let label_width = view.label_width();
    let window = view.view_window(data);
    let hover = view.hover;
    view.renderer
        .update(data, config.color_scheme, window, hover.col);

    // Origin of cell (0, 0) on screen
    let origin_x = body.x + label_width - view.scroll_left;
    let origin_y = body.y + RULER_HEIGHT - view.scroll_top;

    let cell_area = Rect::new(
        body.x + label_width,
        body.y + RULER_HEIGHT,
        (body.width - label_width).max(0.0),
        (body.height - RULER_HEIGHT).max(0.0),
    );
    let outer_clip = px(body, scale);

    // Cells
    frame.set_clip(px(cell_area, scale));
    let foreground = theme.grid.foreground.to_argb_u32();
    let highlight = theme.grid.highlight.to_argb_u32();
    let mut glyph = [0u8; 4];
    for cell in view.renderer.cells() {
        let rect = px(
            Rect::new(
                origin_x + cell.rect.left,
                origin_y + cell.rect.top,
                cell.rect.width,
                cell.rect.height,
            ),
            scale,
        );
        frame.fill_rect(rect, cell.background.to_argb_u32());
        if let Some(residue) = cell.residue {
            painter.draw_centered(frame, rect, residue.encode_utf8(&mut glyph), foreground);
        }
        if cell.highlighted {
            frame.blend_rect(rect, highlight);
        }
    }
    frame.clear_clip();

    // Ruler band above the cells
    frame.set_clip(outer_clip);
    let ruler = Rect::new(cell_area.x, body.y, cell_area.width, RULER_HEIGHT);
    frame.fill_rect(px(ruler, scale), theme.grid.ruler_background.to_argb_u32());
    frame.set_clip(px(ruler, scale));
    let ruler_color = theme.grid.ruler_foreground.to_argb_u32();
    let mut label = String::new();
    for (col, mark) in ruler_marks(&window, data.col_count()) {
        let text = match mark {
            RulerMark::Number(pos) => {
                label.clear();
                label.push_str(&pos.to_string());
                label.as_str()
            }
            RulerMark::Tick => "·",
            RulerMark::Blank => continue,
        };
        let slot = Rect::new(origin_x + col as f64 * CELL_SIZE, body.y, CELL_SIZE, RULER_HEIGHT);
        painter.draw_centered(frame, px(slot, scale), text, ruler_color);
    }
    frame.clear_clip();

    // Gutter labels, right-aligned, hovered row highlighted
    frame.set_clip(outer_clip);
    let gutter = Rect::new(body.x, body.y, label_width, body.height);
    frame.fill_rect(px(gutter, scale), theme.gutter.background.to_argb_u32());
    let label_rows = Rect::new(
        body.x,
        body.y + RULER_HEIGHT,
        label_width,
        (body.height - RULER_HEIGHT).max(0.0),
    );
    frame.set_clip(px(label_rows, scale));
    let char_width = painter.char_width() as f64 / scale;
    let label_color = theme.gutter.foreground.to_argb_u32();
    for label in gutter_labels(data, &window, label_width, char_width, hover.row) {
        let row_rect = Rect::new(
            body.x,
            origin_y + label.row as f64 * CELL_SIZE,
            label_width,
            CELL_SIZE,
        );
        if label.hovered {
            frame.fill_rect(px(row_rect, scale), theme.gutter.hover_background.to_argb_u32());
        }
        let text_width = painter.measure_width(&label.text) as f64 + 1.0;
        let x = (row_rect.right() - LABEL_PADDING) * scale - text_width;
        let y = row_rect.y * scale + (CELL_SIZE * scale - painter.line_height() as f64) / 2.0;
        painter.draw_bold(frame, x, y, &label.text, label_color);
    }

    // Gutter border and drag handle
    frame.set_clip(outer_clip);
    frame.fill_rect(
        px(Rect::new(gutter.right() - 1.0, body.y, 1.0, body.height), scale),
        theme.gutter.border.to_argb_u32(),
    );
    let handle_color = if dragging {
        theme.gutter.handle_active
    } else {
        theme.gutter.handle
    };
    frame.blend_rect(
        px(regions.gutter_handle(label_width), scale),
        handle_color.to_argb_u32(),
    );
    frame.clear_clip();

    frame.blend_rect(px(resize_grip, scale), theme.panel.resize_grip.to_argb_u32());
}

/// Tooltip for the hovered cell: "Site N" and the row id
fn render_tooltip(frame: &mut Frame, painter: &mut TextPainter, model: &AppModel, scale: f64) {
    let Some(id) = model.hovered_panel else {
        return;
    };
    let (Some(view), Some(config)) = (model.view(id), model.session().config(id)) else {
        return;
    };
    let Some(col) = view.hover.col else {
        return;
    };
    let Some(placement) = view.tooltip(model.canvas.width(), model.canvas.height()) else {
        return;
    };
    // Blank over the ruler band
    let row_id = view
        .hover
        .row
        .and_then(|row| config.data.row(row))
        .map(|r| r.id.as_str())
        .unwrap_or_default();
    let site = format!("Site {}", col + 1);

    let line = painter.line_height() as f64 / scale;
    let text_width = painter
        .measure_width(&site)
        .max(painter.measure_width(row_id)) as f64
        / scale;
    let (width, height) = (text_width + 16.0, line * 2.0 + 12.0);
    let (x, y) = placement.origin(width, height);

    let tooltip = &model.theme.tooltip;
    frame.draw_bordered_rect(
        px(Rect::new(x, y, width, height), scale),
        tooltip.background.to_argb_u32(),
        tooltip.border.to_argb_u32(),
    );
    painter.draw_bold(
        frame,
        (x + 8.0) * scale,
        (y + 6.0) * scale,
        &site,
        tooltip.foreground.to_argb_u32(),
    );
    painter.draw(
        frame,
        (x + 8.0) * scale,
        (y + 6.0 + line) * scale,
        row_id,
        tooltip.secondary.to_argb_u32(),
    );
}
