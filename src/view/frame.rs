//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout rendering code. All
//! coordinates here are physical pixels.

use fontdue::Font;
use msaboard::model::Rect;

use super::GlyphCache;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). The alpha value from the
/// foreground color determines the blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug, PartialEq)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// Out-of-bounds operations are clipped to the frame and to the active
/// clip rectangle.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            (width, actual_size / width)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Restrict drawing to `rect` (intersected with any enclosing clip)
    pub fn set_clip(&mut self, rect: Rect) {
        let (x0, y0, x1, y1) = self.span(rect);
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    /// Remove the clipping rectangle, restoring full-frame drawing.
    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Pixel span of a rect after frame bounds and clip are applied
    fn span(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let (min_x, min_y, max_x, max_y) = match self.clip {
            Some(c) => (c.x0, c.y0, c.x1, c.y1),
            None => (0, 0, self.width, self.height),
        };
        let x0 = (rect.x.max(0.0).round() as usize).clamp(min_x, max_x);
        let y0 = (rect.y.max(0.0).round() as usize).clamp(min_y, max_y);
        let x1 = (rect.right().max(0.0).round() as usize).clamp(x0, max_x);
        let y1 = (rect.bottom().max(0.0).round() as usize).clamp(y0, max_y);
        (x0, y0, x1, y1)
    }

    #[inline]
    fn in_clip(&self, x: usize, y: usize) -> bool {
        match self.clip {
            Some(c) => x >= c.x0 && x < c.x1 && y >= c.y0 && y < c.y1,
            None => x < self.width && y < self.height,
        }
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            self.buffer[row_start + x0..row_start + x1].fill(color);
        }
    }

    /// Fill a rectangle with alpha blending (color is ARGB format)
    pub fn blend_rect(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color);
        }

        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            for x in x0..x1 {
                let idx = row_start + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    /// Set a single pixel (bounds-checked, respects clip rect)
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if self.in_clip(x, y) {
            self.buffer[y * self.width + x] = color;
        }
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blend `color` onto a pixel with an explicit coverage in [0, 1]
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32, coverage: f32) {
        if coverage <= 0.0 || !self.in_clip(x, y) {
            return;
        }
        let idx = y * self.width + x;
        self.buffer[idx] = if coverage >= 1.0 {
            color | 0xFF000000
        } else {
            blend_colors(self.buffer[idx], color, coverage)
        };
    }

    /// Draw a rectangle with a 1px border
    pub fn draw_bordered_rect(&mut self, rect: Rect, fill_color: u32, border_color: u32) {
        if (fill_color >> 24) & 0xFF == 0xFF {
            self.fill_rect(rect, fill_color);
        } else {
            self.blend_rect(rect, fill_color);
        }

        let opaque_border = border_color | 0xFF000000;
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        self.fill_rect(Rect::new(x, y, width, 1.0), opaque_border);
        self.fill_rect(Rect::new(x, y + height - 1.0, width, 1.0), opaque_border);
        self.fill_rect(Rect::new(x, y, 1.0, height), opaque_border);
        self.fill_rect(Rect::new(x + width - 1.0, y, 1.0, height), opaque_border);
    }
}

/// Text rendering context wrapping font and glyph cache.
///
/// Provides methods for drawing text with proper font metrics and glyph caching.
pub struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
    font_size: f32,
    ascent: f32,
    char_width: f32,
    line_height: usize,
}

impl<'a> TextPainter<'a> {
    pub fn new(
        font: &'a Font,
        glyph_cache: &'a mut GlyphCache,
        font_size: f32,
        ascent: f32,
        char_width: f32,
        line_height: usize,
    ) -> Self {
        Self {
            font,
            glyph_cache,
            font_size,
            ascent,
            char_width,
            line_height,
        }
    }

    /// Advance of one monospace character
    #[inline]
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    #[inline]
    pub fn line_height(&self) -> usize {
        self.line_height
    }

    /// Draw text with its top-left corner at (x, y). Respects the frame clip.
    pub fn draw(&mut self, frame: &mut Frame, x: f64, y: f64, text: &str, color: u32) {
        let mut current_x = x as f32;
        let baseline = y as f32 + self.ascent;

        for ch in text.chars() {
            let (metrics, bitmap) = self
                .glyph_cache
                .entry((ch, self.font_size.to_bits()))
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for (i, alpha) in bitmap.iter().enumerate() {
                if *alpha == 0 {
                    continue;
                }
                let px = current_x as isize + (i % metrics.width) as isize + metrics.xmin as isize;
                let py = (glyph_top + (i / metrics.width) as f32) as isize;
                if px >= 0 && py >= 0 {
                    frame.blend_pixel(px as usize, py as usize, color, *alpha as f32 / 255.0);
                }
            }

            current_x += metrics.advance_width;
        }
    }

    /// Draw text twice with a one pixel offset to fake a bold weight
    pub fn draw_bold(&mut self, frame: &mut Frame, x: f64, y: f64, text: &str, color: u32) {
        self.draw(frame, x, y, text, color);
        self.draw(frame, x + 1.0, y, text, color);
    }

    /// Draw text centered inside `rect`
    pub fn draw_centered(&mut self, frame: &mut Frame, rect: Rect, text: &str, color: u32) {
        let width = self.measure_width(text) as f64;
        let x = rect.x + (rect.width - width) / 2.0;
        let y = rect.y + (rect.height - self.line_height as f64) / 2.0;
        self.draw(frame, x, y, text, color);
    }

    /// Measure text width in pixels
    pub fn measure_width(&mut self, text: &str) -> f32 {
        let mut width = 0.0;
        for ch in text.chars() {
            let (metrics, _) = self
                .glyph_cache
                .entry((ch, self.font_size.to_bits()))
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));
            width += metrics.advance_width;
        }
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fill_rect() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);

        frame.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0), 0xFFFF0000);

        assert_eq!(frame.get_pixel(15, 15), 0xFFFF0000);
        assert_eq!(frame.get_pixel(5, 5), 0);
        assert_eq!(frame.get_pixel(30, 30), 0);
    }

    #[test]
    fn test_negative_origin_is_clipped() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);
        frame.fill_rect(Rect::new(-5.0, -5.0, 8.0, 8.0), 0xFF00FF00);
        assert_eq!(frame.get_pixel(0, 0), 0xFF00FF00);
        assert_eq!(frame.get_pixel(2, 2), 0xFF00FF00);
        assert_eq!(frame.get_pixel(3, 3), 0);
    }

    #[test]
    fn test_highlight_blend_darkens_cell() {
        let mut buffer = vec![0xFFFFFFFF_u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        // rgba(0,0,0,0.18) column highlight
        frame.blend_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0x2E000000);

        let r = (frame.get_pixel(5, 5) >> 16) & 0xFF;
        assert!(r > 200 && r < 220, "R channel: {}", r);
    }

    #[test]
    fn test_frame_out_of_bounds() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        frame.set_pixel(100, 100, 0xFFFFFFFF);
        frame.blend_pixel(100, 100, 0xFFFFFFFF, 0.5);
        frame.fill_rect(Rect::new(50.0, 50.0, 10.0, 10.0), 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(100, 100), 0);
        assert!(frame.buffer.iter().all(|p| *p == 0));
    }

    #[test]
    fn test_clip_restricts_drawing() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);
        frame.set_clip(Rect::new(10.0, 10.0, 30.0, 30.0));

        frame.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 0xFFFF0000);

        assert_eq!(frame.get_pixel(20, 20), 0xFFFF0000);
        assert_eq!(frame.get_pixel(5, 5), 0);
        assert_eq!(frame.get_pixel(10, 10), 0xFFFF0000);
        assert_eq!(frame.get_pixel(39, 39), 0xFFFF0000);
        assert_eq!(frame.get_pixel(40, 40), 0);

        frame.clear_clip();
        frame.set_pixel(5, 5, 0xFF0000FF);
        assert_eq!(frame.get_pixel(5, 5), 0xFF0000FF);
    }

    #[test]
    fn test_short_buffer_shrinks_height() {
        let mut buffer = vec![0u32; 10 * 5];
        let frame = Frame::new(&mut buffer, 10, 10);
        assert_eq!((frame.width(), frame.height()), (10, 5));
    }
}
