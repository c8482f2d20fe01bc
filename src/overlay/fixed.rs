//! Lightweight overlay: bitmap text blitted into the scanout buffer.
//!
//! No UI library and no retained state. The host hands over a borrowed view
//! of its frame buffer once per frame; the overlay writes fixed-width glyphs
//! into it and forgets the buffer when the call returns.
//!
//! Glyphs come from an 8x10 packed bitmap font. Each source pixel is doubled
//! horizontally and vertically, so one character occupies a 12x20 device
//! pixel cell (6 significant columns x 2, 10 rows x 2).

use std::fmt::{self, Write as _};

use super::font;
use crate::fmtbuf::BoundedWriter;
use crate::memory::{MemoryProvider, POOL_LINES, PoolUsage};
#[cfg(feature = "live-metrics")]
use crate::metrics::FrameMetrics;

/// Horizontal advance per character in device pixels.
pub const GLYPH_ADVANCE_PX: usize = 12;

/// Vertical advance per text line in device pixels.
pub const LINE_PITCH_PX: usize = 20;

/// Cap on one formatted overlay string.
const FMT_CAP: usize = 512;

/// Left margin of the overlay text block.
const LEFT_MARGIN_PX: usize = 5;

/// Top margin the line cursor resets to each frame.
const TOP_MARGIN_PX: usize = 8;

const WHITE: u32 = 0xFFFF_FFFF;
const CLEAR: u32 = 0x0000_0000;

/// Borrowed, non-owning view into the host's pixel buffer.
///
/// Valid only for the duration of one overlay call; nothing here retains it.
/// `stride_px` is the distance between rows in pixels and may exceed `width`
/// for padded scanout layouts.
pub struct Framebuffer<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
    stride_px: usize,
}

impl<'a> Framebuffer<'a> {
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize, stride_px: usize) -> Self {
        debug_assert!(stride_px >= width);
        debug_assert!(pixels.len() >= stride_px * height);
        Self {
            pixels,
            width,
            height,
            stride_px,
        }
    }

    /// Write one pixel, clipping anything outside the visible region.
    fn put(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.stride_px + x] = color;
        }
    }
}

/// Blit a single character with its top-left corner at `(x, y)`.
///
/// Every pixel of the 12x20 cell is written: opaque white for set bits,
/// transparent black for clear bits.
pub fn draw_char(fb: &mut Framebuffer<'_>, code: u8, x: usize, y: usize) {
    let rows = font::glyph(code);
    for (yy, row) in rows.iter().enumerate() {
        let py = y + yy * 2;
        let mut px = x;
        // Bits 7..2 are the glyph columns, left to right.
        for bit in (2..=7u32).rev() {
            let color = if (row >> bit) & 1 == 1 { WHITE } else { CLEAR };
            fb.put(px, py, color);
            fb.put(px + 1, py, color);
            fb.put(px, py + 1, color);
            fb.put(px + 1, py + 1, color);
            px += 2;
        }
    }
}

/// Draw `text` left to right starting at `(x, y)`.
pub fn draw_str(fb: &mut Framebuffer<'_>, x: usize, y: usize, text: &str) {
    for (i, code) in text.bytes().enumerate() {
        draw_char(fb, code, x + i * GLYPH_ADVANCE_PX, y);
    }
}

/// Format and draw text, one line per `\n`-separated segment.
///
/// The formatted output is capped at 512 bytes and silently truncated beyond
/// that. Lines land at `y`, `y + 20`, `y + 40`, ...
pub fn draw_fmt(fb: &mut Framebuffer<'_>, x: usize, y: usize, args: fmt::Arguments<'_>) {
    let mut text = BoundedWriter::new(FMT_CAP);
    let _ = text.write_fmt(args);
    for (i, line) in text.as_str().split('\n').enumerate() {
        draw_str(fb, x, y + i * LINE_PITCH_PX, line);
    }
}

/// Fixed-mode overlay orchestrator.
///
/// Owns nothing but the line cursor, which resets at the top of every
/// [`FixedOverlay::draw_light`] call; there is no state carried across frames.
#[derive(Debug, Default)]
pub struct FixedOverlay {
    cursor_y: usize,
}

impl FixedOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one line at the cursor and advance it.
    fn line(&mut self, fb: &mut Framebuffer<'_>, args: fmt::Arguments<'_>) {
        draw_fmt(fb, LEFT_MARGIN_PX, self.cursor_y, args);
        self.cursor_y += LINE_PITCH_PX;
    }

    fn draw_pools(&mut self, fb: &mut Framebuffer<'_>, mem: &impl MemoryProvider) {
        for (pool, label) in POOL_LINES {
            let usage = PoolUsage::measure(mem, pool);
            self.line(fb, format_args!("{}", usage.format_line(label)));
        }
    }

    /// Draw the full lightweight overlay into the frame buffer.
    ///
    /// Memory pool lines come first, then the frame number if the host
    /// tracks one.
    #[cfg(not(feature = "live-metrics"))]
    pub fn draw_light(
        &mut self,
        fb: &mut Framebuffer<'_>,
        mem: &impl MemoryProvider,
        frame_number: Option<u64>,
    ) {
        self.cursor_y = TOP_MARGIN_PX;
        self.draw_pools(fb, mem);
        if let Some(frame) = frame_number {
            self.line(fb, format_args!("Frame Number: {frame}"));
        }
    }

    /// Draw the full lightweight overlay into the frame buffer.
    ///
    /// Memory pool lines come first, then the frame number (host counter
    /// preferred, metrics snapshot as fallback), then the live counter lines
    /// when a snapshot is present.
    #[cfg(feature = "live-metrics")]
    pub fn draw_light(
        &mut self,
        fb: &mut Framebuffer<'_>,
        mem: &impl MemoryProvider,
        frame_number: Option<u64>,
        metrics: Option<&FrameMetrics>,
    ) {
        self.cursor_y = TOP_MARGIN_PX;
        self.draw_pools(fb, mem);

        let frame = frame_number.or(metrics.map(|m| u64::from(m.frame_number)));
        if let Some(frame) = frame {
            self.line(fb, format_args!("Frame Number: {frame}"));
        }

        if let Some(m) = metrics {
            self.line(
                fb,
                format_args!(
                    "GPU activity: {}us ({:.0}%)",
                    m.gpu_active_us,
                    m.gpu_activity_percent()
                ),
            );
            self.line(
                fb,
                format_args!(
                    "Partial Rendering: {}",
                    if m.partial_render { "Yes" } else { "No" }
                ),
            );
            self.line(
                fb,
                format_args!(
                    "Param Buffer Outage: {}",
                    if m.vertex_jobs_paused { "Yes" } else { "No" }
                ),
            );
            self.line(
                fb,
                format_args!("Param Buffer Peak Usage: {} Bytes", m.param_buffer_peak_bytes),
            );
        }
    }
}
