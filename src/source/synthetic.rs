//! Scripted bitmap source: an endless banded document scrolling through a
//! fixed viewport. Stands in for a remote rendering engine in the viewer
//! binary and in pipeline tests.

use crate::rect::Rect;
use crate::reconcile::PaintUpdate;
use crate::source::PaintListener;
use crate::surface::BYTES_PER_PIXEL;

/// Height of one color band in document lines.
const BAND_HEIGHT: u64 = 24;

/// Band colors, BGRA.
const PALETTE: [[u8; 4]; 5] = [
    [0x7a, 0x4e, 0x2e, 0xff],
    [0x4e, 0x6b, 0x3a, 0xff],
    [0x3a, 0x3f, 0x8c, 0xff],
    [0x62, 0x62, 0x62, 0xff],
    [0x2e, 0x6e, 0x7a, 0xff],
];

/// In-process bitmap source producing full repaints, scroll deltas, and the
/// stale in-flight partials a real remote source exhibits around an
/// invalidation.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    scroll_rows: u32,
    /// Document line at the top of the viewport.
    top: u64,
    /// Deliver a full repaint on the next tick.
    needs_full: bool,
    /// Reused pixel buffer for emitted updates.
    staging: Vec<u8>,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32, scroll_rows: u32) -> Self {
        Self {
            width,
            height,
            scroll_rows: scroll_rows.clamp(1, height),
            top: 0,
            needs_full: true,
            staging: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Produce the next frame of output: a full repaint if one is owed,
    /// otherwise a scroll delta plus the newly exposed rows.
    pub fn tick<L: PaintListener>(&mut self, listener: &mut L) {
        if self.needs_full {
            self.needs_full = false;
            self.render_rows(self.top, self.height);
            let rect = self.full_rect();
            listener.on_paint(&PaintUpdate {
                pixels: &self.staging,
                rect,
                dx: 0,
                dy: 0,
                scroll_rect: rect,
            });
            return;
        }

        let rows = self.scroll_rows;
        self.top += u64::from(rows);
        self.render_rows(self.top + u64::from(self.height - rows), rows);

        let dirty = Rect::new(
            0,
            (self.height - rows) as i32,
            self.width as i32,
            self.height as i32,
        );
        let packed = rows as usize * self.width as usize * BYTES_PER_PIXEL;
        listener.on_paint(&PaintUpdate {
            pixels: &self.staging[..packed],
            rect: dirty,
            dx: 0,
            dy: -(rows as i32),
            scroll_rect: self.full_rect(),
        });
    }

    /// Discard rendering state and jump to new content, as a navigation
    /// does. One already-queued partial still reaches the listener after
    /// the invalidation; the full repaint for the new content follows on
    /// the next tick.
    pub fn invalidate<L: PaintListener>(&mut self, listener: &mut L) {
        listener.on_invalidated();

        // The in-flight update: a repaint of content from before the jump.
        let rows = self.scroll_rows.min(self.height);
        self.render_rows(self.top, rows);
        let stale = Rect::new(0, 0, self.width as i32, rows as i32);
        let packed = rows as usize * self.width as usize * BYTES_PER_PIXEL;
        listener.on_paint(&PaintUpdate {
            pixels: &self.staging[..packed],
            rect: stale,
            dx: 0,
            dy: 0,
            scroll_rect: Rect::new(0, 0, 0, 0),
        });

        self.top += u64::from(self.height);
        self.needs_full = true;
    }

    /// The source goes away entirely.
    pub fn close<L: PaintListener>(&mut self, listener: &mut L) {
        listener.on_unavailable();
        self.needs_full = true;
    }

    /// Render `rows` document lines starting at `first_line` into the
    /// front of the staging buffer, tightly packed.
    fn render_rows(&mut self, first_line: u64, rows: u32) {
        let width = self.width as usize;
        for row in 0..rows as usize {
            let line = first_line + row as u64;
            let base = PALETTE[((line / BAND_HEIGHT) % PALETTE.len() as u64) as usize];
            let boundary = line % BAND_HEIGHT == 0;
            for x in 0..width {
                // Horizontal shading makes sideways motion visible too.
                let shade = (x * 64 / width) as u8;
                let off = (row * width + x) * BYTES_PER_PIXEL;
                let px = &mut self.staging[off..off + BYTES_PER_PIXEL];
                if boundary {
                    px.copy_from_slice(&[0x10, 0x10, 0x10, 0xff]);
                } else {
                    px[0] = base[0].saturating_add(shade);
                    px[1] = base[1].saturating_add(shade);
                    px[2] = base[2].saturating_add(shade);
                    px[3] = 0xff;
                }
            }
        }
    }
}
