//! Update reconciliation: replays source repaints and scroll deltas onto a
//! texture surface.

#[cfg(test)]
mod tests;

use crate::rect::Rect;
use crate::surface::{BYTES_PER_PIXEL, TextureSurface};

/// One incremental update from the bitmap source.
///
/// `pixels` holds exactly `rect.width() * rect.height() * 4` bytes of BGRA
/// data for the dirty rectangle, row-major, no padding. `scroll_rect` is
/// only meaningful when `dx != 0 || dy != 0` and names the region whose
/// existing content moved by `(dx, dy)`.
pub struct PaintUpdate<'a> {
    pub pixels: &'a [u8],
    pub rect: Rect,
    pub dx: i32,
    pub dy: i32,
    pub scroll_rect: Rect,
}

/// Reconciles incoming paint updates with a fixed-size texture surface.
///
/// Owns the scroll scratch buffer (sized to the full surface, allocated
/// once) and the pending-refresh flag. One reconciler per surface; the pair
/// is assumed owned by a single thread.
pub struct TextureReconciler {
    width: u32,
    height: u32,
    /// Workspace for scroll shuffling. Never resized after construction.
    scratch: Vec<u8>,
    /// While set, partial updates are discarded until a full repaint lands.
    needs_full_refresh: bool,
}

impl TextureReconciler {
    /// Create a reconciler for a `width` x `height` surface.
    ///
    /// Starts with the pending-refresh flag set: nothing is applied until
    /// the source delivers a full repaint.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "surface dimensions must be positive");
        Self {
            width,
            height,
            scratch: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            needs_full_refresh: true,
        }
    }

    /// The full surface bounds.
    pub fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// True while partial updates are being discarded.
    pub fn refresh_pending(&self) -> bool {
        self.needs_full_refresh
    }

    /// Drop all partial updates until the next full repaint.
    ///
    /// Called when the source discards its rendering state (navigation,
    /// reload): updates still in flight describe content that no longer
    /// exists.
    pub fn request_full_refresh(&mut self) {
        self.needs_full_refresh = true;
    }

    /// Blank the surface and require a full repaint before any further
    /// partial update is applied. Used when the source becomes unavailable.
    pub fn clear_to_blank<S: TextureSurface>(&mut self, surface: &mut S) {
        self.scratch.fill(0);
        surface.write_full(&self.scratch);
        self.needs_full_refresh = true;
    }

    /// Apply one update to the surface. Returns `true` if the surface
    /// changed.
    ///
    /// `update.rect` must lie within the surface bounds and
    /// `update.pixels` must match its area; geometry is a caller
    /// precondition (checked in debug builds only).
    pub fn apply_update<S: TextureSurface>(
        &mut self,
        surface: &mut S,
        update: &PaintUpdate<'_>,
    ) -> bool {
        debug_assert_eq!(surface.width(), self.width);
        debug_assert_eq!(surface.height(), self.height);
        debug_assert_eq!(
            update.pixels.len(),
            update.rect.width() as usize * update.rect.height() as usize * BYTES_PER_PIXEL,
        );

        // A pending full refresh suppresses everything but an exact full
        // repaint: partial updates still in flight describe stale content.
        if self.needs_full_refresh {
            if update.rect != self.full_rect() {
                return false;
            }
            surface.write_full(update.pixels);
            self.needs_full_refresh = false;
            return true;
        }

        // Scrolling moves existing surface content and must run before the
        // dirty rect lands on top of it.
        if update.dx != 0 || update.dy != 0 {
            self.apply_scroll(surface, update.dx, update.dy, update.scroll_rect);
        }

        surface.write_rect(update.rect, update.pixels);
        true
    }

    /// Shift the still-valid part of `scroll_rect` by `(dx, dy)`.
    ///
    /// The source and destination rectangles may overlap and the surface has
    /// no move-rectangle primitive, so the shift goes through the scratch
    /// buffer: read the whole surface at its native stride, repack the moved
    /// rows tightly at the front, and write the packed block back at the
    /// destination.
    fn apply_scroll<S: TextureSurface>(
        &mut self,
        surface: &mut S,
        dx: i32,
        dy: i32,
        scroll_rect: Rect,
    ) {
        // Where the region's content sat before the shift, and how much of
        // it is still backed by existing surface pixels rather than newly
        // exposed area.
        let scrolled = scroll_rect.translate(-dx, -dy);
        let shared = scroll_rect.intersect(&scrolled);
        if shared.width() <= 0 || shared.height() <= 0 {
            return;
        }

        surface.read_full(&mut self.scratch);

        let row_bytes = shared.width() as usize * BYTES_PER_PIXEL;
        let stride = self.width as usize * BYTES_PER_PIXEL;
        for row in 0..shared.height() as usize {
            let src = (shared.top() as usize + row) * stride
                + shared.left() as usize * BYTES_PER_PIXEL;
            // Compaction never overtakes its source: the packed offset is
            // always <= the strided offset for in-bounds rects.
            self.scratch.copy_within(src..src + row_bytes, row * row_bytes);
        }

        let dest = shared.translate(dx, dy);
        let packed = shared.height() as usize * row_bytes;
        surface.write_rect(dest, &self.scratch[..packed]);
    }
}
