//! Reconciler unit tests.

use std::cell::Cell;

use super::*;
use crate::surface::CpuSurface;

const W: u32 = 8;
const H: u32 = 16;

/// Pixel value encoding its own coordinates, for tracking data movement.
fn px(x: i32, y: i32) -> [u8; 4] {
    [x as u8, y as u8, (x ^ y) as u8, 0xff]
}

/// A full-surface buffer where every pixel encodes its coordinates.
fn coded_frame(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            buf.extend_from_slice(&px(x, y));
        }
    }
    buf
}

fn solid(rect: &Rect, value: u8) -> Vec<u8> {
    vec![value; rect.width() as usize * rect.height() as usize * BYTES_PER_PIXEL]
}

fn pixel_at(surface: &CpuSurface, x: i32, y: i32) -> [u8; 4] {
    let off = (y as usize * surface.width() as usize + x as usize) * BYTES_PER_PIXEL;
    surface.data()[off..off + BYTES_PER_PIXEL]
        .try_into()
        .expect("pixel slice")
}

fn full_update<'a>(rec: &TextureReconciler, pixels: &'a [u8]) -> PaintUpdate<'a> {
    PaintUpdate {
        pixels,
        rect: rec.full_rect(),
        dx: 0,
        dy: 0,
        scroll_rect: rec.full_rect(),
    }
}

fn partial_update<'a>(rect: Rect, pixels: &'a [u8]) -> PaintUpdate<'a> {
    PaintUpdate {
        pixels,
        rect,
        dx: 0,
        dy: 0,
        scroll_rect: Rect::new(0, 0, 0, 0),
    }
}

/// Reconciler + surface primed with a coordinate-coded full frame.
fn primed() -> (TextureReconciler, CpuSurface) {
    let mut rec = TextureReconciler::new(W, H);
    let mut surface = CpuSurface::new(W, H);
    let frame = coded_frame(W, H);
    assert!(rec.apply_update(&mut surface, &full_update(&rec, &frame)));
    (rec, surface)
}

/// Surface wrapper that counts `read_full` calls, to observe whether the
/// scroll shuffle ran.
struct CountingSurface {
    inner: CpuSurface,
    reads: Cell<usize>,
}

impl TextureSurface for CountingSurface {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn write_full(&mut self, pixels: &[u8]) {
        self.inner.write_full(pixels);
    }

    fn write_rect(&mut self, rect: Rect, pixels: &[u8]) {
        self.inner.write_rect(rect, pixels);
    }

    fn read_full(&self, out: &mut [u8]) {
        self.reads.set(self.reads.get() + 1);
        self.inner.read_full(out);
    }
}

#[test]
fn starts_with_refresh_pending() {
    let rec = TextureReconciler::new(W, H);
    assert!(rec.refresh_pending());
}

#[test]
fn full_replacement_clears_pending_flag() {
    let mut rec = TextureReconciler::new(W, H);
    let mut surface = CpuSurface::new(W, H);
    let frame = coded_frame(W, H);

    assert!(rec.apply_update(&mut surface, &full_update(&rec, &frame)));
    assert!(!rec.refresh_pending());
    assert_eq!(surface.data(), &frame[..]);

    // Partial updates are no longer suppressed.
    let rect = Rect::from_size(1, 1, 3, 2);
    assert!(rec.apply_update(&mut surface, &partial_update(rect, &solid(&rect, 0x55))));
}

#[test]
fn partial_update_suppressed_while_refresh_pending() {
    let (mut rec, mut surface) = primed();
    rec.request_full_refresh();

    let before = surface.data().to_vec();
    let rect = Rect::from_size(0, 0, 4, 4);
    let applied = rec.apply_update(&mut surface, &partial_update(rect, &solid(&rect, 0x77)));

    assert!(!applied);
    assert_eq!(surface.data(), &before[..]);
    assert!(rec.refresh_pending());
}

#[test]
fn suppression_requires_exact_full_bounds() {
    let (mut rec, mut surface) = primed();
    rec.request_full_refresh();

    // Full-width rect at a different origin: still suppressed.
    let shifted = Rect::from_size(0, 1, W as i32, H as i32 - 1);
    let applied = rec.apply_update(&mut surface, &partial_update(shifted, &solid(&shifted, 1)));
    assert!(!applied);
}

#[test]
fn full_replacement_ignores_scroll_fields() {
    let mut rec = TextureReconciler::new(W, H);
    let mut surface = CpuSurface::new(W, H);
    let frame = coded_frame(W, H);

    // A full repaint that also reports a scroll applies as pure replacement.
    let update = PaintUpdate {
        pixels: &frame,
        rect: rec.full_rect(),
        dx: 0,
        dy: -3,
        scroll_rect: rec.full_rect(),
    };
    assert!(rec.apply_update(&mut surface, &update));
    assert_eq!(surface.data(), &frame[..]);
}

#[test]
fn no_scroll_writes_exactly_the_dirty_rect() {
    let (mut rec, mut surface) = primed();
    let rect = Rect::from_size(2, 5, 3, 4);

    assert!(rec.apply_update(&mut surface, &partial_update(rect, &solid(&rect, 0xee))));

    for y in 0..H as i32 {
        for x in 0..W as i32 {
            let inside = (2..5).contains(&x) && (5..9).contains(&y);
            let expect = if inside { [0xee; 4] } else { px(x, y) };
            assert_eq!(pixel_at(&surface, x, y), expect, "pixel ({x},{y})");
        }
    }
}

#[test]
fn scroll_up_then_dirty_rows() {
    // Content scrolled up 5 rows within a region spanning rows 10..50 of a
    // 100-row surface; the freshly exposed rows arrive as the dirty rect.
    let width = 8u32;
    let height = 100u32;
    let mut rec = TextureReconciler::new(width, height);
    let mut surface = CpuSurface::new(width, height);
    let frame = coded_frame(width, height);
    assert!(rec.apply_update(&mut surface, &full_update(&rec, &frame)));

    let scroll_rect = Rect::new(0, 10, width as i32, 50);
    let dirty = Rect::new(0, 45, width as i32, 50);
    let update = PaintUpdate {
        pixels: &solid(&dirty, 0xcc),
        rect: dirty,
        dx: 0,
        dy: -5,
        scroll_rect,
    };
    assert!(rec.apply_update(&mut surface, &update));

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            // The shuffle moves the still-shared part of the region (old
            // rows 15..50) up to rows 10..45; the dirty rect then overwrites
            // rows 45..50; everything else keeps its original content.
            let expect = if (45..50).contains(&y) {
                [0xcc; 4]
            } else if (10..45).contains(&y) {
                px(x, y + 5)
            } else {
                px(x, y)
            };
            assert_eq!(pixel_at(&surface, x, y), expect, "pixel ({x},{y})");
        }
    }
}

#[test]
fn scroll_right_moves_columns() {
    let (mut rec, mut surface) = primed();

    // Shift columns 0..6 of rows 2..10 right by 2.
    let scroll_rect = Rect::new(0, 2, 6, 10);
    let dirty = Rect::new(0, 2, 2, 10);
    let update = PaintUpdate {
        pixels: &solid(&dirty, 0x11),
        rect: dirty,
        dx: 2,
        dy: 0,
        scroll_rect,
    };
    assert!(rec.apply_update(&mut surface, &update));

    for y in 2..10 {
        // Newly exposed columns filled by the dirty rect.
        assert_eq!(pixel_at(&surface, 0, y), [0x11; 4]);
        assert_eq!(pixel_at(&surface, 1, y), [0x11; 4]);
        // Shared content shifted from (x - 2).
        for x in 2..6 {
            assert_eq!(pixel_at(&surface, x, y), px(x - 2, y), "pixel ({x},{y})");
        }
        // Outside the scroll region: untouched.
        for x in 6..W as i32 {
            assert_eq!(pixel_at(&surface, x, y), px(x, y), "pixel ({x},{y})");
        }
    }
}

#[test]
fn zero_overlap_scroll_skips_shuffle() {
    let mut rec = TextureReconciler::new(W, H);
    let mut surface = CountingSurface {
        inner: CpuSurface::new(W, H),
        reads: Cell::new(0),
    };
    let frame = coded_frame(W, H);
    assert!(rec.apply_update(&mut surface, &full_update(&rec, &frame)));
    assert_eq!(surface.reads.get(), 0);

    // The whole region scrolled out of itself: no shared content remains.
    let scroll_rect = Rect::new(0, 0, W as i32, 4);
    let dirty = Rect::from_size(0, 0, W as i32, 4);
    let update = PaintUpdate {
        pixels: &solid(&dirty, 0x3c),
        rect: dirty,
        dx: 0,
        dy: -4,
        scroll_rect,
    };
    assert!(rec.apply_update(&mut surface, &update));

    // No scratch read happened; only the dirty rect landed.
    assert_eq!(surface.reads.get(), 0);
    for y in 0..H as i32 {
        for x in 0..W as i32 {
            let expect = if y < 4 { [0x3c; 4] } else { px(x, y) };
            assert_eq!(pixel_at(&surface.inner, x, y), expect, "pixel ({x},{y})");
        }
    }
}

#[test]
fn repeated_identical_update_is_idempotent() {
    let (mut rec, mut surface) = primed();

    let dirty = Rect::from_size(1, 3, 5, 6);
    let pixels = solid(&dirty, 0x42);
    let update = partial_update(dirty, &pixels);

    assert!(rec.apply_update(&mut surface, &update));
    let after_first = surface.data().to_vec();

    assert!(rec.apply_update(&mut surface, &update));
    assert_eq!(surface.data(), &after_first[..]);
}

#[test]
fn clear_to_blank_blanks_and_suppresses() {
    let (mut rec, mut surface) = primed();

    rec.clear_to_blank(&mut surface);
    assert!(rec.refresh_pending());
    assert!(surface.data().iter().all(|&b| b == 0));

    // Partial updates bounce until a full repaint arrives.
    let rect = Rect::from_size(0, 0, 2, 2);
    assert!(!rec.apply_update(&mut surface, &partial_update(rect, &solid(&rect, 9))));

    let frame = coded_frame(W, H);
    assert!(rec.apply_update(&mut surface, &full_update(&rec, &frame)));
    assert_eq!(surface.data(), &frame[..]);
}
