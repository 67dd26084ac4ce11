//! Pixel surface abstraction: whole-surface and sub-rectangle access.

pub mod gpu;

pub use gpu::GpuSurface;

use crate::rect::Rect;

/// Bytes per pixel everywhere in the pipeline (BGRA, 8 bits per channel).
pub const BYTES_PER_PIXEL: usize = 4;

/// A fixed-size 2D pixel buffer the reconciler mutates.
///
/// All pixel data crossing this boundary is BGRA, row-major, tightly packed
/// (no row padding). A surface implementation with native row padding must
/// hide it behind these three operations.
pub trait TextureSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Replace the entire surface. `pixels` holds exactly
    /// `width * height * 4` bytes.
    fn write_full(&mut self, pixels: &[u8]);

    /// Overwrite a sub-rectangle. `pixels` holds exactly
    /// `rect.width() * rect.height() * 4` bytes; `rect` must lie within the
    /// surface bounds.
    fn write_rect(&mut self, rect: Rect, pixels: &[u8]);

    /// Copy the entire surface into `out`, which holds exactly
    /// `width * height * 4` bytes.
    fn read_full(&self, out: &mut [u8]);
}

/// In-memory surface backed by a `Vec<u8>`.
///
/// Serves as the readback shadow inside [`GpuSurface`] and as the surface
/// under test in the reconciler's unit tests.
pub struct CpuSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CpuSurface {
    /// Create a zeroed surface of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn row_stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }
}

impl TextureSurface for CpuSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_full(&mut self, pixels: &[u8]) {
        debug_assert_eq!(pixels.len(), self.data.len());
        self.data.copy_from_slice(pixels);
    }

    fn write_rect(&mut self, rect: Rect, pixels: &[u8]) {
        let w = rect.width() as usize * BYTES_PER_PIXEL;
        let h = rect.height() as usize;
        debug_assert_eq!(pixels.len(), w * h);
        debug_assert!(rect.left() >= 0 && rect.top() >= 0);
        debug_assert!(rect.right() as u32 <= self.width && rect.bottom() as u32 <= self.height);

        let stride = self.row_stride();
        for row in 0..h {
            let dst = (rect.top() as usize + row) * stride
                + rect.left() as usize * BYTES_PER_PIXEL;
            let src = row * w;
            self.data[dst..dst + w].copy_from_slice(&pixels[src..src + w]);
        }
    }

    fn read_full(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.data.len());
        out.copy_from_slice(&self.data);
    }
}
