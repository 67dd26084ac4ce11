//! wgpu-backed texture surface with a CPU shadow for synchronous reads.

use crate::rect::Rect;
use crate::surface::{BYTES_PER_PIXEL, CpuSurface, TextureSurface};

/// A `wgpu::Texture` kept in lockstep with a CPU shadow copy.
///
/// Writes land in both the shadow and the texture (via
/// `Queue::write_texture`); reads are served from the shadow, because wgpu
/// has no synchronous texture readback and the reconciler's contract is
/// synchronous. The texture is `Bgra8Unorm` to match the byte order the
/// bitmap source delivers.
pub struct GpuSurface {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    queue: wgpu::Queue,
    shadow: CpuSurface,
}

impl GpuSurface {
    pub fn new(device: &wgpu::Device, queue: wgpu::Queue, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("view_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Bgra8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            queue,
            shadow: CpuSurface::new(width, height),
        }
    }

    /// View for binding the texture in the blit pass.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Upload a packed pixel block to a sub-rectangle of the texture.
    fn upload(&self, rect: Rect, pixels: &[u8]) {
        let w = rect.width() as u32;
        let h = rect.height() as u32;
        if w == 0 || h == 0 {
            return;
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: rect.left() as u32,
                    y: rect.top() as u32,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w * BYTES_PER_PIXEL as u32),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
    }

    fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.shadow.width() as i32, self.shadow.height() as i32)
    }
}

impl TextureSurface for GpuSurface {
    fn width(&self) -> u32 {
        self.shadow.width()
    }

    fn height(&self) -> u32 {
        self.shadow.height()
    }

    fn write_full(&mut self, pixels: &[u8]) {
        self.shadow.write_full(pixels);
        self.upload(self.full_rect(), pixels);
    }

    fn write_rect(&mut self, rect: Rect, pixels: &[u8]) {
        self.shadow.write_rect(rect, pixels);
        self.upload(rect, pixels);
    }

    fn read_full(&self, out: &mut [u8]) {
        self.shadow.read_full(out);
    }
}
