//! wgpu instance/adapter/device state shared by the viewer window.

use std::sync::Arc;

use winit::window::Window;

/// GPU state shared across the viewer's lifetime.
pub struct GpuState {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub surface_alpha_mode: wgpu::CompositeAlphaMode,
}

impl GpuState {
    /// Initialize GPU: create instance, surface, adapter, device, queue.
    /// The window is needed to create a compatible surface for adapter
    /// selection.
    pub fn new(window: &Arc<Window>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window.clone())
            .expect("failed to create initial wgpu surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("failed to find GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("webtex"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
        ))
        .expect("failed to create GPU device");

        let caps = surface.get_capabilities(&adapter);
        // Non-sRGB surface: the source's pixels are already display-referred
        // and should pass through without gamma conversion.
        let surface_format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(caps.formats[0]);
        let surface_alpha_mode = caps.alpha_modes[0];

        crate::log(&format!(
            "GPU init: adapter={}, format={surface_format:?}",
            adapter.get_info().name,
        ));

        Self {
            instance,
            adapter,
            device,
            queue,
            surface_format,
            surface_alpha_mode,
        }
    }

    /// Create and configure a presentation surface for the window.
    pub fn create_surface(
        &self,
        window: &Arc<Window>,
    ) -> Option<(wgpu::Surface<'static>, wgpu::SurfaceConfiguration)> {
        let surface = self.instance.create_surface(window.clone()).ok()?;
        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: self.surface_alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&self.device, &config);
        Some((surface, config))
    }
}
