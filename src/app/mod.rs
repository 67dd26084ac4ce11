//! Viewer application state, startup, and wiring.

mod event_loop;

use std::sync::Arc;
use std::time::Instant;

use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::Window;

use crate::config::Config;
use crate::config::monitor::ConfigMonitor;
use crate::gpu::{BlitRenderer, GpuState};
use crate::log;
use crate::source::SyntheticSource;
use crate::surface::GpuSurface;
use crate::view::{RefreshNotifier, TextureView};

/// Events injected into the winit loop from outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    ConfigReload,
}

/// Redraw scheduler handed to the texture view: wakes the winit window.
pub struct WindowNotifier(Arc<Window>);

impl RefreshNotifier for WindowNotifier {
    fn request_redraw(&mut self) {
        self.0.request_redraw();
    }
}

pub struct App {
    pub(super) config: Config,
    pub(super) window: Option<Arc<Window>>,
    pub(super) gpu: Option<GpuState>,
    pub(super) win_surface: Option<(wgpu::Surface<'static>, wgpu::SurfaceConfiguration)>,
    pub(super) blit: Option<BlitRenderer>,
    pub(super) view: Option<TextureView<GpuSurface, WindowNotifier>>,
    pub(super) source: SyntheticSource,
    pub(super) modifiers: ModifiersState,
    pub(super) cursor_pos: PhysicalPosition<f64>,
    pub(super) next_tick: Instant,
    pub(super) ticks: u64,
    pub(super) first_window_created: bool,
    pub(super) _config_monitor: Option<ConfigMonitor>,
}

impl App {
    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        std::panic::set_hook(Box::new(|info| {
            let _ = std::fs::write("webtex_panic.log", format!("{info}"));
        }));

        let _ = std::fs::remove_file(crate::log_path());
        log("starting");

        let config = Config::load();
        log(&format!(
            "config: surface={}x{}, tick_ms={}, scroll_rows={}, reset_every={}",
            config.surface.effective_width(),
            config.surface.effective_height(),
            config.feed.effective_tick_ms(),
            config.feed.scroll_rows,
            config.feed.reset_every,
        ));

        let event_loop = EventLoop::<ViewEvent>::with_user_event().build()?;
        let proxy = event_loop.create_proxy();
        let config_monitor = ConfigMonitor::new(proxy);

        let source = SyntheticSource::new(
            config.surface.effective_width(),
            config.surface.effective_height(),
            config.feed.scroll_rows,
        );

        let mut app = Self {
            config,
            window: None,
            gpu: None,
            win_surface: None,
            blit: None,
            view: None,
            source,
            modifiers: ModifiersState::default(),
            cursor_pos: PhysicalPosition::new(0.0, 0.0),
            next_tick: Instant::now(),
            ticks: 0,
            first_window_created: false,
            _config_monitor: config_monitor,
        };

        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Create the window and bring up the GPU pipeline behind it.
    pub(super) fn init_window(&mut self, event_loop: &ActiveEventLoop) {
        let width = self.config.surface.effective_width();
        let height = self.config.surface.effective_height();

        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log(&format!("window creation failed: {e}"));
                event_loop.exit();
                return;
            }
        };

        let gpu = GpuState::new(&window);
        let Some(win_surface) = gpu.create_surface(&window) else {
            log("presentation surface creation failed");
            event_loop.exit();
            return;
        };

        let texture = GpuSurface::new(&gpu.device, gpu.queue.clone(), width, height);
        let blit = BlitRenderer::new(&gpu, texture.view());
        let view = TextureView::new(texture, WindowNotifier(window.clone()));

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.win_surface = Some(win_surface);
        self.blit = Some(blit);
        self.view = Some(view);
        self.next_tick = Instant::now();
    }

    /// Drive the synthetic source one step.
    pub(super) fn tick_source(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        self.ticks += 1;

        let reset_every = self.config.feed.reset_every;
        if reset_every != 0 && self.ticks % reset_every == 0 {
            log(&format!("feed: simulated navigation at tick {}", self.ticks));
            self.source.invalidate(view);
        } else {
            self.source.tick(view);
        }
    }

    pub(super) fn render(&mut self) {
        if let (Some(gpu), Some((surface, config)), Some(blit)) =
            (&self.gpu, &self.win_surface, &self.blit)
        {
            blit.draw_frame(gpu, surface, config);
        }
    }

    pub(super) fn handle_resize(&mut self, width: u32, height: u32) {
        // The texture keeps its size; the blit stretches it. Only the
        // presentation surface follows the window.
        if let (Some(gpu), Some((surface, config))) = (&self.gpu, &mut self.win_surface) {
            config.width = width.max(1);
            config.height = height.max(1);
            surface.configure(&gpu.device, config);
        }
    }

    pub(super) fn apply_config_reload(&mut self) {
        let fresh = Config::load();

        if fresh.surface.effective_width() != self.config.surface.effective_width()
            || fresh.surface.effective_height() != self.config.surface.effective_height()
        {
            log("config: surface dimensions changed, restart to apply");
        }
        if let Some(window) = &self.window {
            window.set_title(&fresh.window.title);
        }
        log(&format!(
            "config: reloaded, tick_ms={}, reset_every={}",
            fresh.feed.effective_tick_ms(),
            fresh.feed.reset_every,
        ));
        // Feed pacing applies from the next tick.
        self.config.feed = fresh.feed;
        self.config.window = fresh.window;
    }
}
