//! Texture view lifecycle: wires a reconciler, a surface, and the redraw
//! signal together behind the paint-listener seam.

use crate::reconcile::{PaintUpdate, TextureReconciler};
use crate::source::PaintListener;
use crate::surface::TextureSurface;

/// One no-argument "the surface changed, schedule a redraw" signal.
///
/// Must not block; invoked at most once per applied update.
pub trait RefreshNotifier {
    fn request_redraw(&mut self);
}

impl<F: FnMut()> RefreshNotifier for F {
    fn request_redraw(&mut self) {
        self();
    }
}

/// Owns the reconciler, the surface it mutates, and the notifier that
/// schedules redraws. The bitmap source talks to this through
/// [`PaintListener`].
pub struct TextureView<S: TextureSurface, N: RefreshNotifier> {
    reconciler: TextureReconciler,
    surface: S,
    notifier: N,
}

impl<S: TextureSurface, N: RefreshNotifier> TextureView<S, N> {
    /// Wrap an already-sized surface. The reconciler adopts its dimensions;
    /// resizing means recreating the view.
    pub fn new(surface: S, notifier: N) -> Self {
        Self {
            reconciler: TextureReconciler::new(surface.width(), surface.height()),
            surface,
            notifier,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// True while partial updates are being discarded.
    pub fn refresh_pending(&self) -> bool {
        self.reconciler.refresh_pending()
    }

    /// Blank the display and wait for a full repaint.
    pub fn clear(&mut self) {
        self.reconciler.clear_to_blank(&mut self.surface);
        self.notifier.request_redraw();
    }
}

impl<S: TextureSurface, N: RefreshNotifier> PaintListener for TextureView<S, N> {
    fn on_paint(&mut self, update: &PaintUpdate<'_>) {
        if self.reconciler.apply_update(&mut self.surface, update) {
            self.notifier.request_redraw();
        }
    }

    fn on_invalidated(&mut self) {
        self.reconciler.request_full_refresh();
    }

    fn on_unavailable(&mut self) {
        self.clear();
    }
}
