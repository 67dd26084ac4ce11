//! Bitmap-source boundary: the paint listener seam.

pub mod synthetic;

pub use synthetic::SyntheticSource;

use crate::reconcile::PaintUpdate;

/// Receiver for bitmap-source notifications.
///
/// A source holds a listener and calls it on the thread the viewer owns;
/// there is no cross-thread delivery in this pipeline.
pub trait PaintListener {
    /// One repaint: a dirty rectangle plus an optional scroll delta.
    fn on_paint(&mut self, update: &PaintUpdate<'_>);

    /// The source discarded its rendering state (navigation, reload).
    /// Updates still in flight describe content that no longer exists and
    /// must be dropped until a full repaint arrives.
    fn on_invalidated(&mut self);

    /// The source is gone (crash, shutdown); the display should go blank.
    fn on_unavailable(&mut self);
}
