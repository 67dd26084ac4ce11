//! GPU plumbing for the viewer: device state and the texture blit pass.

pub mod blit;
pub mod state;

pub use blit::BlitRenderer;
pub use state::GpuState;
