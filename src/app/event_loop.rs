//! winit event loop — `ApplicationHandler` impl for the viewer.

use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use crate::input::{self, SourceMods};
use crate::log;

use super::{App, ViewEvent};

/// Byte a named editing key contributes on the source's text path.
fn control_byte_of(key: NamedKey) -> Option<u8> {
    match key {
        NamedKey::Backspace => Some(0x08),
        NamedKey::Tab => Some(0x09),
        NamedKey::Escape => Some(0x1b),
        NamedKey::Delete => Some(0x7f),
        _ => None,
    }
}

impl ApplicationHandler<ViewEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.first_window_created {
            return;
        }
        self.first_window_created = true;
        self.init_window(event_loop);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ViewEvent) {
        match event {
            ViewEvent::ConfigReload => self.apply_config_reload(),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            let now = Instant::now();
            if now >= self.next_tick {
                self.tick_source();
                self.next_tick =
                    now + std::time::Duration::from_millis(self.config.feed.effective_tick_ms());
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            WindowEvent::Resized(size) => {
                self.handle_resize(size.width, size.height);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_pos = position;
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if state == ElementState::Pressed && button == MouseButton::Left {
                    self.forward_pointer();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                self.handle_key(&event.logical_key);
            }

            _ => {}
        }
    }
}

impl App {
    /// Map the cursor position into the surface's coordinate space and
    /// forward it, as a source embedding would for a mouse event.
    fn forward_pointer(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let size = window.inner_size();
        let sx = input::view_to_surface(
            self.cursor_pos.x as u32,
            size.width,
            self.config.surface.effective_width(),
        );
        let sy = input::view_to_surface(
            self.cursor_pos.y as u32,
            size.height,
            self.config.surface.effective_height(),
        );
        log(&format!(
            "pointer: view ({:.0}, {:.0}) -> surface ({sx}, {sy})",
            self.cursor_pos.x, self.cursor_pos.y,
        ));
    }

    /// Forward a key press through the mapping boundary. `r` and `c` are
    /// viewer shortcuts exercising the source lifecycle.
    #[allow(clippy::else_if_without_else, reason = "Unmapped named keys are dropped")]
    fn handle_key(&mut self, key: &Key) {
        let mods = SourceMods::from_winit(self.modifiers);

        match key {
            Key::Named(named) => {
                if let Some(code) = input::map_special_key(*named) {
                    log(&format!("key: keycode {code:#04x} mods={mods:?}"));
                } else if let Some(byte) = control_byte_of(*named) {
                    // Control bytes bypass text insertion.
                    debug_assert!(input::is_control_byte(byte));
                    log(&format!("key: control byte {byte:#04x} mods={mods:?}"));
                }
            }

            Key::Character(text) => match text.as_str() {
                "r" => {
                    log("key: r -> simulated navigation");
                    if let Some(view) = self.view.as_mut() {
                        self.source.invalidate(view);
                    }
                }
                "c" => {
                    log("key: c -> source closed");
                    if let Some(view) = self.view.as_mut() {
                        self.source.close(view);
                    }
                }
                _ => {
                    let route = if text.bytes().any(input::is_control_byte) {
                        "key events"
                    } else {
                        "text insertion"
                    };
                    log(&format!("key: {text:?} mods={mods:?} via {route}"));
                }
            },

            Key::Unidentified(_) | Key::Dead(_) => {}
        }
    }
}
