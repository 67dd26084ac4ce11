//! Input boundary mapping: viewer coordinates, modifiers, and key codes in
//! the bitmap source's own encoding.

use bitflags::bitflags;
use winit::keyboard::{ModifiersState, NamedKey};

// Virtual-key codes the source expects for non-printable keys.
const KEYCODE_PRIOR: u16 = 0x21;
const KEYCODE_NEXT: u16 = 0x22;
const KEYCODE_END: u16 = 0x23;
const KEYCODE_HOME: u16 = 0x24;
const KEYCODE_INSERT: u16 = 0x2d;

bitflags! {
    /// Modifier bits in the source's key-event encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourceMods: u32 {
        const SHIFT   = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT     = 1 << 2;
        const META    = 1 << 3;
    }
}

impl SourceMods {
    /// Translate winit modifier state into the source's encoding.
    ///
    /// META is never produced here; the viewer has no binding for it.
    pub fn from_winit(mods: ModifiersState) -> Self {
        let mut out = Self::empty();
        if mods.shift_key() {
            out |= Self::SHIFT;
        }
        if mods.control_key() {
            out |= Self::CONTROL;
        }
        if mods.alt_key() {
            out |= Self::ALT;
        }
        out
    }
}

/// Scale a viewer-window coordinate to the surface's coordinate space.
///
/// `floor(coord * surface_size / view_size)`; returns 0 for a degenerate
/// zero-size view.
pub fn view_to_surface(coord: u32, view_size: u32, surface_size: u32) -> u32 {
    if view_size == 0 {
        return 0;
    }
    (u64::from(coord) * u64::from(surface_size) / u64::from(view_size)) as u32
}

/// True for bytes that must go through the discrete key-event path instead
/// of text insertion: backspace, tab, escape, delete.
pub fn is_control_byte(byte: u8) -> bool {
    matches!(byte, 0x08 | 0x09 | 0x1b | 0x7f)
}

/// Map a winit named key to the source's virtual-key code.
///
/// Only the navigation keys the source understands are mapped; everything
/// else is `None`.
pub fn map_special_key(key: NamedKey) -> Option<u16> {
    match key {
        NamedKey::Insert => Some(KEYCODE_INSERT),
        NamedKey::Home => Some(KEYCODE_HOME),
        NamedKey::End => Some(KEYCODE_END),
        NamedKey::PageUp => Some(KEYCODE_PRIOR),
        NamedKey::PageDown => Some(KEYCODE_NEXT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_mapping_exact_values() {
        assert_eq!(view_to_surface(50, 100, 200), 100);
        assert_eq!(view_to_surface(0, 100, 200), 0);
    }

    #[test]
    fn coord_mapping_floors() {
        // 99 * 50 / 100 = 49.5 -> 49
        assert_eq!(view_to_surface(99, 100, 50), 49);
    }

    #[test]
    fn coord_mapping_identity_when_sizes_match() {
        for c in [0, 1, 37, 799] {
            assert_eq!(view_to_surface(c, 800, 800), c);
        }
    }

    #[test]
    fn coord_mapping_zero_view_size() {
        assert_eq!(view_to_surface(10, 0, 200), 0);
    }

    #[test]
    fn mods_mapping() {
        let m = SourceMods::from_winit(ModifiersState::SHIFT | ModifiersState::ALT);
        assert_eq!(m, SourceMods::SHIFT | SourceMods::ALT);

        let m = SourceMods::from_winit(ModifiersState::CONTROL);
        assert_eq!(m, SourceMods::CONTROL);
    }

    #[test]
    fn super_key_never_maps_to_meta() {
        let m = SourceMods::from_winit(ModifiersState::SUPER);
        assert!(!m.contains(SourceMods::META));
        assert!(m.is_empty());
    }

    #[test]
    fn control_bytes() {
        assert!(is_control_byte(0x08));
        assert!(is_control_byte(b'\t'));
        assert!(is_control_byte(0x1b));
        assert!(is_control_byte(0x7f));
        assert!(!is_control_byte(b'a'));
        assert!(!is_control_byte(b' '));
        assert!(!is_control_byte(b'\r'));
    }

    #[test]
    fn special_keys_map_to_source_codes() {
        assert_eq!(map_special_key(NamedKey::Insert), Some(0x2d));
        assert_eq!(map_special_key(NamedKey::Home), Some(0x24));
        assert_eq!(map_special_key(NamedKey::End), Some(0x23));
        assert_eq!(map_special_key(NamedKey::PageUp), Some(0x21));
        assert_eq!(map_special_key(NamedKey::PageDown), Some(0x22));
        assert_eq!(map_special_key(NamedKey::ArrowUp), None);
        assert_eq!(map_special_key(NamedKey::F1), None);
    }
}
